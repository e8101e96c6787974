use serde::{Deserialize, Serialize};

pub const MAX_RESPONSES_PER_LINE: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub id: String,
    pub text: String,
}

impl Response {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogueLine {
    pub required_response_id: String,
    pub character_name: String,
    pub character_image: String,
    pub text: String,
    pub responses: Vec<Response>,
}

impl DialogueLine {
    pub fn is_full(&self) -> bool {
        self.responses.len() >= MAX_RESPONSES_PER_LINE
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dialogue {
    pub required_response_id: String,
    // Older exports carry the key misspelled.
    #[serde(alias = "backgoundMusic")]
    pub background_music: String,
    pub background_image: String,
    pub lines: Vec<DialogueLine>,
}

/// A response together with the index of the line that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseRef<'a> {
    pub line_index: usize,
    pub response_index: usize,
    pub response: &'a Response,
}

impl Dialogue {
    /// Every response in document order.
    pub fn responses(&self) -> impl Iterator<Item = ResponseRef<'_>> {
        self.lines
            .iter()
            .enumerate()
            .flat_map(|(line_index, line)| {
                line.responses
                    .iter()
                    .enumerate()
                    .map(move |(response_index, response)| ResponseRef {
                        line_index,
                        response_index,
                        response,
                    })
            })
    }

    pub fn find_response(&self, id: &str) -> Option<ResponseRef<'_>> {
        if id.is_empty() {
            return None;
        }
        self.responses().find(|entry| entry.response.id == id)
    }

    pub fn contains_response_id(&self, id: &str) -> bool {
        self.find_response(id).is_some()
    }

    pub fn response_count(&self) -> usize {
        self.lines.iter().map(|line| line.responses.len()).sum()
    }
}
