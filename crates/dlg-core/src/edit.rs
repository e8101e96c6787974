use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::{Dialogue, DialogueError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogueField {
    RequiredResponseId,
    BackgroundMusic,
    BackgroundImage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineField {
    RequiredResponseId,
    CharacterName,
    CharacterImage,
    Text,
}

impl DialogueField {
    pub fn key(self) -> &'static str {
        match self {
            Self::RequiredResponseId => "requiredResponseId",
            Self::BackgroundMusic => "backgroundMusic",
            Self::BackgroundImage => "backgroundImage",
        }
    }

    fn from_key(key: &str) -> Option<Self> {
        match key {
            "requiredResponseId" => Some(Self::RequiredResponseId),
            "backgroundMusic" => Some(Self::BackgroundMusic),
            "backgroundImage" => Some(Self::BackgroundImage),
            _ => None,
        }
    }
}

impl LineField {
    pub const ALL: [LineField; 4] = [
        Self::CharacterName,
        Self::CharacterImage,
        Self::Text,
        Self::RequiredResponseId,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::RequiredResponseId => "requiredResponseId",
            Self::CharacterName => "characterName",
            Self::CharacterImage => "characterImage",
            Self::Text => "text",
        }
    }

    fn from_key(key: &str) -> Option<Self> {
        match key {
            "requiredResponseId" => Some(Self::RequiredResponseId),
            "characterName" => Some(Self::CharacterName),
            "characterImage" => Some(Self::CharacterImage),
            "text" => Some(Self::Text),
            _ => None,
        }
    }
}

/// Which scalar a field update writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    Dialogue(DialogueField),
    Line {
        line_index: usize,
        field: LineField,
    },
    Response {
        line_index: usize,
        response_index: usize,
    },
}

impl EditTarget {
    /// Parses `backgroundMusic`, `lines.2.text`, `lines.0.responses.1.text` and friends.
    pub fn parse(path: &str) -> Result<Self, DialogueError> {
        let path = path.trim();
        if let Some(field) = DialogueField::from_key(path) {
            return Ok(Self::Dialogue(field));
        }

        let invalid = || {
            DialogueError::new(
                "EDIT_PATH_INVALID",
                format!("Unknown field path \"{}\".", path),
            )
        };
        let captures = field_path_regex().captures(path).ok_or_else(invalid)?;
        let line_index = captures[1].parse::<usize>().map_err(|_| invalid())?;

        if let Some(response_index) = captures.get(2) {
            let response_index = response_index
                .as_str()
                .parse::<usize>()
                .map_err(|_| invalid())?;
            return Ok(Self::Response {
                line_index,
                response_index,
            });
        }

        let field = captures
            .get(3)
            .and_then(|key| LineField::from_key(key.as_str()))
            .ok_or_else(invalid)?;
        Ok(Self::Line { line_index, field })
    }
}

impl fmt::Display for EditTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dialogue(field) => f.write_str(field.key()),
            Self::Line { line_index, field } => write!(f, "lines.{}.{}", line_index, field.key()),
            Self::Response {
                line_index,
                response_index,
            } => write!(f, "lines.{}.responses.{}.text", line_index, response_index),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditCommand {
    pub target: EditTarget,
    pub value: String,
}

impl EditCommand {
    pub fn new(target: EditTarget, value: impl Into<String>) -> Self {
        Self {
            target,
            value: value.into(),
        }
    }
}

fn field_path_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"^lines\.(\d+)\.(?:responses\.(\d+)\.text|([A-Za-z]+))$")
            .expect("field path regex must compile")
    })
}

/// Replaces one scalar. Response ids are not addressable.
pub fn apply_edit(dialogue: &mut Dialogue, command: &EditCommand) -> Result<(), DialogueError> {
    let slot = match command.target {
        EditTarget::Dialogue(field) => match field {
            DialogueField::RequiredResponseId => &mut dialogue.required_response_id,
            DialogueField::BackgroundMusic => &mut dialogue.background_music,
            DialogueField::BackgroundImage => &mut dialogue.background_image,
        },
        EditTarget::Line { line_index, field } => {
            let line_count = dialogue.lines.len();
            let line = dialogue
                .lines
                .get_mut(line_index)
                .ok_or_else(|| line_index_error(line_index, line_count))?;
            match field {
                LineField::RequiredResponseId => &mut line.required_response_id,
                LineField::CharacterName => &mut line.character_name,
                LineField::CharacterImage => &mut line.character_image,
                LineField::Text => &mut line.text,
            }
        }
        EditTarget::Response {
            line_index,
            response_index,
        } => {
            let line_count = dialogue.lines.len();
            let line = dialogue
                .lines
                .get_mut(line_index)
                .ok_or_else(|| line_index_error(line_index, line_count))?;
            let response_count = line.responses.len();
            let response = line.responses.get_mut(response_index).ok_or_else(|| {
                DialogueError::new(
                    "EDIT_RESPONSE_INDEX",
                    format!(
                        "Response index {} out of range for line {} ({} responses).",
                        response_index, line_index, response_count
                    ),
                )
            })?;
            &mut response.text
        }
    };
    *slot = command.value.clone();
    Ok(())
}

fn line_index_error(line_index: usize, line_count: usize) -> DialogueError {
    DialogueError::new(
        "EDIT_LINE_INDEX",
        format!(
            "Line index {} out of range ({} lines).",
            line_index, line_count
        ),
    )
}
