use std::mem;
use std::path::Path;

use dlg_core::{
    apply_edit, ColorToken, Dialogue, DialogueError, DialogueLine, EditCommand, Response,
};

use crate::colors::{pick_color, ColorAssignment};
use crate::ids::generate_response_id;
use crate::io::{export_json, parse_dialogue, read_dialogue_file, write_dialogue_file};
use crate::rng::clock_seed;

#[derive(Debug, Clone, Default)]
pub struct StoreOptions {
    /// Seeds id and color draws. Defaults to a clock-derived value.
    pub random_seed: Option<u32>,
}

/// A response as offered by the required-response picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseCandidate {
    pub line_index: usize,
    pub response_index: usize,
    pub id: String,
    pub text: String,
    pub color: Option<ColorToken>,
}

/// Owns the dialogue being edited and the colors shown for its responses.
/// Every operation leaves both in step.
#[derive(Debug, Clone)]
pub struct DialogueStore {
    dialogue: Dialogue,
    colors: ColorAssignment,
    rng_state: u32,
}

impl Default for DialogueStore {
    fn default() -> Self {
        Self::new(StoreOptions::default())
    }
}

impl DialogueStore {
    pub fn new(options: StoreOptions) -> Self {
        Self {
            dialogue: Dialogue::default(),
            colors: ColorAssignment::new(),
            rng_state: options.random_seed.unwrap_or_else(clock_seed),
        }
    }

    pub fn dialogue(&self) -> &Dialogue {
        &self.dialogue
    }

    pub fn colors(&self) -> &ColorAssignment {
        &self.colors
    }

    pub fn add_line(&mut self) -> usize {
        self.dialogue.lines.push(DialogueLine::default());
        let line_index = self.dialogue.lines.len() - 1;
        log::debug!("added line {}", line_index);
        line_index
    }

    /// Removes the line and the colors of its responses. References to those
    /// responses from other lines are left dangling.
    pub fn delete_line(&mut self, line_index: usize) -> Result<DialogueLine, DialogueError> {
        self.check_line_index(line_index)?;
        let line = self.dialogue.lines.remove(line_index);
        for response in &line.responses {
            self.colors.remove(&response.id);
        }
        log::debug!(
            "deleted line {} with {} responses",
            line_index,
            line.responses.len()
        );
        Ok(line)
    }

    /// Appends an empty response with a fresh id and color. Returns `None`
    /// without touching anything when the line is already full.
    pub fn add_response(&mut self, line_index: usize) -> Result<Option<String>, DialogueError> {
        self.check_line_index(line_index)?;
        if self.dialogue.lines[line_index].is_full() {
            log::debug!("line {} is full, response not added", line_index);
            return Ok(None);
        }

        let id = generate_response_id(&self.dialogue, &mut self.rng_state);
        let color = self.allocate_color();
        self.dialogue.lines[line_index]
            .responses
            .push(Response::new(id.clone()));
        self.colors.insert(id.clone(), color);
        log::debug!("added response {} ({}) to line {}", id, color, line_index);
        Ok(Some(id))
    }

    pub fn delete_response(
        &mut self,
        line_index: usize,
        response_index: usize,
    ) -> Result<Response, DialogueError> {
        self.check_line_index(line_index)?;
        let responses = &mut self.dialogue.lines[line_index].responses;
        if response_index >= responses.len() {
            return Err(DialogueError::new(
                "STORE_RESPONSE_INDEX",
                format!(
                    "Response index {} out of range for line {} ({} responses).",
                    response_index,
                    line_index,
                    responses.len()
                ),
            ));
        }
        let response = responses.remove(response_index);
        self.colors.remove(&response.id);
        log::debug!("deleted response {} from line {}", response.id, line_index);
        Ok(response)
    }

    pub fn update_field(&mut self, command: &EditCommand) -> Result<(), DialogueError> {
        apply_edit(&mut self.dialogue, command)?;
        log::debug!("set {}", command.target);
        Ok(())
    }

    /// Draws a color not held by any live response; wraps once the palette
    /// is used up. Does not record the color anywhere.
    pub fn allocate_color(&mut self) -> ColorToken {
        pick_color(&self.colors, &mut self.rng_state)
    }

    pub fn export_json(&self) -> String {
        export_json(&self.dialogue)
    }

    pub fn export_to_file(&self, path: &Path) -> Result<(), DialogueError> {
        write_dialogue_file(path, &self.dialogue)?;
        log::info!(
            "exported {} lines to {}",
            self.dialogue.lines.len(),
            path.display()
        );
        Ok(())
    }

    /// Replaces the dialogue wholesale and recolors every response in
    /// document order. On error the store is unchanged.
    pub fn import_json(&mut self, raw: &str) -> Result<(), DialogueError> {
        let dialogue = parse_dialogue(raw).inspect_err(|error| {
            log::warn!("import rejected: {}", error);
        })?;
        self.replace_dialogue(dialogue);
        Ok(())
    }

    pub fn import_from_file(&mut self, path: &Path) -> Result<(), DialogueError> {
        let dialogue = read_dialogue_file(path).inspect_err(|error| {
            log::warn!("import of {} rejected: {}", path.display(), error);
        })?;
        self.replace_dialogue(dialogue);
        log::info!(
            "imported {} lines from {}",
            self.dialogue.lines.len(),
            path.display()
        );
        Ok(())
    }

    pub fn lookup_required_response(&self, line: &DialogueLine) -> Option<&Response> {
        self.dialogue
            .find_response(&line.required_response_id)
            .map(|entry| entry.response)
    }

    pub fn lookup_dialogue_required_response(&self) -> Option<&Response> {
        self.dialogue
            .find_response(&self.dialogue.required_response_id)
            .map(|entry| entry.response)
    }

    /// Color of the response a line requires, if the reference resolves.
    pub fn line_highlight_color(&self, line_index: usize) -> Option<ColorToken> {
        let line = self.dialogue.lines.get(line_index)?;
        let response = self.lookup_required_response(line)?;
        self.colors.get(&response.id)
    }

    pub fn response_color(&self, response_id: &str) -> Option<ColorToken> {
        self.colors.get(response_id)
    }

    pub fn response_candidates(&self) -> Vec<ResponseCandidate> {
        self.dialogue
            .responses()
            .map(|entry| ResponseCandidate {
                line_index: entry.line_index,
                response_index: entry.response_index,
                id: entry.response.id.clone(),
                text: entry.response.text.clone(),
                color: self.colors.get(&entry.response.id),
            })
            .collect()
    }

    fn replace_dialogue(&mut self, dialogue: Dialogue) {
        let mut colors = ColorAssignment::new();
        for entry in dialogue.responses() {
            let color = pick_color(&colors, &mut self.rng_state);
            colors.insert(entry.response.id.clone(), color);
        }
        self.dialogue = dialogue;
        let previous = mem::replace(&mut self.colors, colors);
        log::debug!(
            "recolored {} responses (dropped {} previous colors)",
            self.colors.len(),
            previous.len()
        );
    }

    fn check_line_index(&self, line_index: usize) -> Result<(), DialogueError> {
        if line_index < self.dialogue.lines.len() {
            return Ok(());
        }
        Err(DialogueError::new(
            "STORE_LINE_INDEX",
            format!(
                "Line index {} out of range ({} lines).",
                line_index,
                self.dialogue.lines.len()
            ),
        ))
    }
}
