use dlg_core::{DialogueField, EditTarget, LineField};
use dlg_store::DialogueStore;

const DIALOGUE_FIELDS: [DialogueField; 3] = [
    DialogueField::RequiredResponseId,
    DialogueField::BackgroundMusic,
    DialogueField::BackgroundImage,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FieldCursor {
    Dialogue(DialogueField),
    Line(LineField),
    Response(usize),
}

#[derive(Debug)]
pub(crate) struct EditorUiState {
    pub(crate) selected_line: usize,
    pub(crate) cursor: FieldCursor,
    /// `Some` while a field is being typed into.
    pub(crate) input_buffer: Option<String>,
    pub(crate) help_visible: bool,
    pub(crate) status: String,
}

impl Default for EditorUiState {
    fn default() -> Self {
        Self {
            selected_line: 0,
            cursor: FieldCursor::Line(LineField::CharacterName),
            input_buffer: None,
            help_visible: false,
            status: String::new(),
        }
    }
}

impl EditorUiState {
    pub(crate) fn editing(&self) -> bool {
        self.input_buffer.is_some()
    }

    /// Pulls the selection back inside the dialogue after deletes and imports.
    pub(crate) fn clamp(&mut self, store: &DialogueStore) {
        let lines = &store.dialogue().lines;
        self.selected_line = self.selected_line.min(lines.len().saturating_sub(1));
        if let FieldCursor::Response(index) = self.cursor {
            let count = lines
                .get(self.selected_line)
                .map(|line| line.responses.len())
                .unwrap_or(0);
            self.cursor = if count == 0 {
                FieldCursor::Line(LineField::Text)
            } else {
                FieldCursor::Response(index.min(count - 1))
            };
        }
    }

    pub(crate) fn edit_target(&self, store: &DialogueStore) -> Option<EditTarget> {
        let line = store.dialogue().lines.get(self.selected_line);
        match self.cursor {
            FieldCursor::Dialogue(field) => Some(EditTarget::Dialogue(field)),
            FieldCursor::Line(field) => line.map(|_| EditTarget::Line {
                line_index: self.selected_line,
                field,
            }),
            FieldCursor::Response(response_index) => line
                .filter(|line| response_index < line.responses.len())
                .map(|_| EditTarget::Response {
                    line_index: self.selected_line,
                    response_index,
                }),
        }
    }

    pub(crate) fn current_value(&self, store: &DialogueStore) -> Option<String> {
        let dialogue = store.dialogue();
        let value = match self.edit_target(store)? {
            EditTarget::Dialogue(field) => match field {
                DialogueField::RequiredResponseId => &dialogue.required_response_id,
                DialogueField::BackgroundMusic => &dialogue.background_music,
                DialogueField::BackgroundImage => &dialogue.background_image,
            },
            EditTarget::Line { line_index, field } => {
                let line = &dialogue.lines[line_index];
                match field {
                    LineField::RequiredResponseId => &line.required_response_id,
                    LineField::CharacterName => &line.character_name,
                    LineField::CharacterImage => &line.character_image,
                    LineField::Text => &line.text,
                }
            }
            EditTarget::Response {
                line_index,
                response_index,
            } => &dialogue.lines[line_index].responses[response_index].text,
        };
        Some(value.clone())
    }

    pub(crate) fn select_line(&mut self, delta: isize, store: &DialogueStore) {
        let count = store.dialogue().lines.len();
        if count == 0 {
            return;
        }
        let next = self.selected_line as isize + delta;
        self.selected_line = next.clamp(0, count as isize - 1) as usize;
        if matches!(self.cursor, FieldCursor::Dialogue(_)) {
            self.cursor = FieldCursor::Line(LineField::CharacterName);
        }
        self.clamp(store);
    }

    pub(crate) fn select_response(&mut self, delta: isize, store: &DialogueStore) {
        let count = store
            .dialogue()
            .lines
            .get(self.selected_line)
            .map(|line| line.responses.len())
            .unwrap_or(0);
        if count == 0 {
            return;
        }
        let current = match self.cursor {
            FieldCursor::Response(index) => index as isize,
            _ if delta < 0 => count as isize,
            _ => -1,
        };
        let next = (current + delta).clamp(0, count as isize - 1) as usize;
        self.cursor = FieldCursor::Response(next);
    }

    /// Cycles line fields, then the line's responses, then wraps.
    pub(crate) fn next_field(&mut self, store: &DialogueStore) {
        let response_count = store
            .dialogue()
            .lines
            .get(self.selected_line)
            .map(|line| line.responses.len())
            .unwrap_or(0);
        let first = FieldCursor::Line(LineField::ALL[0]);
        self.cursor = match self.cursor {
            FieldCursor::Dialogue(_) => first,
            FieldCursor::Line(field) => {
                let position = LineField::ALL
                    .iter()
                    .position(|candidate| *candidate == field)
                    .unwrap_or(0);
                match LineField::ALL.get(position + 1) {
                    Some(next) => FieldCursor::Line(*next),
                    None if response_count > 0 => FieldCursor::Response(0),
                    None => first,
                }
            }
            FieldCursor::Response(index) if index + 1 < response_count => {
                FieldCursor::Response(index + 1)
            }
            FieldCursor::Response(_) => first,
        };
    }

    pub(crate) fn next_dialogue_field(&mut self) {
        self.cursor = match self.cursor {
            FieldCursor::Dialogue(field) => {
                let position = DIALOGUE_FIELDS
                    .iter()
                    .position(|candidate| *candidate == field)
                    .unwrap_or(0);
                FieldCursor::Dialogue(DIALOGUE_FIELDS[(position + 1) % DIALOGUE_FIELDS.len()])
            }
            _ => FieldCursor::Dialogue(DIALOGUE_FIELDS[0]),
        };
    }

    pub(crate) fn on_required_response_field(&self) -> bool {
        matches!(
            self.cursor,
            FieldCursor::Dialogue(DialogueField::RequiredResponseId)
                | FieldCursor::Line(LineField::RequiredResponseId)
        )
    }
}

#[cfg(test)]
mod tui_state_tests {
    use super::*;
    use dlg_store::StoreOptions;

    fn store_with(lines: &[usize]) -> DialogueStore {
        let mut store = DialogueStore::new(StoreOptions {
            random_seed: Some(8),
        });
        for (line_index, responses) in lines.iter().enumerate() {
            store.add_line();
            for _ in 0..*responses {
                store
                    .add_response(line_index)
                    .expect("line exists")
                    .expect("line has room");
            }
        }
        store
    }

    #[test]
    fn next_field_walks_fields_then_responses() {
        let store = store_with(&[2]);
        let mut ui = EditorUiState::default();
        let mut seen = vec![ui.cursor];
        for _ in 0..6 {
            ui.next_field(&store);
            seen.push(ui.cursor);
        }
        assert_eq!(
            seen,
            vec![
                FieldCursor::Line(LineField::CharacterName),
                FieldCursor::Line(LineField::CharacterImage),
                FieldCursor::Line(LineField::Text),
                FieldCursor::Line(LineField::RequiredResponseId),
                FieldCursor::Response(0),
                FieldCursor::Response(1),
                FieldCursor::Line(LineField::CharacterName),
            ]
        );
    }

    #[test]
    fn clamp_recovers_after_deletes() {
        let mut store = store_with(&[1, 3]);
        let mut ui = EditorUiState {
            selected_line: 1,
            cursor: FieldCursor::Response(2),
            ..EditorUiState::default()
        };
        store.delete_response(1, 2).expect("response exists");
        ui.clamp(&store);
        assert_eq!(ui.cursor, FieldCursor::Response(1));

        store.delete_line(1).expect("line exists");
        ui.clamp(&store);
        assert_eq!(ui.selected_line, 0);
        assert_eq!(ui.cursor, FieldCursor::Response(0));

        store.delete_line(0).expect("line exists");
        ui.clamp(&store);
        assert_eq!(ui.cursor, FieldCursor::Line(LineField::Text));
        assert_eq!(ui.edit_target(&store), None);
    }

    #[test]
    fn dialogue_fields_cycle_and_resolve_without_lines() {
        let store = store_with(&[]);
        let mut ui = EditorUiState::default();
        ui.next_dialogue_field();
        assert_eq!(
            ui.edit_target(&store),
            Some(EditTarget::Dialogue(DialogueField::RequiredResponseId))
        );
        assert!(ui.on_required_response_field());
        ui.next_dialogue_field();
        ui.next_dialogue_field();
        ui.next_dialogue_field();
        assert_eq!(
            ui.cursor,
            FieldCursor::Dialogue(DialogueField::RequiredResponseId)
        );
        assert_eq!(ui.current_value(&store), Some(String::new()));
    }

    #[test]
    fn select_response_enters_from_either_end() {
        let store = store_with(&[3]);
        let mut ui = EditorUiState::default();
        ui.select_response(1, &store);
        assert_eq!(ui.cursor, FieldCursor::Response(0));

        ui.cursor = FieldCursor::Line(LineField::Text);
        ui.select_response(-1, &store);
        assert_eq!(ui.cursor, FieldCursor::Response(2));
    }
}
