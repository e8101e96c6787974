use std::path::Path;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use dlg_core::{DialogueError, EditCommand, LineField};
use dlg_store::DialogueStore;

use crate::tui_state::{EditorUiState, FieldCursor};
use crate::{copy_to_clipboard, EditorContext};

/// Applies one key press. Returns `true` when the editor should exit.
pub(crate) fn handle_key(
    key: KeyEvent,
    context: &EditorContext<'_>,
    store: &mut DialogueStore,
    ui: &mut EditorUiState,
) -> Result<bool, DialogueError> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Ok(true);
    }
    if ui.editing() {
        handle_input_key(key, store, ui)?;
        return Ok(false);
    }
    if key.code == KeyCode::Esc || matches!(key.code, KeyCode::Char('q')) {
        return Ok(true);
    }

    match key.code {
        KeyCode::Char('h') => ui.help_visible = !ui.help_visible,
        KeyCode::Up => ui.select_line(-1, store),
        KeyCode::Down => ui.select_line(1, store),
        KeyCode::Left => ui.select_response(-1, store),
        KeyCode::Right => ui.select_response(1, store),
        KeyCode::Tab => ui.next_field(store),
        KeyCode::Char('m') => ui.next_dialogue_field(),
        KeyCode::Char('a') => {
            ui.selected_line = store.add_line();
            ui.cursor = FieldCursor::Line(LineField::CharacterName);
            ui.status = format!("added line {}", ui.selected_line);
        }
        KeyCode::Char('d') => {
            if store.dialogue().lines.is_empty() {
                ui.status = "no line to delete".to_string();
                return Ok(false);
            }
            let removed = store.delete_line(ui.selected_line)?;
            ui.status = format!(
                "deleted line {} ({} responses)",
                ui.selected_line,
                removed.responses.len()
            );
            ui.clamp(store);
        }
        KeyCode::Char('r') => {
            if store.dialogue().lines.is_empty() {
                ui.status = "add a line first".to_string();
                return Ok(false);
            }
            match store.add_response(ui.selected_line)? {
                Some(id) => {
                    let count = store.dialogue().lines[ui.selected_line].responses.len();
                    ui.cursor = FieldCursor::Response(count - 1);
                    ui.status = format!("added response {}", id);
                }
                None => ui.status = "line already has 4 responses".to_string(),
            }
        }
        KeyCode::Char('x') => {
            let FieldCursor::Response(response_index) = ui.cursor else {
                ui.status = "select a response first".to_string();
                return Ok(false);
            };
            let removed = store.delete_response(ui.selected_line, response_index)?;
            ui.status = format!("deleted response {}", removed.id);
            ui.clamp(store);
        }
        KeyCode::Char('y') => {
            let id = match ui.cursor {
                FieldCursor::Response(response_index) => store
                    .dialogue()
                    .lines
                    .get(ui.selected_line)
                    .and_then(|line| line.responses.get(response_index))
                    .map(|response| response.id.clone()),
                _ => None,
            };
            let Some(id) = id else {
                ui.status = "select a response first".to_string();
                return Ok(false);
            };
            ui.status = match copy_to_clipboard(&id) {
                Ok(backend) => format!("copied {} ({})", id, backend),
                Err(error) => format!("clipboard error: {} (id {})", error, id),
            };
        }
        KeyCode::Char('p') => pick_next_required_response(store, ui)?,
        KeyCode::Enter => match ui.current_value(store) {
            Some(value) => {
                ui.input_buffer = Some(value);
                ui.status = "editing (enter to apply, esc to cancel)".to_string();
            }
            None => ui.status = "nothing to edit".to_string(),
        },
        KeyCode::Char('s') => {
            store.export_to_file(Path::new(context.file))?;
            ui.status = format!("exported to {}", context.file);
        }
        KeyCode::Char('l') => {
            store.import_from_file(Path::new(context.file))?;
            ui.clamp(store);
            ui.status = format!("imported from {}", context.file);
        }
        _ => {}
    }

    Ok(false)
}

fn handle_input_key(
    key: KeyEvent,
    store: &mut DialogueStore,
    ui: &mut EditorUiState,
) -> Result<(), DialogueError> {
    match key.code {
        KeyCode::Esc => {
            ui.input_buffer = None;
            ui.status = "edit cancelled".to_string();
        }
        KeyCode::Enter => {
            let value = ui.input_buffer.take().unwrap_or_default();
            let Some(target) = ui.edit_target(store) else {
                ui.status = "nothing to edit".to_string();
                return Ok(());
            };
            store.update_field(&EditCommand::new(target, value))?;
            ui.status = format!("set {}", target);
        }
        KeyCode::Backspace | KeyCode::Delete => {
            if let Some(buffer) = ui.input_buffer.as_mut() {
                buffer.pop();
            }
        }
        KeyCode::Char(ch)
            if !key.modifiers.contains(KeyModifiers::CONTROL)
                && !key.modifiers.contains(KeyModifiers::ALT) =>
        {
            if let Some(buffer) = ui.input_buffer.as_mut() {
                buffer.push(ch);
            }
        }
        _ => {}
    }
    Ok(())
}

/// Steps the focused required-response field through every response id,
/// then back to empty.
fn pick_next_required_response(
    store: &mut DialogueStore,
    ui: &mut EditorUiState,
) -> Result<(), DialogueError> {
    if !ui.on_required_response_field() {
        ui.status = "focus a requires field first (tab / m)".to_string();
        return Ok(());
    }
    let (Some(target), Some(current)) = (ui.edit_target(store), ui.current_value(store)) else {
        ui.status = "nothing to edit".to_string();
        return Ok(());
    };
    let mut options = store
        .response_candidates()
        .into_iter()
        .map(|candidate| candidate.id)
        .collect::<Vec<_>>();
    options.push(String::new());
    let next = match options.iter().position(|id| *id == current) {
        Some(position) => options[(position + 1) % options.len()].clone(),
        None => options[0].clone(),
    };
    store.update_field(&EditCommand::new(target, next.as_str()))?;
    ui.status = if next.is_empty() {
        "requirement cleared".to_string()
    } else {
        format!("requires {}", next)
    };
    Ok(())
}
