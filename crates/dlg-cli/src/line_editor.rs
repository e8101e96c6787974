use std::io::{self, BufRead, Write};
use std::path::Path;

use dlg_core::{DialogueError, EditCommand, EditTarget};
use dlg_store::DialogueStore;

use crate::{
    dialogue_outline, map_cli_input_parse, map_tui_io, osc52_sequence, EditorAction,
    EditorContext,
};

const HELP_TEXT: &str = "commands: :help :show :add-line :del-line i :add-resp i :del-resp i j \
:set path value :lookup i :candidates :copy i j :export [path] :import [path] :quit";

pub(crate) fn run_line_editor(
    context: &EditorContext<'_>,
    store: &mut DialogueStore,
) -> Result<i32, DialogueError> {
    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut writer = io::stdout();
    run_line_editor_with_io(context, store, &mut reader, &mut writer)
}

pub(crate) fn run_line_editor_with_io(
    context: &EditorContext<'_>,
    store: &mut DialogueStore,
    reader: &mut dyn BufRead,
    writer: &mut dyn Write,
) -> Result<i32, DialogueError> {
    writeln!(writer, "Dialogue editor: {}", context.file).map_err(map_tui_io)?;
    writeln!(writer, "{}", HELP_TEXT).map_err(map_tui_io)?;

    loop {
        let Some(raw) = prompt_input_from("> ", reader, writer)? else {
            return Ok(0);
        };
        if raw.trim().is_empty() {
            continue;
        }
        let mut lines = Vec::new();
        let mut emit = |line: String| lines.push(line);
        let action = handle_editor_command(&raw, context, store, &mut emit);
        for line in lines {
            writeln!(writer, "{}", line).map_err(map_tui_io)?;
        }
        match action {
            Ok(EditorAction::Quit) => return Ok(0),
            Ok(EditorAction::Continue) => {}
            Ok(EditorAction::NotHandled) => {
                writeln!(writer, "unknown command: {}", raw.trim()).map_err(map_tui_io)?;
            }
            Err(error) => {
                writeln!(writer, "error: {}", error).map_err(map_tui_io)?;
            }
        }
    }
}

pub(crate) fn handle_editor_command(
    raw: &str,
    context: &EditorContext<'_>,
    store: &mut DialogueStore,
    emit: &mut dyn FnMut(String),
) -> Result<EditorAction, DialogueError> {
    let mut parts = raw.trim_start().splitn(2, char::is_whitespace);
    let command = parts.next().unwrap_or_default();
    let raw_rest = parts.next().unwrap_or_default();
    let rest = raw_rest.trim();
    let args = rest.split_whitespace().collect::<Vec<_>>();

    match command {
        ":help" => {
            emit(HELP_TEXT.to_string());
        }
        ":show" => {
            for line in dialogue_outline(store) {
                emit(line);
            }
        }
        ":add-line" => {
            let line_index = store.add_line();
            emit(format!("added line {}", line_index));
        }
        ":del-line" => {
            let line_index = index_arg(&args, 0)?;
            let removed = store.delete_line(line_index)?;
            emit(format!(
                "deleted line {} ({} responses)",
                line_index,
                removed.responses.len()
            ));
        }
        ":add-resp" => {
            let line_index = index_arg(&args, 0)?;
            match store.add_response(line_index)? {
                Some(id) => {
                    let color = store
                        .response_color(&id)
                        .map(|color| color.hex())
                        .unwrap_or_default();
                    emit(format!("added response {} {}", id, color));
                }
                None => emit(format!("line {} already has 4 responses", line_index)),
            }
        }
        ":del-resp" => {
            let line_index = index_arg(&args, 0)?;
            let response_index = index_arg(&args, 1)?;
            let removed = store.delete_response(line_index, response_index)?;
            emit(format!("deleted response {}", removed.id));
        }
        ":set" => {
            // One separator after the path; the value is stored as typed.
            let rest = raw_rest.trim_start();
            let (path, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            let target = EditTarget::parse(path)?;
            store.update_field(&EditCommand::new(target, value))?;
            emit(format!("set {}", target));
        }
        ":lookup" => {
            let line_index = index_arg(&args, 0)?;
            let line = store.dialogue().lines.get(line_index).ok_or_else(|| {
                DialogueError::new(
                    "STORE_LINE_INDEX",
                    format!("Line index {} out of range.", line_index),
                )
            })?;
            match store.lookup_required_response(line) {
                Some(response) => emit(format!(
                    "line {} requires {} \"{}\" {}",
                    line_index,
                    response.id,
                    response.text,
                    store
                        .line_highlight_color(line_index)
                        .map(|color| color.hex())
                        .unwrap_or_default()
                )),
                None => emit(format!("line {} has no resolvable requirement", line_index)),
            }
        }
        ":candidates" => {
            let candidates = store.response_candidates();
            if candidates.is_empty() {
                emit("(no responses)".to_string());
            }
            for candidate in candidates {
                emit(format!(
                    "{} line {} ({}) \"{}\" {}",
                    candidate.id,
                    candidate.line_index,
                    candidate.response_index,
                    candidate.text,
                    candidate.color.map(|color| color.hex()).unwrap_or_default()
                ));
            }
        }
        ":copy" => {
            let line_index = index_arg(&args, 0)?;
            let response_index = index_arg(&args, 1)?;
            let response = store
                .dialogue()
                .lines
                .get(line_index)
                .and_then(|line| line.responses.get(response_index))
                .ok_or_else(|| {
                    DialogueError::new(
                        "STORE_RESPONSE_INDEX",
                        format!("No response {} on line {}.", response_index, line_index),
                    )
                })?;
            // The terminal picks the id up from the escape sequence.
            emit(format!("{}{}", osc52_sequence(&response.id), response.id));
        }
        ":export" => {
            let target = args.first().copied().unwrap_or(context.file);
            store.export_to_file(Path::new(target))?;
            emit(format!("exported: {}", target));
        }
        ":import" => {
            let source = args.first().copied().unwrap_or(context.file);
            store.import_from_file(Path::new(source))?;
            emit(format!(
                "imported: {} ({} lines)",
                source,
                store.dialogue().lines.len()
            ));
        }
        ":quit" => {
            emit("bye".to_string());
            return Ok(EditorAction::Quit);
        }
        _ => return Ok(EditorAction::NotHandled),
    }
    Ok(EditorAction::Continue)
}

fn index_arg(args: &[&str], position: usize) -> Result<usize, DialogueError> {
    let raw = args.get(position).ok_or_else(|| {
        DialogueError::new(
            "CLI_INPUT_PARSE",
            format!("Missing index argument #{}.", position + 1),
        )
    })?;
    raw.parse::<usize>().map_err(map_cli_input_parse)
}

/// Returns `None` once the reader is exhausted.
pub(crate) fn prompt_input_from(
    prefix: &str,
    reader: &mut dyn BufRead,
    writer: &mut dyn Write,
) -> Result<Option<String>, DialogueError> {
    write!(writer, "{}", prefix).map_err(map_tui_io)?;
    writer.flush().map_err(map_tui_io)?;
    let mut input = String::new();
    let read = reader.read_line(&mut input).map_err(map_tui_io)?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(input.trim_end_matches(&['\r', '\n'][..]).to_string()))
}
