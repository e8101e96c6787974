use std::path::Path;

use dlg_core::{DialogueError, EditCommand, EditTarget};
use dlg_store::DialogueStore;

use crate::{
    create_store_file, dialogue_report, emit_lines, load_store, AgentArgs, AgentCommand, FileArgs,
    LineArgs, NewArgs, ResponseArgs, SetArgs,
};

pub(super) fn run_agent(args: AgentArgs, seed: Option<u32>) -> Result<i32, DialogueError> {
    match args.command {
        AgentCommand::New(args) => run_new(args, seed),
        AgentCommand::Show(args) => run_show(args, seed),
        AgentCommand::AddLine(args) => run_add_line(args, seed),
        AgentCommand::DeleteLine(args) => run_delete_line(args, seed),
        AgentCommand::AddResponse(args) => run_add_response(args, seed),
        AgentCommand::DeleteResponse(args) => run_delete_response(args, seed),
        AgentCommand::Set(args) => run_set(args, seed),
        AgentCommand::Lookup(args) => run_lookup(args, seed),
        AgentCommand::CopyId(args) => run_copy_id(args, seed),
    }
}

fn run_new(args: NewArgs, seed: Option<u32>) -> Result<i32, DialogueError> {
    create_store_file(Path::new(&args.file), args.force, seed)?;
    emit_lines([format!("FILE:{}", args.file)]);
    Ok(0)
}

fn run_show(args: FileArgs, seed: Option<u32>) -> Result<i32, DialogueError> {
    let store = load_store(Path::new(&args.file), seed)?;
    emit_lines(dialogue_report(&store));
    Ok(0)
}

fn run_add_line(args: FileArgs, seed: Option<u32>) -> Result<i32, DialogueError> {
    run_mutation(&args.file, seed, |store| {
        let line_index = store.add_line();
        Ok(vec![format!("LINE_INDEX:{}", line_index)])
    })
}

fn run_delete_line(args: LineArgs, seed: Option<u32>) -> Result<i32, DialogueError> {
    run_mutation(&args.file, seed, |store| {
        let removed = store.delete_line(args.line)?;
        let mut out = vec![format!("REMOVED_RESPONSES:{}", removed.responses.len())];
        out.extend(
            removed
                .responses
                .iter()
                .map(|response| format!("REMOVED_ID:{}", response.id)),
        );
        Ok(out)
    })
}

fn run_add_response(args: LineArgs, seed: Option<u32>) -> Result<i32, DialogueError> {
    run_mutation(&args.file, seed, |store| {
        let Some(id) = store.add_response(args.line)? else {
            return Ok(vec!["RESPONSE_ID:NONE".to_string(), "COLOR:NONE".to_string()]);
        };
        let color = store
            .response_color(&id)
            .map(|color| color.hex())
            .unwrap_or_else(|| "NONE".to_string());
        Ok(vec![format!("RESPONSE_ID:{}", id), format!("COLOR:{}", color)])
    })
}

fn run_delete_response(args: ResponseArgs, seed: Option<u32>) -> Result<i32, DialogueError> {
    run_mutation(&args.file, seed, |store| {
        let removed = store.delete_response(args.line, args.response)?;
        Ok(vec![format!("REMOVED_ID:{}", removed.id)])
    })
}

fn run_set(args: SetArgs, seed: Option<u32>) -> Result<i32, DialogueError> {
    let target = EditTarget::parse(&args.path)?;
    run_mutation(&args.file, seed, |store| {
        store.update_field(&EditCommand::new(target, args.value.as_str()))?;
        Ok(vec![format!("PATH:{}", target)])
    })
}

fn run_lookup(args: LineArgs, seed: Option<u32>) -> Result<i32, DialogueError> {
    let store = load_store(Path::new(&args.file), seed)?;
    let line = store.dialogue().lines.get(args.line).ok_or_else(|| {
        DialogueError::new(
            "STORE_LINE_INDEX",
            format!(
                "Line index {} out of range ({} lines).",
                args.line,
                store.dialogue().lines.len()
            ),
        )
    })?;
    let out = match store.lookup_required_response(line) {
        Some(response) => vec![
            format!(
                "MATCH:{}|{}",
                response.id,
                serde_json::to_string(&response.text).expect("string json")
            ),
            format!(
                "COLOR:{}",
                store
                    .line_highlight_color(args.line)
                    .map(|color| color.hex())
                    .unwrap_or_else(|| "NONE".to_string())
            ),
        ],
        None => vec!["MATCH:NONE".to_string(), "COLOR:NONE".to_string()],
    };
    emit_lines(out);
    Ok(0)
}

// Stands in for "copy id to clipboard": the caller gets the raw id.
fn run_copy_id(args: ResponseArgs, seed: Option<u32>) -> Result<i32, DialogueError> {
    let store = load_store(Path::new(&args.file), seed)?;
    let response = store
        .dialogue()
        .lines
        .get(args.line)
        .and_then(|line| line.responses.get(args.response))
        .ok_or_else(|| {
            DialogueError::new(
                "STORE_RESPONSE_INDEX",
                format!(
                    "No response {} on line {}.",
                    args.response, args.line
                ),
            )
        })?;
    emit_lines([format!("ID:{}", response.id)]);
    Ok(0)
}

fn run_mutation(
    file: &str,
    seed: Option<u32>,
    mutation: impl FnOnce(&mut DialogueStore) -> Result<Vec<String>, DialogueError>,
) -> Result<i32, DialogueError> {
    let path = Path::new(file);
    let mut store = load_store(path, seed)?;
    let mut out = mutation(&mut store)?;
    store.export_to_file(path)?;
    out.push(format!("FILE:{}", file));
    emit_lines(out);
    Ok(0)
}
