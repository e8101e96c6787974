use super::*;
use crate::cli_test_support::*;
use dlg_store::{read_dialogue_file, DialogueStore, StoreOptions};
use std::io::Cursor;

fn seeded_store() -> DialogueStore {
    DialogueStore::new(StoreOptions {
        random_seed: Some(1),
    })
}

fn run_script(file: &str, store: &mut DialogueStore, script: &str) -> String {
    let context = EditorContext { file };
    let mut reader = Cursor::new(script.as_bytes().to_vec());
    let mut writer = Vec::new();
    let code = run_line_editor_with_io(&context, store, &mut reader, &mut writer)
        .expect("line editor should run");
    assert_eq!(code, 0);
    String::from_utf8(writer).expect("utf-8 output")
}

fn collect(
    raw: &str,
    file: &str,
    store: &mut DialogueStore,
) -> (Result<EditorAction, dlg_core::DialogueError>, Vec<String>) {
    let context = EditorContext { file };
    let mut out = Vec::new();
    let mut emit = |line: String| out.push(line);
    let action = handle_editor_command(raw, &context, store, &mut emit);
    (action, out)
}

#[test]
fn line_editor_builds_a_branching_dialogue() {
    let file = temp_path("line-editor.json");
    let file = file.to_string_lossy().to_string();
    let mut store = seeded_store();
    let output = run_script(
        &file,
        &mut store,
        ":add-line\n:add-resp 0\n:add-line\n:set lines.0.characterName Ada\n\
         :set lines.0.responses.0.text Follow me\n:show\n:quit\n",
    );

    assert!(output.contains("added line 0"));
    assert!(output.contains("added response resp-"));
    assert!(output.contains("[0] Ada:"));
    assert!(output.contains("bye"));
    assert_eq!(store.dialogue().lines.len(), 2);
    assert_eq!(store.dialogue().lines[0].responses[0].text, "Follow me");
}

#[test]
fn line_editor_reports_errors_and_keeps_running() {
    let file = temp_path("line-editor-errors.json");
    let file = file.to_string_lossy().to_string();
    let mut store = seeded_store();
    let output = run_script(
        &file,
        &mut store,
        ":del-line 3\n:set lines.0.voice x\n:add-resp zero\n:frobnicate\n:add-line\n",
    );

    assert!(output.contains("error: STORE_LINE_INDEX"));
    assert!(output.contains("error: EDIT_PATH_INVALID"));
    assert!(output.contains("error: CLI_INPUT_PARSE"));
    assert!(output.contains("unknown command: :frobnicate"));
    // Reader exhaustion ends the session like :quit.
    assert_eq!(store.dialogue().lines.len(), 1);
}

#[test]
fn set_keeps_the_value_exactly_as_typed() {
    let file = temp_path("line-editor-set.json");
    let file = file.to_string_lossy().to_string();
    let mut store = seeded_store();
    let output = run_script(
        &file,
        &mut store,
        ":add-line\n:set lines.0.text   two spaces  \n:set   lines.0.characterName Ada\n\
         :set lines.0.characterImage\n:quit\n",
    );

    assert!(output.contains("set lines.0.text"));
    let line = &store.dialogue().lines[0];
    assert_eq!(line.text, "  two spaces  ");
    assert_eq!(line.character_name, "Ada");
    assert_eq!(line.character_image, "");
}

#[test]
fn cap_is_reported_instead_of_exceeded() {
    let file = temp_path("line-editor-cap.json");
    let file = file.to_string_lossy().to_string();
    let mut store = seeded_store();
    collect(":add-line", &file, &mut store).0.expect("add line");
    for _ in 0..4 {
        collect(":add-resp 0", &file, &mut store)
            .0
            .expect("add response");
    }
    let (action, out) = collect(":add-resp 0", &file, &mut store);
    assert_eq!(action.expect("fifth add"), EditorAction::Continue);
    assert_eq!(out, vec!["line 0 already has 4 responses".to_string()]);
    assert_eq!(store.dialogue().lines[0].responses.len(), 4);
}

#[test]
fn lookup_copy_and_candidates_follow_references() {
    let file = temp_path("line-editor-lookup.json");
    let file = file.to_string_lossy().to_string();
    let mut store = seeded_store();
    store.add_line();
    store.add_line();
    let id = store
        .add_response(0)
        .expect("line exists")
        .expect("line has room");

    let (_, out) = collect(":lookup 1", &file, &mut store);
    assert_eq!(out, vec!["line 1 has no resolvable requirement".to_string()]);

    collect(
        &format!(":set lines.1.requiredResponseId {}", id),
        &file,
        &mut store,
    )
    .0
    .expect("set should pass");
    let (_, out) = collect(":lookup 1", &file, &mut store);
    assert!(out[0].starts_with(&format!("line 1 requires {}", id)));

    let (_, out) = collect(":copy 0 0", &file, &mut store);
    assert_eq!(out, vec![format!("{}{}", osc52_sequence(&id), id)]);
    assert!(out[0].ends_with(&id));

    let (_, out) = collect(":candidates", &file, &mut store);
    assert_eq!(out.len(), 1);
    assert!(out[0].starts_with(&id));
}

#[test]
fn export_and_import_commands_round_trip_through_disk() {
    let file = temp_path("line-editor-io.json");
    let file = file.to_string_lossy().to_string();
    let mut store = seeded_store();
    collect(":add-line", &file, &mut store).0.expect("add line");
    collect(":add-resp 0", &file, &mut store).0.expect("add resp");
    collect(":export", &file, &mut store).0.expect("export");
    let exported = read_dialogue_file(Path::new(&file)).expect("exported file parses");
    assert_eq!(&exported, store.dialogue());

    let mut other = seeded_store();
    let (action, out) = collect(&format!(":import {}", file), &file, &mut other);
    action.expect("import should pass");
    assert!(out[0].contains("(1 lines)"));
    assert_eq!(other.dialogue(), store.dialogue());
}

#[test]
fn import_of_malformed_file_keeps_editor_state() {
    let file = temp_path("line-editor-broken.json");
    write_file(&file, "{ \"lines\": [ }");
    let file = file.to_string_lossy().to_string();
    let mut store = seeded_store();
    collect(":add-line", &file, &mut store).0.expect("add line");
    let before = store.dialogue().clone();

    let (action, _) = collect(":import", &file, &mut store);
    let error = action.expect_err("malformed import should fail");
    assert!(error.is_parse_error());
    assert_eq!(store.dialogue(), &before);
}

#[test]
fn agent_commands_edit_the_file_in_place() {
    let file = temp_path("agent.json");
    let file_arg = file.to_string_lossy().to_string();
    let run = |args: &[&str]| {
        let mut argv = vec!["dlg-cli", "--seed", "5", "agent"];
        argv.extend_from_slice(args);
        run_cli_from_args(argv)
    };

    assert_eq!(run(&["new", "--file", file_arg.as_str()]), 0);
    assert_eq!(run(&["new", "--file", file_arg.as_str()]), 1);
    assert_eq!(run(&["add-line", "--file", file_arg.as_str()]), 0);
    assert_eq!(run(&["add-response", "--line", "0", "--file", file_arg.as_str()]), 0);
    assert_eq!(
        run(&[
            "set",
            "--file",
            file_arg.as_str(),
            "--path",
            "lines.0.text",
            "--value",
            "Hello there"
        ]),
        0
    );
    assert_eq!(run(&["show", "--file", file_arg.as_str()]), 0);
    assert_eq!(run(&["delete-line", "--line", "4", "--file", file_arg.as_str()]), 1);

    let dialogue = read_dialogue_file(&file).expect("agent output parses");
    assert_eq!(dialogue.lines.len(), 1);
    assert_eq!(dialogue.lines[0].text, "Hello there");
    assert_eq!(dialogue.lines[0].responses.len(), 1);
}

#[test]
fn agent_rejects_missing_file_and_bad_arguments() {
    let missing = temp_path("agent-missing.json");
    let missing = missing.to_string_lossy().to_string();
    assert_eq!(
        run_cli_from_args(["dlg-cli", "agent", "show", "--file", missing.as_str()]),
        1
    );
    assert_ne!(
        run_cli_from_args(["dlg-cli", "agent", "delete-line", "--file", missing.as_str()]),
        0
    );
}
