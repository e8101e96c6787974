use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use dlg_core::{Dialogue, DialogueError, MAX_RESPONSES_PER_LINE};

pub const DEFAULT_EXPORT_FILE_NAME: &str = "dialogue.json";

pub fn export_json(dialogue: &Dialogue) -> String {
    serde_json::to_string_pretty(dialogue).expect("dialogue should serialize")
}

/// Parses and validates a dialogue document. Errors carry `PARSE_*` codes.
pub fn parse_dialogue(raw: &str) -> Result<Dialogue, DialogueError> {
    let dialogue: Dialogue = serde_json::from_str(raw)
        .map_err(|error| DialogueError::new("PARSE_JSON", error.to_string()))?;
    validate_dialogue(&dialogue)?;
    Ok(dialogue)
}

pub fn validate_dialogue(dialogue: &Dialogue) -> Result<(), DialogueError> {
    let mut seen = BTreeSet::new();
    for (line_index, line) in dialogue.lines.iter().enumerate() {
        if line.responses.len() > MAX_RESPONSES_PER_LINE {
            return Err(DialogueError::new(
                "PARSE_INVARIANT",
                format!(
                    "Line {} has {} responses, at most {} are allowed.",
                    line_index,
                    line.responses.len(),
                    MAX_RESPONSES_PER_LINE
                ),
            ));
        }
        for response in &line.responses {
            if response.id.is_empty() {
                return Err(DialogueError::new(
                    "PARSE_INVARIANT",
                    format!("Line {} has a response with an empty id.", line_index),
                ));
            }
            if !seen.insert(response.id.as_str()) {
                return Err(DialogueError::new(
                    "PARSE_INVARIANT",
                    format!("Response id \"{}\" is used more than once.", response.id),
                ));
            }
        }
    }
    Ok(())
}

pub fn read_dialogue_file(path: &Path) -> Result<Dialogue, DialogueError> {
    let raw = fs::read_to_string(path).map_err(|error| {
        DialogueError::new(
            "IO_READ",
            format!("Cannot read {}: {}", path.display(), error),
        )
    })?;
    parse_dialogue(&raw)
}

pub fn write_dialogue_file(path: &Path, dialogue: &Dialogue) -> Result<(), DialogueError> {
    let write_error = |error: std::io::Error| {
        DialogueError::new(
            "IO_WRITE",
            format!("Cannot write {}: {}", path.display(), error),
        )
    };
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(write_error)?;
    fs::write(path, export_json(dialogue)).map_err(write_error)
}

#[cfg(test)]
mod io_tests {
    use super::*;
    use dlg_core::{DialogueLine, Response};
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_path(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time should be monotonic")
            .as_nanos();
        std::env::temp_dir().join(format!("dlg-store-{}-{}", name, nanos))
    }

    fn line_with(ids: &[&str]) -> DialogueLine {
        DialogueLine {
            responses: ids.iter().map(|id| Response::new(*id)).collect(),
            ..DialogueLine::default()
        }
    }

    #[test]
    fn export_is_pretty_printed_and_parses_back() {
        let dialogue = Dialogue {
            required_response_id: "gate".to_string(),
            background_music: "m.ogg".to_string(),
            background_image: "bg.png".to_string(),
            lines: vec![DialogueLine {
                required_response_id: "r1".to_string(),
                character_name: "Ada".to_string(),
                character_image: "ada.png".to_string(),
                text: "Well?".to_string(),
                responses: vec![Response {
                    id: "r1".to_string(),
                    text: "Yes".to_string(),
                }],
            }],
        };
        let raw = export_json(&dialogue);
        assert!(raw.contains('\n'));
        assert!(raw.contains("\"backgroundMusic\""));
        assert_eq!(parse_dialogue(&raw).expect("export should parse"), dialogue);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let error = parse_dialogue("{ not json").expect_err("should fail");
        assert_eq!(error.code, "PARSE_JSON");
        assert!(error.is_parse_error());

        let error = parse_dialogue(r#"{"lines": 3}"#).expect_err("wrong shape should fail");
        assert_eq!(error.code, "PARSE_JSON");
    }

    #[test]
    fn validation_rejects_oversized_lines_and_duplicate_ids() {
        let oversized = Dialogue {
            lines: vec![line_with(&["a", "b", "c", "d", "e"])],
            ..Dialogue::default()
        };
        assert_eq!(
            validate_dialogue(&oversized).expect_err("cap").code,
            "PARSE_INVARIANT"
        );

        let duplicated = Dialogue {
            lines: vec![line_with(&["a"]), line_with(&["a"])],
            ..Dialogue::default()
        };
        assert_eq!(
            validate_dialogue(&duplicated).expect_err("duplicate").code,
            "PARSE_INVARIANT"
        );

        let empty_id = Dialogue {
            lines: vec![line_with(&[""])],
            ..Dialogue::default()
        };
        assert_eq!(
            validate_dialogue(&empty_id).expect_err("empty id").code,
            "PARSE_INVARIANT"
        );
    }

    #[test]
    fn file_helpers_write_and_read_back() {
        let path = temp_path("nested").join("out").join(DEFAULT_EXPORT_FILE_NAME);
        let dialogue = Dialogue {
            lines: vec![line_with(&["x"])],
            ..Dialogue::default()
        };
        write_dialogue_file(&path, &dialogue).expect("write should pass");
        assert_eq!(read_dialogue_file(&path).expect("read should pass"), dialogue);
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let error = read_dialogue_file(&temp_path("missing")).expect_err("missing file");
        assert_eq!(error.code, "IO_READ");
        assert!(!error.is_parse_error());
    }
}
