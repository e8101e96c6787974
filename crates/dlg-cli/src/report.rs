use dlg_core::ColorToken;
use dlg_store::DialogueStore;

fn json_string(value: &str) -> String {
    serde_json::to_string(value).expect("string json")
}

fn color_or_none(color: Option<ColorToken>) -> String {
    color
        .map(|color| color.hex())
        .unwrap_or_else(|| "NONE".to_string())
}

/// Machine-readable dialogue listing for agent callers.
pub(crate) fn dialogue_report(store: &DialogueStore) -> Vec<String> {
    let dialogue = store.dialogue();
    let mut out = vec![
        format!(
            "REQUIRED_RESPONSE_ID_JSON:{}",
            json_string(&dialogue.required_response_id)
        ),
        format!(
            "BACKGROUND_MUSIC_JSON:{}",
            json_string(&dialogue.background_music)
        ),
        format!(
            "BACKGROUND_IMAGE_JSON:{}",
            json_string(&dialogue.background_image)
        ),
        format!("LINES:{}", dialogue.lines.len()),
    ];
    for (line_index, line) in dialogue.lines.iter().enumerate() {
        out.push(format!(
            "LINE:{}|{}|{}|{}|{}|{}",
            line_index,
            color_or_none(store.line_highlight_color(line_index)),
            json_string(&line.required_response_id),
            json_string(&line.character_name),
            json_string(&line.character_image),
            json_string(&line.text),
        ));
        for (response_index, response) in line.responses.iter().enumerate() {
            out.push(format!(
                "RESPONSE:{}|{}|{}|{}|{}",
                line_index,
                response_index,
                response.id,
                color_or_none(store.response_color(&response.id)),
                json_string(&response.text),
            ));
        }
    }
    out
}

/// Human-readable listing used by the line editor.
pub(crate) fn dialogue_outline(store: &DialogueStore) -> Vec<String> {
    let dialogue = store.dialogue();
    let mut out = vec![
        format!(
            "dialogue requires: {}",
            describe_reference(store, &dialogue.required_response_id)
        ),
        format!("music: {}", dialogue.background_music),
        format!("background: {}", dialogue.background_image),
    ];
    if dialogue.lines.is_empty() {
        out.push("(no lines)".to_string());
    }
    for (line_index, line) in dialogue.lines.iter().enumerate() {
        out.push(format!(
            "[{}] {}: {}",
            line_index,
            if line.character_name.is_empty() {
                "?"
            } else {
                line.character_name.as_str()
            },
            line.text
        ));
        if !line.character_image.is_empty() {
            out.push(format!("    image: {}", line.character_image));
        }
        if !line.required_response_id.is_empty() {
            out.push(format!(
                "    requires: {}",
                describe_reference(store, &line.required_response_id)
            ));
        }
        for (response_index, response) in line.responses.iter().enumerate() {
            out.push(format!(
                "    ({}) {} [{} {}]",
                response_index,
                response.text,
                response.id,
                color_or_none(store.response_color(&response.id))
            ));
        }
    }
    out
}

fn describe_reference(store: &DialogueStore, response_id: &str) -> String {
    if response_id.is_empty() {
        return "-".to_string();
    }
    match store.dialogue().find_response(response_id) {
        Some(entry) => format!(
            "{} (line {} \"{}\" {})",
            response_id,
            entry.line_index,
            entry.response.text,
            color_or_none(store.response_color(response_id))
        ),
        None => format!("{} (dangling)", response_id),
    }
}

pub(crate) fn emit_lines(lines: impl IntoIterator<Item = String>) {
    println!("RESULT:OK");
    for line in lines {
        println!("{}", line);
    }
}
