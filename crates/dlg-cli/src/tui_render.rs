#![cfg(not(coverage))]

use dlg_core::{ColorToken, DialogueField, LineField};
use dlg_store::DialogueStore;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::Frame;

use crate::tui_state::{EditorUiState, FieldCursor};

const ELLIPSIS: &str = "…";

fn token_color(token: ColorToken) -> Color {
    Color::Rgb(token.r, token.g, token.b)
}

fn field_label(cursor: FieldCursor) -> &'static str {
    match cursor {
        FieldCursor::Dialogue(DialogueField::RequiredResponseId) => "dialogue requires",
        FieldCursor::Dialogue(DialogueField::BackgroundMusic) => "music",
        FieldCursor::Dialogue(DialogueField::BackgroundImage) => "background",
        FieldCursor::Line(LineField::CharacterName) => "name",
        FieldCursor::Line(LineField::CharacterImage) => "image",
        FieldCursor::Line(LineField::Text) => "text",
        FieldCursor::Line(LineField::RequiredResponseId) => "requires",
        FieldCursor::Response(_) => "response",
    }
}

pub(crate) fn render_editor(
    frame: &mut Frame<'_>,
    ui: &EditorUiState,
    store: &DialogueStore,
    file: &str,
) {
    let terminal_width = frame.area().width as usize;
    let terminal_rows = frame.area().height as usize;
    let content_width = (terminal_width.saturating_sub(2)).max(16);
    let dialogue = store.dialogue();

    let field_row = |cursor: FieldCursor, value: &str, color: Option<ColorToken>| {
        let focused = ui.cursor == cursor;
        let shown = match (&ui.input_buffer, focused) {
            (Some(buffer), true) => format!("{}_", buffer),
            _ => value.to_string(),
        };
        let text = truncate_to_width(
            format!(
                "{}{}: {}",
                if focused { "> " } else { "  " },
                field_label(cursor),
                shown
            )
            .as_str(),
            content_width,
        );
        let mut style = Style::default();
        if let Some(color) = color {
            style = style.fg(token_color(color));
        }
        if focused {
            style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
        }
        Line::from(Span::styled(text, style))
    };

    let mut header: Vec<Line<'_>> = vec![Line::from(truncate_to_width(
        format!("dialogue editor | {}", file).as_str(),
        content_width,
    ))];
    let entry_color = store
        .lookup_dialogue_required_response()
        .and_then(|response| store.response_color(&response.id));
    header.push(field_row(
        FieldCursor::Dialogue(DialogueField::RequiredResponseId),
        dialogue.required_response_id.as_str(),
        entry_color,
    ));
    header.push(field_row(
        FieldCursor::Dialogue(DialogueField::BackgroundMusic),
        dialogue.background_music.as_str(),
        None,
    ));
    header.push(field_row(
        FieldCursor::Dialogue(DialogueField::BackgroundImage),
        dialogue.background_image.as_str(),
        None,
    ));

    let mut body: Vec<Line<'_>> = Vec::new();
    let mut selected_row = 0usize;
    if dialogue.lines.is_empty() {
        body.push(Line::from(Span::styled(
            "(no lines, press a to add one)".to_string(),
            Style::default().fg(Color::Gray),
        )));
    }
    for (line_index, line) in dialogue.lines.iter().enumerate() {
        let selected = line_index == ui.selected_line;
        let highlight = store.line_highlight_color(line_index);
        let mut style = Style::default();
        if let Some(color) = highlight {
            style = style.fg(token_color(color));
        }
        if selected {
            selected_row = body.len();
            style = style.add_modifier(Modifier::REVERSED);
        }
        let speaker = if line.character_name.is_empty() {
            "?"
        } else {
            line.character_name.as_str()
        };
        body.push(Line::from(Span::styled(
            truncate_to_width(
                format!("[{}] {}: {}", line_index, speaker, line.text).as_str(),
                content_width,
            ),
            style,
        )));

        if selected {
            body.push(field_row(
                FieldCursor::Line(LineField::CharacterName),
                line.character_name.as_str(),
                None,
            ));
            body.push(field_row(
                FieldCursor::Line(LineField::CharacterImage),
                line.character_image.as_str(),
                None,
            ));
            body.push(field_row(
                FieldCursor::Line(LineField::Text),
                line.text.as_str(),
                None,
            ));
            body.push(field_row(
                FieldCursor::Line(LineField::RequiredResponseId),
                line.required_response_id.as_str(),
                highlight,
            ));
        }

        for (response_index, response) in line.responses.iter().enumerate() {
            let focused = selected && ui.cursor == FieldCursor::Response(response_index);
            let text = match (&ui.input_buffer, focused) {
                (Some(buffer), true) => format!("{}_", buffer),
                _ => response.text.clone(),
            };
            let mut style = Style::default();
            if let Some(color) = store.response_color(&response.id) {
                style = style.fg(token_color(color));
            }
            if focused {
                style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
            }
            body.push(Line::from(Span::styled(
                truncate_to_width(
                    format!(
                        "{}({}) {}  [{}]",
                        if focused { "  > " } else { "    " },
                        response_index,
                        text,
                        response.id
                    )
                    .as_str(),
                    content_width,
                ),
                style,
            )));
        }
    }

    let status_text = truncate_to_width(format!("status: {}", ui.status).as_str(), content_width);
    let key_text = truncate_to_width(
        "keys: up/down line | left/right response | tab field | m dialogue | enter edit | a/d line | r/x response | p pick | y id | s save | l load | h help | q quit",
        content_width,
    );
    let help_text = truncate_to_width(
        "lines take the color of the response they require; p on a requires field cycles through every response id.",
        content_width,
    );

    let mut reserved_rows = header.len() + 1 + 1 + 1;
    if ui.help_visible {
        reserved_rows += 1;
    }
    let visible_body_rows = terminal_rows.saturating_sub(reserved_rows).max(1);
    let window_start = selected_row.saturating_sub(visible_body_rows.saturating_sub(6));
    let window_start = window_start.min(body.len().saturating_sub(visible_body_rows));

    let mut lines_out = header;
    lines_out.push(Line::from(Span::styled(
        "─".repeat(content_width),
        Style::default().fg(Color::Gray),
    )));
    lines_out.extend(body.into_iter().skip(window_start).take(visible_body_rows));
    lines_out.push(Line::from(Span::styled(
        status_text,
        Style::default().fg(Color::Gray),
    )));
    lines_out.push(Line::from(Span::styled(
        key_text,
        Style::default().fg(Color::Yellow),
    )));
    if ui.help_visible {
        lines_out.push(Line::from(Span::styled(
            help_text,
            Style::default().fg(Color::Magenta),
        )));
    }

    let paragraph = Paragraph::new(lines_out).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, frame.area());
}

fn truncate_to_width(value: &str, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    let chars = value.chars().collect::<Vec<_>>();
    if chars.len() <= width {
        return value.to_string();
    }
    if width == 1 {
        return ELLIPSIS.to_string();
    }
    let mut out = chars.into_iter().take(width - 1).collect::<String>();
    out.push_str(ELLIPSIS);
    out
}
