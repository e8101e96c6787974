use std::io::{self, Write};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use crossterm::style::Print;
use crossterm::ExecutableCommand;

/// Hands `text` to the terminal clipboard. Returns the backend name.
pub(crate) fn copy_to_clipboard(text: &str) -> Result<&'static str, String> {
    copy_to_clipboard_with(&mut io::stdout(), text)
}

pub(crate) fn copy_to_clipboard_with(
    writer: &mut impl Write,
    text: &str,
) -> Result<&'static str, String> {
    writer
        .execute(Print(osc52_sequence(text)))
        .map_err(|error| error.to_string())?;
    Ok("osc52")
}

pub(crate) fn osc52_sequence(text: &str) -> String {
    let encoded = STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{encoded}\x1b\\")
}
