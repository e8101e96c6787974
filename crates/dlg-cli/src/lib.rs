use std::ffi::OsString;
use std::path::Path;

use clap::Parser;
use dlg_core::DialogueError;
use dlg_store::DEFAULT_EXPORT_FILE_NAME;

mod agent;
mod cli_args;
mod clipboard;
mod document;
mod error_map;
mod line_editor;
mod logging;
mod models;
mod report;
mod tui;
mod tui_actions;
mod tui_render;
mod tui_state;

pub(crate) use clipboard::{copy_to_clipboard, osc52_sequence};
pub(crate) use cli_args::{
    AgentArgs, AgentCommand, Cli, EditorArgs, FileArgs, LineArgs, Mode, NewArgs, ResponseArgs,
    SetArgs,
};
pub(crate) use document::{create_store_file, load_store, open_store};
pub(crate) use error_map::{emit_error, map_cli_input_parse, map_tui_io};
pub(crate) use line_editor::run_line_editor;
#[cfg(test)]
pub(crate) use line_editor::{handle_editor_command, run_line_editor_with_io};
pub(crate) use logging::{init_logger, LogSink};
pub(crate) use models::{EditorAction, EditorContext};
pub(crate) use report::{dialogue_outline, dialogue_report, emit_lines};

pub fn run_cli_from_args<I, T>(args: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(error) => {
            let _ = error.print();
            return error.exit_code();
        }
    };
    let sink = match cli.command {
        Mode::Tui(_) => LogSink::File,
        _ => LogSink::Stderr,
    };
    init_logger(cli.log_level.as_deref(), sink);
    match run(cli) {
        Ok(code) => code,
        Err(error) => emit_error(error),
    }
}

fn run(cli: Cli) -> Result<i32, DialogueError> {
    match cli.command {
        Mode::Agent(args) => agent::run_agent(args, cli.seed),
        Mode::Edit(args) => run_edit(args, cli.seed),
        Mode::Tui(args) => run_tui(args, cli.seed),
    }
}

fn run_edit(args: EditorArgs, seed: Option<u32>) -> Result<i32, DialogueError> {
    let file = args
        .file
        .unwrap_or_else(|| DEFAULT_EXPORT_FILE_NAME.to_string());
    let mut store = open_store(Path::new(&file), seed)?;
    run_line_editor(&EditorContext { file: &file }, &mut store)
}

fn run_tui(args: EditorArgs, seed: Option<u32>) -> Result<i32, DialogueError> {
    let file = args
        .file
        .unwrap_or_else(|| DEFAULT_EXPORT_FILE_NAME.to_string());
    let mut store = open_store(Path::new(&file), seed)?;
    tui::run_tui_ratatui_mode(&EditorContext { file: &file }, &mut store)
}

#[cfg(test)]
mod cli_test_support;
#[cfg(test)]
mod tests;
