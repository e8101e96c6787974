use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "dlg-cli")]
#[command(about = "Branching dialogue editor")]
pub(crate) struct Cli {
    /// Seed for response ids and colors.
    #[arg(long = "seed", global = true)]
    pub(crate) seed: Option<u32>,
    /// Log filter, e.g. `debug` or `dlg_store=debug`. RUST_LOG wins when set.
    #[arg(long = "log-level", global = true)]
    pub(crate) log_level: Option<String>,
    #[command(subcommand)]
    pub(crate) command: Mode,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Mode {
    Agent(AgentArgs),
    Edit(EditorArgs),
    Tui(EditorArgs),
}

#[derive(Debug, Args)]
pub(crate) struct AgentArgs {
    #[command(subcommand)]
    pub(crate) command: AgentCommand,
}

#[derive(Debug, Subcommand)]
pub(crate) enum AgentCommand {
    New(NewArgs),
    Show(FileArgs),
    AddLine(FileArgs),
    DeleteLine(LineArgs),
    AddResponse(LineArgs),
    DeleteResponse(ResponseArgs),
    Set(SetArgs),
    Lookup(LineArgs),
    CopyId(ResponseArgs),
}

#[derive(Debug, Args)]
pub(crate) struct NewArgs {
    #[arg(long = "file")]
    pub(crate) file: String,
    #[arg(long = "force")]
    pub(crate) force: bool,
}

#[derive(Debug, Args)]
pub(crate) struct FileArgs {
    #[arg(long = "file")]
    pub(crate) file: String,
}

#[derive(Debug, Args)]
pub(crate) struct LineArgs {
    #[arg(long = "file")]
    pub(crate) file: String,
    #[arg(long = "line")]
    pub(crate) line: usize,
}

#[derive(Debug, Args)]
pub(crate) struct ResponseArgs {
    #[arg(long = "file")]
    pub(crate) file: String,
    #[arg(long = "line")]
    pub(crate) line: usize,
    #[arg(long = "response")]
    pub(crate) response: usize,
}

#[derive(Debug, Args)]
pub(crate) struct SetArgs {
    #[arg(long = "file")]
    pub(crate) file: String,
    #[arg(long = "path")]
    pub(crate) path: String,
    #[arg(long = "value", allow_hyphen_values = true)]
    pub(crate) value: String,
}

#[derive(Debug, Args)]
pub(crate) struct EditorArgs {
    #[arg(long = "file")]
    pub(crate) file: Option<String>,
}
