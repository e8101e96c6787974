use std::fs::OpenOptions;

use env_logger::{Builder, Env, Target};

pub(crate) const DEFAULT_LOG_FILTER: &str = "warn";
pub(crate) const TUI_LOG_FILE: &str = "dlg-cli.log";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LogSink {
    Stderr,
    // The alternate screen owns the terminal while the rich editor runs.
    File,
}

pub(crate) fn init_logger(filter: Option<&str>, sink: LogSink) {
    let default_filter = filter.unwrap_or(DEFAULT_LOG_FILTER);
    let mut builder = Builder::from_env(Env::default().default_filter_or(default_filter));

    match sink {
        LogSink::Stderr => {
            builder.target(Target::Stderr);
        }
        LogSink::File => {
            match OpenOptions::new()
                .create(true)
                .append(true)
                .open(TUI_LOG_FILE)
            {
                Ok(file) => {
                    builder.target(Target::Pipe(Box::new(file)));
                }
                Err(error) => {
                    eprintln!("Failed to open {}: {}", TUI_LOG_FILE, error);
                    builder.filter_level(log::LevelFilter::Off);
                }
            }
        }
    }

    // A second init (tests drive the CLI repeatedly in one process) is harmless.
    let _ = builder.try_init();
}
