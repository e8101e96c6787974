#[cfg(coverage)]
pub(super) fn run_tui_ratatui_mode(
    context: &super::EditorContext<'_>,
    store: &mut dlg_store::DialogueStore,
) -> Result<i32, dlg_core::DialogueError> {
    super::run_line_editor(context, store)
}

#[cfg(not(coverage))]
pub(super) use rich::run_tui_ratatui_mode;

#[cfg(not(coverage))]
mod rich {
    use std::io;
    use std::time::Duration;

    use crossterm::event::{self, Event, KeyEventKind};
    use crossterm::terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
    };
    use crossterm::ExecutableCommand;
    use dlg_core::DialogueError;
    use dlg_store::DialogueStore;
    use ratatui::backend::CrosstermBackend;
    use ratatui::Terminal;

    use crate::tui_actions::handle_key;
    use crate::tui_render::render_editor;
    use crate::tui_state::EditorUiState;
    use crate::{map_tui_io, EditorContext};

    const POLL_INTERVAL_MS: u64 = 250;

    struct TuiTerminal {
        terminal: Terminal<CrosstermBackend<io::Stdout>>,
    }

    impl TuiTerminal {
        fn new() -> Result<Self, DialogueError> {
            enable_raw_mode().map_err(map_tui_io)?;
            io::stdout()
                .execute(EnterAlternateScreen)
                .map_err(map_tui_io)?;
            let backend = CrosstermBackend::new(io::stdout());
            let terminal = Terminal::new(backend).map_err(map_tui_io)?;
            Ok(Self { terminal })
        }

        fn terminal_mut(&mut self) -> &mut Terminal<CrosstermBackend<io::Stdout>> {
            &mut self.terminal
        }
    }

    impl Drop for TuiTerminal {
        fn drop(&mut self) {
            let _ = disable_raw_mode();
            let _ = io::stdout().execute(LeaveAlternateScreen);
        }
    }

    pub(crate) fn run_tui_ratatui_mode(
        context: &EditorContext<'_>,
        store: &mut DialogueStore,
    ) -> Result<i32, DialogueError> {
        let mut terminal = TuiTerminal::new()?;
        let mut ui = EditorUiState {
            status: "ready".to_string(),
            ..EditorUiState::default()
        };

        loop {
            terminal
                .terminal_mut()
                .draw(|frame| render_editor(frame, &ui, store, context.file))
                .map_err(map_tui_io)?;

            if !event::poll(Duration::from_millis(POLL_INTERVAL_MS)).map_err(map_tui_io)? {
                continue;
            }

            let evt = event::read().map_err(map_tui_io)?;
            if let Event::Key(key) = evt {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                let should_quit = match handle_key(key, context, store, &mut ui) {
                    Ok(should_quit) => should_quit,
                    Err(error) => {
                        log::warn!("{}", error);
                        ui.status = error.message;
                        false
                    }
                };
                if should_quit {
                    break;
                }
            }
        }

        Ok(0)
    }
}
