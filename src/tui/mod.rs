//! Interactive checkbox picker for deletion targets.

pub mod app;
pub mod event;
pub mod ui;

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::config::Config;
use crate::error::Result;
use crate::logging;

pub use app::{App, PickOutcome};

/// Run the picker on `root` until the user accepts or cancels.
///
/// The tree is populated before the terminal is taken over, so a bad root
/// is reported as a plain error.
pub fn run(root: PathBuf, config: &Config) -> Result<PickOutcome> {
    let mut app = App::with_config(root, config);
    app.populate()?;

    let _held_logs = logging::hold();
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res?;
    Ok(app.outcome.unwrap_or(PickOutcome::Cancelled))
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| ui::render(app, frame))?;
        event::handle_events(app, Duration::from_millis(250))?;
    }
    Ok(())
}
