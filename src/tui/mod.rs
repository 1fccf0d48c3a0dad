//! Terminal play view.

mod app;
mod input;
mod ui;

pub use app::PlayApp;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::DefaultTerminal;
use std::time::{Duration, Instant};
use tracing::{info, instrument};

/// Runs the board until the player quits, returning the final view.
#[instrument(skip_all)]
pub fn run_play(mut app: PlayApp) -> Result<PlayApp> {
    info!("Starting play view");
    let mut terminal = ratatui::init();
    let result = event_loop(&mut terminal, &mut app);
    ratatui::restore();
    info!(status = %app.session().state().status(), "Play view closed");
    result.map(|()| app)
}

fn event_loop(terminal: &mut DefaultTerminal, app: &mut PlayApp) -> Result<()> {
    while !app.should_quit() {
        let now = Instant::now();
        terminal.draw(|frame| ui::draw(frame, app, now))?;

        // Short poll so expiring feedback is redrawn without input.
        if event::poll(Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
        {
            // Skip key release events (crossterm fires both press and release).
            if key.kind == KeyEventKind::Release {
                continue;
            }
            app.handle_key(key.code, Instant::now());
        }
    }
    Ok(())
}
