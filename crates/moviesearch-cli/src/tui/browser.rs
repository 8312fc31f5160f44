//! Browser TUI main loop.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use moviesearch_api::tmdb::{ImageResolver, MovieApi};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use super::state::{BrowserState, InputMode};
use super::ui;

/// Idle wait between redraws while no key is pending.
const TICK: Duration = Duration::from_millis(50);

/// Runs the movie browser TUI.
///
/// # Errors
///
/// Returns an error if terminal setup or event handling fails.
#[allow(clippy::module_name_repetitions)]
pub async fn run_browser<A>(api: Arc<A>, images: ImageResolver) -> Result<()>
where
    A: MovieApi + Send + Sync + 'static,
{
    let mut state = BrowserState::new(api, images);

    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen)
        .context("failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    let result = run_event_loop(&mut terminal, &mut state).await;
    state.shutdown();

    // Cleanup (always attempt even if event loop failed)
    disable_raw_mode().context("failed to disable raw mode")?;
    crossterm::execute!(io::stdout(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;

    result
}

/// Main event loop.
///
/// Sleeps between polls so spawned fetches make progress on the
/// current-thread runtime.
async fn run_event_loop<A>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut BrowserState<A>,
) -> Result<()>
where
    A: MovieApi + Send + Sync + 'static,
{
    loop {
        state.pump();
        terminal
            .draw(|frame| ui::draw(frame, state))
            .context("failed to draw TUI")?;

        if !event::poll(Duration::ZERO).context("failed to poll events")? {
            tokio::time::sleep(TICK).await;
            continue;
        }
        if let Event::Key(key) = event::read().context("failed to read event")?
            && key.kind == KeyEventKind::Press
        {
            let quit = match state.input_mode {
                InputMode::Search => {
                    handle_search_input(state, key.code);
                    false
                }
                InputMode::Normal => handle_normal_input(state, key.code, key.modifiers),
            };
            if quit {
                return Ok(());
            }
        }
    }
}

/// Handles key input while editing the search box.
fn handle_search_input<A>(state: &mut BrowserState<A>, key: KeyCode)
where
    A: MovieApi + Send + Sync + 'static,
{
    match key {
        KeyCode::Esc => state.cancel_search(),
        KeyCode::Enter => state.submit_search(),
        KeyCode::Backspace => state.list.pop_input(),
        KeyCode::Char(c) => state.list.push_input(c),
        _ => {}
    }
}

/// Handles key input in normal mode. Returns `true` to exit.
fn handle_normal_input<A>(state: &mut BrowserState<A>, key: KeyCode, modifiers: KeyModifiers) -> bool
where
    A: MovieApi + Send + Sync + 'static,
{
    match key {
        KeyCode::Char('q') => return true,
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return true,
        KeyCode::Up | KeyCode::Char('k') => state.move_up(),
        KeyCode::Down | KeyCode::Char('j') => state.move_down(),
        KeyCode::Char('r') => state.retry(),
        KeyCode::Char('o') => open_tmdb_page(state),
        KeyCode::Esc | KeyCode::Backspace => state.back(),
        _ if state.detail.is_some() => {}
        KeyCode::Enter => state.open_selected(),
        KeyCode::Char('/') => state.start_search(),
        KeyCode::Char('p') => state.show_popular(),
        KeyCode::Char('n') => state.next_page(),
        KeyCode::Char('N') => state.previous_page(),
        _ => {}
    }
    false
}

/// Opens the TMDB page of the current movie in the browser.
fn open_tmdb_page<A>(state: &BrowserState<A>)
where
    A: MovieApi + Send + Sync + 'static,
{
    let Some(url) = state.tmdb_page_url() else {
        return;
    };
    if let Err(e) = open::that(&url) {
        tracing::debug!(error = %e, %url, "failed to open browser");
    }
}
