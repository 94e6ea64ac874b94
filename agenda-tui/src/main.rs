//! Agenda TUI entry point.

use agenda_tui::api_client::RestClient;
use agenda_tui::config::TuiConfig;
use agenda_tui::error::TuiError;
use agenda_tui::events::TuiEvent;
use agenda_tui::keys::{map_edit_key, map_key, Action, EditAction};
use agenda_tui::state::{App, Modal};
use agenda_tui::telemetry;
use agenda_tui::views::render_view;
use crossterm::{
    event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> Result<(), TuiError> {
    let config = TuiConfig::load()?;
    telemetry::init_logging(&config.log_path)?;
    let api = RestClient::new(&config)?;
    let mut app = App::new(config, Arc::new(api));

    let mut terminal = setup_terminal()?;
    let _guard = TerminalGuard {};

    let (event_tx, mut event_rx) = mpsc::channel::<TuiEvent>(256);

    spawn_input_reader(event_tx.clone());
    // Mount: the first settle issues the unfiltered initial load.
    app.settle(&event_tx);

    let tick_rate = Duration::from_millis(app.config.tick_rate_ms);
    let mut ticker = tokio::time::interval(tick_rate);

    loop {
        terminal.draw(|f| render_view(f, &app))?;

        tokio::select! {
            _ = ticker.tick() => app.on_tick(),
            Some(event) = event_rx.recv() => {
                if handle_event(&mut app, event, &event_tx) {
                    break;
                }
                app.settle(&event_tx);
            }
        }
    }

    tracing::info!("Shutting down");
    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>, TuiError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = execute!(stdout, LeaveAlternateScreen);
    }
}

fn spawn_input_reader(sender: mpsc::Sender<TuiEvent>) {
    std::thread::spawn(move || loop {
        if let Ok(true) = event::poll(Duration::from_millis(200)) {
            if let Ok(evt) = event::read() {
                let sent = match evt {
                    CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                        sender.blocking_send(TuiEvent::Input(key))
                    }
                    CrosstermEvent::Resize(width, height) => {
                        sender.blocking_send(TuiEvent::Resize { width, height })
                    }
                    _ => Ok(()),
                };
                if sent.is_err() {
                    break;
                }
            }
        }
    });
}

/// Returns `true` when the app should quit.
fn handle_event(app: &mut App, event: TuiEvent, sender: &mpsc::Sender<TuiEvent>) -> bool {
    match event {
        TuiEvent::Input(key) => return handle_key(app, key, sender),
        TuiEvent::EventsLoaded { ticket, result } => app.apply_loaded(ticket, result),
        TuiEvent::Resize { .. } => {}
    }
    false
}

fn handle_key(app: &mut App, key: KeyEvent, sender: &mpsc::Sender<TuiEvent>) -> bool {
    if app.picker.is_editing() {
        match map_edit_key(key) {
            Some(EditAction::Input(c)) => app.picker.push_char(c),
            Some(EditAction::Backspace) => app.picker.backspace(),
            Some(EditAction::Commit) => app.commit_date(),
            Some(EditAction::Cancel) => app.picker.cancel(),
            None => {}
        }
        return false;
    }

    let Some(action) = map_key(key) else {
        return false;
    };
    match action {
        Action::Quit => return true,
        Action::MoveDown => {
            if app.select_next() {
                app.load_more(sender);
            }
        }
        Action::MoveUp => app.select_previous(),
        Action::LoadMore => app.load_more(sender),
        Action::EditStartDate => app.open_date_editor(agenda_core::DateField::StartDate),
        Action::EditEndDate => app.open_date_editor(agenda_core::DateField::EndDate),
        Action::ResetDates => app.reset_dates(),
        Action::Refresh => app.refresh(sender),
        Action::OpenHelp => {
            app.modal = Some(Modal {
                title: "Keybindings".to_string(),
                message: "j/k or arrows move through events; reaching the end loads more.\n\
                          m loads the next page.\n\
                          s / e edit the start / end date (YYYY-MM-DD, Enter to apply, empty clears).\n\
                          r clears both dates. ctrl-r refetches the current filter.\n\
                          q quits."
                    .to_string(),
            })
        }
        Action::Cancel => {
            if app.modal.take().is_none() {
                app.notifications.pop();
            }
        }
    }
    false
}
