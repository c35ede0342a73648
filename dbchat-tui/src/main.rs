//! dbchat TUI entry point.

use crossterm::{
    event::{self, Event as CrosstermEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use dbchat_db::DbClient;
use dbchat_llm::GroqCompletionProvider;
use dbchat_pipeline::ChatSession;
use dbchat_tui::config::TuiConfig;
use dbchat_tui::error::TuiError;
use dbchat_tui::events::TuiEvent;
use dbchat_tui::keys::{map_key, Action};
use dbchat_tui::notifications::NotificationLevel;
use dbchat_tui::state::{App, View};
use dbchat_tui::views::render_view;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

type Term = Terminal<CrosstermBackend<Stdout>>;

#[tokio::main]
async fn main() -> Result<(), TuiError> {
    // .env carries GROQ_API_KEY and DBCHAT_DB_* during development.
    let _ = dotenvy::dotenv();

    let config = TuiConfig::load()?;
    init_tracing(&config.log_path)?;
    info!("dbchat starting");

    let mut app = App::new(config);

    let mut terminal = setup_terminal()?;
    let _guard = TerminalGuard {};

    let (event_tx, mut event_rx) = mpsc::channel::<TuiEvent>(256);
    spawn_input_reader(event_tx.clone());

    let mut ticker = tokio::time::interval(Duration::from_millis(250));

    loop {
        terminal.draw(|f| render_view(f, &app))?;

        tokio::select! {
            _ = ticker.tick() => {}
            Some(event) = event_rx.recv() => {
                if handle_event(&mut app, event, &mut terminal).await? {
                    break;
                }
            }
        }
    }

    Ok(())
}

fn init_tracing(path: &Path) -> Result<(), TuiError> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    // Logs go to a file; stdout belongs to the alternate screen.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn setup_terminal() -> Result<Term, TuiError> {
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
                match evt {
                    CrosstermEvent::Key(key) => {
                        let _ = sender.blocking_send(TuiEvent::Input(key));
                    }
                    CrosstermEvent::Resize(width, height) => {
                        let _ = sender.blocking_send(TuiEvent::Resize { width, height });
                    }
                    _ => {}
                }
            }
        }
    });
}

async fn handle_event(
    app: &mut App,
    event: TuiEvent,
    terminal: &mut Term,
) -> Result<bool, TuiError> {
    match event {
        TuiEvent::Input(key) => {
            if let Some(action) = map_key(app.view, key) {
                return handle_action(app, action, terminal).await;
            }
        }
        TuiEvent::Resize { .. } | TuiEvent::Tick => {}
    }
    Ok(false)
}

async fn handle_action(
    app: &mut App,
    action: Action,
    terminal: &mut Term,
) -> Result<bool, TuiError> {
    match action {
        Action::Quit => return Ok(true),
        Action::ToggleSettings => app.toggle_settings(),
        Action::NextField => {
            if app.view == View::Settings {
                app.settings.focus = app.settings.focus.next();
            }
        }
        Action::PrevField => {
            if app.view == View::Settings {
                app.settings.focus = app.settings.focus.previous();
            }
        }
        Action::Insert(c) => match app.view {
            View::Settings => app.settings.focused_value_mut().push(c),
            View::Chat => app.input_char(c),
        },
        Action::Backspace => match app.view {
            View::Settings => {
                app.settings.focused_value_mut().pop();
            }
            View::Chat => app.input_backspace(),
        },
        Action::ScrollUp => app.scroll = app.scroll.saturating_add(1),
        Action::ScrollDown => app.scroll = app.scroll.saturating_sub(1),
        Action::Submit => match app.view {
            View::Settings => connect(app).await,
            View::Chat => submit_question(app, terminal).await?,
        },
    }
    Ok(false)
}

/// Connect action: build a pool from the form, verify it, create a session.
async fn connect(app: &mut App) {
    let db_config = match app.settings.to_db_config() {
        Ok(config) => config,
        Err(e) => {
            app.notify(NotificationLevel::Error, e.to_string());
            return;
        }
    };

    let api_key = match app.config.resolve_api_key() {
        Ok(key) => key,
        Err(e) => {
            app.notify(NotificationLevel::Error, e.to_string());
            return;
        }
    };

    match DbClient::connect(&db_config).await {
        Ok(client) => {
            let provider = GroqCompletionProvider::with_rate_limit(
                api_key,
                app.config.llm.model.clone(),
                app.config.llm.requests_per_minute,
            );
            app.session = Some(ChatSession::new(Arc::new(client), Arc::new(provider)));
            app.view = View::Chat;
            app.notify(NotificationLevel::Success, "Connected to database!");
            info!("session created");
        }
        Err(e) => {
            app.notify(
                NotificationLevel::Error,
                format!("Failed to connect to the database: {}", e),
            );
        }
    }
}

/// Ask the current question; blocks until the full pipeline completes.
async fn submit_question(app: &mut App, terminal: &mut Term) -> Result<(), TuiError> {
    if app.busy {
        return Ok(());
    }
    if app.session.is_none() {
        app.notify(
            NotificationLevel::Error,
            "Please connect to the database first.",
        );
        return Ok(());
    }

    let question = std::mem::take(&mut app.input);

    app.busy = true;
    terminal.draw(|f| render_view(f, app))?;

    let result = match app.session.as_mut() {
        Some(session) => session.submit(&question).await,
        None => return Ok(()),
    };
    app.busy = false;

    match result {
        Ok(Some(_)) => app.scroll = 0,
        Ok(None) => {
            // Whitespace-only input: nothing asked, nothing recorded.
        }
        Err(e) => {
            app.input = question;
            app.notify(NotificationLevel::Error, e.to_string());
        }
    }
    Ok(())
}
