use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tokio::sync::mpsc;
use tracing::{info, warn};

use ordertab::OrdertabError;
use ordertab::api::ApiClient;
use ordertab::auth;
use ordertab::config::{AppConfig, fetch_config};
use ordertab::credentials::{self, CredentialKey};
use ordertab::tui::event::{spawn_event_reader, spawn_tick_timer};
use ordertab::tui::{self, App, Dispatcher, Message, Tui};

/// Tick interval for flash expiry.
const TICK_MS: u64 = 250;

fn main() -> Result<(), OrdertabError> {
    // Runs before the runtime exists, so no other thread reads the env.
    credentials::populate_env_from_keychain();

    let app_config = fetch_config()?;
    init_logging(&app_config.log_file)?;

    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| OrdertabError::Io(format!("failed to start runtime: {e}")))?;
    runtime.block_on(run(app_config))
}

/// Sends tracing output to `path`; stdout belongs to the TUI.
fn init_logging(path: &Path) -> Result<(), OrdertabError> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| OrdertabError::Io(format!("failed to open log file {}: {e}", path.display())))?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

async fn run(app_config: AppConfig) -> Result<(), OrdertabError> {
    let client = ApiClient::new(&app_config.api)?;
    info!(base_url = client.base_url(), "starting");

    let (session, login_error) = match &app_config.login {
        Some(login) => match auth::login(&client, &login.email, &login.password).await {
            Ok(session) => {
                if app_config.remember_login {
                    remember(&login.email, &login.password);
                }
                (Some(session), None)
            }
            Err(e) => (None, Some(e)),
        },
        None => (None, None),
    };

    let mut app = App::new(client.base_url(), session.as_ref().map(|s| s.user().clone()));
    if let Some(e) = login_error {
        warn!(error = %e, "login failed");
        app.show_error(format!("Login failed. {e}"));
    }

    let (tx, mut rx) = mpsc::unbounded_channel();
    let dispatcher = Dispatcher::new(client, session, tx.clone());

    let mut terminal = tui::setup_terminal()?;
    spawn_event_reader(tx.clone());
    spawn_tick_timer(tx, TICK_MS);

    if let Some(action) = tui::start(&mut app) {
        dispatcher.dispatch(action);
    }

    let result = event_loop(&mut terminal, &mut app, &mut rx, &dispatcher).await;
    tui::restore_terminal(&mut terminal)?;
    info!("exiting");
    result
}

async fn event_loop(
    terminal: &mut Tui,
    app: &mut App,
    rx: &mut mpsc::UnboundedReceiver<Message>,
    dispatcher: &Dispatcher,
) -> Result<(), OrdertabError> {
    while !app.should_quit {
        terminal
            .draw(|frame| tui::render(frame, app))
            .map_err(|e| OrdertabError::Io(format!("failed to draw: {e}")))?;

        let Some(message) = rx.recv().await else {
            break;
        };
        if let Some(action) = tui::update(app, message) {
            dispatcher.dispatch(action);
        }
    }
    Ok(())
}

/// Stores the login in the keychain; failures only cost a future prompt.
fn remember(email: &str, password: &str) {
    for (key, value) in [(CredentialKey::Email, email), (CredentialKey::Password, password)] {
        if let Err(e) = credentials::save(key, value) {
            warn!(key = key.keyring_id(), error = %e, "could not store credential");
        }
    }
}

