use std::io;
use std::sync::Arc;

use credential_store::{CredentialStore, FileCredentialStore};
use shell_api::ShellApiClient;
use tracing::warn;

use tempshell::auth::{self, AuthOutcome};
use tempshell::backend::HttpShellBackend;
use tempshell::tui::{self, LoopOutcome};
use tempshell::{ClientConfig, SessionManager, ShellApp, ShellBackend, ShellController};

fn main() -> io::Result<()> {
    // The terminal belongs to the shell loop; diagnostics go to a file. A
    // missing log file is not fatal.
    if let Err(error) = tempshell::logging::init() {
        eprintln!("warning: log file unavailable: {error}");
    }

    let config = ClientConfig::from_env();
    let client = ShellApiClient::new(config.shell_api_config()).map_err(io::Error::other)?;
    let backend: Arc<dyn ShellBackend> = Arc::new(HttpShellBackend::new(Arc::new(client)));

    let store: Arc<dyn CredentialStore> = match &config.credentials_path {
        Some(path) => Arc::new(FileCredentialStore::open(path).map_err(io::Error::other)?),
        None => Arc::new(FileCredentialStore::open_default().map_err(io::Error::other)?),
    };

    let mut session = SessionManager::new(Arc::clone(&backend), store);
    if let Err(error) = session.restore() {
        warn!(%error, "session restore failed");
        println!("Stored credentials could not be read; please log in again.");
    }

    // Outer loop: /logout tears the session down and lands back at the auth
    // prompt; /quit leaves the process with credentials intact.
    loop {
        if !session.is_authenticated() {
            match auth::run_auth_prompt(&mut session)? {
                AuthOutcome::SignedIn => {}
                AuthOutcome::Aborted => break,
            }
        } else if let Some(current) = session.current() {
            if !current.username.is_empty() {
                println!("Logged in as {}.", current.username);
            }
        }

        let (controller, events) = ShellController::new(Arc::clone(&backend));
        let mut app = ShellApp::new();

        match tui::run_shell_loop(&mut app, &controller, &events)? {
            LoopOutcome::Logout => {
                session.logout();
                println!("Logged out.");
            }
            LoopOutcome::Quit => break,
        }
    }

    Ok(())
}
