//! Codenames player - terminal client binary.
//!
//! Usage: `codenames-player "https://host/?room=ABCD&user_id=42"`, or set
//! `CODENAMES_LAUNCH_URL`. Without either, the last session is resumed.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use codenames_domain::HoldEvent;
use codenames_player::application::services::Orientation;
use codenames_player::infrastructure::platform::{DesktopStorageProvider, TerminalClipboard};
use codenames_player::infrastructure::url_handler::LaunchParams;
use codenames_player::infrastructure::websocket::TungsteniteConnector;
use codenames_player::infrastructure::ClientConfig;
use codenames_player::ui::TerminalView;
use codenames_player::GameClient;

const HELP: &str = "Commands: hold N | press N | release N | leave N | focus | copy | share | key | orient [auto|portrait|landscape] | quit";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv_from_repo_root();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "codenames_player=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting Codenames player");

    let config = ClientConfig::from_env().context("reading CODENAMES_* settings")?;
    let hold_duration = config.hold_duration;
    let storage = Arc::new(DesktopStorageProvider::new());
    let view = Arc::new(TerminalView::stdout(config.max_reconnect_attempts));

    let launch = match std::env::args()
        .nth(1)
        .or_else(|| std::env::var("CODENAMES_LAUNCH_URL").ok())
    {
        Some(link) => LaunchParams::from_link(&link),
        None => LaunchParams::from_storage(storage.as_ref()),
    };

    let client = GameClient::new(
        config,
        Arc::new(TungsteniteConnector::new()),
        view,
        storage,
        Arc::new(TerminalClipboard),
    );
    client.start(launch).context("starting game client")?;

    if client.take_fullscreen_hint() {
        println!("Tip: maximise the terminal window so the whole board fits");
    }
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("reading stdin")? else {
                    break;
                };
                if !run_command(&client, line.trim(), hold_duration).await {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    client.shutdown();
    tracing::info!("Codenames player stopped");
    Ok(())
}

/// Returns false when the user asked to quit.
async fn run_command(client: &GameClient, line: &str, hold_duration: Duration) -> bool {
    let mut parts = line.split_whitespace();
    let command = parts.next().unwrap_or_default();
    let index = parts.next().and_then(|raw| raw.parse::<usize>().ok());

    match (command, index) {
        ("", _) => {}
        ("quit" | "exit", _) => return false,
        ("hold", Some(index)) => {
            client.press_card(index);
            tokio::time::sleep(hold_duration + Duration::from_millis(50)).await;
            client.release_card(index);
        }
        ("press", Some(index)) => {
            client.press_card(index);
        }
        ("release", Some(index)) => {
            client.release_card(index);
        }
        ("leave", Some(index)) => {
            client.cancel_card(index, HoldEvent::PointerLeave);
        }
        ("focus", _) => {
            client.on_focus_regained();
        }
        ("copy", _) => report(client.copy_link()),
        ("share", _) => report(client.share_text()),
        ("key", _) => report(client.request_key()),
        ("orient", _) => {
            let next = match line.split_whitespace().nth(1) {
                Some(raw) => match raw.parse::<Orientation>() {
                    Ok(orientation) => orientation,
                    Err(e) => {
                        println!("{e}");
                        return true;
                    }
                },
                None => client.orientation().next(),
            };
            client.set_orientation(next);
        }
        _ => println!("{HELP}"),
    }
    true
}

fn report<E: std::fmt::Display>(result: Result<(), E>) {
    if let Err(e) = result {
        tracing::debug!(error = %e, "Share command failed");
        println!("{e}");
    }
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
