//! Console event loop: user actions, session events and log rendering.

use std::io::Write;
use std::str::FromStr;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;

use relay_console_connection::{
    ConnectOutcome, ConnectionManager, ManagerOptions, SendOutcome, WsConnector,
};
use relay_console_log::{LogNotification, LogSequence};
use relay_console_protocol::{PageLocation, ProtocolError, RelayCommand};

use crate::config::ConsoleConfig;

const HELP: &str = "commands: connect | on | off | close | quit";

/// A line typed by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Connect,
    Command(RelayCommand),
    Close,
    Quit,
    Help,
}

impl FromStr for Action {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "connect" => Ok(Self::Connect),
            "close" => Ok(Self::Close),
            "quit" | "exit" => Ok(Self::Quit),
            "help" | "?" => Ok(Self::Help),
            other => other.parse().map(Self::Command),
        }
    }
}

/// Prints entries appended since the last call and advances `printed`.
pub fn render_new(
    log: &LogSequence,
    printed: &mut usize,
    out: &mut impl Write,
) -> std::io::Result<()> {
    for entry in log.entries_from(*printed) {
        writeln!(out, "[{}] {}", entry.timestamp(), entry.text())?;
    }
    *printed = log.len();
    out.flush()
}

/// Runs the console until stdin closes or the user quits.
pub async fn run(config: ConsoleConfig) -> anyhow::Result<()> {
    let location = PageLocation::parse(&config.page_url)
        .with_context(|| format!("bad page_url {:?}", config.page_url))?;
    let options = ManagerOptions {
        echo_outbound: config.echo_outbound,
    };
    let mut manager = ConnectionManager::new(WsConnector::new(), location, options);
    let mut events = manager
        .take_events()
        .context("event receiver already taken")?;
    let mut notifications = manager.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = std::io::stdout();
    let mut printed = 0usize;

    tracing::info!(endpoint = %manager.endpoint(), "console ready");
    if config.auto_connect {
        connect(&mut manager);
    }

    loop {
        tokio::select! {
            Some(event) = events.recv() => manager.handle_event(event),

            note = notifications.recv() => match note {
                Ok(LogNotification::ScrollToLatest) | Err(RecvError::Lagged(_)) => {
                    render_new(manager.log(), &mut printed, &mut stdout)?;
                }
                Ok(LogNotification::Appended { .. }) => {}
                Err(RecvError::Closed) => break,
            },

            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if line.trim().is_empty() {
                    continue;
                }
                match line.parse::<Action>() {
                    Ok(Action::Connect) => connect(&mut manager),
                    Ok(Action::Command(cmd)) => {
                        if manager.send_command(cmd) == SendOutcome::NotConnected {
                            eprintln!("not connected");
                        }
                    }
                    Ok(Action::Close) => {
                        manager.close();
                    }
                    Ok(Action::Quit) => break,
                    Ok(Action::Help) => eprintln!("{HELP}"),
                    Err(e) => eprintln!("{e} ({HELP})"),
                }
            }
        }
    }

    manager.close();
    Ok(())
}

fn connect(manager: &mut ConnectionManager<WsConnector>) {
    match manager.connect() {
        Ok(ConnectOutcome::Started(_)) => {}
        Ok(ConnectOutcome::AlreadyConnected(_)) => eprintln!("already connected"),
        Err(e) => tracing::warn!(error = %e, "connect failed"),
    }
}
