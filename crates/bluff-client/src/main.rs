//! Terminal session bootstrap for the bluff realtime layer.
//!
//! Stands in for the per-page setup scripts of the browser client: reads the
//! game id, page identity, and username from flags instead of the rendered
//! document, builds the one `SyncManager` at the composition root, registers
//! exactly one handler for the current page, and mirrors server pushes to
//! the terminal until the connection closes.

#![deny(unsafe_code)]

use std::collections::HashSet;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use parking_lot::Mutex;
use tracing::{info, warn};

use bluff_core::{GameId, InboundMessage, OutboundEvent, PageIdentity};
use bluff_sync::{ConnectionState, FixedPage, SyncConfig, SyncManager};

#[derive(Debug, Parser)]
#[command(name = "bluff-client", about = "Realtime client for one bluff game view")]
struct Args {
    /// Game identifier assigned by the server.
    #[arg(long)]
    game: String,

    /// Page identity of this view: `waiting`, `hand`, `check`, `guesses`,
    /// `hand_detail`.
    #[arg(long)]
    page: PageIdentity,

    /// Local player's username.
    #[arg(long)]
    username: String,

    /// Game server host (and optional port).
    #[arg(long, default_value = "localhost:8000")]
    host: String,

    /// Connect over `wss://` instead of `ws://`.
    #[arg(long, default_value_t = false)]
    secure: bool,

    /// Log level when `RUST_LOG` is unset.
    #[arg(long, default_value = "info")]
    log_level: String,
}

/// Initialize the global tracing subscriber with stderr output only.
fn init_subscriber(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .compact();
    let _ = subscriber.try_init();
}

/// Wire the one handler this view needs.
fn register_view(manager: &SyncManager, page: PageIdentity, username: String) {
    match page {
        PageIdentity::Waiting => {
            // Roster mirrors the DOM list: no self-entry, no duplicates.
            let roster: Mutex<HashSet<String>> = Mutex::new(HashSet::new());
            manager.register_handler(page, move |msg| match msg {
                InboundMessage::Redirect { url } => {
                    println!("game started, continue at {url}");
                }
                InboundMessage::PlayerJoined { player_username } => {
                    if player_username == username {
                        return;
                    }
                    if roster.lock().insert(player_username.clone()) {
                        println!("{player_username} joined the game");
                    }
                }
                other => warn!(?other, "unexpected push for waiting view"),
            });
        }
        PageIdentity::Hand => {
            manager.register_handler(page, |msg| {
                if let InboundMessage::WordChosen { chosen_word } = msg {
                    println!("word chosen: {chosen_word} — refresh the hand view");
                }
            });
        }
        PageIdentity::Check => {
            manager.register_handler(page, |msg| {
                if let InboundMessage::NewGuess { new_guess } = msg {
                    println!(
                        "[guess {id}] {word} means: {content} (ok/remove?)",
                        id = new_guess.id,
                        word = new_guess.word,
                        content = new_guess.content,
                    );
                }
            });
        }
        PageIdentity::Guesses => {
            manager.register_handler(page, |msg| {
                if let InboundMessage::GuessesReady { guesses_ready } = msg {
                    if guesses_ready {
                        println!("guesses are ready — refresh to vote");
                    }
                }
            });
        }
        PageIdentity::HandDetail => {
            manager.register_handler(page, |msg| match msg {
                InboundMessage::NewVote { new_vote } => {
                    println!(
                        "~ Vote '{content}' from {votant}",
                        content = new_vote.content,
                        votant = new_vote.votant,
                    );
                }
                InboundMessage::HandFinished { .. } => {
                    println!("hand finished — refresh the view");
                }
                InboundMessage::Redirect { url } => {
                    println!("continue at {url}");
                }
                other => warn!(?other, "unexpected push for hand-detail view"),
            });
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_subscriber(&args.log_level);

    let config = SyncConfig {
        host: args.host,
        secure: args.secure,
    };
    let manager = Arc::new(SyncManager::over_websocket(
        config,
        Arc::new(FixedPage(args.page)),
    ));

    register_view(&manager, args.page, args.username.clone());

    let game = GameId::from_string(args.game);
    manager.connect(&game);
    info!(game = %game, page = %args.page, "connecting");

    let mut state = manager.watch_state();
    let settled = state
        .wait_for(|s| matches!(*s, ConnectionState::Open | ConnectionState::Closed))
        .await
        .map(|s| *s)?;
    if settled == ConnectionState::Closed {
        anyhow::bail!("could not reach the game server");
    }
    info!("connected");

    // The waiting room announces the local player as soon as the socket
    // opens, exactly once.
    if args.page == PageIdentity::Waiting {
        manager.send(&OutboundEvent::PlayerJoin {
            player_username: args.username,
        })?;
    }

    tokio::select! {
        closed = state.wait_for(|s| *s == ConnectionState::Closed) => {
            let _ = closed?;
            info!("connection closed; reload the page to resync");
        }
        signal = tokio::signal::ctrl_c() => {
            signal?;
            info!("interrupted");
        }
    }
    Ok(())
}
