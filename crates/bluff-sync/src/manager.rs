//! Connection lifecycle and message routing.
//!
//! [`SyncManager`] owns at most one live transport per game session. A call
//! to [`SyncManager::connect`] spawns one driver task that performs the
//! handshake, publishes state transitions, dispatches every inbound frame to
//! the handler registered for the current page identity, and drains the
//! outbound queue in call order. There is no automatic reconnection: once
//! the transport reaches CLOSED the session is over until someone calls
//! `connect` again, which builds a fresh transport.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use bluff_core::{GameId, InboundMessage, OutboundEvent, PageIdentity};
use parking_lot::{Mutex, RwLock};
use tokio::sync::{mpsc, watch};
use tracing::{debug, warn};

use crate::config::SyncConfig;
use crate::error::SyncError;
use crate::page::PageContext;
use crate::transport::{Connector, TransportRx, TransportTx};

/// Outbound frames queued between `send` and the driver task.
const OUTBOUND_QUEUE: usize = 64;

/// Lifecycle state of the transport connection.
///
/// CLOSED is terminal for a given transport; a later `connect` starts over
/// at CONNECTING with a new one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectionState {
    /// Handshake in flight.
    Connecting,
    /// Frames flow both ways.
    Open,
    /// Peer initiated shutdown; final close pending.
    Closing,
    /// No usable transport. Also the state before the first `connect`.
    Closed,
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Connecting => "connecting",
            Self::Open => "open",
            Self::Closing => "closing",
            Self::Closed => "closed",
        })
    }
}

/// Callback consuming one decoded inbound message.
type Handler = Arc<dyn Fn(InboundMessage) + Send + Sync>;

type HandlerRegistry = RwLock<HashMap<PageIdentity, Handler>>;

/// Connection manager: one shared transport, one handler per page identity.
///
/// Construct exactly one per client at the composition root and share it by
/// `Arc`. All methods take `&self`.
pub struct SyncManager {
    config: SyncConfig,
    connector: Arc<dyn Connector>,
    page: Arc<dyn PageContext>,
    handlers: Arc<HandlerRegistry>,
    state_tx: Arc<watch::Sender<ConnectionState>>,
    conn: Mutex<Option<ConnectionSlot>>,
}

struct ConnectionSlot {
    out_tx: mpsc::Sender<String>,
    _driver: tokio::task::JoinHandle<()>,
}

impl SyncManager {
    /// Create a manager with an explicit connector and page accessor.
    #[must_use]
    pub fn new(
        config: SyncConfig,
        connector: Arc<dyn Connector>,
        page: Arc<dyn PageContext>,
    ) -> Self {
        let (state_tx, _state_rx) = watch::channel(ConnectionState::Closed);
        Self {
            config,
            connector,
            page,
            handlers: Arc::new(RwLock::new(HashMap::new())),
            state_tx: Arc::new(state_tx),
            conn: Mutex::new(None),
        }
    }

    /// Create a manager backed by the production websocket connector.
    #[must_use]
    pub fn over_websocket(config: SyncConfig, page: Arc<dyn PageContext>) -> Self {
        Self::new(config, Arc::new(crate::transport::WsConnector), page)
    }

    /// Ensure a live transport for `game`.
    ///
    /// No-op while a connection exists in any state but CLOSED. Otherwise
    /// derives the endpoint, publishes CONNECTING, and spawns the driver.
    /// Returns immediately; handshake failure surfaces as the CLOSED
    /// transition, never as an error here.
    ///
    /// Must be called within a tokio runtime.
    pub fn connect(&self, game: &GameId) {
        let mut slot = self.conn.lock();
        if slot.is_some() && self.state() != ConnectionState::Closed {
            debug!(game = %game, state = %self.state(), "connect: transport already live");
            return;
        }
        let url = self.config.endpoint(game);
        let (out_tx, out_rx) = mpsc::channel(OUTBOUND_QUEUE);
        let _ = self.state_tx.send_replace(ConnectionState::Connecting);
        let driver = tokio::spawn(drive_connection(
            url,
            Arc::clone(&self.connector),
            Arc::clone(&self.handlers),
            Arc::clone(&self.page),
            Arc::clone(&self.state_tx),
            out_rx,
        ));
        *slot = Some(ConnectionSlot {
            out_tx,
            _driver: driver,
        });
    }

    /// Register `handler` for `page`, replacing any previous one.
    ///
    /// Last write wins; replacing is not an error. Registration order
    /// relative to `connect` does not matter — messages arriving before the
    /// current page has a handler are dropped, not buffered.
    pub fn register_handler<F>(&self, page: PageIdentity, handler: F)
    where
        F: Fn(InboundMessage) + Send + Sync + 'static,
    {
        let _ = self.handlers.write().insert(page, Arc::new(handler));
    }

    /// Serialize `event` and transmit it on the current transport.
    ///
    /// Fails with [`SyncError::TransportNotReady`] unless the connection is
    /// OPEN. Never buffers across a closed connection and never retries.
    pub fn send(&self, event: &OutboundEvent) -> Result<(), SyncError> {
        let state = self.state();
        if state != ConnectionState::Open {
            return Err(SyncError::TransportNotReady { state });
        }
        let text = serde_json::to_string(event)?;
        let slot = self.conn.lock();
        let Some(conn) = slot.as_ref() else {
            return Err(SyncError::TransportNotReady {
                state: ConnectionState::Closed,
            });
        };
        conn.out_tx.try_send(text).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => SyncError::Transport {
                reason: "outbound queue full".into(),
            },
            mpsc::error::TrySendError::Closed(_) => SyncError::TransportNotReady {
                state: ConnectionState::Closed,
            },
        })
    }

    /// Current connection state.
    #[must_use]
    pub fn state(&self) -> ConnectionState {
        *self.state_tx.borrow()
    }

    /// Subscribe to state transitions.
    ///
    /// The one termination-awareness surface: collaborators await CLOSED
    /// here instead of catching errors from `connect`.
    #[must_use]
    pub fn watch_state(&self) -> watch::Receiver<ConnectionState> {
        self.state_tx.subscribe()
    }
}

/// Owns the transport from handshake to close.
async fn drive_connection(
    url: String,
    connector: Arc<dyn Connector>,
    handlers: Arc<HandlerRegistry>,
    page: Arc<dyn PageContext>,
    state: Arc<watch::Sender<ConnectionState>>,
    mut out_rx: mpsc::Receiver<String>,
) {
    let (mut tx, mut rx) = match connector.connect(&url).await {
        Ok(pair) => pair,
        Err(e) => {
            warn!(%url, error = %e, "connection failed");
            let _ = state.send_replace(ConnectionState::Closed);
            return;
        }
    };
    let _ = state.send_replace(ConnectionState::Open);
    debug!(%url, "connection established");

    loop {
        tokio::select! {
            inbound = rx.next_text() => match inbound {
                Some(Ok(text)) => dispatch(&text, &handlers, &*page),
                Some(Err(e)) => {
                    warn!(error = %e, "transport fault");
                    break;
                }
                None => {
                    debug!("connection closed by peer");
                    let _ = state.send_replace(ConnectionState::Closing);
                    break;
                }
            },
            outbound = out_rx.recv() => match outbound {
                Some(text) => {
                    if let Err(e) = tx.send_text(text).await {
                        warn!(error = %e, "outbound send failed");
                        break;
                    }
                }
                // Manager dropped; nothing left to forward.
                None => break,
            },
        }
    }
    let _ = state.send_replace(ConnectionState::Closed);
}

/// Route one raw frame to the handler for the current page identity.
///
/// The identity is read fresh per message; the manager never caches it.
/// Undecodable frames and frames with no matching handler are dropped, the
/// former with a warning, keeping the connection alive either way.
fn dispatch(text: &str, handlers: &HandlerRegistry, page: &dyn PageContext) {
    let message: InboundMessage = match serde_json::from_str(text) {
        Ok(message) => message,
        Err(e) => {
            warn!(error = %e, "dropping undecodable inbound frame");
            return;
        }
    };
    let Some(identity) = page.current_page() else {
        debug!("current view has no page identity; dropping message");
        return;
    };
    // Clone out of the registry so the handler can re-register freely.
    let handler = handlers.read().get(&identity).map(Arc::clone);
    match handler {
        Some(handler) => handler(message),
        None => debug!(page = %identity, "no handler registered; dropping message"),
    }
}
