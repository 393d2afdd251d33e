//! Transport seam — thin client over `tokio-tungstenite`.
//!
//! The manager talks to the socket through the [`Connector`] trait so unit
//! tests can run against in-memory fakes. A connection comes back as split
//! send/receive halves, letting the driver await inbound frames and drain
//! outbound ones in one select loop. Production uses [`WsConnector`], which
//! speaks UTF-8 text frames and nothing else: binary frames are skipped,
//! close ends the stream, ping/pong stay inside the websocket layer.

use async_trait::async_trait;
use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::warn;

use crate::error::SyncError;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Send half of an established connection.
#[async_trait]
pub trait TransportTx: Send {
    /// Transmit one text frame.
    async fn send_text(&mut self, text: String) -> Result<(), SyncError>;
}

/// Receive half of an established connection.
#[async_trait]
pub trait TransportRx: Send {
    /// Receive the next text frame.
    ///
    /// `None` means the peer closed the connection (orderly or not); the
    /// transport is unusable afterwards. `Some(Err(_))` reports a stream
    /// fault, after which the caller should treat the transport as closed.
    async fn next_text(&mut self) -> Option<Result<String, SyncError>>;
}

/// Both halves of one established connection.
pub type Transport = (Box<dyn TransportTx>, Box<dyn TransportRx>);

/// Establishes a [`Transport`] for a derived address.
#[async_trait]
pub trait Connector: Send + Sync {
    /// Open a connection to `url`.
    async fn connect(&self, url: &str) -> Result<Transport, SyncError>;
}

/// Production connector over `tokio-tungstenite`.
#[derive(Clone, Copy, Debug, Default)]
pub struct WsConnector;

#[async_trait]
impl Connector for WsConnector {
    async fn connect(&self, url: &str) -> Result<Transport, SyncError> {
        let (ws, _response) =
            connect_async(url)
                .await
                .map_err(|e| SyncError::ConnectFailed {
                    url: url.to_owned(),
                    reason: e.to_string(),
                })?;
        let (sink, stream) = ws.split();
        Ok((Box::new(WsTx { sink }), Box::new(WsRx { stream })))
    }
}

struct WsTx {
    sink: SplitSink<WsStream, Message>,
}

#[async_trait]
impl TransportTx for WsTx {
    async fn send_text(&mut self, text: String) -> Result<(), SyncError> {
        self.sink
            .send(Message::Text(text.into()))
            .await
            .map_err(|e| SyncError::Transport {
                reason: e.to_string(),
            })
    }
}

struct WsRx {
    stream: SplitStream<WsStream>,
}

#[async_trait]
impl TransportRx for WsRx {
    async fn next_text(&mut self) -> Option<Result<String, SyncError>> {
        while let Some(frame) = self.stream.next().await {
            match frame {
                Ok(Message::Text(text)) => return Some(Ok(text.to_string())),
                // Pings are answered by the websocket layer itself.
                Ok(Message::Ping(_) | Message::Pong(_) | Message::Frame(_)) => {}
                Ok(Message::Binary(_)) => {
                    warn!("skipping unexpected binary frame");
                }
                Ok(Message::Close(_)) => return None,
                Err(e) => {
                    return Some(Err(SyncError::Transport {
                        reason: e.to_string(),
                    }))
                }
            }
        }
        None
    }
}
