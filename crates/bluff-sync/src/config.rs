//! Transport address configuration.

use bluff_core::GameId;
use serde::{Deserialize, Serialize};

/// Where the game server lives and which scheme to use.
///
/// The hosting page picks the scheme: pages served over a secure scheme set
/// `secure` and get `wss://`; everything else gets `ws://`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Host (and optional port) of the game server, e.g. `localhost:8000`.
    pub host: String,
    /// Use `wss://` instead of `ws://`.
    #[serde(default)]
    pub secure: bool,
}

impl SyncConfig {
    /// Config pointing at `host` over the plain scheme.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            secure: false,
        }
    }

    /// Transport address for one game session.
    ///
    /// The trailing slash is part of the server's route and must be kept.
    #[must_use]
    pub fn endpoint(&self, game: &GameId) -> String {
        let scheme = if self.secure { "wss" } else { "ws" };
        format!("{scheme}://{host}/ws/game/{game}/", host = self.host)
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self::new("localhost:8000")
    }
}
