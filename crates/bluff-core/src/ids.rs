//! Branded ID newtype for game sessions.
//!
//! The game identifier is opaque to this layer: it is minted by the hosting
//! service and injected into the page that bootstraps the client. Wrapping it
//! in a newtype keeps it from being confused with other strings (usernames,
//! URLs) at call sites.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of one game session.
///
/// Opaque; the sync layer only ever embeds it in the transport address.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(String);

impl GameId {
    /// Create from an existing string value.
    #[must_use]
    pub fn from_string(s: String) -> Self {
        Self(s)
    }

    /// Return the inner string as a slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume self and return the inner `String`.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl From<&str> for GameId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<u64> for GameId {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
