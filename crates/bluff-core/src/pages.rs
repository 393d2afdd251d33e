//! Page identities — the dispatch keys for inbound messages.
//!
//! Each server-rendered view declares exactly one identity; the sync layer
//! reads it fresh on every dispatch and routes the message to the handler
//! registered under that identity. The set is closed: a view that is not one
//! of these five never receives messages.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identity of the currently rendered view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageIdentity {
    /// Waiting room: roster of joined players until the game starts.
    Waiting,
    /// Hand view: the leader picks the word for this hand.
    Hand,
    /// Check view: the leader reviews submitted guesses.
    Check,
    /// Guesses view: players wait for the guess list to be ready.
    Guesses,
    /// Hand-detail view: votes arrive and the hand concludes.
    HandDetail,
}

impl PageIdentity {
    /// All valid identities, in a stable order.
    pub const ALL: [Self; 5] = [
        Self::Waiting,
        Self::Hand,
        Self::Check,
        Self::Guesses,
        Self::HandDetail,
    ];

    /// The wire/document tag for this identity.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Waiting => "waiting",
            Self::Hand => "hand",
            Self::Check => "check",
            Self::Guesses => "guesses",
            Self::HandDetail => "hand_detail",
        }
    }
}

impl fmt::Display for PageIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A page tag outside the known set.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown page identity: {0:?}")]
pub struct UnknownPageIdentity(pub String);

impl FromStr for PageIdentity {
    type Err = UnknownPageIdentity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "waiting" => Ok(Self::Waiting),
            "hand" => Ok(Self::Hand),
            "check" => Ok(Self::Check),
            "guesses" => Ok(Self::Guesses),
            "hand_detail" => Ok(Self::HandDetail),
            other => Err(UnknownPageIdentity(other.to_owned())),
        }
    }
}
