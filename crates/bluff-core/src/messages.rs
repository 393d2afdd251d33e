//! Wire message types.
//!
//! Two families, one per direction:
//!
//! - **[`InboundMessage`]**: server pushes. The server identifies events by
//!   field presence rather than a tag, so the union is `#[serde(untagged)]`
//!   and discriminates on which field is set. Unknown extra fields are
//!   ignored; a payload matching no known shape lands in
//!   [`InboundMessage::Other`] so routing stays permissive.
//! - **[`OutboundEvent`]**: client events, tagged by `event_type` on the
//!   wire. Serialized verbatim; the sync layer never inspects them.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ─────────────────────────────────────────────────────────────────────────────
// InboundMessage — server pushes, discriminated by field presence
// ─────────────────────────────────────────────────────────────────────────────

/// A guess awaiting the leader's review.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Guess {
    /// The word the guess belongs to.
    pub word: String,
    /// The proposed definition.
    pub content: String,
    /// Identifier used to key the review control.
    pub id: i64,
}

/// A vote cast on a guess.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vote {
    /// The voted guess content.
    pub content: String,
    /// Username of the voter.
    pub votant: String,
}

/// One decoded server push.
///
/// Variant order matters: serde tries untagged variants top to bottom, and
/// [`InboundMessage::Other`] must stay last as the catch-all.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InboundMessage {
    /// Navigate to a new view (e.g. the game started or the hand ended).
    Redirect {
        /// Target URL.
        url: String,
    },
    /// A player joined the waiting room.
    PlayerJoined {
        /// Username of the joiner.
        player_username: String,
    },
    /// The leader chose the word for this hand.
    WordChosen {
        /// The chosen word.
        chosen_word: String,
    },
    /// A new guess needs checking.
    NewGuess {
        /// The guess to review.
        new_guess: Guess,
    },
    /// The guess list is ready for voting.
    GuessesReady {
        /// Always `true` when present.
        guesses_ready: bool,
    },
    /// A vote was cast on the current hand.
    NewVote {
        /// The vote.
        new_vote: Vote,
    },
    /// The current hand finished.
    HandFinished {
        /// Always `true` when present.
        hand_finished: bool,
    },
    /// Any shape the above do not cover. Routed, never rejected.
    Other(Value),
}

// ─────────────────────────────────────────────────────────────────────────────
// OutboundEvent — client events, tagged by `event_type`
// ─────────────────────────────────────────────────────────────────────────────

/// One client event, serialized to a single text frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum OutboundEvent {
    /// The waiting room is full enough; start the game.
    StartGame,
    /// The leader locked in the word for this hand.
    ChosenWord,
    /// The leader finished checking; guesses are ready for voting.
    GuessesReady,
    /// Announce the local player to the waiting room.
    PlayerJoin {
        /// Local player's username.
        player_username: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_by_field_presence() {
        let msg: InboundMessage =
            serde_json::from_value(json!({"player_username": "alice"})).unwrap();
        assert_eq!(
            msg,
            InboundMessage::PlayerJoined {
                player_username: "alice".into()
            }
        );

        let msg: InboundMessage =
            serde_json::from_value(json!({"url": "/game/3/hand/"})).unwrap();
        assert_eq!(
            msg,
            InboundMessage::Redirect {
                url: "/game/3/hand/".into()
            }
        );
    }

    #[test]
    fn decodes_nested_guess_payload() {
        let msg: InboundMessage = serde_json::from_value(json!({
            "new_guess": {"word": "cat", "content": "a feline", "id": 7}
        }))
        .unwrap();
        let InboundMessage::NewGuess { new_guess } = msg else {
            panic!("expected NewGuess, got {msg:?}");
        };
        assert_eq!(new_guess.id, 7);
        assert_eq!(new_guess.word, "cat");
    }

    #[test]
    fn ignores_unknown_fields() {
        let msg: InboundMessage = serde_json::from_value(json!({
            "hand_finished": true,
            "server_ts": 123
        }))
        .unwrap();
        assert_eq!(
            msg,
            InboundMessage::HandFinished {
                hand_finished: true
            }
        );
    }

    #[test]
    fn unknown_shapes_fall_through_to_other() {
        let payload = json!({"totally_new_event": 1});
        let msg: InboundMessage = serde_json::from_value(payload.clone()).unwrap();
        assert_eq!(msg, InboundMessage::Other(payload));
    }

    #[test]
    fn outbound_events_carry_event_type_tag() {
        assert_eq!(
            serde_json::to_value(&OutboundEvent::StartGame).unwrap(),
            json!({"event_type": "start_game"})
        );
        assert_eq!(
            serde_json::to_value(&OutboundEvent::PlayerJoin {
                player_username: "alice".into()
            })
            .unwrap(),
            json!({"event_type": "player_join", "player_username": "alice"})
        );
    }
}
