//! Typed user-game interaction payload.
//!
//! Replaces the loosely-typed "play or like or bookmark string" payload
//! with a tagged enum so every call site matches exhaustively.

use crate::types::GameId;

/// A single user-game interaction event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Interaction {
    /// A play session, with the session length in seconds.
    Play { game_id: GameId, play_time_secs: i64 },
    /// A like.
    Like { game_id: GameId },
    /// A bookmark.
    Bookmark { game_id: GameId },
}

impl Interaction {
    /// The game this interaction targets.
    pub fn game_id(&self) -> GameId {
        match self {
            Self::Play { game_id, .. } | Self::Like { game_id } | Self::Bookmark { game_id } => {
                *game_id
            }
        }
    }

    /// Stable label for structured log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Play { .. } => "play",
            Self::Like { .. } => "like",
            Self::Bookmark { .. } => "bookmark",
        }
    }
}
