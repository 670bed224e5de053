//! Notifications for the presentation layer.
//!
//! The engine never animates anything. Each mutation records what changed
//! as `GameEvent`s, which the presentation layer drains and turns into
//! visual transitions. When a batch finishes animating it calls
//! `GameSession::session_complete`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::CardId;
use crate::core::config::GROUP_SIZE;
use crate::core::geometry::Point;

/// One card leaving the deal pile.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DealStep {
    pub card: CardId,
    pub column: usize,
    pub row: usize,
    pub face_up: bool,
    /// Seconds to wait before animating this card.
    pub delay: f32,
}

/// Something the presentation layer should show.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A card should travel to a position.
    CardMoved { card: CardId, position: Point },

    /// A card turned over.
    CardFlipped { card: CardId, face_up: bool },

    /// A completed group left the board.
    CardsRemoved(SmallVec<[CardId; GROUP_SIZE]>),

    /// Cards dealt in order, with staggered delays.
    DealBatch(Vec<DealStep>),
}

/// Where a card should be drawn and what it shows.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardVisual {
    /// Current position, including any live drag offset.
    pub position: Point,
    /// Resting position the card returns to when a drag is abandoned.
    pub home: Point,
    pub face_up: bool,
    /// Face artwork index, `suit * 13 + rank`.
    pub image_index: u8,
}

impl CardVisual {
    /// A face-down card resting at `position`.
    #[must_use]
    pub fn resting(position: Point, image_index: u8) -> Self {
        Self {
            position,
            home: position,
            face_up: false,
            image_index,
        }
    }
}
