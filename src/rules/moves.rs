//! Move legality: which runs may be lifted and where they may be dropped.
//!
//! These are pure functions over a board and the deck's face values. They
//! never mutate anything, so the session can ask them speculatively (for
//! example while scanning columns for an automatic move).

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::cards::{CardFace, CardRegistry, Rank};

/// Outcome of asking whether a card may be dropped on a column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropCheck {
    /// The drop is allowed.
    pub legal: bool,
    /// The destination's bottom card shares the moving card's suit.
    ///
    /// Only used to rank automatic destinations; it does not affect legality.
    pub same_suit: bool,
}

impl DropCheck {
    /// A rejected drop.
    pub const ILLEGAL: DropCheck = DropCheck {
        legal: false,
        same_suit: false,
    };

    /// A drop onto an empty column.
    pub const EMPTY_COLUMN: DropCheck = DropCheck {
        legal: true,
        same_suit: false,
    };
}

/// Check if the card at `(column, row)` heads a run that may be lifted.
///
/// The bottommost card of a column is always movable. Any other card must be
/// face up, and every card below it must continue a same-suit sequence
/// descending by one down to the bottom of the column.
#[must_use]
pub fn is_movable_run(board: &Board, cards: &CardRegistry, column: usize, row: usize) -> bool {
    let Some(head) = board.cell(column, row) else {
        return false;
    };

    if row == board.bottommost_occupied_row(column) {
        return true;
    }

    if !head.face_up {
        return false;
    }

    let mut above = cards.card_at(head.card);
    for cell in board.column(column).iter().skip(row + 1) {
        let face = cards.card_at(cell.card);
        if !face.continues_run(above) {
            return false;
        }
        above = face;
    }

    true
}

/// Check if `moving` may be dropped onto the bottom of `column`.
///
/// Empty columns accept anything. Kings may only start empty columns. A full
/// column accepts nothing. Otherwise the destination's bottom card must be
/// exactly one rank higher than the moving card; suit does not matter.
#[must_use]
pub fn can_drop_on_column(
    board: &Board,
    cards: &CardRegistry,
    column: usize,
    moving: &CardFace,
) -> DropCheck {
    let Some(bottom) = board.bottom_cell(column) else {
        return DropCheck::EMPTY_COLUMN;
    };

    if moving.rank() == Rank::KING {
        return DropCheck::ILLEGAL;
    }

    if board.first_free_row(column).is_none() {
        return DropCheck::ILLEGAL;
    }

    let destination = cards.card_at(bottom.card);
    if !destination.rank().is_one_above(moving.rank()) {
        return DropCheck::ILLEGAL;
    }

    DropCheck {
        legal: true,
        same_suit: destination.suit() == moving.suit(),
    }
}
