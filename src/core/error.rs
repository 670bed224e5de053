//! Reasons a top-level command was rejected.
//!
//! A rejected command leaves every piece of game state untouched. Callers
//! that treat illegal requests as "nothing happens" can simply ignore the
//! error.

use thiserror::Error;

/// Why a session command did not run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum CommandError {
    /// A deal is still settling; wait for `session_complete`.
    #[error("a deal is still in progress")]
    Busy,

    /// No cards remain in the deal pile.
    #[error("the deal pile is empty")]
    DeckExhausted,

    /// Supplemental rows may not be dealt onto an empty column.
    #[error("column {0} is empty")]
    EmptyColumn(usize),

    /// The undo history has no restorable entry.
    #[error("nothing to undo")]
    NoHistory,
}
