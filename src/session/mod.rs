//! Session control: dealing, undo, pointer interaction, notifications.
//!
//! `GameSession` is the single owner of the deck, board and undo history.
//! The presentation layer drives it with commands and pointer input,
//! drains `GameEvent`s to animate, and calls `session_complete` when a
//! batch of animations has finished.

mod game;
mod input;
mod undo;

pub mod events;

pub use events::{CardVisual, DealStep, GameEvent};
pub use game::{GameSession, SessionPhase, SessionState};
pub use input::Selection;
pub use undo::UndoHistory;
