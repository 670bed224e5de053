//! # spider-rules
//!
//! Rule engine and state machine for Spider Solitaire.
//!
//! ## Design Principles
//!
//! 1. **Presentation-Agnostic**: The engine never draws or animates. It
//!    takes board-relative pointer input and emits `GameEvent`s describing
//!    what moved, flipped, was removed, or was dealt.
//!
//! 2. **All-or-Nothing Commands**: Illegal requests change nothing. Drops
//!    onto illegal columns return home; deals while busy are rejected.
//!
//! 3. **Cheap History**: Board columns are persistent `im` vectors, so
//!    undo snapshots share structure with the live board.
//!
//! ## Modules
//!
//! - `core`: Constants, layout, geometry, RNG, errors
//! - `cards`: Card identity, faces, and the deck registry
//! - `board`: Tableau grid and deal pile cursor
//! - `rules`: Move legality and completed-group detection
//! - `session`: Dealing, undo, pointer interaction, notifications
//!
//! ## Example
//!
//! ```
//! use spider_rules::{GameSession, LayoutConfig, SuitStyle};
//!
//! let mut session = GameSession::new(LayoutConfig::default(), 42);
//! session.new_game(SuitStyle::OneSuit).unwrap();
//! let events = session.drain_events();
//! assert!(!events.is_empty());
//!
//! // ... animate, then:
//! session.session_complete();
//! assert!(!session.is_busy());
//! ```

pub mod board;
pub mod cards;
pub mod core;
pub mod rules;
pub mod session;

// Re-export commonly used types
pub use crate::core::{CommandError, GameRng, GameRngState, LayoutConfig, Point, Rect};

pub use crate::cards::{CardFace, CardId, CardRegistry, Rank, Suit, SuitStyle};

pub use crate::board::{Board, BoardCell, Run};

pub use crate::rules::{can_drop_on_column, find_completed_groups, is_completed_group, is_movable_run, DropCheck};

pub use crate::session::{
    CardVisual, DealStep, GameEvent, GameSession, Selection, SessionPhase, SessionState, UndoHistory,
};
