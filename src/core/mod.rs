//! Core building blocks: constants, layout, geometry, RNG, errors.
//!
//! Nothing in here knows the rules of the game. The board, rules and
//! session modules build on these types.

pub mod config;
pub mod error;
pub mod geometry;
pub mod rng;

pub use config::{
    LayoutConfig, DECKS, GROUP_SIZE, INITIAL_FACE_DOWN_ROWS, INITIAL_PARTIAL_ROW, KING, MAX_UNDO,
    NUM_CARDS, NUM_COLUMNS, NUM_ROWS, RANKS, SUITS,
};
pub use error::CommandError;
pub use geometry::{Point, Rect};
pub use rng::{GameRng, GameRngState};
