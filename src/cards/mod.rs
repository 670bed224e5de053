//! Card system: identity, face values, and the deck registry.
//!
//! ## Key Types
//!
//! - `CardId`: Stable index of a physical card
//! - `Suit`, `Rank`: Logical face values
//! - `SuitStyle`: Difficulty (1, 2 or 4 suits)
//! - `CardFace`: Face assigned to a card for the current game
//! - `CardRegistry`: Faces plus shuffled deal order

pub mod card;
pub mod registry;

pub use card::{CardFace, CardId, Rank, Suit, SuitStyle};
pub use registry::CardRegistry;
