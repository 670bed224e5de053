//! Board model: the tableau grid and the deal pile cursor.
//!
//! ## Key Types
//!
//! - `Board`: Column occupancy, face state, spacing, deck index
//! - `BoardCell`: An occupied slot
//! - `Run`: Cells lifted off the bottom of a column

pub mod grid;

pub use grid::{Board, BoardCell, Run};
