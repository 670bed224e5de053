//! Move legality and sequencing rules.
//!
//! Everything here is a pure query over a `Board` and the deck's faces:
//! - Which runs may be lifted (`is_movable_run`)
//! - Where a run may be dropped (`can_drop_on_column`)
//! - Which columns end in a completed King-to-Ace group
//!
//! The session applies the consequences; these functions only decide.

pub mod groups;
pub mod moves;

pub use groups::{find_completed_groups, is_completed_group};
pub use moves::{can_drop_on_column, is_movable_run, DropCheck};
