//! Game constants and layout configuration.
//!
//! Deck size, grid dimensions and undo depth are fixed. Everything that
//! depends on screen size lives in `LayoutConfig`, which the presentation
//! layer supplies. The engine never computes these values itself; it only
//! consumes them when placing cards and hit-testing pointer input.

use serde::{Deserialize, Serialize};

use super::geometry::Point;

/// Ranks per suit (Ace..King).
pub const RANKS: usize = 13;

/// Physical suits per deck.
pub const SUITS: usize = 4;

/// Number of physical decks shuffled together.
pub const DECKS: usize = 2;

/// Total cards in play.
pub const NUM_CARDS: usize = DECKS * SUITS * RANKS;

/// Tableau columns.
pub const NUM_COLUMNS: usize = 10;

/// Row capacity of a single column.
pub const NUM_ROWS: usize = 50;

/// Undo ring capacity.
pub const MAX_UNDO: usize = 50;

/// Rank index of the King (Ace is 0).
pub const KING: u8 = 12;

/// Cards in a completed King-to-Ace group.
pub const GROUP_SIZE: usize = RANKS;

/// Full face-down rows in the opening deal.
pub const INITIAL_FACE_DOWN_ROWS: usize = 4;

/// Columns that receive an extra face-down card in the opening deal.
pub const INITIAL_PARTIAL_ROW: usize = 4;

/// Screen layout parameters supplied by the presentation layer.
///
/// All distances are in board coordinates. The engine treats them as
/// opaque: it multiplies rows by spacing and columns by width, nothing more.
///
/// ## Example
///
/// ```
/// use spider_rules::core::LayoutConfig;
///
/// let layout = LayoutConfig::for_viewport(1000.0, 1400.0)
///     .with_max_spacing(60.0)
///     .with_drag_threshold(8.0);
///
/// assert_eq!(layout.column_width, 100.0);
/// assert_eq!(layout.max_spacing, 60.0);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Horizontal distance between column origins (also the card width).
    pub column_width: f32,

    /// Height of a single card.
    pub card_height: f32,

    /// Height of the visible board.
    pub viewport_height: f32,

    /// Space kept free below the lowest card of a compressed column.
    pub bottom_margin: f32,

    /// Largest vertical gap between consecutive cards in a column.
    pub max_spacing: f32,

    /// Manhattan distance a pointer must travel before a press becomes a drag.
    pub drag_threshold: f32,

    /// Delay hint added per card while dealing, in seconds.
    pub deal_delay: f32,

    /// Where undealt cards rest.
    pub deal_position: Point,

    /// Where removed cards rest.
    pub offscreen_position: Point,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::for_viewport(1000.0, 1400.0)
    }
}

impl LayoutConfig {
    /// Derive a layout from the viewport size.
    ///
    /// Cards are a tenth of the width wide with a 3:4 aspect ratio. The deal
    /// pile sits in the bottom-right corner and removed cards are parked
    /// beyond the right edge.
    #[must_use]
    pub fn for_viewport(width: f32, height: f32) -> Self {
        let column_width = width / NUM_COLUMNS as f32;
        let card_height = column_width * 4.0 / 3.0;

        Self {
            column_width,
            card_height,
            viewport_height: height,
            bottom_margin: 70.0,
            max_spacing: 70.0,
            drag_threshold: 10.0,
            deal_delay: 0.1,
            deal_position: Point::new(width - column_width / 3.0, height - card_height / 2.0),
            offscreen_position: Point::new(1500.0, height - card_height / 2.0),
        }
    }

    /// Set the column width.
    #[must_use]
    pub fn with_column_width(mut self, width: f32) -> Self {
        self.column_width = width;
        self
    }

    /// Set the card height.
    #[must_use]
    pub fn with_card_height(mut self, height: f32) -> Self {
        self.card_height = height;
        self
    }

    /// Set the viewport height.
    #[must_use]
    pub fn with_viewport_height(mut self, height: f32) -> Self {
        self.viewport_height = height;
        self
    }

    /// Set the maximum vertical spacing.
    #[must_use]
    pub fn with_max_spacing(mut self, spacing: f32) -> Self {
        self.max_spacing = spacing;
        self
    }

    /// Set the drag-start threshold.
    #[must_use]
    pub fn with_drag_threshold(mut self, threshold: f32) -> Self {
        self.drag_threshold = threshold;
        self
    }

    /// Map a board x-coordinate to a column, if it falls on the tableau.
    #[must_use]
    pub fn column_at(&self, x: f32) -> Option<usize> {
        if x < 0.0 || self.column_width <= 0.0 {
            return None;
        }
        let column = (x / self.column_width) as usize;
        (column < NUM_COLUMNS).then_some(column)
    }

    /// Vertical spacing for a column whose bottommost card sits at `bottom_row`.
    ///
    /// Tall columns are compressed so the last card stays above the margin.
    #[must_use]
    pub fn spacing_for(&self, bottom_row: usize) -> f32 {
        if bottom_row == 0 {
            return self.max_spacing;
        }
        let available = self.viewport_height - self.card_height - self.bottom_margin;
        let spacing = (available / bottom_row as f32).floor().max(0.0);
        spacing.min(self.max_spacing)
    }
}
