//! Tableau grid: column occupancy, face state, and the deal pile index.
//!
//! Each column is a persistent `im::Vector` of occupied cells, so occupancy
//! is contiguous from row 0 by construction: cards are only appended at the
//! first free row and only trailing runs are removed. Cloning a `Board` for
//! the undo history shares structure with the live board but is otherwise a
//! fully independent copy.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::CardId;
use crate::core::config::{LayoutConfig, GROUP_SIZE, NUM_CARDS, NUM_COLUMNS, NUM_ROWS};
use crate::core::geometry::Point;

/// An occupied board slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardCell {
    /// Card sitting in this slot.
    pub card: CardId,
    /// Is the card showing its face?
    pub face_up: bool,
}

impl BoardCell {
    /// Create a new cell.
    #[must_use]
    pub const fn new(card: CardId, face_up: bool) -> Self {
        Self { card, face_up }
    }
}

/// Cells lifted off a column, top first.
pub type Run = SmallVec<[BoardCell; GROUP_SIZE]>;

/// The tableau plus the deal pile cursor.
///
/// ## Usage
///
/// ```
/// use spider_rules::board::Board;
/// use spider_rules::cards::CardId;
/// use spider_rules::core::LayoutConfig;
///
/// let layout = LayoutConfig::default();
/// let mut board = Board::new(&layout);
///
/// assert_eq!(board.place(CardId::new(5), 3, false), Some(0));
/// assert_eq!(board.place(CardId::new(6), 3, true), Some(1));
/// assert_eq!(board.bottommost_occupied_row(3), 1);
/// assert_eq!(board.first_free_row(3), Some(2));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    /// Occupied cells per column, row 0 first.
    columns: Vec<Vector<BoardCell>>,

    /// Vertical spacing per column. Derived from occupancy and layout.
    spacing: Vec<f32>,

    /// Deal pile slot of the next card to deal; negative once exhausted.
    deck_index: i32,
}

impl Board {
    /// Create an empty board with a full deal pile.
    #[must_use]
    pub fn new(layout: &LayoutConfig) -> Self {
        let mut board = Self {
            columns: vec![Vector::new(); NUM_COLUMNS],
            spacing: vec![layout.max_spacing; NUM_COLUMNS],
            deck_index: NUM_CARDS as i32 - 1,
        };
        board.reset(layout);
        board
    }

    /// Empty every column, restore nominal spacing, and refill the deal pile.
    pub fn reset(&mut self, layout: &LayoutConfig) {
        for column in &mut self.columns {
            column.clear();
        }
        for spacing in &mut self.spacing {
            *spacing = layout.max_spacing;
        }
        self.deck_index = NUM_CARDS as i32 - 1;
    }

    // === Occupancy ===

    /// Occupied cells of a column, row 0 first.
    #[must_use]
    pub fn column(&self, column: usize) -> &Vector<BoardCell> {
        &self.columns[column]
    }

    /// Cell at a position, if occupied.
    #[must_use]
    pub fn cell(&self, column: usize, row: usize) -> Option<&BoardCell> {
        self.columns.get(column)?.get(row)
    }

    /// Number of cards in a column.
    #[must_use]
    pub fn column_len(&self, column: usize) -> usize {
        self.columns[column].len()
    }

    /// Check if a column holds no cards.
    #[must_use]
    pub fn is_column_empty(&self, column: usize) -> bool {
        self.columns[column].is_empty()
    }

    /// Topmost empty row, or `None` if the column is at capacity.
    #[must_use]
    pub fn first_free_row(&self, column: usize) -> Option<usize> {
        let len = self.columns[column].len();
        (len < NUM_ROWS).then_some(len)
    }

    /// Row of the lowest card, or 0 for an empty column.
    #[must_use]
    pub fn bottommost_occupied_row(&self, column: usize) -> usize {
        self.columns[column].len().saturating_sub(1)
    }

    /// Lowest cell of a column.
    #[must_use]
    pub fn bottom_cell(&self, column: usize) -> Option<&BoardCell> {
        self.columns[column].last()
    }

    /// Total cards on the tableau.
    #[must_use]
    pub fn placed_count(&self) -> usize {
        self.columns.iter().map(Vector::len).sum()
    }

    /// Iterate over every occupied cell as `(column, row, cell)`.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &BoardCell)> {
        self.columns.iter().enumerate().flat_map(|(c, column)| {
            column.iter().enumerate().map(move |(r, cell)| (c, r, cell))
        })
    }

    /// Locate a card on the tableau.
    #[must_use]
    pub fn find(&self, card: CardId) -> Option<(usize, usize)> {
        self.iter().find(|(_, _, cell)| cell.card == card).map(|(c, r, _)| (c, r))
    }

    // === Mutation ===

    /// Put a card at the first free row of a column.
    ///
    /// Returns the row used, or `None` (and changes nothing) if the column
    /// is full.
    pub fn place(&mut self, card: CardId, column: usize, face_up: bool) -> Option<usize> {
        let row = self.first_free_row(column)?;
        self.columns[column].push_back(BoardCell::new(card, face_up));
        Some(row)
    }

    /// Clear the trailing run starting at `from_row`, returning its cells.
    ///
    /// Returns an empty run if `from_row` is past the end of the column.
    pub fn remove_run(&mut self, column: usize, from_row: usize) -> Run {
        let cells = &mut self.columns[column];
        if from_row >= cells.len() {
            return Run::new();
        }
        cells.split_off(from_row).into_iter().collect()
    }

    /// Turn a face-down card face up.
    ///
    /// Returns the card if it was flipped; occupied face-up cells and empty
    /// slots are left alone.
    pub fn flip_face_up(&mut self, column: usize, row: usize) -> Option<CardId> {
        let cell = self.columns.get_mut(column)?.get_mut(row)?;
        if cell.face_up {
            return None;
        }
        cell.face_up = true;
        Some(cell.card)
    }

    // === Deal pile ===

    /// Deal pile slot of the next card; negative once exhausted.
    #[must_use]
    pub fn deck_index(&self) -> i32 {
        self.deck_index
    }

    /// Cards still in the deal pile.
    #[must_use]
    pub fn remaining(&self) -> usize {
        (self.deck_index + 1).max(0) as usize
    }

    /// Check if the deal pile is empty.
    #[must_use]
    pub fn is_deck_exhausted(&self) -> bool {
        self.deck_index < 0
    }

    /// Take the next deal pile slot, moving the cursor down.
    pub fn take_deal_slot(&mut self) -> Option<usize> {
        if self.deck_index < 0 {
            return None;
        }
        let slot = self.deck_index as usize;
        self.deck_index -= 1;
        Some(slot)
    }

    // === Layout ===

    /// Current vertical spacing of a column.
    #[must_use]
    pub fn spacing(&self, column: usize) -> f32 {
        self.spacing[column]
    }

    /// Nominal screen position of a slot.
    #[must_use]
    pub fn cell_position(&self, column: usize, row: usize, layout: &LayoutConfig) -> Point {
        Point::new(
            column as f32 * layout.column_width,
            row as f32 * self.spacing[column],
        )
    }

    /// Recompute every column's spacing from its occupancy.
    ///
    /// Columns whose bottom card would fall below the viewport are squeezed;
    /// the rest use the maximum spacing.
    pub fn recompute_vertical_spacing(&mut self, layout: &LayoutConfig) {
        for column in 0..NUM_COLUMNS {
            self.spacing[column] = layout.spacing_for(self.bottommost_occupied_row(column));
        }
    }
}
