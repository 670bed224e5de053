//! Fixed-capacity undo history.
//!
//! Snapshots live in a ring of `MAX_UNDO` slots. Once the ring wraps, the
//! oldest snapshot is overwritten and can no longer be restored. The number
//! of restorable steps saturates at `MAX_UNDO - 1`, keeping one slot in
//! reserve as the next write target.

use crate::board::Board;
use crate::core::config::MAX_UNDO;

/// Ring buffer of board snapshots.
///
/// ## Example
///
/// ```
/// use spider_rules::board::Board;
/// use spider_rules::core::LayoutConfig;
/// use spider_rules::session::UndoHistory;
///
/// let board = Board::new(&LayoutConfig::default());
/// let mut history = UndoHistory::new();
///
/// history.snapshot(&board);
/// assert!(history.is_available());
/// assert_eq!(history.undo(), Some(board));
/// assert!(!history.is_available());
/// ```
#[derive(Clone, Debug)]
pub struct UndoHistory {
    slots: Vec<Option<Board>>,
    write_index: usize,
    count: usize,
}

impl Default for UndoHistory {
    fn default() -> Self {
        Self {
            slots: vec![None; MAX_UNDO],
            write_index: 0,
            count: 0,
        }
    }
}

impl UndoHistory {
    /// Create an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget every snapshot.
    pub fn reset(&mut self) {
        self.write_index = 0;
        self.count = 0;
    }

    /// Record a copy of `board` as the most recent undo step.
    pub fn snapshot(&mut self, board: &Board) {
        self.slots[self.write_index] = Some(board.clone());
        self.write_index = (self.write_index + 1) % MAX_UNDO;
        self.count = (self.count + 1).min(MAX_UNDO - 1);
    }

    /// Pop the most recent snapshot.
    ///
    /// Returns `None` if no step is available.
    pub fn undo(&mut self) -> Option<Board> {
        if self.count == 0 {
            return None;
        }
        self.count -= 1;
        self.write_index = (self.write_index + MAX_UNDO - 1) % MAX_UNDO;
        self.slots[self.write_index].clone()
    }

    /// Check if at least one step can be undone.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.count > 0
    }

    /// Number of restorable steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Check if nothing can be undone.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardId;
    use crate::core::config::LayoutConfig;

    fn board_with(cards: u32) -> Board {
        let mut board = Board::new(&LayoutConfig::default());
        for i in 0..cards {
            board.place(CardId::new(i), (i % 10) as usize, true);
            board.take_deal_slot();
        }
        board
    }

    #[test]
    fn test_empty_history() {
        let mut history = UndoHistory::new();
        assert!(!history.is_available());
        assert!(history.is_empty());
        assert_eq!(history.undo(), None);
    }

    #[test]
    fn test_undo_is_lifo() {
        let mut history = UndoHistory::new();
        history.snapshot(&board_with(1));
        history.snapshot(&board_with(2));
        history.snapshot(&board_with(3));

        assert_eq!(history.len(), 3);
        assert_eq!(history.undo(), Some(board_with(3)));
        assert_eq!(history.undo(), Some(board_with(2)));
        assert_eq!(history.undo(), Some(board_with(1)));
        assert_eq!(history.undo(), None);
    }

    #[test]
    fn test_saturates_below_capacity() {
        let mut history = UndoHistory::new();
        for i in 0..(MAX_UNDO + 5) as u32 {
            history.snapshot(&board_with(i));
        }

        assert_eq!(history.len(), MAX_UNDO - 1);

        // Only the most recent MAX_UNDO - 1 states come back, newest first.
        let newest = (MAX_UNDO + 4) as u32;
        for step in 0..(MAX_UNDO - 1) as u32 {
            assert_eq!(history.undo(), Some(board_with(newest - step)));
        }
        assert!(!history.is_available());
        assert_eq!(history.undo(), None);
    }

    #[test]
    fn test_saturation_at_exact_capacity() {
        let mut history = UndoHistory::new();
        for i in 0..MAX_UNDO as u32 {
            history.snapshot(&board_with(i));
        }
        assert_eq!(history.len(), MAX_UNDO - 1);
    }

    #[test]
    fn test_snapshot_after_undo_overwrites() {
        let mut history = UndoHistory::new();
        history.snapshot(&board_with(1));
        history.snapshot(&board_with(2));
        history.undo();
        history.snapshot(&board_with(7));

        assert_eq!(history.undo(), Some(board_with(7)));
        assert_eq!(history.undo(), Some(board_with(1)));
    }

    #[test]
    fn test_reset() {
        let mut history = UndoHistory::new();
        history.snapshot(&board_with(1));
        history.reset();
        assert!(!history.is_available());
        assert_eq!(history.undo(), None);
    }
}
