//! Completed-group detection.
//!
//! A completed group is a face-up King through Ace of one suit, contiguous
//! in a column and ending at the column's bottom. Removing it only ever
//! clears a trailing run, which keeps column occupancy contiguous.

use smallvec::SmallVec;

use crate::board::Board;
use crate::cards::{CardRegistry, Rank};
use crate::core::config::{GROUP_SIZE, NUM_COLUMNS};

/// Check if a completed group starts at `(column, row)`.
///
/// The cell must hold a face-up King. Each following row must hold a
/// face-up card of the same suit one rank lower, down to an Ace on the
/// column's last row. Any break or a missing cell aborts the check.
#[must_use]
pub fn is_completed_group(board: &Board, cards: &CardRegistry, column: usize, row: usize) -> bool {
    let Some(head) = board.cell(column, row) else {
        return false;
    };
    if !head.face_up || cards.card_at(head.card).rank() != Rank::KING {
        return false;
    }
    if board.column_len(column) != row + GROUP_SIZE {
        return false;
    }

    let mut above = cards.card_at(head.card);
    for r in row + 1..row + GROUP_SIZE {
        let Some(cell) = board.cell(column, r) else {
            return false;
        };
        let face = cards.card_at(cell.card);
        if !cell.face_up || !face.continues_run(above) {
            return false;
        }
        above = face;
    }

    above.rank() == Rank::ACE
}

/// Find every completed group on the board as `(column, king_row)`.
///
/// A column can hold at most one, since a group must end at its bottom.
#[must_use]
pub fn find_completed_groups(board: &Board, cards: &CardRegistry) -> SmallVec<[(usize, usize); 2]> {
    (0..NUM_COLUMNS)
        .filter_map(|column| {
            let row = board.column_len(column).checked_sub(GROUP_SIZE)?;
            is_completed_group(board, cards, column, row).then_some((column, row))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardId, SuitStyle};
    use crate::core::config::{LayoutConfig, RANKS};

    fn id(suit: u32, rank: u32) -> CardId {
        CardId::new(suit * RANKS as u32 + rank)
    }

    fn setup() -> (Board, CardRegistry) {
        let mut cards = CardRegistry::new();
        cards.assign_suits_and_ranks(SuitStyle::FourSuits);
        (Board::new(&LayoutConfig::default()), cards)
    }

    fn place_group(board: &mut Board, column: usize, suit: u32) {
        for rank in (0..RANKS as u32).rev() {
            board.place(id(suit, rank), column, true);
        }
    }

    #[test]
    fn test_full_group_found() {
        let (mut board, cards) = setup();
        board.place(CardId::new(60), 3, false);
        place_group(&mut board, 3, 2);

        assert!(is_completed_group(&board, &cards, 3, 1));
        assert_eq!(find_completed_groups(&board, &cards).as_slice(), &[(3, 1)]);
    }

    #[test]
    fn test_group_at_top_of_column() {
        let (mut board, cards) = setup();
        place_group(&mut board, 0, 1);
        place_group(&mut board, 9, 0);

        assert_eq!(find_completed_groups(&board, &cards).as_slice(), &[(0, 0), (9, 0)]);
    }

    #[test]
    fn test_incomplete_group() {
        let (mut board, cards) = setup();
        for rank in (1..RANKS as u32).rev() {
            board.place(id(0, rank), 4, true);
        }
        // King..2, no Ace
        assert!(!is_completed_group(&board, &cards, 4, 0));
        assert!(find_completed_groups(&board, &cards).is_empty());
    }

    #[test]
    fn test_suit_break_prevents_group() {
        let (mut board, cards) = setup();
        for rank in (0..RANKS as u32).rev() {
            let suit = if rank == 6 { 3 } else { 1 };
            board.place(id(suit, rank), 4, true);
        }
        assert!(!is_completed_group(&board, &cards, 4, 0));
    }

    #[test]
    fn test_rank_break_prevents_group() {
        let (mut board, cards) = setup();
        for rank in (0..RANKS as u32).rev() {
            // Swap the 5 and 4
            let rank = match rank {
                4 => 3,
                3 => 4,
                r => r,
            };
            board.place(id(1, rank), 4, true);
        }
        assert!(!is_completed_group(&board, &cards, 4, 0));
    }

    #[test]
    fn test_face_down_king_ignored() {
        let (mut board, cards) = setup();
        board.place(id(0, 12), 2, false);
        for rank in (0..12).rev() {
            board.place(id(0, rank), 2, true);
        }
        assert!(!is_completed_group(&board, &cards, 2, 0));
    }

    #[test]
    fn test_group_covered_by_extra_card_not_removed() {
        let (mut board, cards) = setup();
        place_group(&mut board, 5, 0);
        board.place(id(2, 4), 5, true);

        assert!(!is_completed_group(&board, &cards, 5, 0));
        assert!(find_completed_groups(&board, &cards).is_empty());
    }
}
