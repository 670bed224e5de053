//! Pointer gestures: press, drag, release.
//!
//! A press on a movable run selects it and counts as a tap. Moving further
//! than the drag threshold turns it into a drag, which offsets the run's
//! visuals without touching the board. On release a tap runs the automatic
//! move; a drag drops the run on the column under the pointer or sends it
//! home. Every completed gesture is recorded in the undo history first.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::trace;

use super::game::{GameSession, SessionPhase};
use crate::cards::CardId;
use crate::core::config::{GROUP_SIZE, NUM_COLUMNS, NUM_ROWS};
use crate::core::geometry::{Point, Rect};
use crate::rules::{self, DropCheck};

/// Top of the run being pressed or dragged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selection {
    pub column: usize,
    pub row: usize,
}

/// An in-progress pointer gesture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Gesture {
    selection: Selection,
    press: Point,
    /// Last pointer position seen beyond the drag threshold.
    drag: Point,
    tapped: bool,
}

impl GameSession {
    /// Pointer pressed at a board point.
    ///
    /// Hit-tests each column from the top. Selects the run under the point
    /// if it is movable; otherwise nothing is selected. Ignored while a deal
    /// is settling.
    pub fn pointer_down(&mut self, point: Point) {
        self.gesture = None;
        if self.phase == SessionPhase::Dealing {
            trace!("pointer ignored: deal in progress");
            return;
        }

        let Some(selection) = self.hit_test(point) else {
            return;
        };
        if !rules::is_movable_run(&self.board, &self.cards, selection.column, selection.row) {
            trace!(?selection, "pressed card is not movable");
            return;
        }

        trace!(?selection, "run selected");
        self.gesture = Some(Gesture {
            selection,
            press: point,
            drag: point,
            tapped: true,
        });
    }

    /// Pointer moved while pressed.
    ///
    /// Past the drag threshold the gesture stops being a tap and the run's
    /// visuals follow the pointer. The board is unchanged.
    pub fn pointer_move(&mut self, point: Point) {
        let Some(gesture) = self.gesture.as_mut() else {
            return;
        };
        if point.manhattan_distance(gesture.press) <= self.layout.drag_threshold {
            return;
        }

        gesture.tapped = false;
        gesture.drag = point;
        let (dx, dy) = (point.x - gesture.press.x, point.y - gesture.press.y);
        let selection = gesture.selection;

        for card in self.run_cards(selection) {
            let home = self.home_of(card);
            self.drag_card(card, home.offset(dx, dy));
        }
    }

    /// Pointer released.
    pub fn pointer_up(&mut self) {
        let Some(gesture) = self.gesture.take() else {
            return;
        };

        self.history.snapshot(&self.board);

        if gesture.tapped {
            self.auto_move(gesture.selection);
            return;
        }

        let destination = self.layout.column_at(gesture.drag.x);
        match destination {
            Some(column) if self.drop_check(gesture.selection, column).legal => {
                self.apply_move(gesture.selection, column);
            }
            _ => {
                trace!(?destination, "illegal drop, returning run");
                self.send_home(gesture.selection);
            }
        }
    }

    /// Run currently pressed or dragged.
    #[must_use]
    pub fn selection(&self) -> Option<Selection> {
        self.gesture.map(|g| g.selection)
    }

    /// Column the automatic move would send `selection` to.
    ///
    /// Columns are scanned in order starting at the run's own column and
    /// wrapping around. The first legal same-suit column wins outright;
    /// otherwise the first legal different-suit column, then the first
    /// empty column.
    #[must_use]
    pub fn auto_move_destination(&self, selection: Selection) -> Option<usize> {
        let mut different_suit = None;
        let mut empty = None;

        for offset in 0..NUM_COLUMNS {
            let column = (selection.column + offset) % NUM_COLUMNS;

            if self.board.is_column_empty(column) {
                empty.get_or_insert(column);
                continue;
            }

            let check = self.drop_check(selection, column);
            if check.legal {
                if check.same_suit {
                    return Some(column);
                }
                different_suit.get_or_insert(column);
            }
        }

        different_suit.or(empty)
    }

    fn auto_move(&mut self, selection: Selection) {
        match self.auto_move_destination(selection) {
            Some(column) => self.apply_move(selection, column),
            None => trace!(?selection, "no automatic destination"),
        }
    }

    /// Legality of dropping the selected run on `column`, including room
    /// for the whole run.
    fn drop_check(&self, selection: Selection, column: usize) -> DropCheck {
        let Some(head) = self.board.cell(selection.column, selection.row) else {
            return DropCheck::ILLEGAL;
        };
        let moving = self.cards.card_at(head.card);
        let check = rules::can_drop_on_column(&self.board, &self.cards, column, moving);

        let run_len = self.board.column_len(selection.column) - selection.row;
        if check.legal && self.board.column_len(column) + run_len > NUM_ROWS {
            return DropCheck::ILLEGAL;
        }
        check
    }

    fn hit_test(&self, point: Point) -> Option<Selection> {
        for column in 0..NUM_COLUMNS {
            let len = self.board.column_len(column);
            for row in 0..len {
                // Covered cards show a strip as tall as the spacing; the
                // bottom card shows in full.
                let height = if row + 1 == len {
                    self.layout.card_height
                } else {
                    self.board.spacing(column)
                };
                let origin = self.board.cell_position(column, row, &self.layout);
                if Rect::new(origin, self.layout.column_width, height).contains(point) {
                    return Some(Selection { column, row });
                }
            }
        }
        None
    }

    fn run_cards(&self, selection: Selection) -> SmallVec<[CardId; GROUP_SIZE]> {
        self.board
            .column(selection.column)
            .iter()
            .skip(selection.row)
            .map(|cell| cell.card)
            .collect()
    }

    fn send_home(&mut self, selection: Selection) {
        for card in self.run_cards(selection) {
            let home = self.home_of(card);
            self.move_card(card, home);
        }
    }
}
