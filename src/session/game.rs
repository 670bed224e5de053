//! Game session: owns the deck, board, undo history and session phase.
//!
//! ## Phases
//!
//! - `Idle`: Ready for commands and pointer input
//! - `Dealing`: A deal is settling; new games, deals, undo and new
//!   gestures are rejected until the presentation layer calls
//!   `session_complete`
//!
//! Every command either applies fully or changes nothing.

use smallvec::SmallVec;
use tracing::{debug, trace};

use super::events::{CardVisual, DealStep, GameEvent};
use super::input::{Gesture, Selection};
use super::undo::UndoHistory;
use crate::board::Board;
use crate::cards::{CardId, CardRegistry, SuitStyle};
use crate::core::config::{
    LayoutConfig, GROUP_SIZE, INITIAL_FACE_DOWN_ROWS, INITIAL_PARTIAL_ROW, NUM_CARDS, NUM_COLUMNS,
};
use crate::core::error::CommandError;
use crate::core::geometry::Point;
use crate::core::rng::{GameRng, GameRngState};
use crate::rules;

/// Whether a deal is in flight.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionPhase {
    #[default]
    Idle,
    Dealing,
}

/// Snapshot of the session's interaction state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    pub phase: SessionPhase,
    /// Run currently pressed or dragged.
    pub selection: Option<Selection>,
}

impl SessionState {
    /// Check if a deal is in flight.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.phase == SessionPhase::Dealing
    }
}

/// A single game of Spider.
///
/// ## Usage
///
/// ```
/// use spider_rules::cards::SuitStyle;
/// use spider_rules::core::LayoutConfig;
/// use spider_rules::session::GameSession;
///
/// let mut session = GameSession::new(LayoutConfig::default(), 42);
/// session.new_game(SuitStyle::TwoSuits).unwrap();
///
/// // The opening deal must settle before anything else happens.
/// assert!(session.deal_row().is_err());
/// session.session_complete();
///
/// assert_eq!(session.board().placed_count(), 54);
/// assert!(session.can_deal());
/// ```
#[derive(Clone, Debug)]
pub struct GameSession {
    pub(super) layout: LayoutConfig,
    pub(super) cards: CardRegistry,
    pub(super) board: Board,
    pub(super) history: UndoHistory,
    pub(super) phase: SessionPhase,
    pub(super) gesture: Option<Gesture>,
    rng: GameRng,
    visuals: Vec<CardVisual>,
    events: Vec<GameEvent>,
}

impl GameSession {
    /// Create a session with an empty board. Call `new_game` to deal.
    #[must_use]
    pub fn new(layout: LayoutConfig, seed: u64) -> Self {
        let cards = CardRegistry::new();
        let board = Board::new(&layout);
        let visuals = cards
            .iter()
            .map(|(_, face)| CardVisual::resting(layout.offscreen_position, face.image_index()))
            .collect();

        Self {
            layout,
            cards,
            board,
            history: UndoHistory::new(),
            phase: SessionPhase::Idle,
            gesture: None,
            rng: GameRng::new(seed),
            visuals,
            events: Vec::new(),
        }
    }

    /// Create a session that resumes from a given deck and board.
    ///
    /// Undealt cards are the first `board.remaining()` entries of the
    /// registry's deal order. Visuals are synced to the board, and the
    /// re-sync is left in the pending events.
    #[must_use]
    pub fn from_position(layout: LayoutConfig, seed: u64, cards: CardRegistry, board: Board) -> Self {
        let mut session = Self::new(layout, seed);
        for (card, face) in cards.iter() {
            session.visuals[card.index()].image_index = face.image_index();
        }
        session.cards = cards;
        session.board = board;
        session.resync_all();
        session
    }

    // === Commands ===

    /// Start a new game with the given number of suits.
    ///
    /// Clears the undo history, reassigns faces, shuffles, and deals four
    /// face-down rows, four more face-down cards, then one face-up row.
    /// The session stays busy until `session_complete`.
    pub fn new_game(&mut self, style: SuitStyle) -> Result<(), CommandError> {
        if self.phase == SessionPhase::Dealing {
            debug!(?style, "new game rejected: deal in progress");
            return Err(CommandError::Busy);
        }

        debug!(?style, "starting new game");
        self.phase = SessionPhase::Dealing;
        self.gesture = None;
        self.history.reset();

        self.cards.assign_suits_and_ranks(style);
        self.cards.shuffle(&mut self.rng);
        self.board.reset(&self.layout);

        // Gather everything onto the deal pile.
        let deal_position = self.layout.deal_position;
        for index in 0..NUM_CARDS {
            let card = CardId::new(index as u32);
            self.visuals[index].image_index = self.cards.card_at(card).image_index();
            self.flip_card(card, false);
            self.move_card(card, deal_position);
        }

        let columns = (0..NUM_COLUMNS * INITIAL_FACE_DOWN_ROWS)
            .map(|i| (i % NUM_COLUMNS, false))
            .chain((0..INITIAL_PARTIAL_ROW).map(|column| (column, false)))
            .chain((0..NUM_COLUMNS).map(|column| (column, true)));

        let steps = self.deal_sequence(columns);
        trace!(cards = steps.len(), remaining = self.board.remaining(), "opening deal");
        self.events.push(GameEvent::DealBatch(steps));
        Ok(())
    }

    /// Deal one face-up card onto every column.
    ///
    /// Rejected while busy or when `can_deal` is false. Recorded in the undo
    /// history before any card moves.
    pub fn deal_row(&mut self) -> Result<(), CommandError> {
        if self.phase == SessionPhase::Dealing {
            debug!("deal rejected: deal in progress");
            return Err(CommandError::Busy);
        }
        if let Some(reason) = self.deal_blocker() {
            debug!(%reason, "deal rejected");
            return Err(reason);
        }

        self.history.snapshot(&self.board);
        self.phase = SessionPhase::Dealing;
        self.gesture = None;

        let steps = self.deal_sequence((0..NUM_COLUMNS).map(|column| (column, true)));
        debug!(cards = steps.len(), remaining = self.board.remaining(), "dealt row");
        self.events.push(GameEvent::DealBatch(steps));

        self.remove_completed_groups();
        Ok(())
    }

    /// Called by the presentation layer once queued animations finish.
    ///
    /// Ends any deal in flight and recompresses columns to fit the viewport.
    pub fn session_complete(&mut self) {
        if self.phase == SessionPhase::Dealing {
            trace!("deal settled");
        }
        self.phase = SessionPhase::Idle;
        self.board.recompute_vertical_spacing(&self.layout);
        self.sync_board_positions();
    }

    /// Restore the most recent snapshot. Returns false if nothing changed.
    pub fn undo(&mut self) -> bool {
        self.try_undo().is_ok()
    }

    /// Restore the most recent snapshot, reporting why if it cannot.
    pub fn try_undo(&mut self) -> Result<(), CommandError> {
        if self.phase == SessionPhase::Dealing {
            return Err(CommandError::Busy);
        }
        let board = self.history.undo().ok_or(CommandError::NoHistory)?;

        self.board = board;
        self.gesture = None;
        self.resync_all();
        debug!(available = self.history.len(), "undo");
        Ok(())
    }

    // === Queries ===

    /// Check if a supplemental row may be dealt.
    ///
    /// False once the deal pile is empty. While fewer than `NUM_COLUMNS`
    /// cards are on the board dealing is always allowed; otherwise every
    /// column must hold at least one card.
    #[must_use]
    pub fn can_deal(&self) -> bool {
        self.deal_blocker().is_none()
    }

    /// Check if an undo step is available.
    #[must_use]
    pub fn is_undo_available(&self) -> bool {
        self.history.is_available()
    }

    /// Position, face and artwork of a card.
    #[must_use]
    pub fn card_visual(&self, card: CardId) -> Option<&CardVisual> {
        self.visuals.get(card.index())
    }

    /// Take every notification recorded since the last drain.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Notifications recorded since the last drain.
    #[must_use]
    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn cards(&self) -> &CardRegistry {
        &self.cards
    }

    #[must_use]
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.phase == SessionPhase::Dealing
    }

    /// Phase and current selection.
    #[must_use]
    pub fn session_state(&self) -> SessionState {
        SessionState {
            phase: self.phase,
            selection: self.selection(),
        }
    }

    /// Cards left in the deal pile.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.board.remaining()
    }

    /// King-to-Ace groups cleared so far.
    ///
    /// Derived from card conservation: whatever is neither on the board nor
    /// in the deal pile has been removed in groups.
    #[must_use]
    pub fn completed_groups(&self) -> usize {
        let accounted = self.board.placed_count() + self.board.remaining();
        NUM_CARDS.saturating_sub(accounted) / GROUP_SIZE
    }

    /// Check if every group has been cleared.
    #[must_use]
    pub fn is_won(&self) -> bool {
        self.completed_groups() == NUM_CARDS / GROUP_SIZE
    }

    /// RNG state, for reproducing the next shuffle.
    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }

    // === Internals shared with input handling ===

    fn deal_blocker(&self) -> Option<CommandError> {
        if self.board.is_deck_exhausted() {
            return Some(CommandError::DeckExhausted);
        }
        if self.board.placed_count() < NUM_COLUMNS {
            return None;
        }
        (0..NUM_COLUMNS)
            .find(|&column| self.board.is_column_empty(column))
            .map(CommandError::EmptyColumn)
    }

    fn deal_sequence(&mut self, columns: impl IntoIterator<Item = (usize, bool)>) -> Vec<DealStep> {
        let mut steps = Vec::new();
        let mut delay = 0.0;
        for (column, face_up) in columns {
            if let Some(step) = self.deal_card(column, face_up, delay) {
                steps.push(step);
                delay += self.layout.deal_delay;
            }
        }
        steps
    }

    fn deal_card(&mut self, column: usize, face_up: bool, delay: f32) -> Option<DealStep> {
        self.board.first_free_row(column)?;
        let slot = self.board.take_deal_slot()?;
        let card = self.cards.card_in_slot(slot);
        let row = self.board.place(card, column, face_up)?;

        let position = self.board.cell_position(column, row, &self.layout);
        let visual = &mut self.visuals[card.index()];
        visual.position = position;
        visual.home = position;
        visual.face_up = face_up;

        Some(DealStep {
            card,
            column,
            row,
            face_up,
            delay,
        })
    }

    /// Move a run to `destination`, expose the card left behind, and clear
    /// any completed group.
    pub(super) fn apply_move(&mut self, selection: Selection, destination: usize) {
        let run = self.board.remove_run(selection.column, selection.row);
        debug!(
            from = selection.column,
            row = selection.row,
            to = destination,
            cards = run.len(),
            "moving run"
        );

        for cell in run {
            // The run was checked to fit before lifting it.
            if let Some(row) = self.board.place(cell.card, destination, true) {
                let position = self.board.cell_position(destination, row, &self.layout);
                self.move_card(cell.card, position);
                self.flip_card(cell.card, true);
            }
        }

        if let Some(row) = selection.row.checked_sub(1) {
            self.expose(selection.column, row);
        }
        self.remove_completed_groups();
    }

    fn remove_completed_groups(&mut self) {
        for (column, row) in rules::find_completed_groups(&self.board, &self.cards) {
            let removed: SmallVec<[CardId; GROUP_SIZE]> = self
                .board
                .remove_run(column, row)
                .iter()
                .map(|cell| cell.card)
                .collect();

            let offscreen = self.layout.offscreen_position;
            for card in &removed {
                let visual = &mut self.visuals[card.index()];
                visual.position = offscreen;
                visual.home = offscreen;
            }
            self.events.push(GameEvent::CardsRemoved(removed));
            debug!(column, row, groups = self.completed_groups(), "completed group removed");

            if let Some(above) = row.checked_sub(1) {
                self.expose(column, above);
            }
        }
    }

    fn expose(&mut self, column: usize, row: usize) {
        if let Some(card) = self.board.flip_face_up(column, row) {
            self.flip_card(card, true);
        }
    }

    pub(super) fn move_card(&mut self, card: CardId, position: Point) {
        let visual = &mut self.visuals[card.index()];
        visual.position = position;
        visual.home = position;
        self.events.push(GameEvent::CardMoved { card, position });
    }

    /// Show a card away from its home without changing where it rests.
    pub(super) fn drag_card(&mut self, card: CardId, position: Point) {
        self.visuals[card.index()].position = position;
        self.events.push(GameEvent::CardMoved { card, position });
    }

    pub(super) fn home_of(&self, card: CardId) -> Point {
        self.visuals[card.index()].home
    }

    fn flip_card(&mut self, card: CardId, face_up: bool) {
        let visual = &mut self.visuals[card.index()];
        if visual.face_up != face_up {
            visual.face_up = face_up;
            self.events.push(GameEvent::CardFlipped { card, face_up });
        }
    }

    /// Re-issue positions for board cards whose slot moved.
    fn sync_board_positions(&mut self) {
        let moved: Vec<(CardId, Point)> = self
            .board
            .iter()
            .map(|(column, row, cell)| (cell.card, self.board.cell_position(column, row, &self.layout)))
            .filter(|(card, position)| self.visuals[card.index()].home != *position)
            .collect();

        for (card, position) in moved {
            self.move_card(card, position);
        }
    }

    /// Re-issue the full visual state after the board was replaced.
    ///
    /// Undealt cards go to the deal pile face down, board cards to their
    /// slots with their recorded face, and everything else off the board.
    fn resync_all(&mut self) {
        // `None` keeps the current face; removed cards are not redrawn.
        let mut placement: Vec<(Point, Option<bool>)> =
            vec![(self.layout.offscreen_position, None); NUM_CARDS];

        for &card in &self.cards.deal_order()[..self.board.remaining()] {
            placement[card.index()] = (self.layout.deal_position, Some(false));
        }
        for (column, row, cell) in self.board.iter() {
            let position = self.board.cell_position(column, row, &self.layout);
            placement[cell.card.index()] = (position, Some(cell.face_up));
        }

        for (index, (position, face_up)) in placement.into_iter().enumerate() {
            let card = CardId::new(index as u32);
            self.move_card(card, position);
            if let Some(face_up) = face_up {
                self.flip_card(card, face_up);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dealt(style: SuitStyle) -> GameSession {
        let mut session = GameSession::new(LayoutConfig::default(), 7);
        session.new_game(style).unwrap();
        session.session_complete();
        session
    }

    #[test]
    fn test_new_session_is_idle_and_empty() {
        let session = GameSession::new(LayoutConfig::default(), 1);
        assert_eq!(session.phase(), SessionPhase::Idle);
        assert_eq!(session.board().placed_count(), 0);
        assert!(!session.is_undo_available());
        assert!(session.pending_events().is_empty());
    }

    #[test]
    fn test_new_game_busy_until_complete() {
        let mut session = GameSession::new(LayoutConfig::default(), 1);
        session.new_game(SuitStyle::FourSuits).unwrap();

        assert!(session.is_busy());
        assert!(session.session_state().is_busy());
        assert_eq!(session.new_game(SuitStyle::OneSuit), Err(CommandError::Busy));
        assert_eq!(session.deal_row(), Err(CommandError::Busy));
        assert_eq!(session.try_undo(), Err(CommandError::Busy));

        session.session_complete();
        assert_eq!(session.phase(), SessionPhase::Idle);
        // The rejected one-suit game never happened.
        assert_eq!(session.cards().style(), SuitStyle::FourSuits);
    }

    #[test]
    fn test_deal_batch_delays() {
        let mut session = GameSession::new(LayoutConfig::default(), 3);
        session.new_game(SuitStyle::FourSuits).unwrap();

        let events = session.drain_events();
        let Some(GameEvent::DealBatch(steps)) = events.last() else {
            panic!("expected a deal batch last");
        };

        assert_eq!(steps.len(), 54);
        assert_eq!(steps[0].delay, 0.0);
        assert!(steps.windows(2).all(|w| w[1].delay > w[0].delay));
        assert!(steps[..44].iter().all(|s| !s.face_up));
        assert!(steps[44..].iter().all(|s| s.face_up));
        assert!(session.drain_events().is_empty());
    }

    #[test]
    fn test_completed_groups_start_at_zero() {
        let session = dealt(SuitStyle::OneSuit);
        assert_eq!(session.completed_groups(), 0);
        assert!(!session.is_won());
    }

    #[test]
    fn test_undealt_cards_rest_on_pile() {
        let session = dealt(SuitStyle::FourSuits);
        let deal_position = session.layout().deal_position;

        for &card in &session.cards().deal_order()[..session.remaining()] {
            let visual = session.card_visual(card).unwrap();
            assert_eq!(visual.home, deal_position);
            assert!(!visual.face_up);
        }
    }

    #[test]
    fn test_card_visual_out_of_range() {
        let session = GameSession::new(LayoutConfig::default(), 1);
        assert!(session.card_visual(CardId::new(103)).is_some());
        assert!(session.card_visual(CardId::new(104)).is_none());
    }

    #[test]
    fn test_deal_row_snapshots_and_deals_face_up() {
        let mut session = dealt(SuitStyle::FourSuits);
        let before = session.board().clone();
        session.drain_events();

        session.deal_row().unwrap();
        assert!(session.is_busy());
        assert!(session.is_undo_available());
        assert_eq!(session.board().placed_count(), 64);
        for column in 0..NUM_COLUMNS {
            assert!(session.board().bottom_cell(column).unwrap().face_up);
        }
        session.session_complete();

        assert!(session.undo());
        assert_eq!(session.board().column(0), before.column(0));
        assert_eq!(session.board().deck_index(), before.deck_index());
    }
}
