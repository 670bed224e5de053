//! Card registry: face assignment and deal order for the fixed deck.
//!
//! The `CardRegistry` owns the face values of every physical card and the
//! shuffled order in which cards leave the deal pile. It knows nothing about
//! the board or move legality.

use rustc_hash::FxHashSet;

use super::card::{CardFace, CardId, Rank, SuitStyle};
use crate::core::config::{DECKS, NUM_CARDS, RANKS, SUITS};
use crate::core::rng::GameRng;

/// Face values and deal order for all `NUM_CARDS` cards.
///
/// ## Example
///
/// ```
/// use spider_rules::cards::{CardId, CardRegistry, SuitStyle};
///
/// let mut registry = CardRegistry::new();
/// registry.assign_suits_and_ranks(SuitStyle::TwoSuits);
///
/// assert_eq!(registry.distinct_suits(), 2);
/// assert_eq!(registry.card_at(CardId::new(0)).to_string(), "Ace of Clubs");
/// ```
#[derive(Clone, Debug)]
pub struct CardRegistry {
    faces: Vec<CardFace>,
    deal_order: Vec<CardId>,
    style: SuitStyle,
}

impl Default for CardRegistry {
    fn default() -> Self {
        let mut registry = Self {
            faces: vec![CardFace::default(); NUM_CARDS],
            deal_order: (0..NUM_CARDS as u32).map(CardId::new).collect(),
            style: SuitStyle::default(),
        };
        registry.assign_suits_and_ranks(SuitStyle::default());
        registry
    }
}

impl CardRegistry {
    /// Create a registry with four suits in unshuffled order.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign faces for a new game.
    ///
    /// Physical cards are laid out deck by deck, suit by suit, Ace to King.
    /// The style only remaps the suit; ranks are always the physical rank, so
    /// a one-suit game still has a full deck's worth of cards.
    pub fn assign_suits_and_ranks(&mut self, style: SuitStyle) {
        self.style = style;

        let mut index = 0;
        for _ in 0..DECKS {
            for physical_suit in 0..SUITS as u8 {
                for rank in 0..RANKS as u8 {
                    self.faces[index] = CardFace::new(style.map_suit(physical_suit), Rank::new(rank));
                    index += 1;
                }
            }
        }
    }

    /// Shuffle the deal order.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        rng.shuffle(&mut self.deal_order);
    }

    /// Face values of a card.
    ///
    /// Panics if the ID is outside the deck.
    #[must_use]
    pub fn card_at(&self, id: CardId) -> &CardFace {
        &self.faces[id.index()]
    }

    /// Face values of a card, if the ID is inside the deck.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&CardFace> {
        self.faces.get(id.index())
    }

    /// Card at a slot of the deal pile. Slot `NUM_CARDS - 1` is dealt first.
    #[must_use]
    pub fn card_in_slot(&self, slot: usize) -> CardId {
        self.deal_order[slot]
    }

    /// Full deal order, first-dealt card last.
    #[must_use]
    pub fn deal_order(&self) -> &[CardId] {
        &self.deal_order
    }

    /// Style the faces were last assigned with.
    #[must_use]
    pub fn style(&self) -> SuitStyle {
        self.style
    }

    /// Count distinct logical suits across the deck.
    #[must_use]
    pub fn distinct_suits(&self) -> usize {
        self.faces.iter().map(CardFace::suit).collect::<FxHashSet<_>>().len()
    }

    /// Number of cards in the deck.
    #[must_use]
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    /// Always false; the deck has a fixed size.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Iterate over every card with its face.
    pub fn iter(&self) -> impl Iterator<Item = (CardId, &CardFace)> {
        self.faces
            .iter()
            .enumerate()
            .map(|(i, face)| (CardId::new(i as u32), face))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Suit;

    #[test]
    fn test_distinct_suits_per_style() {
        let mut registry = CardRegistry::new();

        registry.assign_suits_and_ranks(SuitStyle::OneSuit);
        assert_eq!(registry.distinct_suits(), 1);

        registry.assign_suits_and_ranks(SuitStyle::TwoSuits);
        assert_eq!(registry.distinct_suits(), 2);

        registry.assign_suits_and_ranks(SuitStyle::FourSuits);
        assert_eq!(registry.distinct_suits(), 4);
        assert_eq!(registry.style(), SuitStyle::FourSuits);
    }

    #[test]
    fn test_physical_layout() {
        let mut registry = CardRegistry::new();
        registry.assign_suits_and_ranks(SuitStyle::FourSuits);

        // Second suit block of the first deck starts at 13.
        let face = registry.card_at(CardId::new(13));
        assert_eq!(face.suit(), Suit(1));
        assert_eq!(face.rank(), Rank::ACE);

        // Second deck repeats the first.
        for i in 0..52u32 {
            assert_eq!(registry.card_at(CardId::new(i)), registry.card_at(CardId::new(i + 52)));
        }

        let last = registry.card_at(CardId::new(103));
        assert_eq!(last.suit(), Suit(3));
        assert_eq!(last.rank(), Rank::KING);
    }

    #[test]
    fn test_faces_recomputed_on_reassign() {
        let mut registry = CardRegistry::new();
        registry.assign_suits_and_ranks(SuitStyle::FourSuits);
        let before = *registry.card_at(CardId::new(40));

        registry.assign_suits_and_ranks(SuitStyle::OneSuit);
        let after = *registry.card_at(CardId::new(40));

        assert_eq!(before.rank(), after.rank());
        assert_eq!(after.suit(), Suit(0));
        assert_eq!(after.image_index(), after.rank().0);
    }

    #[test]
    fn test_rank_counts() {
        let mut registry = CardRegistry::new();
        registry.assign_suits_and_ranks(SuitStyle::OneSuit);

        for rank in 0..RANKS as u8 {
            let count = registry.iter().filter(|(_, f)| f.rank() == Rank(rank)).count();
            assert_eq!(count, DECKS * SUITS);
        }
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut registry = CardRegistry::new();
        let mut rng = GameRng::new(9);
        registry.shuffle(&mut rng);

        let mut order = registry.deal_order().to_vec();
        assert_ne!(order, (0..NUM_CARDS as u32).map(CardId::new).collect::<Vec<_>>());
        order.sort();
        assert_eq!(order, (0..NUM_CARDS as u32).map(CardId::new).collect::<Vec<_>>());
    }

    #[test]
    fn test_get_out_of_range() {
        let registry = CardRegistry::new();
        assert!(registry.get(CardId::new(103)).is_some());
        assert!(registry.get(CardId::new(104)).is_none());
        assert_eq!(registry.len(), NUM_CARDS);
        assert!(!registry.is_empty());
    }
}
