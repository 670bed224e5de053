//! Card identity and face values.
//!
//! A `CardId` is a stable index into the fixed deck. The face a card shows
//! (`CardFace`) is assigned per game, since the chosen difficulty decides how
//! many logical suits the deck contains.

use serde::{Deserialize, Serialize};

use crate::core::config::{KING, RANKS, SUITS};

/// Stable index of a physical card, `0..NUM_CARDS`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Index into per-card tables.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Logical suit, `0..SUITS`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Suit(pub u8);

impl Suit {
    const NAMES: [&'static str; SUITS] = ["Clubs", "Spades", "Hearts", "Diamonds"];

    /// Create a new suit.
    #[must_use]
    pub const fn new(suit: u8) -> Self {
        Self(suit)
    }
}

impl std::fmt::Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match Self::NAMES.get(self.0 as usize) {
            Some(name) => f.write_str(name),
            None => write!(f, "Suit({})", self.0),
        }
    }
}

/// Card rank, Ace = 0 through King = 12.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Rank(pub u8);

impl Rank {
    const NAMES: [&'static str; RANKS] = [
        "Ace", "2", "3", "4", "5", "6", "7", "8", "9", "10", "J", "Q", "K",
    ];

    pub const ACE: Rank = Rank(0);
    pub const KING: Rank = Rank(KING);

    /// Create a new rank.
    #[must_use]
    pub const fn new(rank: u8) -> Self {
        Self(rank)
    }

    /// Check if this rank is exactly one above `other`.
    #[must_use]
    pub const fn is_one_above(self, other: Rank) -> bool {
        self.0 == other.0 + 1
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match Self::NAMES.get(self.0 as usize) {
            Some(name) => f.write_str(name),
            None => write!(f, "Rank({})", self.0),
        }
    }
}

/// Difficulty: how many logical suits the deck uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SuitStyle {
    /// Every card is the same suit.
    OneSuit,
    /// One black and one red suit.
    TwoSuits,
    /// All four suits.
    #[default]
    FourSuits,
}

impl SuitStyle {
    /// Map the menu index (0, 1, 2) to a style. Anything else is four suits.
    #[must_use]
    pub const fn from_index(style: u8) -> Self {
        match style {
            0 => SuitStyle::OneSuit,
            1 => SuitStyle::TwoSuits,
            _ => SuitStyle::FourSuits,
        }
    }

    /// Number of distinct logical suits in play.
    #[must_use]
    pub const fn suit_count(self) -> usize {
        match self {
            SuitStyle::OneSuit => 1,
            SuitStyle::TwoSuits => 2,
            SuitStyle::FourSuits => 4,
        }
    }

    /// Logical suit shown by a card printed with `physical` suit.
    #[must_use]
    pub const fn map_suit(self, physical: u8) -> Suit {
        match self {
            SuitStyle::OneSuit => Suit(0),
            SuitStyle::TwoSuits => Suit(physical & 1),
            SuitStyle::FourSuits => Suit(physical),
        }
    }
}

/// Face values assigned to a card for the current game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardFace {
    suit: Suit,
    rank: Rank,
    image_index: u8,
}

impl CardFace {
    /// Create a face; the image index is derived from suit and rank.
    #[must_use]
    pub const fn new(suit: Suit, rank: Rank) -> Self {
        Self {
            suit,
            rank,
            image_index: suit.0 * RANKS as u8 + rank.0,
        }
    }

    #[must_use]
    pub const fn suit(&self) -> Suit {
        self.suit
    }

    #[must_use]
    pub const fn rank(&self) -> Rank {
        self.rank
    }

    /// Index of the face artwork, `suit * 13 + rank`.
    #[must_use]
    pub const fn image_index(&self) -> u8 {
        self.image_index
    }

    /// Check if this card can sit directly below `above` in a run.
    #[must_use]
    pub fn continues_run(&self, above: &CardFace) -> bool {
        self.suit == above.suit && above.rank.is_one_above(self.rank)
    }
}

impl std::fmt::Display for CardFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} of {}", self.rank, self.suit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_id() {
        let id = CardId::new(17);
        assert_eq!(id.raw(), 17);
        assert_eq!(id.index(), 17);
        assert_eq!(format!("{}", id), "Card(17)");
    }

    #[test]
    fn test_style_from_index() {
        assert_eq!(SuitStyle::from_index(0), SuitStyle::OneSuit);
        assert_eq!(SuitStyle::from_index(1), SuitStyle::TwoSuits);
        assert_eq!(SuitStyle::from_index(2), SuitStyle::FourSuits);
        assert_eq!(SuitStyle::from_index(9), SuitStyle::FourSuits);
    }

    #[test]
    fn test_map_suit() {
        for physical in 0..4 {
            assert_eq!(SuitStyle::OneSuit.map_suit(physical), Suit(0));
            assert_eq!(SuitStyle::TwoSuits.map_suit(physical), Suit(physical & 1));
            assert_eq!(SuitStyle::FourSuits.map_suit(physical), Suit(physical));
        }
    }

    #[test]
    fn test_image_index() {
        let face = CardFace::new(Suit(2), Rank(5));
        assert_eq!(face.image_index(), 31);
        assert_eq!(CardFace::new(Suit(3), Rank::KING).image_index(), 51);
    }

    #[test]
    fn test_continues_run() {
        let queen = CardFace::new(Suit(1), Rank(11));
        let jack = CardFace::new(Suit(1), Rank(10));
        let red_jack = CardFace::new(Suit(2), Rank(10));
        let ten = CardFace::new(Suit(1), Rank(9));

        assert!(jack.continues_run(&queen));
        assert!(!red_jack.continues_run(&queen));
        assert!(!ten.continues_run(&queen));
        assert!(!queen.continues_run(&jack));
    }

    #[test]
    fn test_names() {
        assert_eq!(CardFace::new(Suit(0), Rank::ACE).to_string(), "Ace of Clubs");
        assert_eq!(CardFace::new(Suit(3), Rank::KING).to_string(), "K of Diamonds");
        assert_eq!(CardFace::new(Suit(2), Rank(9)).to_string(), "10 of Hearts");
    }
}
