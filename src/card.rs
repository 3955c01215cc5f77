use std::fmt;

use serde::{Deserialize, Serialize};

pub const MIN_RANK: u8 = 2;
pub const MAX_RANK: u8 = 14;
pub const JACK: u8 = 11;
pub const QUEEN: u8 = 12;
pub const KING: u8 = 13;
pub const ACE: u8 = 14;
pub const DECK_SIZE: usize = 52;
pub const COLUMN_CAPACITY: usize = 3;
pub const COLUMN_COUNT: usize = 3;
pub const BOARD_CAPACITY: usize = COLUMN_CAPACITY * COLUMN_COUNT;

/// One of the four card families. Only used for display.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Suit {
    Spades,
    Hearts,
    Diamonds,
    Clubs,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

    pub fn symbol(self) -> char {
        match self {
            Suit::Spades => '♠',
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
            Suit::Clubs => '♣',
        }
    }

    #[inline]
    pub fn is_red(self) -> bool {
        matches!(self, Suit::Hearts | Suit::Diamonds)
    }
}

/// Immutable playing card. Rank runs from 2 to 14, where 14 is the Ace.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Card {
    rank: u8,
    suit: Suit,
}

impl Card {
    /// Returns `None` when the rank lies outside `2..=14`.
    pub fn new(rank: u8, suit: Suit) -> Option<Self> {
        (MIN_RANK..=MAX_RANK)
            .contains(&rank)
            .then_some(Self { rank, suit })
    }

    #[inline]
    pub fn rank(&self) -> u8 {
        self.rank
    }

    #[inline]
    pub fn suit(&self) -> Suit {
        self.suit
    }

    /// Base scoring value. Face cards keep their rank, the Ace counts 14.
    #[inline]
    pub fn points(&self) -> u32 {
        u32::from(self.rank)
    }

    pub fn rank_symbol(&self) -> char {
        match self.rank {
            10 => 'T',
            JACK => 'J',
            QUEEN => 'Q',
            KING => 'K',
            ACE => 'A',
            // Ranks 2..=9 map to their digit.
            value => char::from(b'0' + value),
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank_symbol(), self.suit.symbol())
    }
}

/// Builds the standard 52-card deck in deterministic order (unshuffled).
pub fn full_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for suit in Suit::ALL {
        for rank in MIN_RANK..=MAX_RANK {
            deck.push(Card { rank, suit });
        }
    }
    deck
}
