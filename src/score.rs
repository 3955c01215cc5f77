//! Column scoring.
//!
//! Current scoring rule (per column, per player):
//!   base  = sum of card points (Ace counts 14)
//!   total = floor(base * multiplier)
//! Only full columns (3 cards) earn a bonus:
//!   sequence x1.5 (three consecutive ranks, or A-2-3 with the Ace low)
//!   trio     x3
//!   pair     x2
//! The sequence check runs first. A player's score is the sum of column totals.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::card::{ACE, COLUMN_CAPACITY, COLUMN_COUNT, Card};

/// Pattern found in a full column.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum BonusKind {
    Sequence,
    Trio,
    Pair,
    None,
}

impl BonusKind {
    pub fn multiplier(self) -> Multiplier {
        match self {
            BonusKind::Sequence => Multiplier::new(3, 2),
            BonusKind::Trio => Multiplier::new(3, 1),
            BonusKind::Pair => Multiplier::new(2, 1),
            BonusKind::None => Multiplier::ONE,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BonusKind::Sequence => "SEQUENCE",
            BonusKind::Trio => "TRIO",
            BonusKind::Pair => "PAIR",
            BonusKind::None => "NONE",
        }
    }
}

/// Exact rational multiplier, so flooring never depends on float rounding.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Multiplier {
    numerator: u32,
    denominator: u32,
}

impl Multiplier {
    pub const ONE: Multiplier = Multiplier::new(1, 1);

    const fn new(numerator: u32, denominator: u32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// `floor(base * self)`.
    pub fn apply(self, base: u32) -> u32 {
        base * self.numerator / self.denominator
    }

    pub fn is_one(self) -> bool {
        self.numerator == self.denominator
    }
}

impl fmt::Display for Multiplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.numerator % self.denominator == 0 {
            write!(f, "x{}", self.numerator / self.denominator)
        } else {
            let tenths = self.numerator * 10 / self.denominator;
            write!(f, "x{}.{}", tenths / 10, tenths % 10)
        }
    }
}

/// Classifies a column by its ranks. Anything but exactly three cards is `None`.
pub fn classify(ranks: &[u8]) -> BonusKind {
    let [a, b, c] = match <[u8; COLUMN_CAPACITY]>::try_from(ranks) {
        Ok(mut sorted) => {
            sorted.sort_unstable();
            sorted
        }
        Err(_) => return BonusKind::None,
    };
    if is_sequence(a, b, c) {
        return BonusKind::Sequence;
    }
    match (a == b, b == c) {
        (true, true) => BonusKind::Trio,
        (true, false) | (false, true) => BonusKind::Pair,
        (false, false) => BonusKind::None,
    }
}

/// Expects sorted ranks. The Ace is read as 1 only for the A-2-3 run.
fn is_sequence(a: u8, b: u8, c: u8) -> bool {
    let consecutive = a + 1 == b && b + 1 == c;
    let ace_low = (a, b, c) == (2, 3, ACE);
    consecutive || ace_low
}

/// Score breakdown for one column.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ColumnScore {
    pub base: u32,
    pub kind: BonusKind,
    pub multiplier: Multiplier,
    /// `total - base`; reported separately for display.
    pub bonus: u32,
    pub total: u32,
}

impl ColumnScore {
    pub const EMPTY: ColumnScore = ColumnScore {
        base: 0,
        kind: BonusKind::None,
        multiplier: Multiplier::ONE,
        bonus: 0,
        total: 0,
    };
}

pub fn score_column(cards: &[Card]) -> ColumnScore {
    let base = cards.iter().map(Card::points).sum();
    let ranks: Vec<u8> = cards.iter().map(Card::rank).collect();
    let kind = classify(&ranks);
    let multiplier = kind.multiplier();
    let total = multiplier.apply(base);
    ColumnScore {
        base,
        kind,
        multiplier,
        bonus: total - base,
        total,
    }
}

/// Score breakdown for a whole board.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BoardScore {
    pub columns: [ColumnScore; COLUMN_COUNT],
    pub total: u32,
}

impl BoardScore {
    pub fn from_columns(columns: [ColumnScore; COLUMN_COUNT]) -> Self {
        let total = columns.iter().map(|column| column.total).sum();
        Self { columns, total }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Suit;

    fn cards(ranks: &[u8]) -> Vec<Card> {
        let suits = [Suit::Spades, Suit::Hearts, Suit::Clubs];
        ranks
            .iter()
            .zip(suits)
            .map(|(&rank, suit)| Card::new(rank, suit).expect("valid rank"))
            .collect()
    }

    #[test]
    fn test_sequence_floors_one_and_a_half() {
        let score = score_column(&cards(&[5, 4, 6]));
        assert_eq!(score.kind, BonusKind::Sequence);
        assert_eq!(score.base, 15);
        assert_eq!(score.total, 22);
        assert_eq!(score.bonus, 7);
    }

    #[test]
    fn test_ace_low_sequence() {
        let score = score_column(&cards(&[14, 2, 3]));
        assert_eq!(score.kind, BonusKind::Sequence);
        // Base keeps the Ace at 14: 19 * 1.5 = 28.5
        assert_eq!(score.base, 19);
        assert_eq!(score.total, 28);
        assert_eq!(classify(&[12, 13, 14]), BonusKind::Sequence);
        assert_eq!(classify(&[13, 14, 2]), BonusKind::None);
    }

    #[test]
    fn test_trio_pair_and_none() {
        let trio = score_column(&cards(&[7, 7, 7]));
        assert_eq!(trio.kind, BonusKind::Trio);
        assert_eq!(trio.total, 63);

        let pair = score_column(&cards(&[9, 2, 9]));
        assert_eq!(pair.kind, BonusKind::Pair);
        assert_eq!(pair.total, 40);

        let none = score_column(&cards(&[3, 7, 11]));
        assert_eq!(none.kind, BonusKind::None);
        assert_eq!(none.total, 21);
        assert_eq!(none.bonus, 0);
    }

    #[test]
    fn test_short_columns_score_base_only() {
        let pair_of_two = score_column(&cards(&[8, 8]));
        assert_eq!(pair_of_two.kind, BonusKind::None);
        assert_eq!(pair_of_two.total, 16);
        let two_three = score_column(&cards(&[2, 3]));
        assert_eq!(two_three.kind, BonusKind::None);
        assert_eq!(score_column(&[]), ColumnScore::EMPTY);
    }

    #[test]
    fn test_board_total_sums_columns() {
        let board = BoardScore::from_columns([
            score_column(&cards(&[4, 5, 6])),
            score_column(&cards(&[10])),
            ColumnScore::EMPTY,
        ]);
        assert_eq!(board.total, 32);
    }

    #[test]
    fn test_multiplier_display() {
        assert_eq!(BonusKind::Sequence.multiplier().to_string(), "x1.5");
        assert_eq!(BonusKind::Trio.multiplier().to_string(), "x3");
        assert!(BonusKind::None.multiplier().is_one());
    }
}
