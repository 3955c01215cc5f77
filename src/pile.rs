//! Card stacks: the shared draw pile and the auxiliary discard pile.
//!
//! Both piles are LIFO. The top of a pile is the last element of the backing
//! vector, so `draw` and `recycle` are O(1).

use rand::Rng;
use rand::seq::SliceRandom;

use crate::card::Card;
use crate::error::GameError;

/// The remaining deck players draw from.
#[derive(Clone, Debug, Default)]
pub struct DrawPile {
    cards: Vec<Card>,
}

impl DrawPile {
    /// Creates a pile whose top card is the last element of `cards`.
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Removes and returns the top card.
    pub fn draw(&mut self) -> Result<Card, GameError> {
        self.cards.pop().ok_or(GameError::EmptyPile)
    }

    /// Pushes a card back on top. Used for unplayed cards and for attack removals.
    pub fn recycle(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Uniform random permutation of the remaining cards (Fisher-Yates).
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if self.cards.len() > 1 {
            self.cards.shuffle(rng);
        }
    }

    pub fn peek(&self) -> Option<&Card> {
        self.cards.last()
    }

    pub fn contains(&self, card: &Card) -> bool {
        self.cards.contains(card)
    }

    /// Cards from top to bottom.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter().rev()
    }
}

/// Stack of removed cards kept for inspection. No game rule moves cards here.
#[derive(Clone, Debug, Default)]
pub struct DiscardPile {
    cards: Vec<Card>,
}

impl DiscardPile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Slides a card under the whole pile.
    pub fn push_bottom(&mut self, card: Card) {
        self.cards.insert(0, card);
    }

    pub fn pop(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Cards from top to bottom.
    pub fn cards(&self) -> Vec<Card> {
        self.cards.iter().rev().copied().collect()
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }
}
