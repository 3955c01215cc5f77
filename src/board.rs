use std::array::from_fn;

use crate::action::PlayerId;
use crate::card::{COLUMN_COUNT, Card};
use crate::column::{BoardColumn, ColumnTag};
use crate::error::GameError;
use crate::score::{BoardScore, score_column};

/// One player's three columns.
#[derive(Clone, Debug)]
pub struct Board {
    owner: PlayerId,
    columns: [BoardColumn; COLUMN_COUNT],
}

impl Board {
    pub fn new(owner: PlayerId) -> Self {
        Self {
            owner,
            columns: from_fn(|column| BoardColumn::new(ColumnTag { player: owner, column })),
        }
    }

    pub fn owner(&self) -> PlayerId {
        self.owner
    }

    pub fn column(&self, index: usize) -> Result<&BoardColumn, GameError> {
        self.columns.get(index).ok_or(GameError::InvalidColumn(index))
    }

    pub fn column_mut(&mut self, index: usize) -> Result<&mut BoardColumn, GameError> {
        self.columns
            .get_mut(index)
            .ok_or(GameError::InvalidColumn(index))
    }

    pub fn columns(&self) -> &[BoardColumn; COLUMN_COUNT] {
        &self.columns
    }

    /// Full when every column holds three cards.
    pub fn is_full(&self) -> bool {
        self.columns.iter().all(BoardColumn::is_full)
    }

    pub fn card_count(&self) -> usize {
        self.columns.iter().map(BoardColumn::len).sum()
    }

    pub fn cards(&self) -> [Vec<Card>; COLUMN_COUNT] {
        from_fn(|idx| self.columns[idx].forward_sequence())
    }

    pub fn score(&self) -> BoardScore {
        BoardScore::from_columns(from_fn(|idx| {
            score_column(&self.columns[idx].forward_sequence())
        }))
    }
}
