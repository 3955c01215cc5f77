//! Append-only move history, stored as a singly-linked list over an arena.

use serde::{Deserialize, Serialize};

use crate::action::PlayerId;
use crate::card::Card;
use crate::error::InvariantViolation;

/// One placement, including the cards it knocked off the opponent's column.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// 1-based turn number.
    pub turn: u32,
    pub player: PlayerId,
    pub player_name: String,
    pub card: Card,
    pub column: usize,
    pub removed: Vec<Card>,
}

#[derive(Clone, Debug)]
struct LogNode {
    record: MoveRecord,
    next: Option<usize>,
}

#[derive(Clone, Debug, Default)]
pub struct MoveLog {
    nodes: Vec<LogNode>,
    head: Option<usize>,
    tail: Option<usize>,
}

impl MoveLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a record at the tail. Its turn must directly follow the last one.
    pub fn append(&mut self, record: MoveRecord) -> Result<(), InvariantViolation> {
        let expected = self.last_turn_number() + 1;
        if record.turn != expected {
            return Err(InvariantViolation::OutOfOrderTurn {
                expected,
                got: record.turn,
            });
        }
        let index = self.nodes.len();
        self.nodes.push(LogNode { record, next: None });
        match self.tail {
            Some(tail) => self.nodes[tail].next = Some(index),
            None => self.head = Some(index),
        }
        self.tail = Some(index);
        Ok(())
    }

    /// Turn number of the newest record, 0 when empty.
    pub fn last_turn_number(&self) -> u32 {
        self.tail.map(|tail| self.nodes[tail].record.turn).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub fn last(&self) -> Option<&MoveRecord> {
        self.tail.map(|tail| &self.nodes[tail].record)
    }

    /// Head-to-tail traversal.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            log: self,
            cursor: self.head,
        }
    }

    pub fn entries(&self) -> Vec<MoveRecord> {
        self.iter().cloned().collect()
    }
}

pub struct Iter<'a> {
    log: &'a MoveLog,
    cursor: Option<usize>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a MoveRecord;

    fn next(&mut self) -> Option<Self::Item> {
        let node = &self.log.nodes[self.cursor?];
        self.cursor = node.next;
        Some(&node.record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Suit;

    fn record(turn: u32) -> MoveRecord {
        MoveRecord {
            turn,
            player: (turn as usize + 1) % 2,
            player_name: format!("P{turn}"),
            card: Card::new(7, Suit::Hearts).expect("valid rank"),
            column: 0,
            removed: Vec::new(),
        }
    }

    #[test]
    fn appends_contiguous_turns() {
        let mut log = MoveLog::new();
        assert_eq!(log.last_turn_number(), 0);
        for turn in 1..=4 {
            log.append(record(turn)).expect("in order");
        }
        assert_eq!(log.last_turn_number(), 4);
        let turns: Vec<u32> = log.iter().map(|r| r.turn).collect();
        assert_eq!(turns, vec![1, 2, 3, 4]);
        assert_eq!(log.entries().len(), 4);
    }

    #[test]
    fn rejects_gaps_and_repeats() {
        let mut log = MoveLog::new();
        assert_eq!(
            log.append(record(2)),
            Err(InvariantViolation::OutOfOrderTurn {
                expected: 1,
                got: 2
            })
        );
        log.append(record(1)).unwrap();
        assert!(log.append(record(1)).is_err());
        assert!(log.append(record(3)).is_err());
        assert_eq!(log.len(), 1);
        assert_eq!(log.last().map(|r| r.turn), Some(1));
    }
}
