//! Bounded doubly-linked card sequence backing one board column.
//!
//! Nodes live in a fixed arena of `COLUMN_CAPACITY` slots and link to each
//! other by slot index. Handles returned by [`BoardColumn::place`] carry the
//! owning column's tag and the slot generation, so a handle from another
//! column or to an already removed node is rejected instead of unlinking the
//! wrong card.

use std::array::from_fn;

use serde::{Deserialize, Serialize};

use crate::action::PlayerId;
use crate::card::{COLUMN_CAPACITY, Card};
use crate::error::{GameError, InvariantViolation};

/// Identifies the column that issued a node handle.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ColumnTag {
    pub player: PlayerId,
    pub column: usize,
}

/// Stable reference to one card inside a column.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeRef {
    tag: ColumnTag,
    slot: usize,
    generation: u32,
}

impl NodeRef {
    pub fn tag(&self) -> ColumnTag {
        self.tag
    }
}

#[derive(Clone, Debug)]
struct Node {
    card: Card,
    prev: Option<usize>,
    next: Option<usize>,
}

#[derive(Clone, Debug, Default)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

#[derive(Clone, Debug)]
pub struct BoardColumn {
    tag: ColumnTag,
    slots: [Slot; COLUMN_CAPACITY],
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl BoardColumn {
    pub fn new(tag: ColumnTag) -> Self {
        Self {
            tag,
            slots: from_fn(|_| Slot::default()),
            head: None,
            tail: None,
            len: 0,
        }
    }

    pub fn tag(&self) -> ColumnTag {
        self.tag
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == COLUMN_CAPACITY
    }

    /// Appends a card at the tail.
    pub fn place(&mut self, card: Card) -> Result<NodeRef, GameError> {
        if self.is_full() {
            return Err(GameError::ColumnFull);
        }
        let slot = self
            .slots
            .iter()
            .position(|slot| slot.node.is_none())
            .ok_or(GameError::ColumnFull)?;
        self.slots[slot].node = Some(Node {
            card,
            prev: self.tail,
            next: None,
        });
        match self.tail {
            Some(tail) => self.link_mut(tail).next = Some(slot),
            None => self.head = Some(slot),
        }
        self.tail = Some(slot);
        self.len += 1;
        Ok(NodeRef {
            tag: self.tag,
            slot,
            generation: self.slots[slot].generation,
        })
    }

    /// Unlinks the referenced node and returns its card.
    pub fn remove(&mut self, node: NodeRef) -> Result<Card, InvariantViolation> {
        let slot = self.resolve(node).ok_or(InvariantViolation::NodeNotFound)?;
        let Some(removed) = self.slots[slot].node.take() else {
            return Err(InvariantViolation::NodeNotFound);
        };
        match removed.prev {
            Some(prev) => self.link_mut(prev).next = removed.next,
            None => self.head = removed.next,
        }
        match removed.next {
            Some(next) => self.link_mut(next).prev = removed.prev,
            None => self.tail = removed.prev,
        }
        self.slots[slot].generation = self.slots[slot].generation.wrapping_add(1);
        self.len -= 1;
        Ok(removed.card)
    }

    /// Card behind a handle, if the handle is still live in this column.
    pub fn get(&self, node: NodeRef) -> Option<Card> {
        let slot = self.resolve(node)?;
        self.slots[slot].node.as_ref().map(|n| n.card)
    }

    /// Zero-based row of a live node, counted from the head.
    pub fn position(&self, node: NodeRef) -> Option<usize> {
        self.iter().position(|(candidate, _)| candidate == node)
    }

    /// Head-to-tail traversal yielding each node handle with its card.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            column: self,
            cursor: self.head,
        }
    }

    /// Cards from head to tail, in placement order.
    pub fn forward_sequence(&self) -> Vec<Card> {
        self.iter().map(|(_, card)| card).collect()
    }

    fn resolve(&self, node: NodeRef) -> Option<usize> {
        if node.tag != self.tag || node.slot >= COLUMN_CAPACITY {
            return None;
        }
        let slot = &self.slots[node.slot];
        (slot.generation == node.generation && slot.node.is_some()).then_some(node.slot)
    }

    fn link_mut(&mut self, slot: usize) -> &mut Node {
        match self.slots[slot].node.as_mut() {
            Some(node) => node,
            None => unreachable!("linked slot {slot} is vacant"),
        }
    }
}

pub struct Iter<'a> {
    column: &'a BoardColumn,
    cursor: Option<usize>,
}

impl Iterator for Iter<'_> {
    type Item = (NodeRef, Card);

    fn next(&mut self) -> Option<Self::Item> {
        let slot = self.cursor?;
        let entry = &self.column.slots[slot];
        let node = entry.node.as_ref()?;
        self.cursor = node.next;
        Some((
            NodeRef {
                tag: self.column.tag,
                slot,
                generation: entry.generation,
            },
            node.card,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Suit;

    const TAG: ColumnTag = ColumnTag {
        player: 0,
        column: 1,
    };

    fn card(rank: u8) -> Card {
        Card::new(rank, Suit::Diamonds).expect("valid rank")
    }

    fn ranks(column: &BoardColumn) -> Vec<u8> {
        column.forward_sequence().iter().map(Card::rank).collect()
    }

    #[test]
    fn place_appends_in_order_until_full() {
        let mut column = BoardColumn::new(TAG);
        assert!(column.is_empty());
        for rank in [4, 9, 2] {
            column.place(card(rank)).expect("room left");
        }
        assert!(column.is_full());
        assert_eq!(column.place(card(7)), Err(GameError::ColumnFull));
        assert_eq!(ranks(&column), vec![4, 9, 2]);
        assert_eq!(column.len(), 3);
    }

    #[test]
    fn remove_head_updates_head() {
        let mut column = BoardColumn::new(TAG);
        let head = column.place(card(4)).unwrap();
        column.place(card(5)).unwrap();
        column.place(card(6)).unwrap();
        assert_eq!(column.remove(head), Ok(card(4)));
        assert_eq!(ranks(&column), vec![5, 6]);
    }

    #[test]
    fn remove_middle_and_tail_relinks() {
        let mut column = BoardColumn::new(TAG);
        column.place(card(4)).unwrap();
        let middle = column.place(card(5)).unwrap();
        let tail = column.place(card(6)).unwrap();
        assert_eq!(column.remove(middle), Ok(card(5)));
        assert_eq!(ranks(&column), vec![4, 6]);
        assert_eq!(column.remove(tail), Ok(card(6)));
        assert_eq!(ranks(&column), vec![4]);
        // The freed slots are reused while order stays placement order.
        column.place(card(10)).unwrap();
        column.place(card(11)).unwrap();
        assert_eq!(ranks(&column), vec![4, 10, 11]);
    }

    #[test]
    fn stale_and_foreign_handles_are_rejected() {
        let mut column = BoardColumn::new(TAG);
        let node = column.place(card(8)).unwrap();
        assert_eq!(column.remove(node), Ok(card(8)));
        assert_eq!(column.remove(node), Err(InvariantViolation::NodeNotFound));

        let reused = column.place(card(3)).unwrap();
        assert_eq!(column.get(node), None);
        assert_eq!(column.get(reused), Some(card(3)));

        let mut other = BoardColumn::new(ColumnTag {
            player: 1,
            column: 1,
        });
        let foreign = other.place(card(3)).unwrap();
        assert_eq!(column.remove(foreign), Err(InvariantViolation::NodeNotFound));
        assert_eq!(ranks(&column), vec![3]);
    }

    #[test]
    fn removing_every_node_empties_the_column() {
        let mut column = BoardColumn::new(TAG);
        let nodes: Vec<_> = [2, 2, 2].map(|r| column.place(card(r)).unwrap()).to_vec();
        for node in nodes {
            column.remove(node).unwrap();
        }
        assert!(column.is_empty());
        assert!(column.forward_sequence().is_empty());
        assert_eq!(column.iter().count(), 0);
    }

    #[test]
    fn position_counts_from_head() {
        let mut column = BoardColumn::new(TAG);
        let a = column.place(card(2)).unwrap();
        let b = column.place(card(3)).unwrap();
        assert_eq!(column.position(a), Some(0));
        assert_eq!(column.position(b), Some(1));
        column.remove(a).unwrap();
        assert_eq!(column.position(b), Some(0));
    }
}
