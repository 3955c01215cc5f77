//! Circular singly-linked turn order.

use crate::action::PlayerId;
use crate::error::GameError;

#[derive(Clone, Debug)]
struct TurnNode {
    player: PlayerId,
    next: usize,
}

/// Ring of players; the only mutation is advancing the current pointer.
#[derive(Clone, Debug)]
pub struct TurnRing {
    nodes: Vec<TurnNode>,
    current: usize,
}

impl TurnRing {
    /// Builds the ring in seating order, starting with the first player.
    pub fn new(players: impl IntoIterator<Item = PlayerId>) -> Result<Self, GameError> {
        let mut nodes: Vec<TurnNode> = players
            .into_iter()
            .map(|player| TurnNode { player, next: 0 })
            .collect();
        if nodes.is_empty() {
            return Err(GameError::InvalidConfiguration(
                "turn ring needs at least one player",
            ));
        }
        let count = nodes.len();
        for (idx, node) in nodes.iter_mut().enumerate() {
            node.next = (idx + 1) % count;
        }
        Ok(Self { nodes, current: 0 })
    }

    pub fn current(&self) -> PlayerId {
        self.nodes[self.current].player
    }

    /// Player who moves after the current one.
    pub fn peek_next(&self) -> PlayerId {
        self.nodes[self.nodes[self.current].next].player
    }

    /// Moves to the next player, wrapping after the last, and returns them.
    pub fn advance(&mut self) -> PlayerId {
        self.current = self.nodes[self.current].next;
        self.current()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// One full lap of the ring starting at the current player.
    pub fn order(&self) -> Vec<PlayerId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut cursor = self.current;
        for _ in 0..self.nodes.len() {
            out.push(self.nodes[cursor].player);
            cursor = self.nodes[cursor].next;
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_players_toggle() {
        let mut ring = TurnRing::new([0, 1]).expect("ring");
        assert_eq!(ring.current(), 0);
        assert_eq!(ring.peek_next(), 1);
        assert_eq!(ring.advance(), 1);
        assert_eq!(ring.advance(), 0);
        assert_eq!(ring.advance(), 1);
    }

    #[test]
    fn wraps_for_more_players() {
        let mut ring = TurnRing::new([0, 1, 2]).expect("ring");
        let seen: Vec<_> = (0..6).map(|_| ring.advance()).collect();
        assert_eq!(seen, vec![1, 2, 0, 1, 2, 0]);
        assert_eq!(ring.order(), vec![0, 1, 2]);
        ring.advance();
        assert_eq!(ring.order(), vec![1, 2, 0]);
    }

    #[test]
    fn empty_ring_is_rejected() {
        assert!(matches!(
            TurnRing::new(Vec::<PlayerId>::new()),
            Err(GameError::InvalidConfiguration(_))
        ));
    }
}
