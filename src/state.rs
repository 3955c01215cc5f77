use serde::{Deserialize, Serialize};

use crate::action::PlayerId;
use crate::card::{COLUMN_CAPACITY, COLUMN_COUNT, Card, DECK_SIZE};
use crate::log::MoveRecord;
use crate::score::BoardScore;

pub const PLAYER_COUNT: usize = 2;
pub const DEFAULT_SHUFFLE_ALLOWANCE: u8 = 3;

/// Global constants for a running game.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameSettings {
    pub num_players: usize,
    pub deck_size: usize,
    pub columns: usize,
    pub column_capacity: usize,
    pub shuffle_allowance: u8,
}

impl GameSettings {
    pub fn new(shuffle_allowance: u8) -> Self {
        Self {
            shuffle_allowance,
            ..Self::default()
        }
    }
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            num_players: PLAYER_COUNT,
            deck_size: DECK_SIZE,
            columns: COLUMN_COUNT,
            column_capacity: COLUMN_CAPACITY,
            shuffle_allowance: DEFAULT_SHUFFLE_ALLOWANCE,
        }
    }
}

/// Status of the entire game.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Finished { winner: PlayerId },
    Draw,
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        !matches!(self, GameStatus::Ongoing)
    }
}

/// Observable phase of the active turn.
///
/// Resolving the attack and completing the turn happen inside a single
/// placement command, so they never show up here.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum TurnPhase {
    AwaitingDraw,
    AwaitingPlacement,
    GameOver,
}

/// Everything the table shows about one player.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerPublicState {
    pub id: PlayerId,
    pub name: String,
    pub columns: [Vec<Card>; COLUMN_COUNT],
    pub score: BoardScore,
    pub shuffles_remaining: u8,
    pub is_current: bool,
    pub board_full: bool,
}

/// Read-only game snapshot for renderers and controllers.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameStateView {
    pub settings: GameSettings,
    pub phase: TurnPhase,
    pub status: GameStatus,
    pub current_player: PlayerId,
    pub draw_pile_count: usize,
    pub in_hand: Option<Card>,
    pub discard_pile: Vec<Card>,
    pub players: Vec<PlayerPublicState>,
    pub log: Vec<MoveRecord>,
}

impl GameStateView {
    pub fn player(&self, id: PlayerId) -> Option<&PlayerPublicState> {
        self.players.iter().find(|player| player.id == id)
    }

    pub fn current(&self) -> Option<&PlayerPublicState> {
        self.player(self.current_player)
    }
}
