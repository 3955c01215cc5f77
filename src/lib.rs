//! Rule engine for a two-player column card game.
//!
//! Players draw from a shared deck and build three columns of up to three
//! cards each. Placing a card knocks every card of the same rank out of the
//! opponent's mirrored column and back into the deck. When a board fills up
//! or the deck runs out, columns are scored with pair, trio and sequence
//! multipliers.

pub mod action;
pub mod board;
pub mod bot;
pub mod bots;
pub mod card;
pub mod column;
pub mod error;
pub mod game;
pub mod log;
pub mod pile;
pub mod score;
pub mod state;
pub mod timeline;
pub mod turn;
pub mod visualize;

pub use crate::action::{Command, PlayerId};
pub use crate::board::Board;
pub use crate::bot::Bot;
pub use crate::bots::{HumanBot, RandomBot};
pub use crate::card::{Card, Suit};
pub use crate::column::{BoardColumn, ColumnTag, NodeRef};
pub use crate::error::{GameError, InvariantViolation};
pub use crate::game::{
    CommandReport, DrawReport, Game, GameBuilder, GameConfig, PlacementReport, RemovedCard,
    ShuffleReport,
};
pub use crate::log::{MoveLog, MoveRecord};
pub use crate::pile::{DiscardPile, DrawPile};
pub use crate::score::{BoardScore, BonusKind, ColumnScore, Multiplier, classify, score_column};
pub use crate::state::{GameSettings, GameStateView, GameStatus, PlayerPublicState, TurnPhase};
pub use crate::timeline::{Sequencer, Stage, Step, Timeline, Timing};
pub use crate::turn::TurnRing;
pub use crate::visualize::{
    VisualOptions, describe_command, describe_move, describe_stage, render_log, render_state,
    render_summary,
};
