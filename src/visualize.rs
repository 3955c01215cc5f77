use std::fmt::Write;

use crate::action::Command;
use crate::card::{COLUMN_CAPACITY, COLUMN_COUNT, Card};
use crate::log::MoveRecord;
use crate::score::BonusKind;
use crate::state::{GameStateView, GameStatus, PlayerPublicState};
use crate::timeline::Stage;

/// Customize state rendering for CLI visualization.
#[derive(Clone, Copy, Debug)]
pub struct VisualOptions {
    pub show_scores: bool,
    pub show_log: bool,
}

impl Default for VisualOptions {
    fn default() -> Self {
        Self {
            show_scores: true,
            show_log: false,
        }
    }
}

pub fn render_state(state: &GameStateView) -> String {
    render_state_with_options(state, VisualOptions::default())
}

pub fn render_state_with_options(state: &GameStateView, options: VisualOptions) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Game status: {}", describe_status(state));
    let _ = writeln!(out, "Phase: {:?}", state.phase);
    let current = state
        .current()
        .map(|player| player.name.as_str())
        .unwrap_or("--");
    let _ = writeln!(out, "Turn: {current}");
    let in_hand = state
        .in_hand
        .map(|card| card.to_string())
        .unwrap_or_else(|| String::from("--"));
    let _ = writeln!(
        out,
        "Draw pile: {}  |  In hand: {in_hand}",
        state.draw_pile_count
    );
    for player in &state.players {
        let current_tag = if player.is_current { " <- current" } else { "" };
        let _ = writeln!(
            out,
            "{} - shuffles {}/{}{current_tag}",
            player.name, player.shuffles_remaining, state.settings.shuffle_allowance
        );
        out.push_str(&render_board(player));
        if options.show_scores {
            let _ = writeln!(out, "  Score: {}", player.score.total);
        }
    }
    if options.show_log {
        out.push_str(&render_log(&state.log));
    }
    out
}

/// Board as a 3x3 grid, one row per line, columns left to right.
pub fn render_board(player: &PlayerPublicState) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "  Col 1 Col 2 Col 3");
    for row in 0..COLUMN_CAPACITY {
        out.push(' ');
        for column in 0..COLUMN_COUNT {
            let cell = player.columns[column]
                .get(row)
                .map(Card::to_string)
                .unwrap_or_else(|| String::from("[]"));
            let _ = write!(out, " {cell:<5}");
        }
        let _ = writeln!(out);
    }
    out
}

pub fn render_log(log: &[MoveRecord]) -> String {
    let mut out = String::new();
    for record in log {
        let _ = writeln!(out, "{}", describe_move(record));
    }
    out
}

pub fn describe_move(record: &MoveRecord) -> String {
    let mut line = format!(
        "T{} {}: {} -> Col {}",
        record.turn,
        record.player_name,
        record.card,
        record.column + 1
    );
    if !record.removed.is_empty() {
        let removed = record
            .removed
            .iter()
            .map(Card::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        let _ = write!(line, " (removed: {removed})");
    }
    line
}

pub fn describe_command(state: &GameStateView, command: &Command) -> String {
    match command {
        Command::Draw => String::from("Draw a card"),
        Command::Place { column } => match state.in_hand {
            Some(card) => format!("Place {card} in column {}", column + 1),
            None => format!("Place in column {}", column + 1),
        },
        Command::Shuffle => match state.in_hand {
            Some(card) => format!("Return {card} and shuffle the deck"),
            None => String::from("Shuffle the deck"),
        },
    }
}

pub fn describe_stage(state: &GameStateView, stage: &Stage) -> String {
    let name = |id| {
        state
            .player(id)
            .map(|player| player.name.clone())
            .unwrap_or_else(|| format!("Player {}", id + 1))
    };
    match stage {
        Stage::Placed {
            player,
            column,
            card,
            ..
        } => format!("{} places {card} in column {}", name(*player), column + 1),
        Stage::Highlight {
            player,
            column,
            rows,
        } => format!(
            "{} card(s) of {} in column {} are hit",
            rows.len(),
            name(*player),
            column + 1
        ),
        Stage::Recycled { cards, .. } => {
            let cards = cards
                .iter()
                .map(Card::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            format!("Recycled into the deck: {cards}")
        }
        Stage::Shuffled => String::from("Deck shuffled"),
        Stage::Logged { turn } => format!("Turn {turn} logged"),
        Stage::Counted {
            player,
            card,
            running_total,
            ..
        } => format!("{}: {card} -> {running_total}", name(*player)),
        Stage::Bonus {
            player,
            column,
            kind,
            points,
            running_total,
        } => format!(
            "{}: column {} {} +{points} -> {running_total}",
            name(*player),
            column + 1,
            kind.label()
        ),
        Stage::PlayerTotal { player, total } => format!("{} total: {total}", name(*player)),
        Stage::GameOver { .. } => describe_status(state),
    }
}

/// Per-column breakdown and the result, shown when the game ends.
pub fn render_summary(state: &GameStateView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", describe_status(state));
    for player in &state.players {
        let _ = writeln!(out, "{}", player.name);
        for (idx, column) in player.score.columns.iter().enumerate() {
            let bonus = if column.kind == BonusKind::None {
                String::new()
            } else {
                format!("{} {} ", column.multiplier, column.kind.label())
            };
            let _ = writeln!(
                out,
                "  Col {} ({}) {bonus}{}",
                idx + 1,
                column.base,
                column.total
            );
        }
        let _ = writeln!(out, "  Total: {}", player.score.total);
    }
    out
}

fn describe_status(state: &GameStateView) -> String {
    match state.status {
        GameStatus::Ongoing => String::from("Ongoing"),
        GameStatus::Finished { winner } => {
            let name = state
                .player(winner)
                .map(|player| player.name.as_str())
                .unwrap_or("?");
            format!("Finished (winner: {name})")
        }
        GameStatus::Draw => String::from("Finished (draw)"),
    }
}
