//! Staging of rule outcomes for animated front ends.
//!
//! The engine resolves a placement in one call and reports what changed.
//! Front ends that show the attack step by step turn that report into a
//! [`Timeline`] and play it back on their own clock. A [`Sequencer`] holds the
//! only reentrancy flag: while its timeline is playing, every further command
//! is rejected with [`GameError::TurnInProgress`]. A started timeline always
//! runs to completion.

use std::collections::VecDeque;
use std::time::Duration;

use crate::action::{Command, PlayerId};
use crate::card::{COLUMN_COUNT, Card};
use crate::error::GameError;
use crate::game::{CommandReport, Game, PlacementReport};
use crate::score::BonusKind;
use crate::state::{GameStatus, PLAYER_COUNT};

/// Pauses used when staging. Defaults match the table animations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timing {
    pub highlight: Duration,
    pub fall: Duration,
    pub count_card: Duration,
    pub count_bonus: Duration,
    pub between_players: Duration,
}

impl Timing {
    /// No pauses at all, for tests and batch runs.
    pub const INSTANT: Timing = Timing {
        highlight: Duration::ZERO,
        fall: Duration::ZERO,
        count_card: Duration::ZERO,
        count_bonus: Duration::ZERO,
        between_players: Duration::ZERO,
    };
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            highlight: Duration::from_millis(600),
            fall: Duration::from_millis(1500),
            count_card: Duration::from_millis(400),
            count_bonus: Duration::from_millis(800),
            between_players: Duration::from_millis(500),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Stage {
    Placed {
        player: PlayerId,
        column: usize,
        row: usize,
        card: Card,
    },
    /// Opponent cards about to be knocked off, by row.
    Highlight {
        player: PlayerId,
        column: usize,
        rows: Vec<usize>,
    },
    /// Cards left the opponent's column and went back to the draw pile.
    Recycled {
        player: PlayerId,
        column: usize,
        cards: Vec<Card>,
    },
    Shuffled,
    Logged {
        turn: u32,
    },
    Counted {
        player: PlayerId,
        column: usize,
        card: Card,
        running_total: u32,
    },
    Bonus {
        player: PlayerId,
        column: usize,
        kind: BonusKind,
        points: u32,
        running_total: u32,
    },
    PlayerTotal {
        player: PlayerId,
        total: u32,
    },
    GameOver {
        status: GameStatus,
    },
}

/// A stage and how long to hold it before showing the next one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Step {
    pub stage: Stage,
    pub pause: Duration,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Timeline {
    steps: VecDeque<Step>,
}

impl Timeline {
    pub fn for_placement(report: &PlacementReport, timing: &Timing) -> Self {
        let mut timeline = Timeline::default();
        timeline.push(
            Stage::Placed {
                player: report.player,
                column: report.column,
                row: report.row,
                card: report.card,
            },
            Duration::ZERO,
        );
        if !report.removed.is_empty() {
            timeline.push(
                Stage::Highlight {
                    player: report.opponent,
                    column: report.column,
                    rows: report.removed.iter().map(|entry| entry.row).collect(),
                },
                timing.highlight,
            );
            timeline.push(
                Stage::Recycled {
                    player: report.opponent,
                    column: report.column,
                    cards: report.removed.iter().map(|entry| entry.card).collect(),
                },
                timing.fall,
            );
        }
        if report.reshuffled {
            timeline.push(Stage::Shuffled, Duration::ZERO);
        }
        timeline.push(Stage::Logged { turn: report.turn }, Duration::ZERO);
        timeline
    }

    /// Card-by-card count of both boards followed by the result.
    pub fn for_final_count(game: &Game, timing: &Timing) -> Result<Self, GameError> {
        let mut timeline = Timeline::default();
        for player in 0..PLAYER_COUNT {
            let breakdown = game.score_breakdown(player)?;
            let mut running_total = 0;
            for column in 0..COLUMN_COUNT {
                for card in game.column_cards(player, column)? {
                    running_total += card.points();
                    timeline.push(
                        Stage::Counted {
                            player,
                            column,
                            card,
                            running_total,
                        },
                        timing.count_card,
                    );
                }
                let score = breakdown.columns[column];
                if score.kind != BonusKind::None {
                    running_total += score.bonus;
                    timeline.push(
                        Stage::Bonus {
                            player,
                            column,
                            kind: score.kind,
                            points: score.bonus,
                            running_total,
                        },
                        timing.count_bonus,
                    );
                }
            }
            timeline.push(
                Stage::PlayerTotal {
                    player,
                    total: running_total,
                },
                timing.between_players,
            );
        }
        timeline.push(
            Stage::GameOver {
                status: game.status(),
            },
            Duration::ZERO,
        );
        Ok(timeline)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn total_pause(&self) -> Duration {
        self.steps.iter().map(|step| step.pause).sum()
    }

    pub fn steps(&self) -> impl Iterator<Item = &Step> {
        self.steps.iter()
    }

    fn push(&mut self, stage: Stage, pause: Duration) {
        self.steps.push_back(Step { stage, pause });
    }

    fn extend(&mut self, other: Timeline) {
        self.steps.extend(other.steps);
    }
}

impl Iterator for Timeline {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        self.steps.pop_front()
    }
}

/// Feeds commands to a game and holds further commands back while a staged
/// placement is being played.
#[derive(Clone, Debug, Default)]
pub struct Sequencer {
    timing: Timing,
    playing: Option<Timeline>,
}

impl Sequencer {
    pub fn new(timing: Timing) -> Self {
        Self {
            timing,
            playing: None,
        }
    }

    pub fn timing(&self) -> Timing {
        self.timing
    }

    pub fn is_busy(&self) -> bool {
        self.playing.is_some()
    }

    /// Runs a command against the game. Placements start a timeline.
    pub fn apply(
        &mut self,
        game: &mut Game,
        player: PlayerId,
        command: Command,
    ) -> Result<CommandReport, GameError> {
        if self.is_busy() {
            return Err(GameError::TurnInProgress);
        }
        let report = game.apply(player, command)?;
        if let CommandReport::Placed(placement) = &report {
            let mut timeline = Timeline::for_placement(placement, &self.timing);
            if game.is_game_over() {
                timeline.extend(Timeline::for_final_count(game, &self.timing)?);
            }
            self.playing = Some(timeline);
        }
        Ok(report)
    }

    /// Next step of the playing timeline. The sequencer frees up once it is exhausted.
    pub fn next_step(&mut self) -> Option<Step> {
        let step = self.playing.as_mut().and_then(Iterator::next);
        if self.playing.as_ref().is_some_and(Timeline::is_empty) || step.is_none() {
            self.playing = None;
        }
        step
    }

    /// Plays the remaining steps without pausing.
    pub fn finish(&mut self) -> Vec<Step> {
        self.playing.take().map(|t| t.collect()).unwrap_or_default()
    }
}
