use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::action::Command;
use crate::bot::Bot;
use crate::state::GameStateView;

/// Autoplay controller: every legal command is equally likely, shuffles included.
pub struct RandomBot<R: Rng> {
    rng: R,
    picks: u64,
}

impl RandomBot<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomBot<R> {
    pub fn new(rng: R) -> Self {
        Self { rng, picks: 0 }
    }

    /// Number of commands chosen so far.
    pub fn picks(&self) -> u64 {
        self.picks
    }
}

impl<R: Rng> Bot for RandomBot<R> {
    fn select_command(&mut self, _state: &GameStateView, legal_commands: &[Command]) -> Command {
        self.picks += 1;
        // An empty list only happens once the game is over; the engine rejects whatever comes back.
        legal_commands
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(Command::Draw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Game;

    #[test]
    fn seeded_bots_agree_and_stay_legal() {
        let game = Game::builder().with_seed(5).build().expect("game");
        let view = game.state_view();
        let legal = game.legal_commands(0).expect("legal");
        let mut a = RandomBot::seeded(9);
        let mut b = RandomBot::seeded(9);
        for _ in 0..20 {
            let pick = a.select_command(&view, &legal);
            assert_eq!(pick, b.select_command(&view, &legal));
            assert!(legal.contains(&pick));
        }
        assert_eq!(a.picks(), 20);
    }
}
