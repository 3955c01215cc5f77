use std::array::from_fn;
use std::collections::HashSet;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::action::{Command, PlayerId};
use crate::board::Board;
use crate::card::{COLUMN_COUNT, Card, DECK_SIZE, full_deck};
use crate::error::{GameError, InvariantViolation};
use crate::log::{MoveLog, MoveRecord};
use crate::pile::{DiscardPile, DrawPile};
use crate::score::BoardScore;
use crate::state::{
    DEFAULT_SHUFFLE_ALLOWANCE, GameSettings, GameStateView, GameStatus, PLAYER_COUNT,
    PlayerPublicState, TurnPhase,
};
use crate::turn::TurnRing;

const DEFAULT_NAMES: [&str; PLAYER_COUNT] = ["Player 1", "Player 2"];

/// Configuration required to bootstrap a game instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    pub player_names: [String; PLAYER_COUNT],
    /// `None` seeds the shuffler from OS entropy.
    pub seed: Option<u64>,
    pub shuffle_allowance: u8,
}

impl GameConfig {
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self {
            player_names: [first.into(), second.into()],
            ..Self::default()
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_names: DEFAULT_NAMES.map(String::from),
            seed: None,
            shuffle_allowance: DEFAULT_SHUFFLE_ALLOWANCE,
        }
    }
}

/// Builder that enables deterministic deck injection for tests and simulations.
#[derive(Clone, Debug, Default)]
pub struct GameBuilder {
    config: GameConfig,
    deck: Option<Vec<Card>>,
}

impl GameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_names(mut self, first: impl Into<String>, second: impl Into<String>) -> Self {
        self.config.player_names = [first.into(), second.into()];
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Uses `deck` as the draw pile without shuffling it. The last element is drawn first.
    pub fn with_deck(mut self, deck: Vec<Card>) -> Self {
        self.deck = Some(deck);
        self
    }

    pub fn with_shuffle_allowance(mut self, allowance: u8) -> Self {
        self.config.shuffle_allowance = allowance;
        self
    }

    pub fn build(self) -> Result<Game, GameError> {
        Game::from_builder(self)
    }
}

/// What a successful draw changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrawReport {
    pub player: PlayerId,
    pub card: Card,
    pub draw_pile_count: usize,
}

/// A card knocked off the opponent's mirrored column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RemovedCard {
    pub card: Card,
    /// Row the card occupied before any removal of this turn.
    pub row: usize,
}

/// What a placement changed, in the order it happened.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacementReport {
    pub turn: u32,
    pub player: PlayerId,
    pub opponent: PlayerId,
    pub card: Card,
    pub column: usize,
    pub row: usize,
    pub removed: Vec<RemovedCard>,
    pub reshuffled: bool,
    pub scores_before: [u32; PLAYER_COUNT],
    pub scores_after: [u32; PLAYER_COUNT],
    pub next_player: PlayerId,
    pub status: GameStatus,
}

impl PlacementReport {
    pub fn score_delta(&self, player: PlayerId) -> i64 {
        i64::from(self.scores_after[player]) - i64::from(self.scores_before[player])
    }
}

/// What a shuffle changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShuffleReport {
    pub player: PlayerId,
    pub returned: Option<Card>,
    pub shuffles_remaining: u8,
    pub draw_pile_count: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommandReport {
    Drawn(DrawReport),
    Placed(PlacementReport),
    Shuffled(ShuffleReport),
}

/// Rule engine for one two-player session.
pub struct Game {
    config: GameConfig,
    settings: GameSettings,
    status: GameStatus,
    phase: TurnPhase,
    boards: [Board; PLAYER_COUNT],
    draw_pile: DrawPile,
    discard_pile: DiscardPile,
    log: MoveLog,
    turns: TurnRing,
    shuffles_remaining: [u8; PLAYER_COUNT],
    in_hand: Option<Card>,
    rng: StdRng,
}

impl Game {
    pub fn builder() -> GameBuilder {
        GameBuilder::new()
    }

    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        GameBuilder { config, deck: None }.build()
    }

    /// Starts a session with a freshly shuffled deck.
    pub fn start(first: impl Into<String>, second: impl Into<String>) -> Result<Self, GameError> {
        Self::new(GameConfig::new(first, second))
    }

    fn from_builder(builder: GameBuilder) -> Result<Self, GameError> {
        let GameBuilder { config, deck } = builder;
        let settings = GameSettings::new(config.shuffle_allowance);
        if config.player_names.iter().any(|name| name.trim().is_empty()) {
            return Err(GameError::InvalidConfiguration(
                "player names must not be empty",
            ));
        }
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let deck = match deck {
            Some(deck) => {
                validate_deck(&deck)?;
                deck
            }
            None => shuffled_deck(&mut rng),
        };

        let mut game = Game {
            settings,
            status: GameStatus::Ongoing,
            phase: TurnPhase::AwaitingDraw,
            boards: from_fn(Board::new),
            draw_pile: DrawPile::new(deck),
            discard_pile: DiscardPile::new(),
            log: MoveLog::new(),
            turns: TurnRing::new(0..PLAYER_COUNT)?,
            shuffles_remaining: [config.shuffle_allowance; PLAYER_COUNT],
            in_hand: None,
            rng,
            config,
        };
        game.check_end_of_game();
        Ok(game)
    }

    /// Discards the session and deals a new shuffled deck to the same players.
    pub fn restart(&mut self) -> Result<(), GameError> {
        let turns = TurnRing::new(0..PLAYER_COUNT)?;
        let deck = shuffled_deck(&mut self.rng);
        self.status = GameStatus::Ongoing;
        self.phase = TurnPhase::AwaitingDraw;
        self.boards = from_fn(Board::new);
        self.draw_pile = DrawPile::new(deck);
        self.discard_pile.clear();
        self.log = MoveLog::new();
        self.turns = turns;
        self.shuffles_remaining = [self.config.shuffle_allowance; PLAYER_COUNT];
        self.in_hand = None;
        Ok(())
    }

    pub fn apply(&mut self, player: PlayerId, command: Command) -> Result<CommandReport, GameError> {
        match command {
            Command::Draw => self.draw(player).map(CommandReport::Drawn),
            Command::Place { column } => self.place(player, column).map(CommandReport::Placed),
            Command::Shuffle => self.shuffle(player).map(CommandReport::Shuffled),
        }
    }

    pub fn draw_for_current_player(&mut self) -> Result<DrawReport, GameError> {
        self.draw(self.current_player())
    }

    pub fn place_current_card(&mut self, column: usize) -> Result<PlacementReport, GameError> {
        self.place(self.current_player(), column)
    }

    pub fn shuffle_for_current_player(&mut self) -> Result<ShuffleReport, GameError> {
        self.shuffle(self.current_player())
    }

    pub fn draw(&mut self, player: PlayerId) -> Result<DrawReport, GameError> {
        self.ensure_actor(player)?;
        if self.in_hand.is_some() {
            return Err(GameError::CardAlreadyInHand);
        }
        let card = self.draw_pile.draw()?;
        self.in_hand = Some(card);
        self.phase = TurnPhase::AwaitingPlacement;
        Ok(DrawReport {
            player,
            card,
            draw_pile_count: self.draw_pile.len(),
        })
    }

    /// Places the drawn card, resolves the attack on the mirrored column and ends the turn.
    pub fn place(&mut self, player: PlayerId, column: usize) -> Result<PlacementReport, GameError> {
        self.ensure_actor(player)?;
        if column >= COLUMN_COUNT {
            return Err(GameError::InvalidColumn(column));
        }
        let card = self.in_hand.ok_or(GameError::NoCardInHand)?;
        if self.boards[player].column(column)?.is_full() {
            return Err(GameError::ColumnFull);
        }
        let opponent = self.turns.peek_next();
        let scores_before = self.scores();

        let own = self.boards[player].column_mut(column)?;
        let row = own.len();
        own.place(card)?;
        self.in_hand = None;

        // Collect every match before unlinking anything.
        let target = self.boards[opponent].column_mut(column)?;
        let matches: Vec<_> = target
            .iter()
            .enumerate()
            .filter(|(_, (_, candidate))| candidate.rank() == card.rank())
            .map(|(row, (node, _))| (row, node))
            .collect();
        let mut removed = Vec::with_capacity(matches.len());
        for (row, node) in matches {
            let knocked = invariant(target.remove(node))?;
            removed.push(RemovedCard { card: knocked, row });
        }
        for entry in &removed {
            self.draw_pile.recycle(entry.card);
        }
        let reshuffled = !removed.is_empty();
        if reshuffled {
            self.draw_pile.shuffle(&mut self.rng);
        }

        let turn = self.log.last_turn_number() + 1;
        invariant(self.log.append(MoveRecord {
            turn,
            player,
            player_name: self.config.player_names[player].clone(),
            card,
            column,
            removed: removed.iter().map(|entry| entry.card).collect(),
        }))?;
        let next_player = self.turns.advance();
        self.phase = TurnPhase::AwaitingDraw;
        self.check_end_of_game();

        Ok(PlacementReport {
            turn,
            player,
            opponent,
            card,
            column,
            row,
            removed,
            reshuffled,
            scores_before,
            scores_after: self.scores(),
            next_player,
            status: self.status,
        })
    }

    /// Returns any drawn card to the pile, then shuffles it. Costs one allowance.
    pub fn shuffle(&mut self, player: PlayerId) -> Result<ShuffleReport, GameError> {
        self.ensure_actor(player)?;
        if self.shuffles_remaining[player] == 0 {
            return Err(GameError::NoShuffleAllowanceLeft);
        }
        let returned = self.in_hand.take();
        if let Some(card) = returned {
            self.draw_pile.recycle(card);
        }
        self.draw_pile.shuffle(&mut self.rng);
        self.shuffles_remaining[player] -= 1;
        self.phase = TurnPhase::AwaitingDraw;
        Ok(ShuffleReport {
            player,
            returned,
            shuffles_remaining: self.shuffles_remaining[player],
            draw_pile_count: self.draw_pile.len(),
        })
    }

    /// Commands the player could issue right now.
    pub fn legal_commands(&self, player: PlayerId) -> Result<Vec<Command>, GameError> {
        if self.status.is_over() {
            return Ok(Vec::new());
        }
        if player >= PLAYER_COUNT {
            return Err(GameError::InvalidPlayer(player));
        }
        if player != self.current_player() {
            return Err(GameError::NotYourTurn);
        }
        let mut commands = Vec::new();
        match self.in_hand {
            None if !self.draw_pile.is_empty() => commands.push(Command::Draw),
            None => {}
            Some(_) => {
                for (column, slot) in self.boards[player].columns().iter().enumerate() {
                    if !slot.is_full() {
                        commands.push(Command::Place { column });
                    }
                }
            }
        }
        if self.shuffles_remaining[player] > 0 {
            commands.push(Command::Shuffle);
        }
        Ok(commands)
    }

    pub fn settings(&self) -> GameSettings {
        self.settings
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn turn_phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn current_player(&self) -> PlayerId {
        self.turns.current()
    }

    pub fn player_name(&self, player: PlayerId) -> Result<&str, GameError> {
        self.config
            .player_names
            .get(player)
            .map(String::as_str)
            .ok_or(GameError::InvalidPlayer(player))
    }

    pub fn card_in_hand(&self) -> Option<Card> {
        self.in_hand
    }

    pub fn is_column_full(&self, player: PlayerId, column: usize) -> Result<bool, GameError> {
        Ok(self.board(player)?.column(column)?.is_full())
    }

    /// Cards of one column in placement order.
    pub fn column_cards(&self, player: PlayerId, column: usize) -> Result<Vec<Card>, GameError> {
        Ok(self.board(player)?.column(column)?.forward_sequence())
    }

    pub fn player_score(&self, player: PlayerId) -> Result<u32, GameError> {
        Ok(self.board(player)?.score().total)
    }

    pub fn score_breakdown(&self, player: PlayerId) -> Result<BoardScore, GameError> {
        Ok(self.board(player)?.score())
    }

    pub fn shuffle_allowance_remaining(&self, player: PlayerId) -> Result<u8, GameError> {
        self.shuffles_remaining
            .get(player)
            .copied()
            .ok_or(GameError::InvalidPlayer(player))
    }

    pub fn is_draw_pile_empty(&self) -> bool {
        self.draw_pile.is_empty()
    }

    pub fn draw_pile_count(&self) -> usize {
        self.draw_pile.len()
    }

    pub fn draw_pile(&self) -> &DrawPile {
        &self.draw_pile
    }

    pub fn discard_pile(&self) -> &DiscardPile {
        &self.discard_pile
    }

    pub fn move_log(&self) -> &MoveLog {
        &self.log
    }

    pub fn move_log_entries(&self) -> Vec<MoveRecord> {
        self.log.entries()
    }

    pub fn is_game_over(&self) -> bool {
        self.status.is_over()
    }

    /// Winning player, or `None` while ongoing or after a draw.
    pub fn winner(&self) -> Option<PlayerId> {
        match self.status {
            GameStatus::Finished { winner } => Some(winner),
            _ => None,
        }
    }

    /// Cards held by the pile, the hand and both boards. Always 52 for a full deck.
    pub fn cards_in_play(&self) -> usize {
        self.draw_pile.len()
            + usize::from(self.in_hand.is_some())
            + self.boards.iter().map(Board::card_count).sum::<usize>()
    }

    pub fn state_view(&self) -> GameStateView {
        let current = self.current_player();
        let players = self
            .boards
            .iter()
            .enumerate()
            .map(|(id, board)| PlayerPublicState {
                id,
                name: self.config.player_names[id].clone(),
                columns: board.cards(),
                score: board.score(),
                shuffles_remaining: self.shuffles_remaining[id],
                is_current: id == current,
                board_full: board.is_full(),
            })
            .collect();
        GameStateView {
            settings: self.settings,
            phase: self.phase,
            status: self.status,
            current_player: current,
            draw_pile_count: self.draw_pile.len(),
            in_hand: self.in_hand,
            discard_pile: self.discard_pile.cards(),
            players,
            log: self.log.entries(),
        }
    }

    fn board(&self, player: PlayerId) -> Result<&Board, GameError> {
        self.boards.get(player).ok_or(GameError::InvalidPlayer(player))
    }

    fn scores(&self) -> [u32; PLAYER_COUNT] {
        from_fn(|idx| self.boards[idx].score().total)
    }

    fn ensure_actor(&self, player: PlayerId) -> Result<(), GameError> {
        if self.status.is_over() {
            return Err(GameError::GameOver);
        }
        if player >= PLAYER_COUNT {
            return Err(GameError::InvalidPlayer(player));
        }
        if player != self.current_player() {
            return Err(GameError::NotYourTurn);
        }
        Ok(())
    }

    fn check_end_of_game(&mut self) {
        let board_full = self.boards.iter().any(Board::is_full);
        if !board_full && !self.draw_pile.is_empty() {
            return;
        }
        let [first, second] = self.scores();
        self.status = if first > second {
            GameStatus::Finished { winner: 0 }
        } else if second > first {
            GameStatus::Finished { winner: 1 }
        } else {
            GameStatus::Draw
        };
        self.phase = TurnPhase::GameOver;
    }
}

/// Corrupted-state errors abort debug builds and propagate in release builds.
fn invariant<T>(result: Result<T, InvariantViolation>) -> Result<T, GameError> {
    debug_assert!(result.is_ok(), "corrupted game state: {:?}", result.as_ref().err());
    Ok(result?)
}

fn shuffled_deck(rng: &mut StdRng) -> Vec<Card> {
    let mut deck = full_deck();
    deck.shuffle(rng);
    deck
}

fn validate_deck(deck: &[Card]) -> Result<(), GameError> {
    if deck.len() > DECK_SIZE {
        return Err(GameError::InvalidConfiguration(
            "deck holds more than 52 cards",
        ));
    }
    let unique: HashSet<&Card> = deck.iter().collect();
    if unique.len() != deck.len() {
        return Err(GameError::InvalidConfiguration(
            "deck contains duplicate cards",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Suit;

    fn card(rank: u8, suit: Suit) -> Card {
        Card::new(rank, suit).expect("valid rank")
    }

    #[test]
    fn new_game_is_conserved_and_ready() {
        let game = Game::builder().with_seed(3).build().expect("game");
        assert_eq!(game.cards_in_play(), DECK_SIZE);
        assert_eq!(game.turn_phase(), TurnPhase::AwaitingDraw);
        assert_eq!(game.current_player(), 0);
        assert_eq!(game.player_name(1), Ok("Player 2"));
        assert_eq!(game.shuffle_allowance_remaining(0), Ok(3));
        assert_eq!(game.legal_commands(0), Ok(vec![Command::Draw, Command::Shuffle]));
        assert_eq!(game.legal_commands(1), Err(GameError::NotYourTurn));
    }

    #[test]
    fn same_seed_same_deck() {
        let mut a = Game::builder().with_seed(11).build().expect("game");
        let mut b = Game::builder().with_seed(11).build().expect("game");
        for step in 0..6 {
            let drawn_a = a.draw_for_current_player().expect("draw").card;
            let drawn_b = b.draw_for_current_player().expect("draw").card;
            assert_eq!(drawn_a, drawn_b);
            let placed_a = a.place_current_card(step / 2).expect("place");
            let placed_b = b.place_current_card(step / 2).expect("place");
            assert_eq!(placed_a, placed_b);
        }
        assert_eq!(a.state_view(), b.state_view());
    }

    #[test]
    fn rejects_bad_decks_and_names() {
        let dup = vec![card(2, Suit::Hearts), card(2, Suit::Hearts)];
        assert!(matches!(
            Game::builder().with_deck(dup).build(),
            Err(GameError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            Game::builder().with_names("", "B").build(),
            Err(GameError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn empty_injected_deck_ends_immediately_in_a_draw() {
        let game = Game::builder().with_deck(Vec::new()).build().expect("game");
        assert!(game.is_game_over());
        assert_eq!(game.status(), GameStatus::Draw);
        assert_eq!(game.turn_phase(), TurnPhase::GameOver);
        assert_eq!(game.winner(), None);
    }

    #[test]
    fn restart_resets_everything_but_names() {
        let mut game = Game::builder()
            .with_names("Ana", "Bo")
            .with_seed(5)
            .build()
            .expect("game");
        game.draw_for_current_player().unwrap();
        game.place_current_card(1).unwrap();
        game.shuffle_for_current_player().unwrap();
        game.restart().expect("restart");
        assert_eq!(game.cards_in_play(), DECK_SIZE);
        assert_eq!(game.draw_pile_count(), DECK_SIZE);
        assert!(game.move_log().is_empty());
        assert_eq!(game.current_player(), 0);
        assert_eq!(game.shuffle_allowance_remaining(1), Ok(3));
        assert_eq!(game.player_name(0), Ok("Ana"));
        assert_eq!(game.status(), GameStatus::Ongoing);
    }
}
