use crate::action::Command;
use crate::state::GameStateView;

/// Something that picks commands for a seat: a person at a terminal, a script, a test.
pub trait Bot {
    fn select_command(&mut self, state: &GameStateView, legal_commands: &[Command]) -> Command;
}
