use std::io::{self, BufRead, Write};

use crate::action::Command;
use crate::bot::Bot;
use crate::state::GameStateView;
use crate::visualize::{describe_command, render_state};

const HELP: &str =
    "Enter a list index, 'd' to draw, 1-3 for a column, 's' to shuffle, or 'q' to quit.";

/// Terminal controller that reads choices from standard input.
pub struct HumanBot {
    name: String,
}

impl HumanBot {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    fn show_options(&self, state: &GameStateView, legal_commands: &[Command]) {
        println!("\n--- {} to act ---", self.name);
        println!("{}", render_state(state));
        for (index, command) in legal_commands.iter().enumerate() {
            println!("  [{index}] {}", describe_command(state, command));
        }
        println!("{HELP}");
    }
}

impl Bot for HumanBot {
    fn select_command(&mut self, state: &GameStateView, legal_commands: &[Command]) -> Command {
        self.show_options(state, legal_commands);
        let stdin = io::stdin();
        let mut lines = stdin.lock().lines();
        loop {
            print!("> ");
            let _ = io::stdout().flush();
            let line = match lines.next() {
                Some(Ok(line)) => line,
                Some(Err(err)) => {
                    eprintln!("could not read input: {err}");
                    continue;
                }
                // stdin closed
                None => std::process::exit(0),
            };
            let choice = line.trim();
            if matches!(choice.to_ascii_lowercase().as_str(), "q" | "quit") {
                println!("{} leaves the table.", self.name);
                std::process::exit(0);
            }
            match parse_selection(choice, legal_commands) {
                Some(command) => return command,
                None => println!("'{choice}' is not available. {HELP}"),
            }
        }
    }
}

/// Accepts a list index, a shortcut letter, or a 1-based column number.
fn parse_selection(input: &str, legal_commands: &[Command]) -> Option<Command> {
    let wanted = match input.to_ascii_lowercase().as_str() {
        "d" | "draw" => Command::Draw,
        "s" | "shuffle" => Command::Shuffle,
        "1" | "2" | "3"
            if legal_commands
                .iter()
                .any(|command| matches!(command, Command::Place { .. })) =>
        {
            let column = input.parse::<usize>().ok()? - 1;
            Command::Place { column }
        }
        other => return other.parse::<usize>().ok().and_then(|idx| legal_commands.get(idx)).copied(),
    };
    legal_commands.contains(&wanted).then_some(wanted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shortcuts_map_to_legal_commands() {
        let drawing = [Command::Draw, Command::Shuffle];
        assert_eq!(parse_selection("d", &drawing), Some(Command::Draw));
        assert_eq!(parse_selection("S", &drawing), Some(Command::Shuffle));
        assert_eq!(parse_selection("1", &drawing), Some(Command::Shuffle));
        assert_eq!(parse_selection("7", &drawing), None);

        let placing = [Command::Place { column: 0 }, Command::Place { column: 2 }];
        assert_eq!(parse_selection("3", &placing), Some(Command::Place { column: 2 }));
        assert_eq!(parse_selection("2", &placing), None);
        assert_eq!(parse_selection("d", &placing), None);
    }
}
