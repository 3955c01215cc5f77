use std::error::Error;
use std::process;
use std::thread;

use clap::{ArgAction, Parser};
use cardlebones::{
    Bot, CommandReport, Game, GameError, HumanBot, RandomBot, Sequencer, Timing, VisualOptions,
    describe_command, describe_stage, render_summary,
};
use cardlebones::visualize::render_state_with_options;

#[derive(Parser, Debug)]
#[command(
    name = "simulate",
    about = "Play one game between two controllers (human or random)."
)]
struct Args {
    /// Seed for shuffling; random when omitted
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// Show the table and chosen commands each turn
    #[arg(long = "visualize", action = ArgAction::SetTrue)]
    visualize: bool,

    /// Pause between staged steps the way the table animates them
    #[arg(long = "animate", action = ArgAction::SetTrue)]
    animate: bool,

    /// Print every command report to stderr
    #[arg(short = 'v', long = "verbose", action = ArgAction::SetTrue)]
    verbose: bool,

    /// Print the final state snapshot as JSON
    #[arg(long = "json", action = ArgAction::SetTrue)]
    json: bool,

    /// Safety cap on issued commands
    #[arg(long = "max-commands", default_value_t = 1000)]
    max_commands: usize,

    /// Shuffles each player may use
    #[arg(long = "shuffles", default_value_t = 3)]
    shuffles: u8,

    /// Controllers for both seats: human[:name] or random[:seed]
    players: Vec<String>,
}

fn main() {
    let args = Args::parse();
    if let Err(err) = run(args) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let specs = if args.players.is_empty() {
        vec![String::from("human"), String::from("random")]
    } else {
        args.players.clone()
    };
    if specs.len() != 2 {
        return Err(format!("expected exactly 2 players, received {}", specs.len()).into());
    }

    let base_seed = args.seed.unwrap_or_else(rand::random);
    let names = [seat_name(&specs[0], 0), seat_name(&specs[1], 1)];
    let mut game = Game::builder()
        .with_names(names[0].clone(), names[1].clone())
        .with_seed(base_seed)
        .with_shuffle_allowance(args.shuffles)
        .build()?;
    let mut bots = Vec::with_capacity(specs.len());
    for (index, spec) in specs.iter().enumerate() {
        bots.push(create_bot(spec, &names[index], index, base_seed)?);
    }
    let timing = if args.animate {
        Timing::default()
    } else {
        Timing::INSTANT
    };
    let mut sequencer = Sequencer::new(timing);
    let options = VisualOptions {
        show_scores: true,
        show_log: false,
    };

    println!("Starting game: {} vs {} (seed {base_seed}).\n", names[0], names[1]);
    let mut commands = 0usize;
    while !game.is_game_over() {
        if commands >= args.max_commands {
            println!("Command limit {} reached. Stopping.", args.max_commands);
            break;
        }
        let current = game.current_player();
        let view = game.state_view();
        let legal = game.legal_commands(current)?;
        if legal.is_empty() {
            return Err(GameError::InvalidConfiguration(
                "no legal commands available for current player",
            )
            .into());
        }
        if args.visualize {
            println!("{}", render_state_with_options(&view, options));
        }
        let command = bots[current].select_command(&view, &legal);
        if args.visualize {
            println!("Chosen: {}", describe_command(&view, &command));
        }
        commands += 1;
        match sequencer.apply(&mut game, current, command) {
            Ok(report) => {
                if args.verbose {
                    log_report(&report);
                }
            }
            Err(err) if !err.is_fatal() => {
                eprintln!("rejected {command:?}: {err}");
                continue;
            }
            Err(err) => return Err(err.into()),
        }

        let after = game.state_view();
        while let Some(step) = sequencer.next_step() {
            if args.visualize || args.animate {
                println!("  {}", describe_stage(&after, &step.stage));
            }
            if args.animate && !step.pause.is_zero() {
                thread::sleep(step.pause);
            }
        }
    }

    let view = game.state_view();
    println!("\n{}", render_summary(&view));
    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    }
    Ok(())
}

fn log_report(report: &CommandReport) {
    match report {
        CommandReport::Drawn(draw) => eprintln!(
            "[draw] player={} card={} pile={}",
            draw.player, draw.card, draw.draw_pile_count
        ),
        CommandReport::Placed(place) => eprintln!(
            "[place] turn={} player={} card={} column={} row={} removed={} reshuffled={} scores={:?}",
            place.turn,
            place.player,
            place.card,
            place.column,
            place.row,
            place.removed.len(),
            place.reshuffled,
            place.scores_after
        ),
        CommandReport::Shuffled(shuffle) => eprintln!(
            "[shuffle] player={} returned={:?} left={} pile={}",
            shuffle.player,
            shuffle.returned.map(|card| card.to_string()),
            shuffle.shuffles_remaining,
            shuffle.draw_pile_count
        ),
    }
}

fn seat_name(spec: &str, index: usize) -> String {
    match spec.split_once(':') {
        Some((kind, name)) if kind.eq_ignore_ascii_case("human") && !name.trim().is_empty() => {
            name.trim().to_string()
        }
        _ => format!("Player {}", index + 1),
    }
}

fn create_bot(
    spec: &str,
    name: &str,
    index: usize,
    seed: u64,
) -> Result<Box<dyn Bot>, Box<dyn Error>> {
    let spec_lower = spec.to_ascii_lowercase();
    if spec_lower.starts_with("human") {
        Ok(Box::new(HumanBot::new(name)))
    } else if spec_lower.starts_with("random") {
        let custom_seed = spec
            .split_once(':')
            .and_then(|(_, value)| value.parse::<u64>().ok())
            .unwrap_or(seed ^ ((index as u64 + 1) * 0x9E37_79B9));
        Ok(Box::new(RandomBot::seeded(custom_seed)))
    } else {
        Err(format!("unrecognized player spec: {spec}").into())
    }
}
