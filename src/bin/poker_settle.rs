use clap::{Parser, Subcommand};
use log::{error, info};
use poker_settle::cards::parse_cards;
use poker_settle::equity::preflop::{build_table, canonical_matchups};
use poker_settle::equity::{EquityCalculator, EquityConfig, DEFAULT_SEED};
use poker_settle::evaluator::evaluate;
use poker_settle::hand::HoleCards;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[clap(version, about = "Poker hand ranking, equity and preflop tables")]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Rank the best hand in 2 to 7 cards.
    Eval {
        /// Cards such as "As Kd 7c" or "AsKd7c".
        cards: Vec<String>,
    },
    /// Equity of two or more holdings on an optional board.
    Equity {
        /// Holdings, two cards each, e.g. "4h4d" "JdJs".
        #[clap(required = true, num_args = 2..)]
        holdings: Vec<String>,
        /// Community cards already dealt.
        #[clap(long, short, default_value = "")]
        board: String,
        /// Sample this many completions when there are more.
        #[clap(long, short)]
        iterations: Option<u64>,
        /// Seed for sampled completions.
        #[clap(long, default_value_t = DEFAULT_SEED)]
        seed: u64,
    },
    /// Compute the heads-up preflop equity table.
    PreflopTable {
        /// Where to write the table.
        #[clap(long, short)]
        output: PathBuf,
        /// Completions sampled per matchup.
        #[clap(long, short, default_value_t = 10_000)]
        iterations: u64,
        /// Only compute the first N matchups.
        #[clap(long)]
        limit: Option<usize>,
        /// Seed for sampled completions.
        #[clap(long, default_value_t = DEFAULT_SEED)]
        seed: u64,
    },
}

fn main() -> ExitCode {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .format_target(false)
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();
    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Eval { cards } => {
            let cards = parse_cards(&cards.join(" "))?;
            let hand = evaluate(&cards)?;
            println!("{hand}");
        }
        Command::Equity { holdings, board, iterations, seed } => {
            let holdings = holdings
                .iter()
                .map(|h| h.parse::<HoleCards>())
                .collect::<Result<Vec<_>, _>>()?;
            let board = parse_cards(&board)?;
            let calc = EquityCalculator::new(EquityConfig {
                iteration_cap: iterations,
                seed,
                ..EquityConfig::default()
            });
            let eq = calc.equities(&holdings, &board)?;
            for (h, e) in holdings.iter().zip(eq) {
                println!("{h} {:.2}%", e * 100.0);
            }
        }
        Command::PreflopTable { output, iterations, limit, seed } => {
            let mut keys = canonical_matchups();
            info!("{} canonical matchups", keys.len());
            if let Some(limit) = limit {
                keys.truncate(limit);
            }
            let table = build_table(&keys, Some(iterations), seed, |done, total, key, eq| {
                if done % 500 == 0 || done == total {
                    info!("{:.2}% done, {key}: {:.2}%", done as f64 / total as f64 * 100.0, eq * 100.0);
                }
            })?;
            table.save(&output)?;
            info!("wrote {} entries to {}", table.len(), output.display());
        }
    }
    Ok(())
}
