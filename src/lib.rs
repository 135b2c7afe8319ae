//! poker-settle: hand ranking, equity and pot settlement
//!
//! Goals:
//! - Exact, deterministic settlement of finished hands, side pots and
//!   run-it-twice boards included
//! - Every operation a pure function of its inputs; sampling is seeded
//! - No panics for invalid input; use `Result` for recoverable errors
//!
//! ## Quick start: rank a hand
//! ```
//! use poker_settle::cards::parse_cards;
//! use poker_settle::evaluator::{evaluate, Category};
//!
//! let hand = evaluate(&parse_cards("As Ah Kc Qd Jh 3s 2c").unwrap()).unwrap();
//! assert_eq!(hand.category, Category::Pair);
//! assert_eq!(hand.to_string(), "Pair [As Ah] (Kc Qd Jh)");
//! ```
//!
//! ## Equity on a flop
//! ```
//! use poker_settle::equity::equities;
//! use poker_settle::hand::{Board, HoleCards};
//!
//! let holdings: Vec<HoleCards> = vec!["4h 4d".parse().unwrap(), "Jd Js".parse().unwrap()];
//! let board: Board = "Ah Kc 3d".parse().unwrap();
//! let eq = equities(&holdings, board.as_slice(), None).unwrap();
//! assert!((eq[1] - 0.90).abs() < 1e-9);
//! ```
//!
//! ## CLI
//! ```sh
//! cargo run --bin poker-settle -- equity "4h 4d" "Jd Js" --board "Ah Kc 3d"
//! ```

pub mod cards;
pub mod deck;
pub mod equity;
pub mod evaluator;
pub mod hand;
pub mod settle;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
