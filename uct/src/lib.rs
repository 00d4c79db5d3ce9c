//! Generic Monte Carlo Tree Search with UCB1 selection (UCT).
//!
//! This crate provides a domain-agnostic search engine that works with any
//! turn-based, perfect-information world model implementing the `uct-core`
//! [`GameState`] trait. The engine never knows what a "tile" or "board" is.
//!
//! # Overview
//!
//! One [`UctSearch::run`] call repeats four phases until its budget is
//! exhausted, then returns the action on the most-visited child of the root:
//!
//! 1. **Selection**: descend from the root to the most promising node using
//!    the UCB1 score, balancing exploitation and exploration
//! 2. **Expansion**: add one child for the next action in the node's
//!    lazily-shuffled legal-action list
//! 3. **Simulation**: play random actions on a copy of the new state until a
//!    terminal state or the rollout depth ceiling
//! 4. **Backpropagation**: evaluate the end state and credit the per-agent
//!    reward vector along the path back to the root
//!
//! # Usage
//!
//! ```rust
//! use games_tictactoe::State;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//! use uct::{run_uct, UctConfig};
//!
//! let config = UctConfig::default().with_iterations(1000);
//! let mut rng = ChaCha20Rng::seed_from_u64(42);
//!
//! match run_uct(State::new(), config, &mut rng) {
//!     Ok(result) => println!("best action: {:?}", result.action),
//!     Err(e) => println!("nothing to do: {e}"),
//! }
//! ```
//!
//! # Configuration
//!
//! The [`UctConfig`] struct controls search behavior:
//!
//! - `exploration_constant`: UCB1 exploration weight (default: sqrt 2)
//! - `max_iterations`: iteration budget, 0 = unlimited (default: 100)
//! - `max_time_millis`: wall-clock budget, 0 = unlimited (default: 0)
//! - `rollout_depth`: ceiling on simulation steps per rollout (default: 10)
//!
//! At least one of the two budgets must be non-zero or the search never
//! stops; that is the caller's responsibility.
//!
//! # Concurrency
//!
//! A search is single-threaded and synchronous: `run` executes to completion
//! on the caller's thread, owns its tree exclusively, and releases it when
//! the search value is dropped. Separate searches on separate threads are
//! independent as long as they share no state and no random generator.
//!
//! [`GameState`]: uct_core::GameState

pub mod budget;
pub mod config;
pub mod node;
pub mod search;
pub mod tree;

// Re-export main types
pub use budget::{BudgetReport, SearchBudget};
pub use config::UctConfig;
pub use node::{NodeId, UctNode};
pub use search::{run_uct, SearchError, SearchResult, UctSearch};
pub use tree::{SearchTree, TreeStats};
