//! gomcts: Go rules engine and Monte Carlo Tree Search player.
//!
//! This crate provides the rules of Go on a small square board together
//! with a UCT-based MCTS agent that picks moves by random playouts.
//!
//! ## Modules
//!
//! - [`constants`] - Default board size, pass limit, search and reward parameters
//! - [`board`] - Board grid, group and territory detection
//! - [`game`] - Game state, move legality (captures, suicide, ko), scoring
//! - [`playout`] - Random game simulation and reward shaping
//! - [`mcts`] - Monte Carlo Tree Search with UCT
//! - [`gtp`] - Go Text Protocol front end
//! - [`error`] - Move rejection and parse errors
//!
//! ## Example
//!
//! ```
//! use gomcts::game::{GameState, Move, str_move};
//! use gomcts::mcts::search_best_move;
//!
//! // Create a new game on the default 6x6 board
//! let mut game = GameState::default();
//!
//! // Play a move
//! game.make_move(Move::at(2, 3)).unwrap();
//!
//! // Run MCTS to find the best response
//! let mut rng = fastrand::Rng::with_seed(1);
//! let best = search_best_move(&game, 20, &mut rng);
//! println!("Best move: {}", str_move(best, game.size()));
//! ```

pub mod board;
pub mod constants;
pub mod error;
pub mod game;
pub mod gtp;
pub mod mcts;
pub mod playout;
