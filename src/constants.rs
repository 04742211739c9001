//! Constants for board dimensions, search parameters, and reward shaping.
//!
//! This module contains all the configuration constants for the Go engine.
//! Runtime overrides (board size, iteration budget, seed) are passed through
//! [`crate::mcts::SearchConfig`] and [`crate::game::GameState::new`].

// =============================================================================
// Board Geometry
// =============================================================================

/// Default board size (NxN) used when no size is given.
pub const DEFAULT_BOARD_SIZE: usize = 6;

/// Largest board size accepted by the text front ends (GTP letters run out at 25).
pub const MAX_BOARD_SIZE: usize = 25;

// =============================================================================
// Game Rules
// =============================================================================

/// Number of consecutive passes that ends the game.
pub const PASS_LIMIT: u32 = 4;

// =============================================================================
// MCTS (Monte Carlo Tree Search) Parameters
// =============================================================================

/// Default number of search iterations per move.
pub const DEFAULT_ITERATIONS: usize = 200;

/// UCT exploration constant (the `2` in `sqrt(2 ln N / n)`).
pub const UCT_EXPLORATION: f64 = 2.0;

/// Rollouts are cut off after `ROLLOUT_LENGTH_FACTOR * N * N` moves.
/// Random games on the default board end long before this.
pub const ROLLOUT_LENGTH_FACTOR: usize = 100;

// =============================================================================
// Reward Shaping
// =============================================================================

/// Reward for a won rollout before the margin bonus.
pub const REWARD_WIN_BASE: f64 = 1.0;

/// Bonus per point of winning margin.
pub const REWARD_WIN_SLOPE: f64 = 0.1;

/// Reward for a lost rollout before the margin penalty.
pub const REWARD_LOSS_BASE: f64 = 0.5;

/// Penalty per point of losing margin.
pub const REWARD_LOSS_SLOPE: f64 = 0.05;

/// Reward for a tied rollout.
pub const REWARD_TIE: f64 = 0.5;

// =============================================================================
// Display
// =============================================================================

/// Black stone.
pub const STONE_BLACK: char = 'X';

/// White stone.
pub const STONE_WHITE: char = 'O';

/// Empty point.
pub const EMPTY: char = '.';
