//! Monte Carlo playouts (random game simulation).
//!
//! A playout plays uniformly random legal moves (pass included) until the
//! game ends, then turns the final score into a reward for a fixed player.

use crate::board::Color;
use crate::constants::{
    REWARD_LOSS_BASE, REWARD_LOSS_SLOPE, REWARD_TIE, REWARD_WIN_BASE, REWARD_WIN_SLOPE,
    ROLLOUT_LENGTH_FACTOR,
};
use crate::game::{GameState, Score};

/// Play random moves on `state` until the game is over.
///
/// Stops early after `ROLLOUT_LENGTH_FACTOR * N * N` moves so that a playout
/// always terminates. Returns the number of moves played.
pub fn rollout(state: &mut GameState, rng: &mut fastrand::Rng) -> usize {
    let max_len = ROLLOUT_LENGTH_FACTOR * state.size() * state.size();
    let mut played = 0;

    while !state.is_over() && played < max_len {
        let moves = state.valid_moves();
        if moves.is_empty() {
            break;
        }
        let mv = moves[rng.usize(..moves.len())];
        let applied = state.make_move(mv);
        debug_assert!(applied.is_ok(), "valid move {mv:?} was rejected");
        played += 1;
    }
    played
}

/// Reward for `perspective` given a final score.
///
/// Wins earn `1 + 0.1 * margin`, losses `0.5 - 0.05 * |margin|`, ties `0.5`.
pub fn reward(score: &Score, perspective: Color) -> f64 {
    let margin = score.margin(perspective);
    match margin.signum() {
        1 => REWARD_WIN_BASE + REWARD_WIN_SLOPE * margin as f64,
        -1 => REWARD_LOSS_BASE - REWARD_LOSS_SLOPE * margin.unsigned_abs() as f64,
        _ => REWARD_TIE,
    }
}

/// Play out a copy of `state` and score it for `perspective`.
pub fn simulate(state: &GameState, perspective: Color, rng: &mut fastrand::Rng) -> f64 {
    let mut scratch = state.clone();
    rollout(&mut scratch, rng);
    reward(&scratch.score(), perspective)
}
