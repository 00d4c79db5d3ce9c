//! Shared utilities for two-player game implementations
//!
//! This module provides common functionality used across multiple game
//! implementations to reduce code duplication and ensure consistent rewards.

use crate::AgentId;

/// Build the terminal reward vector for a two-player game.
///
/// The winner receives `1.0` and the loser `0.0`; a draw pays both agents
/// `0.5`. The vector is indexed by `AgentId`.
///
/// # Example
/// ```
/// use uct_core::game_utils::terminal_rewards;
///
/// // Agent 0 wins
/// assert_eq!(terminal_rewards(Some(0)), vec![1.0, 0.0]);
///
/// // Agent 1 wins
/// assert_eq!(terminal_rewards(Some(1)), vec![0.0, 1.0]);
///
/// // Draw
/// assert_eq!(terminal_rewards(None), vec![0.5, 0.5]);
/// ```
#[inline]
pub fn terminal_rewards(winner: Option<AgentId>) -> Vec<f32> {
    match winner {
        Some(0) => vec![1.0, 0.0],
        Some(_) => vec![0.0, 1.0],
        None => vec![0.5, 0.5],
    }
}

/// Reward vector for a state that has not concluded: all-zero.
///
/// Non-terminal evaluation carries no heuristic information; the engine
/// relies on rollout-to-terminal instead.
#[inline]
pub fn neutral_rewards(num_agents: usize) -> Vec<f32> {
    vec![0.0; num_agents]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_winner_takes_all() {
        assert_eq!(terminal_rewards(Some(0)), vec![1.0, 0.0]);
        assert_eq!(terminal_rewards(Some(1)), vec![0.0, 1.0]);
    }

    #[test]
    fn test_draw_splits_reward() {
        assert_eq!(terminal_rewards(None), vec![0.5, 0.5]);
    }

    #[test]
    fn test_neutral_is_all_zero() {
        assert_eq!(neutral_rewards(2), vec![0.0, 0.0]);
        assert_eq!(neutral_rewards(4), vec![0.0; 4]);
    }
}
