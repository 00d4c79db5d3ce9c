//! World model contract consumed by the search engine
//!
//! The engine never inspects domain internals. Any perfect-information,
//! turn-based game with two or more agents becomes searchable by implementing
//! `GameState` with its own state and action types.

use rand::seq::SliceRandom;
use rand_chacha::ChaCha20Rng;

/// Identifier of an agent (the participant to move in a state).
///
/// Agents are small integer indices starting at 0. The engine imposes no
/// upper bound beyond what `GameState::evaluate` returns rewards for.
pub type AgentId = usize;

/// Contract for a searchable world model.
///
/// States are cheap-to-clone snapshots: the engine clones a state whenever it
/// expands a tree node or starts a rollout, and never mutates a stored one.
///
/// # Example
///
/// ```rust
/// use rand_chacha::ChaCha20Rng;
/// use uct_core::{AgentId, GameState};
///
/// /// A one-pile take-away game: remove 1 or 2 counters, taking the last wins.
/// #[derive(Debug, Clone)]
/// struct Nim {
///     counters: u32,
///     to_move: AgentId,
///     last_mover: AgentId,
/// }
///
/// impl GameState for Nim {
///     type Action = u32;
///
///     fn is_terminal(&self) -> bool {
///         self.counters == 0
///     }
///
///     fn acting_agent(&self) -> AgentId {
///         self.to_move
///     }
///
///     fn apply_action(&mut self, action: &u32) {
///         self.counters -= action;
///         self.last_mover = self.to_move;
///         self.to_move = 1 - self.to_move;
///     }
///
///     fn legal_actions(&self) -> Vec<u32> {
///         (1..=2).filter(|&take| take <= self.counters).collect()
///     }
///
///     fn evaluate(&self) -> Vec<f32> {
///         if !self.is_terminal() {
///             return vec![0.0, 0.0];
///         }
///         let mut rewards = vec![0.0, 0.0];
///         rewards[self.last_mover] = 1.0;
///         rewards
///     }
/// }
/// ```
pub trait GameState: Clone {
    /// Domain-specific action type. Actions are discrete choices that
    /// deterministically transform one state into another.
    type Action: Clone + std::fmt::Debug;

    /// True once no further actions are possible (the game has concluded).
    fn is_terminal(&self) -> bool;

    /// Whose turn it is to act in this state.
    fn acting_agent(&self) -> AgentId;

    /// Apply an action to this state in place.
    ///
    /// Deterministic. Applying an action that is not legal for this state is
    /// a contract violation: the engine only applies actions drawn from
    /// `legal_actions` or `random_action`.
    fn apply_action(&mut self, action: &Self::Action);

    /// All actions legal in this state. Order is unspecified and may vary;
    /// the engine shuffles the list itself before consuming it.
    fn legal_actions(&self) -> Vec<Self::Action>;

    /// Draw one legal action at random, or `None` if no action exists.
    ///
    /// Used for rollouts. The default implementation samples uniformly from
    /// `legal_actions`; domains with a cheaper sampler may override it.
    fn random_action(&self, rng: &mut ChaCha20Rng) -> Option<Self::Action> {
        self.legal_actions().choose(rng).cloned()
    }

    /// Reward signal per agent, indexed by `AgentId`.
    ///
    /// For non-terminal states this is conventionally all-zero, deferring
    /// knowledge to rollout-to-terminal. Must be idempotent: evaluating the
    /// same state twice without mutation yields identical rewards.
    fn evaluate(&self) -> Vec<f32>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    /// Counting game used to exercise the default `random_action`.
    #[derive(Debug, Clone)]
    struct CountDown {
        remaining: u32,
        to_move: AgentId,
    }

    impl GameState for CountDown {
        type Action = u32;

        fn is_terminal(&self) -> bool {
            self.remaining == 0
        }

        fn acting_agent(&self) -> AgentId {
            self.to_move
        }

        fn apply_action(&mut self, action: &u32) {
            self.remaining -= action;
            self.to_move = 1 - self.to_move;
        }

        fn legal_actions(&self) -> Vec<u32> {
            (1..=3).filter(|&n| n <= self.remaining).collect()
        }

        fn evaluate(&self) -> Vec<f32> {
            vec![0.0, 0.0]
        }
    }

    #[test]
    fn test_default_random_action_draws_legal() {
        let state = CountDown {
            remaining: 2,
            to_move: 0,
        };
        let mut rng = ChaCha20Rng::seed_from_u64(42);

        for _ in 0..50 {
            let action = state.random_action(&mut rng).unwrap();
            assert!(state.legal_actions().contains(&action));
        }
    }

    #[test]
    fn test_default_random_action_none_when_exhausted() {
        let state = CountDown {
            remaining: 0,
            to_move: 0,
        };
        let mut rng = ChaCha20Rng::seed_from_u64(42);

        assert!(state.random_action(&mut rng).is_none());
    }

    #[test]
    fn test_apply_action_alternates_agents() {
        let mut state = CountDown {
            remaining: 6,
            to_move: 0,
        };

        state.apply_action(&2);
        assert_eq!(state.acting_agent(), 1);
        state.apply_action(&1);
        assert_eq!(state.acting_agent(), 0);
    }
}
