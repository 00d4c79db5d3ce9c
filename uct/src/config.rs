//! Search configuration parameters.

/// Configuration for a UCT search.
#[derive(Debug, Clone)]
pub struct UctConfig {
    /// Exploration constant `k` in the UCB1 formula.
    /// Higher values favor exploration over exploitation.
    /// Defaults to sqrt(2), the classical UCB1 weight.
    pub exploration_constant: f32,

    /// Iteration budget per search. 0 disables the limit.
    pub max_iterations: u32,

    /// Wall-clock budget in milliseconds per search. 0 disables the limit.
    ///
    /// At least one of `max_iterations` / `max_time_millis` must be non-zero,
    /// otherwise the search never stops. This is the caller's responsibility
    /// and is not enforced here.
    pub max_time_millis: u64,

    /// Ceiling on simulation steps per rollout, guaranteeing termination
    /// even in domains with potentially infinite play.
    pub rollout_depth: u32,
}

impl Default for UctConfig {
    fn default() -> Self {
        Self {
            exploration_constant: std::f32::consts::SQRT_2,
            max_iterations: 100,
            max_time_millis: 0,
            rollout_depth: 10,
        }
    }
}

impl UctConfig {
    /// Create a fast config for testing.
    pub fn for_testing() -> Self {
        Self {
            max_iterations: 50,
            ..Self::default()
        }
    }

    /// Builder pattern: set the iteration budget.
    pub fn with_iterations(mut self, n: u32) -> Self {
        self.max_iterations = n;
        self
    }

    /// Builder pattern: set the wall-clock budget in milliseconds.
    pub fn with_time_millis(mut self, millis: u64) -> Self {
        self.max_time_millis = millis;
        self
    }

    /// Builder pattern: set the exploration constant.
    pub fn with_exploration(mut self, k: f32) -> Self {
        self.exploration_constant = k;
        self
    }

    /// Builder pattern: set the rollout depth ceiling.
    pub fn with_rollout_depth(mut self, depth: u32) -> Self {
        self.rollout_depth = depth;
        self
    }
}
