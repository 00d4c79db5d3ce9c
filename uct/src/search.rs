//! UCT search implementation.
//!
//! Implements the core algorithm. Each iteration runs four phases:
//! 1. Selection: descend from the root along best-UCB1 children
//! 2. Expansion: add one child to the reached node
//! 3. Simulation: random rollout from a copy of the new node's state
//! 4. Backpropagation: credit the reward vector along the path to the root

use rand_chacha::ChaCha20Rng;
use std::time::Duration;
use thiserror::Error;
use tracing::trace;
use uct_core::GameState;

use crate::budget::{BudgetReport, SearchBudget};
use crate::config::UctConfig;
use crate::tree::{SearchTree, TreeStats};

/// Errors that can occur during a search.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Degenerate search: the root state is terminal, or the budget was
    /// exhausted before a single child of the root existed. Callers decide
    /// what "no action" means for them (typically: do not search a finished
    /// game, or treat as a pass).
    #[error("no action available from the root state")]
    NoActionAvailable,
}

/// Result of a completed search.
#[derive(Debug, Clone)]
pub struct SearchResult<A> {
    /// Action on the most-visited child of the root
    pub action: A,

    /// Visits of the chosen child
    pub action_visits: u32,

    /// Iterations executed (equals the root's visit count)
    pub iterations: u32,

    /// Wall-clock duration of the search
    pub elapsed: Duration,
}

/// One search invocation over a decision point.
///
/// Owns its tree exclusively; the tree is built fresh inside [`run`] and
/// discarded with the `UctSearch` value. Nothing persists between searches.
///
/// [`run`]: UctSearch::run
pub struct UctSearch<S: GameState> {
    root_state: S,
    config: UctConfig,
    tree: SearchTree<S>,
    report: Option<BudgetReport>,
}

impl<S: GameState> UctSearch<S> {
    /// Create a search over the given decision point.
    pub fn new(root_state: S, config: UctConfig) -> Self {
        let tree = SearchTree::new(root_state.clone());
        Self {
            root_state,
            config,
            tree,
            report: None,
        }
    }

    /// Run the search until the configured budget is exhausted and return
    /// the action on the most-visited child of the root.
    pub fn run(&mut self, rng: &mut ChaCha20Rng) -> Result<SearchResult<S::Action>, SearchError> {
        self.run_inner(rng, None)
    }

    /// Like [`run`], additionally appending every rollout's terminal or
    /// cutoff state to `explored` for diagnostics and tests.
    ///
    /// [`run`]: UctSearch::run
    pub fn run_collecting(
        &mut self,
        rng: &mut ChaCha20Rng,
        explored: &mut Vec<S>,
    ) -> Result<SearchResult<S::Action>, SearchError> {
        self.run_inner(rng, Some(explored))
    }

    fn run_inner(
        &mut self,
        rng: &mut ChaCha20Rng,
        mut explored: Option<&mut Vec<S>>,
    ) -> Result<SearchResult<S::Action>, SearchError> {
        // Fresh tree per invocation
        self.tree = SearchTree::new(self.root_state.clone());
        let root = self.tree.root();

        // A terminal root has nothing to decide: report before iterating.
        if self.root_state.is_terminal() {
            self.report = Some(SearchBudget::start().report());
            return Err(SearchError::NoActionAvailable);
        }

        let mut budget = SearchBudget::start();
        while !budget.exhausted(&self.config) {
            budget.iteration_start();

            // 1. Selection: walk down while the node is non-terminal and
            // fully expanded, following the best UCB1 child.
            let mut node_id = root;
            loop {
                let node = self.tree.get(node_id);
                if node.is_terminal() || !node.is_fully_expanded() {
                    break;
                }
                match self
                    .tree
                    .select_uct_child(node_id, self.config.exploration_constant)
                {
                    Some(child_id) => node_id = child_id,
                    None => break,
                }
            }

            // 2. Expansion: one new child, unless terminal. A node whose
            // action list turns out empty stays the active node and is
            // treated as terminal from here on.
            {
                let node = self.tree.get(node_id);
                if !node.is_terminal() && !node.is_fully_expanded() {
                    if let Some(child_id) = self.tree.expand(node_id, rng) {
                        node_id = child_id;
                    }
                }
            }

            // 3. Simulation: rollout on a copy of the active node's state,
            // bounded by the depth ceiling. Terminal nodes are evaluated
            // as-is.
            let node = self.tree.get(node_id);
            let mut state = node.state.clone();
            if !node.is_terminal() {
                for _ in 0..self.config.rollout_depth {
                    if state.is_terminal() {
                        break;
                    }
                    match state.random_action(rng) {
                        Some(action) => state.apply_action(&action),
                        None => break,
                    }
                }
            }

            // 4. Backpropagation: evaluate once, credit the same reward
            // vector at every node up to and including the root.
            let rewards = state.evaluate();
            self.tree.backpropagate(node_id, &rewards);

            if let Some(sink) = explored.as_deref_mut() {
                sink.push(state);
            }

            budget.iteration_end();

            trace!(
                iteration = budget.iterations(),
                tree_nodes = self.tree.len(),
                "search iteration complete"
            );
        }

        let report = budget.report();
        let iterations = report.iterations;
        let elapsed = report.elapsed;
        self.report = Some(report);

        let best_id = self
            .tree
            .most_visited_child(root)
            .ok_or(SearchError::NoActionAvailable)?;
        let best = self.tree.get(best_id);
        let action = best
            .action
            .clone()
            .ok_or(SearchError::NoActionAvailable)?;

        Ok(SearchResult {
            action,
            action_visits: best.visit_count,
            iterations,
            elapsed,
        })
    }

    /// Get the search tree (for inspection and tests).
    pub fn tree(&self) -> &SearchTree<S> {
        &self.tree
    }

    /// Tree shape diagnostics for the last run.
    pub fn tree_stats(&self) -> TreeStats {
        self.tree.stats()
    }

    /// Timing diagnostics for the last run, if any.
    pub fn budget_report(&self) -> Option<&BudgetReport> {
        self.report.as_ref()
    }
}

/// Convenience function to run a single search.
pub fn run_uct<S: GameState>(
    root_state: S,
    config: UctConfig,
    rng: &mut ChaCha20Rng,
) -> Result<SearchResult<S::Action>, SearchError> {
    UctSearch::new(root_state, config).run(rng)
}
