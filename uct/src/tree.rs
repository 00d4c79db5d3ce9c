//! Search tree structure with arena allocation.
//!
//! The tree uses arena allocation for node storage: nodes live in a
//! contiguous Vec and refer to each other by `NodeId` indices. The parent
//! index is a lookup-only relation, so no reference cycles are possible and
//! the whole tree is released when the arena is dropped at the end of a
//! search.

use rand::seq::SliceRandom;
use rand_chacha::ChaCha20Rng;
use uct_core::GameState;

use crate::node::{NodeId, UctNode};

/// Search tree with arena-based node storage.
///
/// Created fresh for every search invocation and discarded in its entirety
/// when the search returns; nothing persists between invocations.
#[derive(Debug)]
pub struct SearchTree<S: GameState> {
    /// Arena storing all nodes
    nodes: Vec<UctNode<S>>,

    /// Root node index (always 0 after initialization)
    root: NodeId,
}

impl<S: GameState> SearchTree<S> {
    /// Create a new tree rooted at the given state.
    pub fn new(root_state: S) -> Self {
        Self {
            nodes: vec![UctNode::new_root(root_state)],
            root: NodeId(0),
        }
    }

    /// Get the root node ID.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a reference to a node by ID.
    #[inline]
    pub fn get(&self, id: NodeId) -> &UctNode<S> {
        &self.nodes[id.0 as usize]
    }

    /// Get a mutable reference to a node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut UctNode<S> {
        &mut self.nodes[id.0 as usize]
    }

    /// Allocate a new node and return its ID.
    fn allocate(&mut self, node: UctNode<S>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Get the total number of nodes in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty (never true after construction).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Expand one new child of `node_id` and return its ID.
    ///
    /// On the first call for a node, materializes the legal-action list and
    /// shuffles it once; children are then created in that fixed order, one
    /// per call, each with the parent state cloned and the action applied.
    ///
    /// Returns `None` if the node is already fully expanded or has no legal
    /// actions; callers check `is_fully_expanded` / `is_terminal` first and
    /// treat `None` as a no-op.
    pub fn expand(&mut self, node_id: NodeId, rng: &mut ChaCha20Rng) -> Option<NodeId> {
        self.ensure_untried_actions(node_id, rng);

        let node = self.get(node_id);
        let untried = node.untried_actions.as_ref()?;
        let action = untried.get(node.children.len())?.clone();

        let child = UctNode::new_child(node_id, action, node.state.clone(), node.depth + 1);

        let child_id = self.allocate(child);
        self.get_mut(node_id).children.push(child_id);
        Some(child_id)
    }

    /// Populate `untried_actions` with a uniformly shuffled permutation of
    /// the legal actions, exactly once per node.
    fn ensure_untried_actions(&mut self, node_id: NodeId, rng: &mut ChaCha20Rng) {
        let node = self.get_mut(node_id);
        if node.untried_actions.is_some() {
            return;
        }

        let mut actions = node.state.legal_actions();
        actions.shuffle(rng);
        debug_assert!(
            !actions.is_empty() || node.state.is_terminal(),
            "world model reported zero legal actions for a non-terminal state"
        );
        node.untried_actions = Some(actions);
    }

    /// Select the child of `node_id` with the highest UCB1 score.
    ///
    /// Precondition: the node is fully expanded; returns `None` otherwise.
    /// Ties break toward the first child in expansion order, so selection is
    /// deterministic given a fixed child order.
    pub fn select_uct_child(&self, node_id: NodeId, exploration: f32) -> Option<NodeId> {
        let node = self.get(node_id);
        if !node.is_fully_expanded() {
            return None;
        }

        // Pre-compute the log once instead of per-child comparison
        let parent_visits_ln = (node.visit_count as f32 + 1.0).ln();

        let mut best_score = f32::NEG_INFINITY;
        let mut best_child = None;
        for &child_id in &node.children {
            let score = self.get(child_id).ucb1_score(parent_visits_ln, exploration);
            if score > best_score {
                best_score = score;
                best_child = Some(child_id);
            }
        }
        best_child
    }

    /// Get the most-visited child of `node_id`.
    ///
    /// Ties break toward the first child in expansion order. Returns `None`
    /// if the node has no children.
    pub fn most_visited_child(&self, node_id: NodeId) -> Option<NodeId> {
        let mut most_visits = None;
        let mut best_child = None;
        for &child_id in &self.get(node_id).children {
            let visits = self.get(child_id).visit_count;
            if most_visits.map_or(true, |best| visits > best) {
                most_visits = Some(visits);
                best_child = Some(child_id);
            }
        }
        best_child
    }

    /// Backpropagate a reward vector from `node_id` to the root inclusive.
    ///
    /// Every node on the path records one visit and credits the reward of its
    /// own acting agent, so the flat vector pays alternating agents correctly.
    pub fn backpropagate(&mut self, node_id: NodeId, rewards: &[f32]) {
        let mut current = node_id;
        while current.is_some() {
            let node = self.get_mut(current);
            node.update(rewards);
            current = node.parent;
        }
    }

    /// Get statistics about the tree for diagnostics.
    pub fn stats(&self) -> TreeStats {
        let root = self.get(self.root);
        TreeStats {
            total_nodes: self.nodes.len(),
            root_visits: root.visit_count,
            root_value: root.mean_value(),
            max_depth: self.nodes.iter().map(|n| n.depth).max().unwrap_or(0),
        }
    }
}

/// Statistics about a search tree.
#[derive(Debug, Clone)]
pub struct TreeStats {
    pub total_nodes: usize,
    pub root_visits: u32,
    pub root_value: f32,
    pub max_depth: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use games_tictactoe::State;
    use rand::SeedableRng;

    fn rng() -> ChaCha20Rng {
        ChaCha20Rng::seed_from_u64(42)
    }

    #[test]
    fn test_new_tree() {
        let tree = SearchTree::new(State::new());

        assert_eq!(tree.len(), 1);
        assert_eq!(tree.root(), NodeId(0));

        let root = tree.get(tree.root());
        assert!(root.parent.is_none());
        assert!(root.action.is_none());
        assert_eq!(root.depth, 0);
    }

    #[test]
    fn test_expand_creates_one_child_per_call() {
        let mut tree = SearchTree::new(State::new());
        let mut rng = rng();

        let child_id = tree.expand(tree.root(), &mut rng).unwrap();
        assert_eq!(tree.len(), 2);

        let root = tree.get(tree.root());
        assert_eq!(root.children, vec![child_id]);
        assert_eq!(root.untried_actions.as_ref().unwrap().len(), 9);

        let child = tree.get(child_id);
        assert_eq!(child.parent, tree.root());
        assert!(child.action.is_some());
        assert_eq!(child.depth, 1);
        // X chose the incoming action, so X is credited at the child
        assert_eq!(child.acting_agent, 0);
        // ...and O is to move in the child's state
        assert_eq!(child.state.acting_agent(), 1);
    }

    #[test]
    fn test_expand_exhausts_then_signals_fully_expanded() {
        let mut tree = SearchTree::new(State::new());
        let mut rng = rng();

        for _ in 0..9 {
            assert!(tree.expand(tree.root(), &mut rng).is_some());
        }
        assert!(tree.get(tree.root()).is_fully_expanded());
        assert!(tree.expand(tree.root(), &mut rng).is_none());
        assert_eq!(tree.get(tree.root()).children.len(), 9);
    }

    #[test]
    fn test_children_never_exceed_untried() {
        let mut tree = SearchTree::new(State::new());
        let mut rng = rng();

        for _ in 0..4 {
            tree.expand(tree.root(), &mut rng);
            let root = tree.get(tree.root());
            assert!(root.children.len() <= root.untried_actions.as_ref().unwrap().len());
            // Equality only once fully expanded
            assert_eq!(
                root.children.len() == root.untried_actions.as_ref().unwrap().len(),
                root.is_fully_expanded()
            );
        }
    }

    #[test]
    fn test_expand_terminal_state_returns_none() {
        // X wins on the top row
        let mut state = State::new();
        for cell in [0, 3, 1, 4, 2] {
            state = state.make_move(cell);
        }
        assert!(state.is_done());

        let mut tree = SearchTree::new(state);
        let mut rng = rng();
        assert!(tree.expand(tree.root(), &mut rng).is_none());
        assert!(tree.get(tree.root()).children.is_empty());
        assert!(tree.get(tree.root()).is_terminal());
    }

    #[test]
    fn test_backpropagate_credits_alternating_agents() {
        let mut tree = SearchTree::new(State::new());
        let mut rng = rng();

        // root (X to move) -> child (X's move) -> grandchild (O's move)
        let child = tree.expand(tree.root(), &mut rng).unwrap();
        let grandchild = tree.expand(child, &mut rng).unwrap();

        tree.backpropagate(grandchild, &[1.0, 0.0]);

        assert_eq!(tree.get(grandchild).visit_count, 1);
        assert_eq!(tree.get(child).visit_count, 1);
        assert_eq!(tree.get(tree.root()).visit_count, 1);

        // Each node takes the reward of its own acting agent: the grandchild
        // was O's choice, the child was X's, and X moves at the root.
        assert!((tree.get(grandchild).value_sum - 0.0).abs() < 1e-6);
        assert!((tree.get(child).value_sum - 1.0).abs() < 1e-6);
        assert!((tree.get(tree.root()).value_sum - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_select_requires_fully_expanded() {
        let mut tree = SearchTree::new(State::new());
        let mut rng = rng();

        // Not fully expanded: contract violation yields no best child
        assert!(tree.select_uct_child(tree.root(), 1.0).is_none());

        tree.expand(tree.root(), &mut rng);
        assert!(tree.select_uct_child(tree.root(), 1.0).is_none());

        for _ in 0..8 {
            tree.expand(tree.root(), &mut rng);
        }
        assert!(tree.select_uct_child(tree.root(), 1.0).is_some());
    }

    #[test]
    fn test_select_prefers_higher_value_on_equal_visits() {
        let mut tree = SearchTree::new(State::new());
        let mut rng = rng();

        let children: Vec<NodeId> = (0..9)
            .map(|_| tree.expand(tree.root(), &mut rng).unwrap())
            .collect();

        for (i, &child_id) in children.iter().enumerate() {
            let child = tree.get_mut(child_id);
            child.visit_count = 10;
            child.value_sum = if i == 5 { 9.0 } else { 3.0 };
        }
        tree.get_mut(tree.root()).visit_count = 90;

        assert_eq!(tree.select_uct_child(tree.root(), 0.5), Some(children[5]));
    }

    #[test]
    fn test_select_tie_breaks_to_first_child() {
        let mut tree = SearchTree::new(State::new());
        let mut rng = rng();

        let children: Vec<NodeId> = (0..9)
            .map(|_| tree.expand(tree.root(), &mut rng).unwrap())
            .collect();

        for &child_id in &children {
            let child = tree.get_mut(child_id);
            child.visit_count = 10;
            child.value_sum = 5.0;
        }
        tree.get_mut(tree.root()).visit_count = 90;

        assert_eq!(tree.select_uct_child(tree.root(), 1.0), Some(children[0]));
        assert_eq!(tree.most_visited_child(tree.root()), Some(children[0]));
    }

    #[test]
    fn test_most_visited_child() {
        let mut tree = SearchTree::new(State::new());
        let mut rng = rng();

        assert!(tree.most_visited_child(tree.root()).is_none());

        let a = tree.expand(tree.root(), &mut rng).unwrap();
        let b = tree.expand(tree.root(), &mut rng).unwrap();
        tree.get_mut(a).visit_count = 3;
        tree.get_mut(b).visit_count = 7;

        assert_eq!(tree.most_visited_child(tree.root()), Some(b));
    }

    #[test]
    fn test_tree_stats() {
        let mut tree = SearchTree::new(State::new());
        let mut rng = rng();

        let child = tree.expand(tree.root(), &mut rng).unwrap();
        tree.expand(child, &mut rng).unwrap();
        tree.backpropagate(child, &[0.5, 0.5]);

        let stats = tree.stats();
        assert_eq!(stats.total_nodes, 3);
        assert_eq!(stats.root_visits, 1);
        assert_eq!(stats.max_depth, 2);
    }
}
