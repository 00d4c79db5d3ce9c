//! Search tree node representation.
//!
//! Each node represents a fully-determined world state reached by taking one
//! action from the parent. Nodes store the visit statistics used for UCB1
//! selection, and the lazily-shuffled list of actions not yet expanded.

use uct_core::{AgentId, GameState};

/// Index into the node arena. Using a newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const NONE: NodeId = NodeId(u32::MAX);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    pub fn is_some(self) -> bool {
        !self.is_none()
    }
}

/// A node in the search tree.
///
/// The state snapshot is immutable once set; rollouts always operate on a
/// clone. The parent link is an arena index used only for backpropagation,
/// never for lifetime management.
#[derive(Debug, Clone)]
pub struct UctNode<S: GameState> {
    /// Parent node index (NONE for the root)
    pub parent: NodeId,

    /// Action that led to this node from the parent (None for the root)
    pub action: Option<S::Action>,

    /// World state snapshot at this node
    pub state: S,

    /// Agent credited by `update`: the agent whose decision produced this
    /// node (the agent to move in the parent state). For the root, the agent
    /// to move at the root. Cached at creation, before the incoming action
    /// is applied, so selection maximizes the chooser's own reward.
    pub acting_agent: AgentId,

    /// Number of backpropagation passes that touched this node
    pub visit_count: u32,

    /// Running sum of rewards credited to `acting_agent` across all visits
    pub value_sum: f32,

    /// Depth in the tree (root = 0)
    pub depth: u32,

    /// Children in expansion order
    pub children: Vec<NodeId>,

    /// Legal actions not yet expanded into children.
    ///
    /// None until the first expansion attempt; populated once from
    /// `legal_actions` and shuffled, then consumed by index as children are
    /// created.
    pub untried_actions: Option<Vec<S::Action>>,
}

impl<S: GameState> UctNode<S> {
    /// Create the root node of a fresh tree.
    pub fn new_root(state: S) -> Self {
        let acting_agent = state.acting_agent();
        Self {
            parent: NodeId::NONE,
            action: None,
            state,
            acting_agent,
            visit_count: 0,
            value_sum: 0.0,
            depth: 0,
            children: Vec::new(),
            untried_actions: None,
        }
    }

    /// Create a child node by applying `action` to a clone of the parent
    /// state. The acting agent is cached from the pre-action state: it is
    /// the agent who chose `action`.
    pub fn new_child(parent: NodeId, action: S::Action, mut state: S, depth: u32) -> Self {
        let acting_agent = state.acting_agent();
        state.apply_action(&action);
        Self {
            parent,
            action: Some(action),
            state,
            acting_agent,
            visit_count: 0,
            value_sum: 0.0,
            depth,
            children: Vec::new(),
            untried_actions: None,
        }
    }

    /// Record one backpropagation pass.
    ///
    /// Adds the reward belonging to this node's own acting agent, so the same
    /// flat reward vector correctly credits alternating agents as the path to
    /// the root is walked.
    pub fn update(&mut self, rewards: &[f32]) {
        self.visit_count += 1;
        self.value_sum += rewards[self.acting_agent];
    }

    /// Mean observed reward. Zero if never visited.
    #[inline]
    pub fn mean_value(&self) -> f32 {
        if self.visit_count == 0 {
            0.0
        } else {
            self.value_sum / self.visit_count as f32
        }
    }

    /// UCB1 score for selecting this node from its parent.
    ///
    /// `score = value_sum / (visits + ε) + k * sqrt(ln(parent_visits + 1) / (visits + ε))`
    ///
    /// with `ε = f32::EPSILON` so never-visited children score finitely high
    /// instead of dividing by zero.
    ///
    /// Note: takes the pre-computed `ln(parent_visits + 1)` to avoid redundant
    /// log calls when comparing multiple children.
    #[inline]
    pub fn ucb1_score(&self, parent_visits_ln: f32, exploration: f32) -> f32 {
        let visits = self.visit_count as f32 + f32::EPSILON;
        let exploitation = self.value_sum / visits;
        exploitation + exploration * (parent_visits_ln / visits).sqrt()
    }

    /// True once every generated legal action has produced a child.
    ///
    /// A node whose action list has not been generated yet is never fully
    /// expanded. A node with zero legal actions is treated as terminal by
    /// `is_terminal`, not as fully expanded.
    #[inline]
    pub fn is_fully_expanded(&self) -> bool {
        match &self.untried_actions {
            Some(actions) => !actions.is_empty() && self.children.len() == actions.len(),
            None => false,
        }
    }

    /// True if no further search can proceed below this node.
    ///
    /// Either the world model reports the state terminal, or action generation
    /// produced an empty list. The latter is treated exactly like terminal for
    /// selection and expansion regardless of the domain's terminal flag.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        if self.state.is_terminal() {
            return true;
        }
        matches!(&self.untried_actions, Some(actions) if actions.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uct_core::AgentId;

    #[derive(Debug, Clone)]
    struct StubState {
        agent: AgentId,
        terminal: bool,
    }

    impl GameState for StubState {
        type Action = u8;

        fn is_terminal(&self) -> bool {
            self.terminal
        }

        fn acting_agent(&self) -> AgentId {
            self.agent
        }

        fn apply_action(&mut self, _action: &u8) {}

        fn legal_actions(&self) -> Vec<u8> {
            if self.terminal {
                Vec::new()
            } else {
                vec![0, 1, 2]
            }
        }

        fn evaluate(&self) -> Vec<f32> {
            vec![0.0, 0.0]
        }
    }

    fn stub(agent: AgentId) -> StubState {
        StubState {
            agent,
            terminal: false,
        }
    }

    #[test]
    fn test_node_id_none() {
        assert!(NodeId::NONE.is_none());
        assert!(!NodeId::NONE.is_some());
        assert!(!NodeId(0).is_none());
        assert!(NodeId(0).is_some());
    }

    #[test]
    fn test_new_root() {
        let node = UctNode::new_root(stub(1));

        assert!(node.parent.is_none());
        assert!(node.action.is_none());
        assert_eq!(node.acting_agent, 1);
        assert_eq!(node.visit_count, 0);
        assert_eq!(node.depth, 0);
        assert!(node.children.is_empty());
        assert!(node.untried_actions.is_none());
    }

    #[test]
    fn test_update_credits_own_agent() {
        let mut node = UctNode::new_root(stub(1));

        node.update(&[0.25, 0.75]);
        node.update(&[0.25, 0.75]);

        assert_eq!(node.visit_count, 2);
        assert!((node.value_sum - 1.5).abs() < 1e-6);
        assert!((node.mean_value() - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_ucb1_unvisited_scores_high() {
        let unvisited = UctNode::new_root(stub(0));
        let mut visited = UctNode::new_root(stub(0));
        visited.visit_count = 10;
        visited.value_sum = 9.0;

        let parent_ln = (101.0f32).ln();
        let k = std::f32::consts::SQRT_2;

        // Division by epsilon makes the exploration term dominate any
        // exploitation average a visited sibling can reach.
        assert!(unvisited.ucb1_score(parent_ln, k) > visited.ucb1_score(parent_ln, k));
    }

    #[test]
    fn test_fully_expanded_requires_generated_actions() {
        let mut node = UctNode::new_root(stub(0));
        assert!(!node.is_fully_expanded());

        node.untried_actions = Some(vec![0, 1]);
        assert!(!node.is_fully_expanded());

        node.children.push(NodeId(1));
        assert!(!node.is_fully_expanded());

        node.children.push(NodeId(2));
        assert!(node.is_fully_expanded());
    }

    #[test]
    fn test_zero_legal_actions_is_terminal() {
        let mut node = UctNode::new_root(stub(0));
        assert!(!node.is_terminal());

        node.untried_actions = Some(Vec::new());
        assert!(node.is_terminal());
        assert!(!node.is_fully_expanded());
    }
}
