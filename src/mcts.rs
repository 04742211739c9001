//! Monte Carlo Tree Search (MCTS) with UCT selection.
//!
//! Each iteration:
//! - descends from the root by UCT while nodes are fully expanded,
//! - expands one untried action chosen uniformly at random,
//! - plays a random rollout from the new node,
//! - adds the rollout reward to every node on the path back to the root.
//!
//! Rewards are always measured for the player to move at the root. Nodes live
//! in an arena (`Vec<Node>`) and refer to each other by index; the tree is
//! thrown away after each search.

use crate::board::Color;
use crate::constants::{DEFAULT_ITERATIONS, UCT_EXPLORATION};
use crate::game::{GameState, Move, str_move};
use crate::playout::simulate;

/// Index of a node in a [`SearchTree`].
pub type NodeId = usize;

/// A node in the MCTS search tree.
pub struct Node {
    /// The game position at this node
    pub state: GameState,
    /// Move that led here from the parent (`None` at the root)
    pub action: Option<Move>,
    /// Parent node (`None` at the root)
    pub parent: Option<NodeId>,
    /// Materialized children, in creation order
    pub children: Vec<NodeId>,
    /// Number of visits
    pub visits: u32,
    /// Sum of rollout rewards backed up through this node
    pub reward_sum: f64,
    /// Legal moves without a child yet, filled on first use
    untried: Option<Vec<Move>>,
}

impl Node {
    fn new(state: GameState, action: Option<Move>, parent: Option<NodeId>) -> Self {
        Self {
            state,
            action,
            parent,
            children: Vec::new(),
            visits: 0,
            reward_sum: 0.0,
            untried: None,
        }
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.state.is_over()
    }

    /// Average reward, or 0 for an unvisited node.
    #[inline]
    pub fn mean_reward(&self) -> f64 {
        if self.visits > 0 {
            self.reward_sum / self.visits as f64
        } else {
            0.0
        }
    }
}

/// UCT value of `child` under a parent visited `parent_visits` times.
///
/// # Panics
/// Panics if either visit count is zero.
fn uct_score(parent_visits: u32, child: &Node) -> f64 {
    assert!(
        parent_visits > 0 && child.visits > 0,
        "UCT on an unvisited node (parent {parent_visits}, child {})",
        child.visits
    );
    let n = child.visits as f64;
    child.reward_sum / n + (UCT_EXPLORATION * (parent_visits as f64).ln() / n).sqrt()
}

/// Arena-backed search tree rooted at a copy of the caller's state.
pub struct SearchTree {
    nodes: Vec<Node>,
    perspective: Color,
}

impl SearchTree {
    pub const ROOT: NodeId = 0;

    pub fn new(state: &GameState) -> Self {
        Self {
            nodes: vec![Node::new(state.clone(), None, None)],
            perspective: state.current_player(),
        }
    }

    #[inline]
    pub fn root(&self) -> &Node {
        &self.nodes[Self::ROOT]
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    #[inline]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id].children
    }

    /// Number of nodes in the tree, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Player whose rewards the tree accumulates.
    pub fn perspective(&self) -> Color {
        self.perspective
    }

    fn untried_mut(&mut self, id: NodeId) -> &mut Vec<Move> {
        let Node { state, untried, .. } = &mut self.nodes[id];
        untried.get_or_insert_with(|| state.valid_moves())
    }

    /// Legal moves at `id` that have no child yet.
    pub fn untried_actions(&self, id: NodeId) -> Vec<Move> {
        let node = &self.nodes[id];
        if node.is_terminal() {
            return Vec::new();
        }
        node.state
            .valid_moves()
            .into_iter()
            .filter(|mv| {
                !node
                    .children
                    .iter()
                    .any(|&c| self.nodes[c].action == Some(*mv))
            })
            .collect()
    }

    /// True once every legal move at `id` has a child.
    pub fn is_fully_expanded(&mut self, id: NodeId) -> bool {
        self.untried_mut(id).is_empty()
    }

    /// Child of `id` with the highest UCT value. Ties keep the earliest child.
    pub fn best_child(&self, id: NodeId) -> Option<NodeId> {
        let parent = &self.nodes[id];
        let mut best: Option<(NodeId, f64)> = None;
        for &c in &parent.children {
            let score = uct_score(parent.visits, &self.nodes[c]);
            if best.is_none_or(|(_, s)| score > s) {
                best = Some((c, score));
            }
        }
        best.map(|(c, _)| c)
    }

    /// Walk down from the root to the node to simulate from, expanding the
    /// first node that still has untried actions.
    fn select(&mut self, rng: &mut fastrand::Rng) -> NodeId {
        let mut id = Self::ROOT;
        while !self.nodes[id].is_terminal() {
            if !self.is_fully_expanded(id) {
                return self.expand(id, rng);
            }
            match self.best_child(id) {
                Some(child) => id = child,
                None => break,
            }
        }
        id
    }

    /// Materialize one random untried action of `id` as a new child.
    /// Returns `id` itself if nothing is left to try.
    fn expand(&mut self, id: NodeId, rng: &mut fastrand::Rng) -> NodeId {
        let untried = self.untried_mut(id);
        if untried.is_empty() {
            return id;
        }
        let pick = rng.usize(..untried.len());
        let action = untried.swap_remove(pick);

        let mut state = self.nodes[id].state.clone();
        let applied = state.make_move(action);
        debug_assert!(applied.is_ok(), "untried action {action:?} was illegal");

        let child = self.nodes.len();
        self.nodes.push(Node::new(state, Some(action), Some(id)));
        self.nodes[id].children.push(child);
        child
    }

    /// Add one visit and `reward` to `id` and all of its ancestors.
    fn backpropagate(&mut self, id: NodeId, reward: f64) {
        let mut cur = Some(id);
        while let Some(i) = cur {
            let node = &mut self.nodes[i];
            node.visits += 1;
            node.reward_sum += reward;
            cur = node.parent;
        }
    }

    /// Run one select/expand/simulate/backpropagate cycle.
    pub fn iterate(&mut self, rng: &mut fastrand::Rng) {
        let leaf = self.select(rng);
        let reward = simulate(&self.nodes[leaf].state, self.perspective, rng);
        self.backpropagate(leaf, reward);
    }

    pub fn run(&mut self, iterations: usize, rng: &mut fastrand::Rng) {
        for _ in 0..iterations {
            self.iterate(rng);
        }
    }

    /// Action of the root's UCT-best child, or pass if the root has no children.
    pub fn best_action(&self) -> Move {
        self.best_child(Self::ROOT)
            .and_then(|c| self.nodes[c].action)
            .unwrap_or(Move::Pass)
    }
}

/// Run `iterations` MCTS iterations from `state` and return the chosen move.
pub fn search_best_move(state: &GameState, iterations: usize, rng: &mut fastrand::Rng) -> Move {
    let mut tree = SearchTree::new(state);
    tree.run(iterations, rng);
    tree.best_action()
}

/// Search settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// Iterations per search
    pub iterations: usize,
    /// Fixed seed for reproducible searches; `None` seeds from the OS
    pub seed: Option<u64>,
    /// Print a summary and the root children to stderr after each search
    pub verbose: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            seed: None,
            verbose: false,
        }
    }
}

/// Owns a search configuration and random source across searches.
pub struct Searcher {
    config: SearchConfig,
    rng: fastrand::Rng,
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl Searcher {
    pub fn new(config: SearchConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        Self { config, rng }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Pick a move for the side to move in `state`. `state` is not modified.
    pub fn search(&mut self, state: &GameState) -> Move {
        let mut tree = SearchTree::new(state);
        tree.run(self.config.iterations, &mut self.rng);
        let best = tree.best_action();

        if self.config.verbose {
            eprintln!(
                "{} to play: {} iterations, {} nodes, best {}",
                tree.perspective(),
                self.config.iterations,
                tree.node_count(),
                str_move(best, state.size())
            );
            dump_children(&tree);
        }
        best
    }
}

/// Print debug information about the root's children.
pub fn dump_children(tree: &SearchTree) {
    let size = tree.root().state.size();
    for &c in tree.children(SearchTree::ROOT) {
        let child = tree.node(c);
        let action = child.action.map_or_else(|| "-".to_string(), |mv| str_move(mv, size));
        eprintln!(
            "move {action} v={} r={:.2} mean={:.3}",
            child.visits,
            child.reward_sum,
            child.mean_reward()
        );
    }
}
