//! Dijkstra's and A* search on top of a min-priority queue
//!
//! The queues in this crate have no decrease-key, so the search uses lazy
//! deletion: when a cheaper route to an open node is found, the node is
//! enqueued again and the older, costlier entry is skipped when it surfaces.
//! The queue therefore holds at most one entry per edge relaxation.
//!
//! # Design
//!
//! Only lightweight node indices go into the queue. A fast hash map (FxHash)
//! maps node states to their index, and the per-node metadata (best cost so
//! far, predecessor, closed flag) lives in a flat vector.
//!
//! Dijkstra is A* with a zero heuristic; both share one implementation.
//!
//! # Example
//!
//! ```rust
//! use kary_priority_queue::pathfinding::{shortest_path, SearchNode};
//!
//! // Node carries its goal coordinates
//! #[derive(Clone, PartialEq, Eq, Hash)]
//! struct GridPos { x: i32, y: i32, goal_x: i32, goal_y: i32 }
//!
//! impl SearchNode for GridPos {
//!     type Cost = u32;
//!
//!     fn successors(&self) -> Vec<(Self, Self::Cost)> {
//!         vec![
//!             (GridPos { x: self.x + 1, ..self.clone() }, 1),
//!             (GridPos { x: self.x - 1, ..self.clone() }, 1),
//!             (GridPos { y: self.y + 1, ..self.clone() }, 1),
//!             (GridPos { y: self.y - 1, ..self.clone() }, 1),
//!         ]
//!     }
//!
//!     fn is_goal(&self) -> bool {
//!         self.x == self.goal_x && self.y == self.goal_y
//!     }
//! }
//!
//! let start = GridPos { x: 0, y: 0, goal_x: 2, goal_y: 2 };
//!
//! let (path, cost) = shortest_path(&start).unwrap();
//! assert_eq!(cost, 4); // Manhattan distance
//! assert_eq!(path.len(), 5);
//! ```

use crate::queue::KaryPriorityQueue;
use crate::traits::PriorityQueue;
use rustc_hash::FxHashMap;
use std::cmp::Ordering;
use std::hash::Hash;
use std::ops::Add;

/// Trait for types that can be used as costs in pathfinding algorithms.
///
/// Costs only need a partial order, so `f32`/`f64` work directly alongside
/// the integer types. `Default` must be the zero cost.
pub trait Cost: PartialOrd + Copy + Add<Output = Self> + Default {}

impl<T> Cost for T where T: PartialOrd + Copy + Add<Output = Self> + Default {}

/// Trait for nodes in a search graph.
///
/// The node carries all context needed to generate successors and to
/// recognise a goal.
pub trait SearchNode: Clone + Eq + Hash {
    /// The cost type for edge weights
    type Cost: Cost;

    /// Returns all successor nodes along with the cost to reach them.
    ///
    /// Edge costs must be non-negative for the returned path to be optimal.
    fn successors(&self) -> Vec<(Self, Self::Cost)>;

    /// Returns true if this node is a goal state.
    fn is_goal(&self) -> bool;
}

/// Trait for nodes that can provide a heuristic estimate for A* search.
///
/// The heuristic must be admissible (never overestimate the true cost)
/// for A* to find optimal paths.
pub trait AStarNode: SearchNode {
    /// Returns a heuristic estimate of the cost from this node to any goal.
    fn heuristic(&self) -> Self::Cost;
}

/// Queue priority for a search entry, ordered by f-score only.
#[derive(Debug, Clone, Copy)]
pub struct PriorityCost<C> {
    /// The f-score: g + h (where h = 0 for Dijkstra)
    pub f_score: C,
    /// The actual cost from start (g-score)
    pub g_score: C,
}

impl<C: PartialOrd> PartialEq for PriorityCost<C> {
    fn eq(&self, other: &Self) -> bool {
        self.f_score == other.f_score
    }
}

impl<C: PartialOrd> PartialOrd for PriorityCost<C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.f_score.partial_cmp(&other.f_score)
    }
}

/// Index of a discovered node; this is what the queue carries.
pub type NodeIndex = usize;

/// Metadata stored for each discovered node during search.
struct NodeEntry<N: SearchNode> {
    node: N,
    /// Best known cost from start (g-score)
    g_score: N::Cost,
    /// Previous node on the best known path
    came_from: Option<NodeIndex>,
    /// Set once the node has been expanded
    closed: bool,
}

/// Bookkeeping for one search: node states, their indices and metadata.
struct SearchState<N: SearchNode> {
    entries: Vec<NodeEntry<N>>,
    index_of: FxHashMap<N, NodeIndex>,
}

impl<N: SearchNode> SearchState<N> {
    fn new() -> Self {
        SearchState {
            entries: Vec::new(),
            index_of: FxHashMap::default(),
        }
    }

    /// Gets or creates an index for a node state.
    ///
    /// Returns `true` alongside the index when the node was not seen before.
    fn index_for(&mut self, node: N, g_score: N::Cost) -> (NodeIndex, bool) {
        if let Some(&index) = self.index_of.get(&node) {
            return (index, false);
        }
        let index = self.entries.len();
        self.index_of.insert(node.clone(), index);
        self.entries.push(NodeEntry {
            node,
            g_score,
            came_from: None,
            closed: false,
        });
        (index, true)
    }

    /// Reconstructs the path from start to the given node index.
    fn path_to(&self, mut current: NodeIndex) -> Vec<N> {
        let mut path = vec![self.entries[current].node.clone()];
        while let Some(prev) = self.entries[current].came_from {
            path.push(self.entries[prev].node.clone());
            current = prev;
        }
        path.reverse();
        path
    }
}

/// Runs Dijkstra's algorithm from `start` until a node satisfies `is_goal()`.
///
/// # Type Parameters
/// - `N`: The node type implementing [`SearchNode`]
/// - `Q`: The queue implementing [`PriorityQueue`]
///
/// # Returns
/// - `Some((path, cost))` with the path from start to goal, both inclusive
/// - `None` if no goal is reachable
///
/// # Example
/// ```rust
/// use kary_priority_queue::pathfinding::{dijkstra, SearchNode};
/// use kary_priority_queue::KaryPriorityQueue;
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug)]
/// struct Node {
///     value: i32,
///     goal: i32,
/// }
///
/// impl SearchNode for Node {
///     type Cost = u32;
///
///     fn successors(&self) -> Vec<(Self, u32)> {
///         if self.value < 100 {
///             vec![(Node { value: self.value + 1, goal: self.goal }, 1)]
///         } else {
///             vec![]
///         }
///     }
///
///     fn is_goal(&self) -> bool {
///         self.value == self.goal
///     }
/// }
///
/// let start = Node { value: 0, goal: 5 };
/// let (path, cost) = dijkstra::<_, KaryPriorityQueue<_, _>>(&start).unwrap();
/// assert_eq!(cost, 5);
/// assert_eq!(path.len(), 6);
/// ```
pub fn dijkstra<N, Q>(start: &N) -> Option<(Vec<N>, N::Cost)>
where
    N: SearchNode,
    Q: PriorityQueue<NodeIndex, PriorityCost<N::Cost>>,
{
    search_impl::<N, Q>(start, |_| N::Cost::default())
}

/// Runs A* search from `start` until a node satisfies `is_goal()`.
///
/// Uses the node's `heuristic()` to guide the search.
pub fn astar<N, Q>(start: &N) -> Option<(Vec<N>, N::Cost)>
where
    N: AStarNode,
    Q: PriorityQueue<NodeIndex, PriorityCost<N::Cost>>,
{
    search_impl::<N, Q>(start, |n| n.heuristic())
}

/// Dijkstra's algorithm on a 4-ary [`KaryPriorityQueue`].
pub fn shortest_path<N: SearchNode>(start: &N) -> Option<(Vec<N>, N::Cost)> {
    dijkstra::<N, KaryPriorityQueue<NodeIndex, PriorityCost<N::Cost>>>(start)
}

/// Finds every node reachable from `start` at a cost of at most `max_cost`.
///
/// Nodes are returned with their shortest-path cost, in non-decreasing cost
/// order; `start` comes first at cost zero. `is_goal()` is not consulted.
pub fn reachable_within<N, Q>(start: &N, max_cost: N::Cost) -> Vec<(N, N::Cost)>
where
    N: SearchNode,
    Q: PriorityQueue<NodeIndex, PriorityCost<N::Cost>>,
{
    let mut queue = Q::new();
    let mut state = SearchState::new();
    let mut result = Vec::new();

    let zero = N::Cost::default();
    let (start_index, _) = state.index_for(start.clone(), zero);
    queue.enqueue(
        start_index,
        PriorityCost {
            f_score: zero,
            g_score: zero,
        },
    );

    while let Ok((current_index, priority)) = queue.dequeue_entry() {
        let entry = &mut state.entries[current_index];
        if entry.closed || entry.g_score < priority.g_score {
            continue;
        }
        entry.closed = true;

        let current_g = priority.g_score;
        result.push((entry.node.clone(), current_g));

        for (neighbor, edge_cost) in entry.node.successors() {
            let tentative_g = current_g + edge_cost;
            if tentative_g > max_cost {
                continue;
            }

            let (neighbor_index, is_new) = state.index_for(neighbor, tentative_g);
            let neighbor_entry = &mut state.entries[neighbor_index];
            if neighbor_entry.closed {
                continue;
            }
            if is_new || tentative_g < neighbor_entry.g_score {
                neighbor_entry.g_score = tentative_g;
                neighbor_entry.came_from = Some(current_index);
                queue.enqueue(
                    neighbor_index,
                    PriorityCost {
                        f_score: tentative_g,
                        g_score: tentative_g,
                    },
                );
            }
        }
    }

    result
}

fn search_impl<N, Q>(start: &N, heuristic: impl Fn(&N) -> N::Cost) -> Option<(Vec<N>, N::Cost)>
where
    N: SearchNode,
    Q: PriorityQueue<NodeIndex, PriorityCost<N::Cost>>,
{
    let mut queue = Q::new();
    let mut state = SearchState::new();

    let zero = N::Cost::default();
    let (start_index, _) = state.index_for(start.clone(), zero);
    queue.enqueue(
        start_index,
        PriorityCost {
            f_score: heuristic(start),
            g_score: zero,
        },
    );

    while let Ok((current_index, priority)) = queue.dequeue_entry() {
        let entry = &mut state.entries[current_index];

        // Closed, or superseded by a cheaper entry enqueued later
        if entry.closed || entry.g_score < priority.g_score {
            continue;
        }
        entry.closed = true;

        let current_g = priority.g_score;
        if entry.node.is_goal() {
            return Some((state.path_to(current_index), current_g));
        }

        for (neighbor, edge_cost) in entry.node.successors() {
            let tentative_g = current_g + edge_cost;
            let f_score = tentative_g + heuristic(&neighbor);

            let (neighbor_index, is_new) = state.index_for(neighbor, tentative_g);
            let neighbor_entry = &mut state.entries[neighbor_index];

            if neighbor_entry.closed {
                continue;
            }
            if is_new || tentative_g < neighbor_entry.g_score {
                neighbor_entry.g_score = tentative_g;
                neighbor_entry.came_from = Some(current_index);
                queue.enqueue(
                    neighbor_index,
                    PriorityCost {
                        f_score,
                        g_score: tentative_g,
                    },
                );
            }
        }
    }

    None
}
