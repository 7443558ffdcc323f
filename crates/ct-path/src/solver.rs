//! Time-sliced, cancellable A* path solver.
//!
//! # Budget
//!
//! Each [`PathSolver::advance`] call performs at most `iterations_per_advance`
//! node expansions, shared across outstanding requests in submission (FIFO)
//! order.  A search that runs out of budget keeps its open set and resumes on
//! the next call, so a large map never stalls a tick.
//!
//! # Determinism
//!
//! Unit step cost, Manhattan heuristic, neighbours visited N, E, S, W, and
//! heap ties broken by insertion sequence.  The returned path is shortest on
//! the constrained graph and identical across runs.
//!
//! # Topology changes
//!
//! A search remembers the [`SearchGrid::revision`] it started on.  If the grid
//! has been rewritten since, the search restarts from scratch on the next
//! `advance`, so resolved paths always reflect the current topology.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};

use ct_core::{Direction, RequestId};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::grid::{SearchGrid, SearchNode};

// ── Outcome ───────────────────────────────────────────────────────────────────

/// The resolved value of a path request.  "No path" is data, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathOutcome<N> {
    /// Waypoints from origin to destination, origin included.  Empty when
    /// origin and destination are the same passable node.
    Found(Vec<N>),
    NoPath,
}

impl<N> PathOutcome<N> {
    /// The path, if one was found and it has at least one waypoint.
    pub fn into_path(self) -> Option<Vec<N>> {
        match self {
            PathOutcome::Found(p) if !p.is_empty() => Some(p),
            _ => None,
        }
    }
}

/// A completed request, returned from [`PathSolver::advance`].
#[derive(Debug, Clone)]
pub struct Resolution<N, T> {
    pub id:          RequestId,
    pub origin:      N,
    pub destination: N,
    /// Caller context supplied at submission.
    pub token:       T,
    pub outcome:     PathOutcome<N>,
}

// ── Search state ──────────────────────────────────────────────────────────────

/// Heap entry: `(f, insertion seq, g, node)`.  `Reverse` turns the max-heap
/// into a min-heap; `seq` is unique, so `node` never decides an ordering.
type OpenEntry<N> = Reverse<(u32, u64, u32, N)>;

struct Search<N> {
    revision:  u64,
    open:      BinaryHeap<OpenEntry<N>>,
    best_g:    FxHashMap<N, u32>,
    came_from: FxHashMap<N, N>,
    closed:    FxHashSet<N>,
    seq:       u64,
}

impl<N: SearchNode> Search<N> {
    fn start(origin: N, destination: N, revision: u64) -> Self {
        let mut s = Search {
            revision,
            open:      BinaryHeap::new(),
            best_g:    FxHashMap::default(),
            came_from: FxHashMap::default(),
            closed:    FxHashSet::default(),
            seq:       0,
        };
        s.best_g.insert(origin, 0);
        s.push(origin.manhattan(destination), 0, origin);
        s
    }

    #[inline]
    fn push(&mut self, f: u32, g: u32, node: N) {
        self.open.push(Reverse((f, self.seq, g, node)));
        self.seq += 1;
    }

    /// Expand nodes until the search finishes or `budget` reaches zero.
    /// `None` means the search is still running.
    fn run<G>(&mut self, grid: &G, destination: N, budget: &mut u32) -> Option<PathOutcome<N>>
    where
        G: SearchGrid<Node = N>,
    {
        while *budget > 0 {
            let Some(Reverse((_, _, g, node))) = self.open.pop() else {
                return Some(PathOutcome::NoPath);
            };
            // Stale duplicate of an already expanded node.
            if !self.closed.insert(node) {
                continue;
            }
            *budget -= 1;

            if node == destination {
                return Some(PathOutcome::Found(self.reconstruct(node)));
            }

            for dir in Direction::ALL {
                if !grid.can_step(node, dir) {
                    continue;
                }
                let next = node.step(dir);
                if self.closed.contains(&next) {
                    continue;
                }
                let next_g = g + 1;
                if self.best_g.get(&next).is_some_and(|&b| b <= next_g) {
                    continue;
                }
                self.best_g.insert(next, next_g);
                self.came_from.insert(next, node);
                self.push(next_g + next.manhattan(destination), next_g, next);
            }
        }
        None
    }

    fn reconstruct(&self, destination: N) -> Vec<N> {
        let mut path = vec![destination];
        let mut cur = destination;
        while let Some(&prev) = self.came_from.get(&cur) {
            path.push(prev);
            cur = prev;
        }
        path.reverse();
        path
    }
}

struct Request<N, T> {
    id:          RequestId,
    origin:      N,
    destination: N,
    token:       T,
    search:      Option<Search<N>>,
}

// ── PathSolver ────────────────────────────────────────────────────────────────

/// One solver instance.  The simulation owns two: one over the fine grid for
/// vehicles, one over the city grid for road previews.
///
/// `T` is the caller's context, handed back untouched with the resolution.
pub struct PathSolver<N, T> {
    label:   &'static str,
    budget:  u32,
    next_id: RequestId,
    queue:   VecDeque<Request<N, T>>,
}

impl<N: SearchNode, T> PathSolver<N, T> {
    /// `label` only tags log events; `iterations_per_advance` is the
    /// per-`advance` node-expansion budget.
    pub fn new(label: &'static str, iterations_per_advance: u32) -> Self {
        Self {
            label,
            budget:  iterations_per_advance.max(1),
            next_id: RequestId(0),
            queue:   VecDeque::new(),
        }
    }

    /// Queue a request.  Ids increase monotonically per solver.
    pub fn submit(&mut self, origin: N, destination: N, token: T) -> RequestId {
        let id = self.next_id;
        self.next_id = id.next();
        self.queue.push_back(Request { id, origin, destination, token, search: None });
        tracing::trace!(solver = self.label, %id, ?origin, ?destination, "path submitted");
        id
    }

    /// Drop an unresolved request; it will never be returned from `advance`.
    /// Returns `false` (and does nothing) for resolved or unknown ids.
    pub fn cancel(&mut self, id: RequestId) -> bool {
        let before = self.queue.len();
        self.queue.retain(|r| r.id != id);
        let removed = self.queue.len() != before;
        if removed {
            tracing::trace!(solver = self.label, %id, "path cancelled");
        }
        removed
    }

    pub fn is_pending(&self, id: RequestId) -> bool {
        self.queue.iter().any(|r| r.id == id)
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Perform one budget's worth of search work and return every request
    /// that completed, in the order they completed.
    pub fn advance<G>(&mut self, grid: &G) -> Vec<Resolution<N, T>>
    where
        G: SearchGrid<Node = N>,
    {
        let revision = grid.revision();
        let mut budget = self.budget;
        let mut resolved = Vec::new();

        while let Some(mut req) = self.queue.pop_front() {
            let outcome = if !grid.is_passable(req.origin) || !grid.is_passable(req.destination) {
                Some(PathOutcome::NoPath)
            } else if req.origin == req.destination {
                Some(PathOutcome::Found(Vec::new()))
            } else {
                if req.search.as_ref().is_none_or(|s| s.revision != revision) {
                    req.search = Some(Search::start(req.origin, req.destination, revision));
                }
                match req.search.as_mut() {
                    Some(search) => search.run(grid, req.destination, &mut budget),
                    None => Some(PathOutcome::NoPath),
                }
            };

            match outcome {
                Some(outcome) => {
                    tracing::debug!(
                        solver = self.label,
                        id = %req.id,
                        found = matches!(outcome, PathOutcome::Found(_)),
                        "path resolved"
                    );
                    resolved.push(Resolution {
                        id:          req.id,
                        origin:      req.origin,
                        destination: req.destination,
                        token:       req.token,
                        outcome,
                    });
                }
                None => {
                    // Out of budget: keep the partial search at the front.
                    self.queue.push_front(req);
                    break;
                }
            }
            if budget == 0 {
                break;
            }
        }
        resolved
    }
}
