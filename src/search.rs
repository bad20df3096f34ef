//! Step-driven negamax search for forced wins.
//!
//! The recursion is unrolled onto an explicit stack of [`Frame`]s so the caller decides how
//! much work happens per call: [`Search::advance`] performs exactly one transition (open the
//! next child, or resolve the active frame into its parent). The root frame lives outside the
//! stack and is never popped.
//!
//! Every frame carries a `track`, the outcome its side of the tree is trying to prove. The
//! root hopes for [`Outcome::Win`]; a child's track is `Win` under a `Lose` parent and `Lose`
//! otherwise. Frames whose result matches their track keep the solution lines proving it.

use std::collections::VecDeque;
use std::fmt;
use std::iter;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, info, log_enabled, Level};
use serde::{Deserialize, Serialize};

use crate::cache::TranspositionCache;
use crate::error::{Result, SolverError};
use crate::node::Node;
use crate::pool::{allocator, ChildAllocator};
use crate::position::Position;
use crate::solution::{solution_tree, Leaf, SolutionTree};
use crate::telemetry::{Progress, StepTimer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Outcome {
    Win,
    Lose,
    Undetermined,
}

impl Outcome {
    /// Track of a child whose parent is on `self`.
    #[inline]
    pub fn child_track(self) -> Outcome {
        if self == Outcome::Lose {
            Outcome::Win
        } else {
            Outcome::Lose
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Outcome::Win => "WIN",
            Outcome::Lose => "LOSE",
            Outcome::Undetermined => "UNDETERMINED",
        })
    }
}

/// Tunables for one search. Field defaults apply to anything missing when deserialising.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Recycle child queues instead of allocating a fresh one per node.
    #[serde(default)]
    pub use_pool: bool,
    /// Deepest absolute depth that is cached. `None` caches every depth.
    #[serde(default)]
    pub max_cache_depth: Option<usize>,
    /// Entries a single depth may hold before its map is dropped and started over.
    #[serde(default = "default_max_cache_size")]
    pub max_cache_size: usize,
    /// A write at depth `d` empties the map at `d + max_cache_relative_depth`.
    #[serde(default = "default_max_cache_relative_depth")]
    pub max_cache_relative_depth: usize,
    /// Upper bound on the number of steps between two progress reports.
    #[serde(default = "default_report_interval")]
    pub report_interval: u64,
    /// Per-ply branching used for the search-space estimate.
    #[serde(default = "default_branching_factor")]
    pub branching_factor: f64,
    #[serde(default = "default_cache_enabled")]
    pub cache_enabled: bool,
}

fn default_max_cache_size() -> usize {
    10_000_000
}
fn default_max_cache_relative_depth() -> usize {
    4
}
fn default_report_interval() -> u64 {
    2_500_000
}
fn default_branching_factor() -> f64 {
    33.0
}
fn default_cache_enabled() -> bool {
    true
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            use_pool: false,
            max_cache_depth: None,
            max_cache_size: default_max_cache_size(),
            max_cache_relative_depth: default_max_cache_relative_depth(),
            report_interval: default_report_interval(),
            branching_factor: default_branching_factor(),
            cache_enabled: default_cache_enabled(),
        }
    }
}

/// Shared flag for stopping a search from another owner.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// One node under exploration.
#[derive(Debug)]
pub struct Frame {
    node: Node,
    remaining: usize,
    track: Outcome,
    result: Option<Outcome>,
    children: VecDeque<Node>,
    child_count: usize,
    results_won: bool,
    results_lost: bool,
    results_undetermined: bool,
    leaves: Option<Vec<Leaf>>,
}

impl Frame {
    fn new(
        node: Node,
        remaining: usize,
        track: Outcome,
        result: Option<Outcome>,
        children: VecDeque<Node>,
        leaves: Option<Vec<Leaf>>,
    ) -> Self {
        Self {
            node,
            remaining,
            track,
            result,
            child_count: children.len(),
            children,
            results_won: result == Some(Outcome::Win),
            results_lost: result == Some(Outcome::Lose),
            results_undetermined: result == Some(Outcome::Undetermined),
            leaves,
        }
    }

    pub fn node(&self) -> &Node {
        &self.node
    }

    /// Plies still allowed below this node.
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    pub fn track(&self) -> Outcome {
        self.track
    }

    pub fn result(&self) -> Option<Outcome> {
        self.result
    }

    pub fn child_count(&self) -> usize {
        self.child_count
    }

    pub fn children_left(&self) -> usize {
        self.children.len()
    }

    pub fn leaves(&self) -> &[Leaf] {
        self.leaves.as_deref().unwrap_or(&[])
    }

    /// Share of this frame's subtree that is done, given the share done of the child
    /// currently open above it.
    fn completion(&self, open_child: Option<f64>) -> f64 {
        if self.child_count == 0 {
            return 1.0;
        }
        let mut done = (self.child_count - self.children.len()) as f64;
        if let Some(ratio) = open_child {
            done += ratio - 1.0;
        }
        done / self.child_count as f64
    }

    /// Settle the result from the child tallies when no further child can change it.
    fn settle(&mut self) -> Result<()> {
        if self.result.is_some() {
            return Ok(());
        }
        if self.children.is_empty() {
            self.result = Some(if self.results_won {
                Outcome::Win
            } else if self.results_undetermined {
                Outcome::Undetermined
            } else if self.results_lost {
                Outcome::Lose
            } else {
                return Err(SolverError::Unresolved {
                    depth: self.node.depth(),
                });
            });
        } else if self.track == Outcome::Lose {
            // One refutation is enough on this side.
            if self.results_won {
                self.result = Some(Outcome::Win);
            } else if self.results_undetermined {
                self.result = Some(Outcome::Undetermined);
            }
        }
        Ok(())
    }

    /// Fold a resolved child into the tallies and pick up its solution lines.
    fn absorb(&mut self, child: Outcome, leaves: Option<Vec<Leaf>>) {
        match child {
            Outcome::Win => self.child_won(leaves),
            Outcome::Lose => self.child_lost(leaves),
            Outcome::Undetermined => self.results_undetermined = true,
        }
    }

    /// This move loses: keep the longest resistance, with the fewest lines on ties.
    fn child_won(&mut self, leaves: Option<Vec<Leaf>>) {
        self.results_lost = true;
        if self.track != Outcome::Lose {
            return;
        }
        let Some(new) = leaves else {
            return;
        };
        if let Some(existing) = &self.leaves {
            let (existing_depth, new_depth) = (leaf_depth(existing), leaf_depth(&new));
            if new_depth < existing_depth
                || (new_depth == existing_depth && existing.len() <= new.len())
            {
                return;
            }
        }
        self.leaves = Some(new);
    }

    /// This move wins: keep every line of the shortest win.
    fn child_lost(&mut self, leaves: Option<Vec<Leaf>>) {
        self.results_won = true;
        if self.track != Outcome::Win {
            return;
        }
        let Some(mut new) = leaves else {
            return;
        };
        match &mut self.leaves {
            Some(existing) => {
                let (existing_depth, new_depth) = (leaf_depth(existing), leaf_depth(&new));
                if new_depth > existing_depth {
                    return;
                }
                if new_depth == existing_depth {
                    existing.append(&mut new);
                } else {
                    *existing = new;
                }
            }
            None => self.leaves = Some(new),
        }
    }
}

fn leaf_depth(leaves: &[Leaf]) -> usize {
    leaves.first().map_or(0, Leaf::depth)
}

/// Open a frame for `node`, resolving it on the spot when the cache, the budget or the
/// position already decide it.
fn open_frame<'a>(
    cache: &mut TranspositionCache,
    allocator: &mut dyn ChildAllocator,
    ancestors: impl Iterator<Item = &'a Node>,
    mut node: Node,
    remaining: usize,
    track: Outcome,
) -> Frame {
    let cached = cache.get(node.depth(), node.key());
    let result = if cached.is_some() {
        cached
    } else if remaining > 0 {
        node.finished().then_some(Outcome::Lose)
    } else if node.lost() {
        Some(Outcome::Lose)
    } else {
        Some(Outcome::Undetermined)
    };
    let children = if result.is_none() {
        node.next_games(allocator)
    } else {
        VecDeque::new()
    };
    let leaves = (cached.is_none() && result == Some(track)).then(|| {
        // Narrow the ancestors' borrow to match the local `node`.
        let ancestors = ancestors.map(|ancestor| -> &Node { ancestor });
        vec![Leaf::capture(ancestors.chain(iter::once(&node)))]
    });
    Frame::new(node, remaining, track, result, children, leaves)
}

/// Decide whether the side to move at `position` can force a win within `max_depth` plies.
pub fn solve(position: Position, max_depth: usize, use_pool: bool) -> Search {
    Search::new(
        position,
        max_depth,
        SearchConfig {
            use_pool,
            ..SearchConfig::default()
        },
    )
}

pub struct Search {
    config: SearchConfig,
    max_depth: usize,
    root: Frame,
    stack: Vec<Frame>,
    cache: TranspositionCache,
    allocator: Box<dyn ChildAllocator>,
    cancel: Option<CancelToken>,
    finished: bool,
    total_games: u64,
    total_ms: f64,
}

impl Search {
    pub fn new(position: Position, max_depth: usize, config: SearchConfig) -> Self {
        let mut cache = TranspositionCache::new(
            max_depth + 1,
            config.cache_enabled,
            config.max_cache_depth,
            config.max_cache_size,
            config.max_cache_relative_depth,
        );
        let mut allocator = allocator(config.use_pool, max_depth + 1);
        let root = open_frame(
            &mut cache,
            allocator.as_mut(),
            iter::empty::<&Node>(),
            Node::root(position),
            max_depth,
            Outcome::Win,
        );
        debug!(
            "search opened: {} to depth {max_depth}, {} root plies",
            position.to_notation(),
            root.child_count
        );
        // A root decided on opening needs no steps.
        let finished = root.result.is_some();
        Self {
            config,
            max_depth,
            root,
            stack: Vec::with_capacity(max_depth),
            cache,
            allocator,
            cancel: None,
            finished,
            total_games: 1,
            total_ms: 0.0,
        }
    }

    pub fn from_notation(notation: &str, max_depth: usize, config: SearchConfig) -> Result<Self> {
        Ok(Self::new(Position::from_notation(notation)?, max_depth, config))
    }

    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    fn top_mut(&mut self) -> &mut Frame {
        match self.stack.last_mut() {
            Some(frame) => frame,
            None => &mut self.root,
        }
    }

    /// Perform one transition. Returns `Ok(false)` once the root has been resolved and there
    /// is nothing left to do.
    pub fn advance(&mut self) -> Result<bool> {
        if self.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
            return Err(SolverError::Cancelled);
        }
        if self.finished {
            return Ok(false);
        }

        let top = self.top_mut();
        top.settle()?;
        if let Some(result) = top.result {
            match self.stack.pop() {
                Some(frame) => self.close(frame, result),
                None => {
                    let key = self.root.node.key();
                    self.cache.store(0, key, result, self.root.track);
                    self.finished = true;
                    debug!(
                        "search finished: {result} after {} games, {} solution lines",
                        self.total_games,
                        self.leaves().len()
                    );
                }
            }
            return Ok(true);
        }

        let remaining = top.remaining.saturating_sub(1);
        let track = top.track.child_track();
        let depth = top.node.depth();
        let Some(child) = top.children.pop_front() else {
            return Err(SolverError::Unresolved { depth });
        };
        let ancestors = iter::once(&self.root.node).chain(self.stack.iter().map(Frame::node));
        let frame = open_frame(
            &mut self.cache,
            self.allocator.as_mut(),
            ancestors,
            child,
            remaining,
            track,
        );
        self.total_games += 1;
        self.stack.push(frame);
        Ok(true)
    }

    fn close(&mut self, frame: Frame, result: Outcome) {
        let Frame {
            node,
            track,
            leaves,
            children,
            child_count,
            ..
        } = frame;
        self.cache.store(node.depth(), node.key(), result, track);
        self.top_mut().absorb(result, leaves);
        // Frames resolved on opening never took a queue from the allocator.
        if child_count > 0 {
            self.allocator.recycle(children);
        }
    }

    /// Run up to `steps` transitions, logging progress along the way. Returns the number of
    /// transitions performed.
    pub fn advance_steps(&mut self, steps: u64) -> Result<u64> {
        let mut timer = StepTimer::start(steps, self.config.report_interval, self.total_games);
        let mut done = 0;
        while done < steps {
            match self.advance() {
                Ok(true) => done += 1,
                Ok(false) => break,
                Err(err) => {
                    self.total_ms += timer.elapsed_ms();
                    return Err(err);
                }
            }
            if timer.due(done, self.finished) && log_enabled!(Level::Info) {
                let window = timer.lap(self.total_games);
                let elapsed = self.total_ms + timer.elapsed_ms();
                let progress =
                    Progress::capture(self, done, timer.steps_total(), elapsed, Some(window));
                info!("{progress}");
            }
        }
        self.total_ms += timer.elapsed_ms();
        Ok(done)
    }

    /// Drive the search to completion.
    pub fn run(&mut self) -> Result<Outcome> {
        self.advance_steps(u64::MAX)?;
        self.result().ok_or(SolverError::Unresolved { depth: 0 })
    }

    pub fn finished(&self) -> bool {
        self.finished
    }

    /// The root outcome, once settled.
    pub fn result(&self) -> Option<Outcome> {
        self.root.result
    }

    pub fn root(&self) -> &Frame {
        &self.root
    }

    /// Frames above the root, innermost last.
    pub fn open_frames(&self) -> &[Frame] {
        &self.stack
    }

    /// Solution lines proving the root's result.
    pub fn leaves(&self) -> &[Leaf] {
        self.root.leaves()
    }

    pub fn solution_tree(&self) -> SolutionTree {
        solution_tree(self.leaves())
    }

    /// Rough share of the tree already explored.
    pub fn completion_ratio(&self) -> f64 {
        let mut ratio = None;
        for frame in self.stack.iter().rev().chain(iter::once(&self.root)) {
            ratio = Some(frame.completion(ratio));
        }
        ratio.unwrap_or(1.0)
    }

    pub fn progress(&self) -> Progress {
        Progress::capture(self, 0, None, self.total_ms, None)
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Frames opened so far, root included.
    pub fn total_games(&self) -> u64 {
        self.total_games
    }

    /// Wall time spent inside `advance_steps`.
    pub fn total_ms(&self) -> f64 {
        self.total_ms
    }

    pub fn cache(&self) -> &TranspositionCache {
        &self.cache
    }

    pub fn pool_size(&self) -> usize {
        self.allocator.pooled()
    }
}

impl fmt::Debug for Search {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Search")
            .field("max_depth", &self.max_depth)
            .field("finished", &self.finished)
            .field("result", &self.root.result)
            .field("open_frames", &self.stack.len())
            .field("total_games", &self.total_games)
            .finish()
    }
}
