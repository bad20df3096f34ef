//! Per-depth transposition cache.
//!
//! One map per absolute depth, keyed by the side-relative [`PositionKey`]. Only outcomes that
//! contradict the track the search was hoping for are stored: a hit can then stand in for a
//! whole subtree without having to reproduce its solution lines.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::position::PositionKey;
use crate::search::Outcome;

/// Hit statistics for one depth.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepthStats {
    pub unique: u64,
    pub repeated: u64,
}

impl DepthStats {
    /// Share of lookups at this depth that found a stored outcome.
    pub fn repeated_ratio(&self) -> f64 {
        let total = self.unique + self.repeated;
        if total == 0 {
            0.0
        } else {
            self.repeated as f64 / total as f64
        }
    }
}

#[derive(Debug)]
pub struct TranspositionCache {
    maps: Vec<HashMap<PositionKey, Outcome>>,
    stats: Vec<DepthStats>,
    enabled: bool,
    max_depth: Option<usize>,
    max_size: usize,
    relative_depth: usize,
}

impl TranspositionCache {
    /// `depths` is the number of absolute depths the search can reach, root included.
    pub fn new(
        depths: usize,
        enabled: bool,
        max_depth: Option<usize>,
        max_size: usize,
        relative_depth: usize,
    ) -> Self {
        Self {
            maps: (0..depths).map(|_| HashMap::new()).collect(),
            stats: vec![DepthStats::default(); depths],
            enabled,
            max_depth,
            max_size,
            relative_depth,
        }
    }

    #[inline]
    fn covers(&self, depth: usize) -> bool {
        self.enabled && depth < self.maps.len() && self.max_depth.map_or(true, |max| depth <= max)
    }

    /// Look up a stored outcome and count the lookup as unique or repeated.
    pub fn get(&mut self, depth: usize, key: PositionKey) -> Option<Outcome> {
        if !self.covers(depth) {
            return None;
        }
        let found = self.maps[depth].get(&key).copied();
        let stats = &mut self.stats[depth];
        if found.is_some() {
            stats.repeated += 1;
        } else {
            stats.unique += 1;
        }
        found
    }

    /// Record the outcome of a resolved frame. Outcomes equal to the frame's track are not
    /// stored. Storing at `depth` invalidates the map `relative_depth` levels deeper, and a map
    /// that has grown past `max_size` is dropped before the insert.
    pub fn store(&mut self, depth: usize, key: PositionKey, result: Outcome, track: Outcome) {
        if !self.covers(depth) || result == track {
            return;
        }
        if self.maps[depth].len() > self.max_size {
            self.maps[depth] = HashMap::new();
        }
        if let Some(deeper) = self.maps.get_mut(depth + self.relative_depth) {
            deeper.clear();
        }
        self.maps[depth].insert(key, result);
    }

    pub fn stats(&self) -> &[DepthStats] {
        &self.stats
    }

    /// Entries currently held per depth.
    pub fn sizes(&self) -> Vec<usize> {
        self.maps.iter().map(HashMap::len).collect()
    }

    pub fn len(&self) -> usize {
        self.maps.iter().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
