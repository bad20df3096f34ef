//! Solution lines and the tree view built from them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::board::Coord;
use crate::movegen::Ply;
use crate::node::Node;
use crate::position::Position;

/// One position along a solution line and the ply that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub ply: Option<Ply>,
    pub position: Position,
}

/// Detached copy of a root-to-node chain. Leaves outlive the frames they were captured from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaf {
    steps: Vec<Step>,
}

impl Leaf {
    /// Copy a chain given root first.
    pub fn capture<'a, I>(chain: I) -> Self
    where
        I: IntoIterator<Item = &'a Node>,
    {
        Self {
            steps: chain
                .into_iter()
                .map(|node| Step {
                    ply: node.ply(),
                    position: *node.position(),
                })
                .collect(),
        }
    }

    /// Plies from the root to the last position.
    pub fn depth(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn last(&self) -> Option<&Position> {
        self.steps.last().map(|step| &step.position)
    }

    pub fn plies(&self) -> impl Iterator<Item = Ply> + '_ {
        self.steps.iter().filter_map(|step| step.ply)
    }

    /// Coordinates of every ply, root first: `[from, to, build]` or the two placements.
    pub fn history_coords(&self) -> Vec<Vec<Coord>> {
        self.plies().map(|ply| ply.coords()).collect()
    }
}

/// One position of the solution tree and the positions that follow it on some solution line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolutionBranch {
    /// Coordinates of the ply reaching this position; `None` at the root.
    pub moves: Option<Vec<Coord>>,
    pub next: SolutionTree,
}

/// Solution branches keyed by the notation of their position.
pub type SolutionTree = BTreeMap<String, SolutionBranch>;

/// Merge solution lines that share prefixes into a tree.
pub fn solution_tree(leaves: &[Leaf]) -> SolutionTree {
    group(leaves.iter().map(|leaf| leaf.steps()).collect())
}

fn group(lines: Vec<&[Step]>) -> SolutionTree {
    let mut grouped: BTreeMap<String, (Option<Ply>, Vec<&[Step]>)> = BTreeMap::new();
    for line in lines {
        let Some((head, tail)) = line.split_first() else {
            continue;
        };
        let entry = grouped
            .entry(head.position.to_notation())
            .or_insert_with(|| (head.ply, Vec::new()));
        if !tail.is_empty() {
            entry.1.push(tail);
        }
    }
    grouped
        .into_iter()
        .map(|(notation, (ply, tails))| {
            let branch = SolutionBranch {
                moves: ply.map(|ply| ply.coords()),
                next: group(tails),
            };
            (notation, branch)
        })
        .collect()
}
