//! Search node: a packed position plus the ply that produced it.
//!
//! The opponent threats and the legal move list are computed at most once per node and kept
//! until [`Node::next_games`] turns them into children.

use std::collections::VecDeque;

use crate::board::Player;
use crate::movegen::{generate, MoveList, Ply, Threats};
use crate::pool::ChildAllocator;
use crate::position::{Position, PositionKey};

#[derive(Debug, Clone)]
pub struct Node {
    position: Position,
    ply: Option<Ply>,
    depth: usize,
    threats: Option<Threats>,
    moves: Option<MoveList>,
}

impl Node {
    pub fn root(position: Position) -> Self {
        Self {
            position,
            ply: None,
            depth: 0,
            threats: None,
            moves: None,
        }
    }

    /// The node reached by playing `ply` here.
    pub fn child(&self, ply: Ply) -> Self {
        Self {
            position: self.position.play(&ply),
            ply: Some(ply),
            depth: self.depth + 1,
            threats: None,
            moves: None,
        }
    }

    #[inline]
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// The ply that led here, `None` for the root.
    #[inline]
    pub fn ply(&self) -> Option<Ply> {
        self.ply
    }

    /// Plies from the search root.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    #[inline]
    pub fn key(&self) -> PositionKey {
        self.position.key()
    }

    fn setup_done(&self) -> bool {
        !self.position.next_workers().is_empty()
    }

    pub fn threats(&mut self) -> Threats {
        let position = &self.position;
        *self.threats.get_or_insert_with(|| Threats::of(position))
    }

    /// Legal plies for the side to move, generated on first use.
    pub fn next_moves(&mut self) -> &MoveList {
        let threats = self.threats();
        let position = &self.position;
        self.moves.get_or_insert_with(|| {
            let mut moves = MoveList::new();
            generate(position, &threats, &mut moves);
            moves
        })
    }

    /// The side to move cannot avoid losing on the opponent's next ply, or cannot move at all.
    /// Never true during setup.
    pub fn lost(&mut self) -> bool {
        if !self.setup_done() {
            return false;
        }
        self.threats().lost || self.next_moves().is_empty()
    }

    /// The player who has won here: the opponent of a side to move with no legal ply.
    pub fn winner(&mut self) -> Option<Player> {
        if !self.setup_done() {
            return None;
        }
        let mover = self.position.mover();
        self.next_moves().is_empty().then(|| mover.other())
    }

    pub fn finished(&mut self) -> bool {
        self.winner().is_some()
    }

    /// Child nodes in generation order. The queue comes from `allocator`; the memoized move
    /// list is consumed.
    pub fn next_games<A>(&mut self, allocator: &mut A) -> VecDeque<Node>
    where
        A: ChildAllocator + ?Sized,
    {
        self.next_moves();
        let moves = self.moves.take().unwrap_or_default();
        let mut children = allocator.take();
        children.reserve(moves.len());
        children.extend(moves.iter().map(|&ply| self.child(ply)));
        children
    }
}
