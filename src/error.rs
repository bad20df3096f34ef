use thiserror::Error;

/// Errors surfaced by the codec, the verbose rules and the search driver.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolverError {
    /// A compressed position string could not be decoded.
    #[error("invalid position notation '{notation}': {reason}")]
    InvalidNotation { notation: String, reason: String },

    /// A ply was applied to a verbose board on which it is not legal.
    #[error("illegal ply {ply} for the side to move")]
    IllegalPly { ply: String },

    /// A frame ran out of children without recording a single child outcome.
    /// The search is deterministic, so this is always a bug.
    #[error("frame at depth {depth} has no children left, no result and no child outcome")]
    Unresolved { depth: usize },

    /// The search's cancel token was triggered.
    #[error("search cancelled")]
    Cancelled,
}

pub type Result<T, E = SolverError> = std::result::Result<T, E>;

impl SolverError {
    pub(crate) fn notation(notation: &str, reason: impl Into<String>) -> Self {
        Self::InvalidNotation {
            notation: notation.to_owned(),
            reason: reason.into(),
        }
    }
}
