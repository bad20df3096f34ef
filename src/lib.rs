#![deny(clippy::unwrap_used)]
//! Depth-bounded forced-win solver for no-gods Santorini, natively and from WebAssembly.
//!
//! The building blocks, leaf first:
//!
//! * [`BoardState`] – verbose board with the full rules and the 25-character compressed
//!   notation positions arrive in. Solutions are replayed on it.
//! * [`Position`] – packed form used by the search: four disjoint level bitmaps, ordered worker
//!   lists for the side to move and its opponent, and a side-relative [`PositionKey`].
//! * [`movegen`] – ply generation with forced-block and cannot-build pruning.
//! * [`Search`] – step-driven negamax over an explicit frame stack, with a per-depth
//!   transposition cache and solution-line collection. [`solve`] is the shortcut entry point.
//! * [`SantoriniSolver`] – the JavaScript-facing wrapper, stepping the search in slices so it
//!   never blocks the event loop for long.

pub mod bitmap;
pub mod board;
pub mod cache;
pub mod error;
pub mod logging;
pub mod movegen;
pub mod node;
pub mod pool;
pub mod position;
pub mod search;
pub mod solution;
pub mod telemetry;
mod wasm;

pub use board::{BoardState, Coord, Player};
pub use error::{Result, SolverError};
pub use movegen::Ply;
pub use position::{Position, PositionKey};
pub use search::{solve, CancelToken, Outcome, Search, SearchConfig};
pub use solution::{Leaf, SolutionBranch, SolutionTree};
pub use telemetry::Progress;
pub use wasm::{init_logging, SantoriniSolver};

use wasm_bindgen::prelude::*;

/// Install a panic hook sending Rust panics to the browser console. The hook is only compiled in
/// when the `console_error_panic_hook` feature is enabled (default).
#[wasm_bindgen]
pub fn init_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Length of a compressed position string.
#[wasm_bindgen(js_name = notationLength)]
pub fn notation_length() -> usize {
    board::NOTATION_LENGTH
}
