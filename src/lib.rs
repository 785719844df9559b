//! Tray Packing Puzzle Solver Library
//!
//! Solves polyomino tray-packing puzzles: given a rectangular board with
//! some cells pre-blocked and a roster of tile pieces, find an ordered
//! list of placements that exactly covers every open cell.
//!
//! The search is a best-first walk guided by a caller-supplied
//! [`ScoreMethod`]: candidate moves are pooled with their scores and the
//! highest-ranked one is expanded next. With the [`BruteForce`] scorer the
//! walk degenerates into a logicless sweep of all placements.

pub mod geometry;
pub mod grid;
pub mod movegen;
pub mod pieces;
pub mod puzzle;
pub mod scoring;
pub mod solver;

pub use grid::{Grid, GridError};
pub use movegen::{legal_moves, Move};
pub use pieces::{sample_set, sample_tiling, Orientation, Piece};
pub use puzzle::{format_solution, Board, PieceSet, Placement, Puzzle, PuzzleError, PuzzleState};
pub use scoring::{BruteForce, ScoreContext, ScoreMethod, Snug};
pub use solver::{Outcome, SearchState, Solver};
