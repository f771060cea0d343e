//! Edge-Matching Puzzle Solver Library
//!
//! Finds every arrangement of a set of square cards in an N x N grid where
//! touching edges share a color and have opposite polarity. Cards may be
//! turned in quarter steps.

pub mod card;
pub mod compare;
pub mod error;
pub mod grid;
pub mod persistence;
pub mod puzzle;
pub mod solver;

pub use card::{Card, CardId, Color, Direction, Edge, Orientation, Polarity};
pub use compare::{compare, Comparison};
pub use error::{LoadError, ParseError, ParseErrorKind, PuzzleError};
pub use grid::{format_listing, format_solution, Grid, Placement};
pub use puzzle::{Puzzle, PuzzleDef};
pub use solver::{solve, solve_with_stats, SearchStats, SolveOptions};
