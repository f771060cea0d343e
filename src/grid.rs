//! Grid representation and text rendering for edge-matching puzzles.
//!
//! A grid is a flat row-major array of placements, one per cell. Two grids are
//! equal when every cell holds the same card in the same orientation.

use crate::card::{CardId, Direction, Orientation};
use crate::puzzle::Puzzle;

/// A card turned to an orientation and assigned to a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placement {
    pub card: CardId,
    pub orientation: Orientation,
}

/// A complete row-major assignment of placements to an N x N board.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    dim: usize,
    placements: Vec<Placement>,
}

/// Converts (row, col) to a row-major cell index.
#[inline(always)]
pub const fn cell_to_index(dim: usize, row: usize, col: usize) -> usize {
    row * dim + col
}

/// Converts a row-major cell index to (row, col).
#[inline(always)]
pub const fn index_to_cell(dim: usize, index: usize) -> (usize, usize) {
    (index / dim, index % dim)
}

impl Grid {
    /// Creates a grid from placements in row-major order.
    ///
    /// # Panics
    ///
    /// Panics if `placements` does not hold exactly `dim * dim` entries.
    pub fn new(dim: usize, placements: Vec<Placement>) -> Self {
        assert_eq!(
            placements.len(),
            dim * dim,
            "a {dim}x{dim} grid needs {} placements",
            dim * dim
        );
        Self { dim, placements }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    #[inline]
    pub fn cell(&self, row: usize, col: usize) -> Placement {
        self.placements[cell_to_index(self.dim, row, col)]
    }

    /// Placements of one grid row, left to right.
    pub fn row(&self, row: usize) -> &[Placement] {
        let start = cell_to_index(self.dim, row, 0);
        &self.placements[start..start + self.dim]
    }
}

/// Length of the dash line between grid rows: 8 columns per cell plus borders.
fn separator_width(dim: usize) -> usize {
    9 * dim + 1
}

/// Formats a solution as bordered cells.
///
/// Each cell shows its top edge, then its left and right edges, then its
/// bottom edge, with a dash line between grid rows:
///
/// ```text
/// ----------------------------
/// |   PT   |   PT   |   YH   |
/// | YH  GT | GH  RT | RH  PT |
/// |   RH   |   YH   |   YT   |
/// ----------------------------
/// ```
pub fn format_solution(puzzle: &Puzzle, grid: &Grid) -> String {
    let separator = "-".repeat(separator_width(grid.dim()));
    let label = |placement: Placement, direction: Direction| {
        puzzle.edge_label(puzzle.facing_edge(placement, direction))
    };

    let mut output = String::new();
    for row in 0..grid.dim() {
        output.push_str(&separator);
        output.push('\n');

        let cells = grid.row(row);
        output.push('|');
        for &placement in cells {
            output.push_str(&format!("   {}   |", label(placement, Direction::Top)));
        }
        output.push('\n');

        output.push('|');
        for &placement in cells {
            output.push_str(&format!(
                " {}  {} |",
                label(placement, Direction::Left),
                label(placement, Direction::Right)
            ));
        }
        output.push('\n');

        output.push('|');
        for &placement in cells {
            output.push_str(&format!("   {}   |", label(placement, Direction::Bottom)));
        }
        output.push('\n');
    }
    output.push_str(&separator);
    output.push('\n');

    output
}

/// Formats a whole solution list the way listings are saved and printed.
pub fn format_listing(puzzle: &Puzzle, solutions: &[Grid]) -> String {
    let mut output = format!("Found {} solutions:\n\n", solutions.len());
    for (i, solution) in solutions.iter().enumerate() {
        output.push_str(&format!("Solution {}:\n", i + 1));
        output.push_str(&format_solution(puzzle, solution));
        output.push('\n');
    }
    output
}

/// Returns true if `line` is a row separator (dashes only).
pub(crate) fn is_separator(line: &str) -> bool {
    !line.is_empty() && line.bytes().all(|b| b == b'-')
}
