//! Backtracking search for edge-matching solutions.
//!
//! Cells are filled in row-major order. At each cell every unused card is
//! tried in every orientation, and a candidate is kept only if it matches the
//! already-placed neighbors to its left and above. Key details:
//! - Rotated edges are pre-computed once per search (`[card][orientation]`)
//! - Used cards are tracked in a `u64` bitmask
//! - The search runs on an explicit frame stack with place/undo on one shared
//!   grid prefix, so no per-node allocation happens
//! - The optional parallel mode forks at the first cell; each branch owns its
//!   own prefix and bitmask, and results are merged in branch order

use std::time::Instant;

use log::{debug, info};
use rayon::prelude::*;

use crate::card::{CardId, Direction, Edge, Orientation};
use crate::grid::{index_to_cell, Grid, Placement};
use crate::puzzle::Puzzle;

/// Effective edges of one card under each orientation, indexed
/// `[orientation][direction]`.
type RotatedEdges = [[Edge; 4]; 4];

/// Lookup table indexed by card id.
type RotationTable = Vec<RotatedEdges>;

/// Search settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolveOptions {
    /// Stop once this many solutions have been collected.
    pub max_solutions: Option<usize>,
    /// Fork the search at the first cell across rayon workers.
    pub parallel: bool,
}

/// Counters gathered during a search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Number of (card, orientation) candidates tested against their neighbors.
    pub candidates: u64,
    /// Number of candidates that fit and were placed.
    pub placements: u64,
    pub solutions: usize,
}

impl SearchStats {
    fn merge(&mut self, other: SearchStats) {
        self.candidates += other.candidates;
        self.placements += other.placements;
        self.solutions += other.solutions;
    }
}

/// Builds the rotated edge table for every card of the puzzle.
fn build_rotation_table(puzzle: &Puzzle) -> RotationTable {
    puzzle
        .cards()
        .iter()
        .map(|card| Orientation::ALL.map(|orientation| card.edges_under(orientation)))
        .collect()
}

/// Iteration state of one cell: the next (card, orientation) pair to try.
#[derive(Clone, Copy, Default)]
struct Frame {
    next_card: usize,
    next_orientation: usize,
}

/// One depth-first search over a (possibly pre-seeded) grid prefix.
struct Search<'a> {
    table: &'a RotationTable,
    dim: usize,
    cell_count: usize,
    /// Placements for cells `0..placements.len()`.
    placements: Vec<Placement>,
    /// Bit `i` set while card `i` is still unused.
    remaining: u64,
    limit: Option<usize>,
    solutions: Vec<Grid>,
    stats: SearchStats,
}

impl<'a> Search<'a> {
    fn new(table: &'a RotationTable, dim: usize, limit: Option<usize>) -> Self {
        let card_count = table.len();
        let remaining = if card_count == 64 {
            u64::MAX
        } else {
            (1u64 << card_count) - 1
        };

        Self {
            table,
            dim,
            cell_count: dim * dim,
            placements: Vec::with_capacity(dim * dim),
            remaining,
            limit,
            solutions: Vec::new(),
            stats: SearchStats::default(),
        }
    }

    #[inline(always)]
    fn edge(&self, placement: Placement, direction: Direction) -> Edge {
        self.table[placement.card.0][placement.orientation.quarter_turns()][direction.index()]
    }

    /// True if the edge `placement` shows on `side` matches what `neighbor`
    /// shows back across that border.
    #[inline(always)]
    fn borders(&self, placement: Placement, neighbor: Placement, side: Direction) -> bool {
        self.edge(placement, side)
            .matches(self.edge(neighbor, side.opposite()))
    }

    /// Checks a candidate against the placed neighbors to its left and above.
    #[inline(always)]
    fn fits(&self, index: usize, candidate: Placement) -> bool {
        let (row, col) = index_to_cell(self.dim, index);

        if col > 0 && !self.borders(candidate, self.placements[index - 1], Direction::Left) {
            return false;
        }
        if row > 0 && !self.borders(candidate, self.placements[index - self.dim], Direction::Top) {
            return false;
        }

        true
    }

    /// Advances `frame` to the next unused card and orientation that fits at `index`.
    fn next_candidate(&mut self, frame: &mut Frame, index: usize) -> Option<Placement> {
        while frame.next_card < self.table.len() {
            let card = frame.next_card;

            if self.remaining & (1 << card) != 0 {
                while frame.next_orientation < Orientation::ALL.len() {
                    let candidate = Placement {
                        card: CardId(card),
                        orientation: Orientation::new(frame.next_orientation),
                    };
                    frame.next_orientation += 1;
                    self.stats.candidates += 1;

                    if self.fits(index, candidate) {
                        return Some(candidate);
                    }
                }
            }

            // move to next card, reset orientation counter
            frame.next_card += 1;
            frame.next_orientation = 0;
        }

        None
    }

    fn place(&mut self, placement: Placement) {
        self.remaining &= !(1 << placement.card.0);
        self.placements.push(placement);
        self.stats.placements += 1;
    }

    fn undo(&mut self) {
        if let Some(placement) = self.placements.pop() {
            self.remaining |= 1 << placement.card.0;
        }
    }

    fn limit_reached(&self) -> bool {
        self.limit.is_some_and(|max| self.solutions.len() >= max)
    }

    /// Explores every completion of the current prefix.
    ///
    /// The stack holds one frame per cell from the prefix length up to the
    /// cell being filled; popping a frame undoes the placement that led to it.
    fn run(&mut self) {
        if self.limit_reached() {
            return;
        }

        let mut stack = vec![Frame::default()];

        while let Some(frame) = stack.last_mut() {
            let index = self.placements.len();

            if index == self.cell_count {
                // all cells filled - found a solution
                self.solutions
                    .push(Grid::new(self.dim, self.placements.clone()));
                self.stats.solutions += 1;
                debug!(
                    "solution {} after {} candidates",
                    self.solutions.len(),
                    self.stats.candidates
                );

                stack.pop();
                self.undo();
                if self.limit_reached() {
                    break;
                }
                continue;
            }

            match self.next_candidate(frame, index) {
                Some(placement) => {
                    self.place(placement);
                    stack.push(Frame::default());
                }
                None => {
                    // cell exhausted; backtrack into the parent cell
                    stack.pop();
                    self.undo();
                }
            }
        }
    }
}

/// Finds every solution of the puzzle, in deterministic search order.
pub fn solve(puzzle: &Puzzle, options: SolveOptions) -> Vec<Grid> {
    solve_with_stats(puzzle, options).0
}

/// Like [`solve`], also returning search counters.
pub fn solve_with_stats(puzzle: &Puzzle, options: SolveOptions) -> (Vec<Grid>, SearchStats) {
    let table = build_rotation_table(puzzle);
    let started = Instant::now();

    info!(
        "searching {} ({}x{}, {} cards{})",
        puzzle.name(),
        puzzle.dim(),
        puzzle.dim(),
        table.len(),
        if options.parallel { ", parallel" } else { "" }
    );

    let (solutions, stats) = if options.parallel {
        search_forked(&table, puzzle.dim(), options.max_solutions)
    } else {
        let mut search = Search::new(&table, puzzle.dim(), options.max_solutions);
        search.run();
        (search.solutions, search.stats)
    };

    info!(
        "found {} solutions for {} in {:.2?} ({} candidates, {} placements)",
        solutions.len(),
        puzzle.name(),
        started.elapsed(),
        stats.candidates,
        stats.placements
    );

    (solutions, stats)
}

/// Runs one independent search per first-cell candidate and merges the results.
///
/// The first cell has no neighbors, so every (card, orientation) pair is a
/// branch. Branches are merged in the order the sequential search visits them,
/// which keeps the output identical to [`Search::run`] from an empty grid.
fn search_forked(
    table: &RotationTable,
    dim: usize,
    limit: Option<usize>,
) -> (Vec<Grid>, SearchStats) {
    if limit == Some(0) {
        return (Vec::new(), SearchStats::default());
    }

    let roots: Vec<Placement> = (0..table.len())
        .flat_map(|card| {
            Orientation::ALL.map(|orientation| Placement {
                card: CardId(card),
                orientation,
            })
        })
        .collect();

    let branches: Vec<(Vec<Grid>, SearchStats)> = roots
        .par_iter()
        .map(|&root| {
            let mut search = Search::new(table, dim, limit);
            search.place(root);
            search.run();
            (search.solutions, search.stats)
        })
        .collect();

    let mut solutions = Vec::new();
    let mut stats = SearchStats {
        candidates: roots.len() as u64,
        ..SearchStats::default()
    };
    for (branch_solutions, branch_stats) in branches {
        solutions.extend(branch_solutions);
        stats.merge(branch_stats);
    }

    if let Some(max) = limit {
        solutions.truncate(max);
        stats.solutions = solutions.len();
    }

    (solutions, stats)
}
