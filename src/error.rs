//! Error types for puzzle configuration and solution listings.

use std::path::PathBuf;

/// A puzzle definition that cannot be turned into a searchable puzzle.
///
/// These are configuration faults detected before the search begins.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PuzzleError {
    #[display("unknown puzzle `{name}` (known puzzles: {known})")]
    UnknownPuzzle { name: String, known: String },
    #[display("puzzle `{puzzle}` has dimension 0")]
    EmptyGrid { puzzle: String },
    #[display("puzzle `{puzzle}` has {cards} cards but a {dim}x{dim} grid needs {cells}")]
    CardCountMismatch {
        puzzle: String,
        dim: usize,
        cells: usize,
        cards: usize,
    },
    #[display("puzzle `{puzzle}` has {cards} cards, at most {max} are supported")]
    TooManyCards {
        puzzle: String,
        cards: usize,
        max: usize,
    },
    #[display("puzzle `{puzzle}` card {card} has {edges} edges, expected 4")]
    WrongEdgeCount {
        puzzle: String,
        card: usize,
        edges: usize,
    },
    #[display("puzzle `{puzzle}` card {card} has unknown edge `{label}`")]
    UnknownEdge {
        puzzle: String,
        card: usize,
        label: String,
    },
    #[display("puzzle `{puzzle}` has an invalid alphabet: {reason}")]
    InvalidAlphabet { puzzle: String, reason: String },
}

/// Failure while reading a solution listing back into grids.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum LoadError {
    #[display("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[display("line {}: {_0}", _0.line)]
    Parse(#[from] ParseError),
}

/// A malformed line in a solution listing.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("{kind}")]
pub struct ParseError {
    /// 1-based line number in the listing.
    pub line: usize,
    pub kind: ParseErrorKind,
}

/// What went wrong on a listing line.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ParseErrorKind {
    #[display("expected {expected} cells, found {found}")]
    CellCount { expected: usize, found: usize },
    #[display("expected {expected} edge labels in cell {cell}, found {found}")]
    EdgeCount {
        cell: usize,
        expected: usize,
        found: usize,
    },
    #[display("unknown edge label `{_0}`")]
    UnknownEdge(String),
    #[display("cell {cell} of grid row {row} matches no remaining card")]
    NoMatchingCard { row: usize, cell: usize },
    #[display("solution {solution} has {rows} grid rows, expected {expected}")]
    RowCount {
        solution: usize,
        rows: usize,
        expected: usize,
    },
    #[display("grid row has {found} lines, expected 3")]
    IncompleteRow { found: usize },
}
