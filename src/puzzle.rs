//! Puzzle definitions and the validated puzzle configuration.
//!
//! Built-in puzzles are written as static [`PuzzleDef`]s with cards in a
//! compact two-letter edge notation. [`Puzzle::new`] checks a definition once
//! at startup and produces the configuration value the solver consumes.

use crate::card::{Card, CardId, Color, Direction, Edge, Orientation, Polarity};
use crate::error::PuzzleError;
use crate::grid::{Grid, Placement};

/// Largest card set the solver's `u64` used-card bitmask can track.
pub const MAX_CARDS: usize = 64;

/// Static description of a puzzle.
///
/// Each card is four whitespace-separated edge labels in clockwise order
/// (top, right, bottom, left). A label is a color symbol followed by a
/// polarity symbol, e.g. `PT` for a purple tail.
#[derive(Debug, Clone, Copy)]
pub struct PuzzleDef {
    pub name: &'static str,
    /// Grid dimension per axis.
    pub dim: usize,
    /// Color alphabet, one symbol per color.
    pub colors: &'static str,
    /// Symbols for [`Polarity::Head`] and [`Polarity::Tail`].
    pub polarity: [char; 2],
    pub cards: &'static [&'static str],
}

/// A validated puzzle: grid dimension, alphabet and cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    name: String,
    dim: usize,
    colors: Vec<char>,
    polarity: [char; 2],
    cards: Vec<Card>,
}

impl Puzzle {
    /// Builds a puzzle from its definition, rejecting inconsistent configuration.
    pub fn new(def: &PuzzleDef) -> Result<Self, PuzzleError> {
        let puzzle = def.name.to_string();

        if def.dim == 0 {
            return Err(PuzzleError::EmptyGrid { puzzle });
        }

        let colors: Vec<char> = def.colors.chars().collect();
        if let Some(reason) = alphabet_problem(&colors, def.polarity) {
            return Err(PuzzleError::InvalidAlphabet { puzzle, reason });
        }

        let cells = def.dim * def.dim;
        if def.cards.len() != cells {
            return Err(PuzzleError::CardCountMismatch {
                puzzle,
                dim: def.dim,
                cells,
                cards: def.cards.len(),
            });
        }
        if def.cards.len() > MAX_CARDS {
            return Err(PuzzleError::TooManyCards {
                puzzle,
                cards: def.cards.len(),
                max: MAX_CARDS,
            });
        }

        let mut parsed = Self {
            name: puzzle,
            dim: def.dim,
            colors,
            polarity: def.polarity,
            cards: Vec::with_capacity(cells),
        };

        for (index, spec) in def.cards.iter().enumerate() {
            let labels: Vec<&str> = spec.split_whitespace().collect();
            if labels.len() != 4 {
                return Err(PuzzleError::WrongEdgeCount {
                    puzzle: parsed.name,
                    card: index,
                    edges: labels.len(),
                });
            }

            let mut edges = [Edge::new(Color(0), Polarity::Head); 4];
            for (slot, label) in edges.iter_mut().zip(&labels) {
                *slot = match parsed.parse_edge(label) {
                    Some(edge) => edge,
                    None => {
                        return Err(PuzzleError::UnknownEdge {
                            puzzle: parsed.name,
                            card: index,
                            label: label.to_string(),
                        })
                    }
                };
            }
            parsed.cards.push(Card::new(CardId(index), edges));
        }

        Ok(parsed)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Grid dimension per axis.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Total number of grid cells (`dim * dim`).
    pub fn cell_count(&self) -> usize {
        self.dim * self.dim
    }

    /// Cards in insertion order; a card's [`CardId`] is its index here.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card(&self, id: CardId) -> &Card {
        &self.cards[id.0]
    }

    /// Renders an edge as its two-symbol label, e.g. `PT`.
    pub fn edge_label(&self, edge: Edge) -> String {
        let color = self.colors[edge.color.0 as usize];
        let polarity = match edge.polarity {
            Polarity::Head => self.polarity[0],
            Polarity::Tail => self.polarity[1],
        };
        format!("{color}{polarity}")
    }

    /// Parses a two-symbol edge label. Returns `None` for unknown symbols.
    pub fn parse_edge(&self, label: &str) -> Option<Edge> {
        let mut symbols = label.chars();
        let (color_symbol, polarity_symbol) = (symbols.next()?, symbols.next()?);
        if symbols.next().is_some() {
            return None;
        }

        let color = self.colors.iter().position(|&c| c == color_symbol)?;
        let polarity = if polarity_symbol == self.polarity[0] {
            Polarity::Head
        } else if polarity_symbol == self.polarity[1] {
            Polarity::Tail
        } else {
            return None;
        };

        Some(Edge::new(Color(color as u8), polarity))
    }

    /// Checks that a grid is a full solution of this puzzle.
    ///
    /// Every card must appear exactly once and every internal border must match.
    pub fn is_solution(&self, grid: &Grid) -> bool {
        if grid.dim() != self.dim || grid.placements().len() != self.cell_count() {
            return false;
        }

        let mut seen = vec![false; self.cards.len()];
        for placement in grid.placements() {
            match seen.get_mut(placement.card.0) {
                Some(used) if !*used => *used = true,
                _ => return false,
            }
        }

        for row in 0..self.dim {
            for col in 0..self.dim {
                let here = grid.cell(row, col);
                let right_ok = col + 1 == self.dim
                    || self.borders(here, grid.cell(row, col + 1), Direction::Right);
                let below_ok = row + 1 == self.dim
                    || self.borders(here, grid.cell(row + 1, col), Direction::Bottom);
                if !(right_ok && below_ok) {
                    return false;
                }
            }
        }

        true
    }

    /// True if `neighbor`, lying on the `side` of `placement`, shows a matching
    /// edge back across the shared border.
    pub fn borders(&self, placement: Placement, neighbor: Placement, side: Direction) -> bool {
        self.facing_edge(placement, side)
            .matches(self.facing_edge(neighbor, side.opposite()))
    }

    /// Edge a placed card presents in `direction`.
    pub fn facing_edge(&self, placement: Placement, direction: Direction) -> Edge {
        self.card(placement.card).edge(placement.orientation, direction)
    }

    /// Finds the first card not marked in `used`, in card order, that shows
    /// `edges` (clockwise from the top) under some orientation.
    pub fn resolve(&self, used: &[bool], edges: [Edge; 4]) -> Option<Placement> {
        self.cards
            .iter()
            .filter(|card| !used[card.id.0])
            .find_map(|card| {
                Orientation::ALL
                    .into_iter()
                    .find(|&orientation| card.edges_under(orientation) == edges)
                    .map(|orientation| Placement {
                        card: card.id,
                        orientation,
                    })
            })
    }

    /// Rewrites a grid into the form a rendered listing reads back as.
    ///
    /// A card that looks the same after a half or quarter turn renders
    /// identically in several orientations, and identical cards render
    /// identically to each other. Each cell is replaced by the lowest card and
    /// orientation showing the same edges, taking duplicate cards in card
    /// order, so grids that print the same text compare equal.
    pub fn canonical(&self, grid: &Grid) -> Grid {
        let mut used = vec![false; self.cards.len()];
        let placements = grid
            .placements()
            .iter()
            .map(|&placement| {
                let resolved = self
                    .cards
                    .get(placement.card.0)
                    .and_then(|card| self.resolve(&used, card.edges_under(placement.orientation)))
                    .unwrap_or(placement);
                if let Some(slot) = used.get_mut(resolved.card.0) {
                    *slot = true;
                }
                resolved
            })
            .collect();
        Grid::new(grid.dim(), placements)
    }
}

/// Describes why a color alphabet and polarity pair cannot label edges.
fn alphabet_problem(colors: &[char], polarity: [char; 2]) -> Option<String> {
    if colors.is_empty() {
        return Some("no colors".to_string());
    }
    if colors.len() > usize::from(u8::MAX) + 1 {
        return Some(format!("{} colors, at most 256 are supported", colors.len()));
    }
    for (i, symbol) in colors.iter().enumerate() {
        if colors[..i].contains(symbol) {
            return Some(format!("color `{symbol}` listed twice"));
        }
    }
    if polarity[0] == polarity[1] {
        return Some(format!("polarity symbols are both `{}`", polarity[0]));
    }
    None
}

/// The nine-card unicorn puzzle: purple, green, red and yellow unicorns,
/// each edge showing a head or a tail.
pub const UNICORN: PuzzleDef = PuzzleDef {
    name: "unicorn",
    dim: 3,
    colors: "PGRY",
    polarity: ['H', 'T'],
    cards: &[
        "PT GT RH YH",
        "PH GH RT YT",
        "RT YH GH PT",
        "RH YH PT YT",
        "RT GT PH YH",
        "RT PT RH GH",
        "PH GH RT GT",
        "YT PT YH GH",
        "PT GH YH YT",
    ],
};

/// A sixteen-card 4x4 puzzle over the unicorn alphabet.
pub const QUARTET: PuzzleDef = PuzzleDef {
    name: "quartet",
    dim: 4,
    colors: "PGRY",
    polarity: ['H', 'T'],
    cards: &[
        "YT YT PH PH",
        "RT GT PH GT",
        "RH GH YT GH",
        "GH PT YT YT",
        "PT YT RH PH",
        "PH RT YH YH",
        "YH RH GH YT",
        "YT RT RT RH",
        "RH YH YH GT",
        "PH PT YH YT",
        "RH GH YH PH",
        "GH PH YT GT",
        "RT YH YH YT",
        "YT YH GT PT",
        "PH PT GT PT",
        "YH RH RT RT",
    ],
};

/// Every built-in puzzle, in the order `list` shows them.
pub const BUILTIN: &[&PuzzleDef] = &[&UNICORN, &QUARTET];

/// Looks up and validates a built-in puzzle by name.
pub fn by_name(name: &str) -> Result<Puzzle, PuzzleError> {
    match BUILTIN.iter().find(|def| def.name == name) {
        Some(def) => Puzzle::new(def),
        None => Err(PuzzleError::UnknownPuzzle {
            name: name.to_string(),
            known: names().join(", "),
        }),
    }
}

/// Names of the built-in puzzles.
pub fn names() -> Vec<&'static str> {
    BUILTIN.iter().map(|def| def.name).collect()
}
