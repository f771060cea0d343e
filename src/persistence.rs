//! File I/O for solution listings.
//!
//! A listing is plain text: a `Found N solutions:` header, then for every
//! solution a `Solution i:` line followed by the bordered grid produced by
//! [`format_solution`](crate::grid::format_solution). Loading reads that text
//! back and resolves every rendered cell to the card and orientation that
//! shows those four edges, so listings compare by card identity rather than
//! by text.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::card::Edge;
use crate::error::{LoadError, ParseError, ParseErrorKind};
use crate::grid::{format_listing, is_separator, Grid, Placement};
use crate::puzzle::Puzzle;

/// Directory holding one known-solutions listing per puzzle.
pub const SOLUTIONS_DIR: &str = "solutions";

/// Default location of the known-solutions listing for `puzzle_name`.
pub fn known_solutions_path(puzzle_name: &str) -> PathBuf {
    Path::new(SOLUTIONS_DIR).join(format!("{puzzle_name}.txt"))
}

/// Saves solutions as a text listing.
pub fn save(puzzle: &Puzzle, solutions: &[Grid], path: &Path) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(format_listing(puzzle, solutions).as_bytes())?;
    info!("wrote {} solutions to {}", solutions.len(), path.display());
    Ok(())
}

/// Loads all solutions from a listing file.
pub fn load(puzzle: &Puzzle, path: &Path) -> Result<Vec<Grid>, LoadError> {
    let text = read(path)?;
    let solutions = parse(puzzle, &text)?;
    info!("read {} solutions from {}", solutions.len(), path.display());
    Ok(solutions)
}

/// Returns the number of solutions in a listing without resolving them.
pub fn count(path: &Path) -> Result<usize, LoadError> {
    let text = read(path)?;
    Ok(text
        .lines()
        .filter(|line| line.trim_start().starts_with("Solution"))
        .count())
}

fn read(path: &Path) -> Result<String, LoadError> {
    std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// A solution being assembled from its grid rows.
struct PendingSolution {
    /// 1-based position in the listing.
    number: usize,
    placements: Vec<Placement>,
    used: Vec<bool>,
}

/// The three text lines that render one grid row.
struct RowLines {
    /// Line number of the first of the three lines.
    first_line: usize,
    lines: Vec<Vec<String>>,
}

/// Parses listing text into grids.
///
/// Lines other than `Solution` headers, dash separators and `|` cell lines are
/// ignored, so a listing may carry any summary text around the grids.
pub fn parse(puzzle: &Puzzle, text: &str) -> Result<Vec<Grid>, ParseError> {
    let mut parser = Parser {
        puzzle,
        solutions: Vec::new(),
        current: None,
        row: None,
    };

    for (index, raw_line) in text.lines().enumerate() {
        let line_number = index + 1;
        let line = raw_line.trim();

        if line.starts_with("Solution") {
            parser.flush_row(line_number)?;
            parser.finish_solution(line_number)?;
            parser.start_solution();
        } else if is_separator(line) {
            parser.flush_row(line_number)?;
        } else if line.starts_with('|') {
            parser.push_line(line_number, line)?;
        }
    }

    let end = text.lines().count() + 1;
    parser.flush_row(end)?;
    parser.finish_solution(end)?;

    debug!("parsed {} solutions for {}", parser.solutions.len(), puzzle.name());
    Ok(parser.solutions)
}

struct Parser<'a> {
    puzzle: &'a Puzzle,
    solutions: Vec<Grid>,
    current: Option<PendingSolution>,
    row: Option<RowLines>,
}

impl Parser<'_> {
    fn start_solution(&mut self) {
        self.current = Some(PendingSolution {
            number: self.solutions.len() + 1,
            placements: Vec::with_capacity(self.puzzle.cell_count()),
            used: vec![false; self.puzzle.cards().len()],
        });
    }

    /// Splits a `|`-delimited line into cell texts and buffers it.
    fn push_line(&mut self, line_number: usize, line: &str) -> Result<(), ParseError> {
        let cells: Vec<String> = line
            .split('|')
            .map(str::trim)
            .filter(|cell| !cell.is_empty())
            .map(str::to_string)
            .collect();

        if cells.len() != self.puzzle.dim() {
            return Err(ParseError {
                line: line_number,
                kind: ParseErrorKind::CellCount {
                    expected: self.puzzle.dim(),
                    found: cells.len(),
                },
            });
        }

        if self.current.is_none() {
            // cell lines without a header still form a solution
            self.start_solution();
        }

        self.row
            .get_or_insert_with(|| RowLines {
                first_line: line_number,
                lines: Vec::with_capacity(3),
            })
            .lines
            .push(cells);
        Ok(())
    }

    /// Resolves the buffered row lines, if any, into placements.
    fn flush_row(&mut self, line_number: usize) -> Result<(), ParseError> {
        let Some(row) = self.row.take() else {
            return Ok(());
        };
        if row.lines.len() != 3 {
            return Err(ParseError {
                line: line_number,
                kind: ParseErrorKind::IncompleteRow {
                    found: row.lines.len(),
                },
            });
        }

        let dim = self.puzzle.dim();
        let puzzle = self.puzzle;
        let Some(solution) = self.current.as_mut() else {
            return Ok(());
        };

        let grid_row = solution.placements.len() / dim;
        if grid_row == dim {
            return Err(ParseError {
                line: row.first_line,
                kind: ParseErrorKind::RowCount {
                    solution: solution.number,
                    rows: dim + 1,
                    expected: dim,
                },
            });
        }

        for cell in 0..dim {
            let edges = cell_edges(puzzle, &row, cell)?;
            let placement = puzzle.resolve(&solution.used, edges).ok_or(ParseError {
                line: row.first_line,
                kind: ParseErrorKind::NoMatchingCard {
                    row: grid_row + 1,
                    cell: cell + 1,
                },
            })?;
            solution.used[placement.card.0] = true;
            solution.placements.push(placement);
        }

        Ok(())
    }

    fn finish_solution(&mut self, line_number: usize) -> Result<(), ParseError> {
        let Some(solution) = self.current.take() else {
            return Ok(());
        };

        let dim = self.puzzle.dim();
        if solution.placements.len() != dim * dim {
            return Err(ParseError {
                line: line_number,
                kind: ParseErrorKind::RowCount {
                    solution: solution.number,
                    rows: solution.placements.len() / dim,
                    expected: dim,
                },
            });
        }

        self.solutions.push(Grid::new(dim, solution.placements));
        Ok(())
    }
}

/// Reads the four edges of one cell from its top, middle and bottom lines,
/// returned clockwise from the top.
fn cell_edges(puzzle: &Puzzle, row: &RowLines, cell: usize) -> Result<[Edge; 4], ParseError> {
    let mut labels = Vec::with_capacity(4);
    for (offset, expected) in [1, 2, 1].into_iter().enumerate() {
        let line = row.first_line + offset;
        let parts: Vec<&str> = row.lines[offset][cell].split_whitespace().collect();
        if parts.len() != expected {
            return Err(ParseError {
                line,
                kind: ParseErrorKind::EdgeCount {
                    cell: cell + 1,
                    expected,
                    found: parts.len(),
                },
            });
        }
        for part in parts {
            let edge = puzzle.parse_edge(part).ok_or_else(|| ParseError {
                line,
                kind: ParseErrorKind::UnknownEdge(part.to_string()),
            })?;
            labels.push(edge);
        }
    }

    // labels are top, left, right, bottom
    Ok([labels[0], labels[2], labels[3], labels[1]])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::{PuzzleDef, UNICORN};
    use crate::solver::{solve, SolveOptions};

    fn unicorn() -> Puzzle {
        Puzzle::new(&UNICORN).unwrap()
    }

    const FIRST_SOLUTION: &str = "\
Solution 1:
----------------------------
|   PT   |   PT   |   YH   |
| YH  GT | GH  RT | RH  PT |
|   RH   |   YH   |   YT   |
----------------------------
|   RT   |   YT   |   YH   |
| GH  GT | GH  PT | PH  RT |
|   PH   |   YH   |   GT   |
----------------------------
|   PT   |   YT   |   GH   |
| RT  RH | RT  PH | PT  YH |
|   GH   |   GH   |   YT   |
----------------------------
";

    #[test]
    fn test_parse_resolves_cards_and_orientations() {
        let puzzle = unicorn();
        let grids = parse(&puzzle, FIRST_SOLUTION).unwrap();
        assert_eq!(grids.len(), 1);
        assert_eq!(grids[0], solve(&puzzle, SolveOptions::default())[0]);
    }

    #[test]
    fn test_parse_reads_formatted_listing() {
        let puzzle = unicorn();
        let solutions = solve(&puzzle, SolveOptions::default());
        let text = format_listing(&puzzle, &solutions);
        assert_eq!(parse(&puzzle, &text).unwrap(), solutions);
    }

    #[test]
    fn test_parse_ignores_summary_lines() {
        let text = format!("Found 1 solution(s)\n\n{FIRST_SOLUTION}\nNo more.\n");
        assert_eq!(parse(&unicorn(), &text).unwrap().len(), 1);
    }

    #[test]
    fn test_parse_empty_listing() {
        assert!(parse(&unicorn(), "Found 0 solutions:\n").unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_unknown_label() {
        let text = FIRST_SOLUTION.replace("| YH  GT | GH  RT |", "| YH  XT | GH  RT |");
        let err = parse(&unicorn(), &text).unwrap_err();
        assert_eq!(err.line, 4);
        assert_eq!(err.kind, ParseErrorKind::UnknownEdge("XT".to_string()));
    }

    #[test]
    fn test_parse_rejects_wrong_cell_count() {
        let text = FIRST_SOLUTION.replace("|   PT   |   PT   |   YH   |", "|   PT   |   PT   |");
        let err = parse(&unicorn(), &text).unwrap_err();
        assert_eq!(
            err,
            ParseError {
                line: 3,
                kind: ParseErrorKind::CellCount {
                    expected: 3,
                    found: 2
                },
            }
        );
    }

    #[test]
    fn test_parse_rejects_cell_without_card() {
        // swapping two edges of the first cell produces a card that does not exist
        let text = FIRST_SOLUTION.replace("| YH  GT | GH  RT |", "| GT  YH | GH  RT |");
        let err = parse(&unicorn(), &text).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::NoMatchingCard { row: 1, cell: 1 });
    }

    #[test]
    fn test_parse_rejects_truncated_grid() {
        let truncated: String = FIRST_SOLUTION.lines().take(9).map(|l| format!("{l}\n")).collect();
        let err = parse(&unicorn(), &truncated).unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::RowCount {
                solution: 1,
                rows: 2,
                expected: 3
            }
        );
    }

    #[test]
    fn test_parse_rejects_partial_row() {
        let text: String = FIRST_SOLUTION
            .lines()
            .filter(|line| !line.contains("| RT  RH |"))
            .map(|l| format!("{l}\n"))
            .collect();
        let err = parse(&unicorn(), &text).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::IncompleteRow { found: 2 });
    }

    #[test]
    fn test_parse_uses_each_card_once() {
        // two identical cards: the second rendered copy must resolve to card 1
        let def = PuzzleDef {
            name: "twins",
            dim: 2,
            colors: "AB",
            polarity: ['H', 'T'],
            cards: &["AH BH AT BT", "AH BH AT BT", "AH AH AH AH", "BH BH BH BH"],
        };
        let puzzle = Puzzle::new(&def).unwrap();
        let text = "\
-------------------
|   AH   |   AH   |
| BT  BH | BT  BH |
|   AT   |   AT   |
-------------------
|   AH   |   BH   |
| AH  AH | BH  BH |
|   AH   |   BH   |
-------------------
";
        let grids = parse(&puzzle, text).unwrap();
        let cards: Vec<usize> = grids[0].placements().iter().map(|p| p.card.0).collect();
        assert_eq!(cards, [0, 1, 2, 3]);
    }

    #[test]
    fn test_save_then_load_and_count() {
        let puzzle = unicorn();
        let solutions = solve(&puzzle, SolveOptions::default());
        let path = std::env::temp_dir().join(format!(
            "edgematch-persistence-{}.txt",
            std::process::id()
        ));

        save(&puzzle, &solutions, &path).unwrap();
        assert_eq!(count(&path).unwrap(), solutions.len());
        assert_eq!(load(&puzzle, &path).unwrap(), solutions);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_missing_file() {
        let path = Path::new("definitely/not/here.txt");
        match load(&unicorn(), path) {
            Err(LoadError::Io { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected an I/O error, got {other:?}"),
        }
    }

    #[test]
    fn test_known_solutions_path() {
        assert_eq!(
            known_solutions_path("unicorn"),
            Path::new("solutions").join("unicorn.txt")
        );
    }
}
