//! Comparison of computed solutions against a known-solutions listing.
//!
//! Both sides are treated as sets of grids, where a grid is identified by the
//! card and orientation in every cell. Grids are first brought to their
//! [canonical](Puzzle::canonical) form, so a card that looks the same in two
//! orientations, or two identical cards, cannot make a listing read back from
//! text disagree with the search that wrote it. The report lists the set
//! difference in both directions.

use std::fmt;

use rustc_hash::FxHashSet;

use crate::grid::Grid;
use crate::puzzle::Puzzle;

/// Outcome of comparing known and found solutions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Comparison {
    pub known_count: usize,
    pub found_count: usize,
    /// 1-based positions in the known list of solutions that were not found.
    pub missing: Vec<usize>,
    /// 1-based positions in the found list of solutions that are not known.
    pub extra: Vec<usize>,
}

impl Comparison {
    /// True when both sides hold exactly the same solutions.
    pub fn is_match(&self) -> bool {
        self.missing.is_empty() && self.extra.is_empty()
    }
}

/// Compares two solution lists of `puzzle` as sets.
pub fn compare(puzzle: &Puzzle, known: &[Grid], found: &[Grid]) -> Comparison {
    let known: Vec<Grid> = known.iter().map(|grid| puzzle.canonical(grid)).collect();
    let found: Vec<Grid> = found.iter().map(|grid| puzzle.canonical(grid)).collect();
    let known_set: FxHashSet<&Grid> = known.iter().collect();
    let found_set: FxHashSet<&Grid> = found.iter().collect();

    let missing = known
        .iter()
        .enumerate()
        .filter(|(_, grid)| !found_set.contains(grid))
        .map(|(i, _)| i + 1)
        .collect();
    let extra = found
        .iter()
        .enumerate()
        .filter(|(_, grid)| !known_set.contains(grid))
        .map(|(i, _)| i + 1)
        .collect();

    Comparison {
        known_count: known.len(),
        found_count: found.len(),
        missing,
        extra,
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Known solutions: {}", self.known_count)?;
        writeln!(f, "Found solutions: {}", self.found_count)?;
        if self.known_count != self.found_count {
            writeln!(
                f,
                "WARNING: different number of solutions (known {}, found {})",
                self.known_count, self.found_count
            )?;
        }

        if self.is_match() {
            write!(
                f,
                "SUCCESS: all {} known solutions found, no extra solutions",
                self.known_count
            )
        } else {
            if !self.missing.is_empty() {
                writeln!(
                    f,
                    "MISSING {} known solution(s): {:?}",
                    self.missing.len(),
                    self.missing
                )?;
            }
            if !self.extra.is_empty() {
                writeln!(
                    f,
                    "EXTRA {} solution(s) not in the known set: {:?}",
                    self.extra.len(),
                    self.extra
                )?;
            }
            write!(f, "FAILURE: solution sets differ")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{CardId, Orientation};
    use crate::grid::{format_listing, Placement};
    use crate::persistence::parse;
    use crate::puzzle::PuzzleDef;
    use crate::solver::{solve, SolveOptions};

    /// Four cards that look different in every orientation.
    const DISTINCT: PuzzleDef = PuzzleDef {
        name: "distinct",
        dim: 2,
        colors: "ABCD",
        polarity: ['H', 'T'],
        cards: &["AH BH CH DH", "AT BT CT DT", "AH BT CH DT", "AT BH CT DH"],
    };

    fn distinct() -> Puzzle {
        Puzzle::new(&DISTINCT).unwrap()
    }

    fn grid(cards: [usize; 4]) -> Grid {
        Grid::new(
            2,
            cards
                .iter()
                .map(|&card| Placement {
                    card: CardId(card),
                    orientation: Orientation::IDENTITY,
                })
                .collect(),
        )
    }

    #[test]
    fn test_identical_sets_match() {
        let solutions = vec![grid([0, 1, 2, 3]), grid([3, 2, 1, 0])];
        let report = compare(&distinct(), &solutions, &solutions);
        assert!(report.is_match());
        assert_eq!(report.known_count, 2);
        assert_eq!(report.found_count, 2);
    }

    #[test]
    fn test_order_does_not_matter() {
        let known = vec![grid([0, 1, 2, 3]), grid([3, 2, 1, 0])];
        let found = vec![grid([3, 2, 1, 0]), grid([0, 1, 2, 3])];
        assert!(compare(&distinct(), &known, &found).is_match());
    }

    #[test]
    fn test_both_directions_are_reported() {
        let known = vec![grid([0, 1, 2, 3]), grid([1, 0, 2, 3])];
        let found = vec![grid([0, 1, 2, 3]), grid([2, 3, 0, 1]), grid([3, 2, 1, 0])];
        let report = compare(&distinct(), &known, &found);
        assert_eq!(report.missing, [2]);
        assert_eq!(report.extra, [2, 3]);
        assert!(!report.is_match());
    }

    #[test]
    fn test_orientation_is_part_of_identity() {
        let plain = grid([0, 1, 2, 3]);
        let mut turned = plain.placements().to_vec();
        turned[0].orientation = Orientation::new(2);
        let report = compare(&distinct(), &[plain], &[Grid::new(2, turned)]);
        assert_eq!(report.missing, [1]);
        assert_eq!(report.extra, [1]);
    }

    #[test]
    fn test_report_text() {
        let report = compare(&distinct(), &[grid([0, 1, 2, 3])], &[]);
        assert_eq!(
            report.to_string(),
            "Known solutions: 1\n\
             Found solutions: 0\n\
             WARNING: different number of solutions (known 1, found 0)\n\
             MISSING 1 known solution(s): [1]\n\
             FAILURE: solution sets differ"
        );
    }

    #[test]
    fn test_symmetric_card_survives_listing_roundtrip() {
        // the card reads the same after a half turn, so its listing text
        // cannot tell orientation 0 from 2 or 1 from 3
        let def = PuzzleDef {
            name: "mirror",
            dim: 1,
            colors: "PGRY",
            polarity: ['H', 'T'],
            cards: &["PT GT PT GT"],
        };
        let puzzle = Puzzle::new(&def).unwrap();
        let found = solve(&puzzle, SolveOptions::default());
        let known = parse(&puzzle, &format_listing(&puzzle, &found)).unwrap();
        assert_eq!(known.len(), 4);

        let report = compare(&puzzle, &known, &found);
        assert!(report.is_match(), "{report}");
    }

    #[test]
    fn test_identical_cards_compare_by_appearance() {
        let def = PuzzleDef {
            name: "twins",
            dim: 2,
            colors: "AB",
            polarity: ['H', 'T'],
            cards: &["AH BH AT BT", "AH BH AT BT", "AH AH AH AH", "BH BH BH BH"],
        };
        let puzzle = Puzzle::new(&def).unwrap();
        let swapped = Grid::new(
            2,
            [1, 0, 2, 3]
                .iter()
                .map(|&card| Placement {
                    card: CardId(card),
                    orientation: Orientation::IDENTITY,
                })
                .collect(),
        );
        assert!(compare(&puzzle, &[grid([0, 1, 2, 3])], &[swapped]).is_match());
    }
}
