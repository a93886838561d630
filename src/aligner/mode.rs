use super::grid::{Direction, Grid};
use crate::utils::Result;
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignmentMode {
    /// Needleman-Wunsch: both sequences consumed end to end.
    Global,
    /// Smith-Waterman: best-scoring pair of substrings.
    Local,
    /// Free leading gaps on both sequences; the path ends in the last row or
    /// last column.
    SemiGlobal,
}

impl FromStr for AlignmentMode {
    type Err = &'static str;
    fn from_str(mode: &str) -> std::result::Result<Self, Self::Err> {
        match mode {
            "global" => Ok(AlignmentMode::Global),
            "local" => Ok(AlignmentMode::Local),
            "semiglobal" | "semi-global" => Ok(AlignmentMode::SemiGlobal),
            _ => Err("Invalid alignment mode (expected global, local or semiglobal)"),
        }
    }
}

impl fmt::Display for AlignmentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlignmentMode::Global => write!(f, "global"),
            AlignmentMode::Local => write!(f, "local"),
            AlignmentMode::SemiGlobal => write!(f, "semiglobal"),
        }
    }
}

/// Cell where the traceback starts, with the score it holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndCell {
    pub score: i32,
    pub i: usize,
    pub j: usize,
}

impl AlignmentMode {
    /// Whether interior cells are clamped at zero with a `Stop` tag.
    pub fn has_zero_floor(self) -> bool {
        self == AlignmentMode::Local
    }

    /// Fills row 0 and column 0. Cell (0, 0) is always 0 / `Stop`.
    ///
    /// Global borders accumulate the flat `gap_scr` once per step, regardless
    /// of the gap model used for interior cells. Fails if the running border
    /// score leaves the `i32` range.
    pub fn init_borders(
        self,
        scores: &mut Grid<i32>,
        traceback: &mut Grid<Direction>,
        gap_scr: i32,
    ) -> Result<()> {
        scores[(0, 0)] = 0;
        traceback[(0, 0)] = Direction::Stop;

        let (row_dir, col_dir, step) = match self {
            AlignmentMode::Global => (Direction::Left, Direction::Up, gap_scr),
            AlignmentMode::Local | AlignmentMode::SemiGlobal => {
                (Direction::Stop, Direction::Stop, 0)
            }
        };

        for j in 1..scores.cols() {
            scores[(0, j)] = add_cost(scores[(0, j - 1)], step, 0, j)?;
            traceback[(0, j)] = row_dir;
        }
        for i in 1..scores.rows() {
            scores[(i, 0)] = add_cost(scores[(i - 1, 0)], step, i, 0)?;
            traceback[(i, 0)] = col_dir;
        }
        Ok(())
    }

    /// Picks the traceback start from a fully populated score grid.
    ///
    /// Local and semi-global scans run in row-major order and only a strictly
    /// greater score replaces the current best, so the first maximum wins.
    pub fn select_end(self, scores: &Grid<i32>) -> EndCell {
        let last_i = scores.rows() - 1;
        let last_j = scores.cols() - 1;
        match self {
            AlignmentMode::Global => EndCell {
                score: scores[(last_i, last_j)],
                i: last_i,
                j: last_j,
            },
            AlignmentMode::Local => {
                let mut best = EndCell { score: 0, i: 0, j: 0 };
                for i in 1..=last_i {
                    for (j, &score) in scores.row(i).iter().enumerate().skip(1) {
                        if score > best.score {
                            best = EndCell { score, i, j };
                        }
                    }
                }
                best
            }
            AlignmentMode::SemiGlobal => {
                // Last column of every row above the last, then the whole last row
                let candidates = (0..last_i)
                    .map(|i| (i, last_j))
                    .chain((0..=last_j).map(|j| (last_i, j)));
                let mut best: Option<EndCell> = None;
                for (i, j) in candidates {
                    let score = scores[(i, j)];
                    if best.map_or(true, |b| score > b.score) {
                        best = Some(EndCell { score, i, j });
                    }
                }
                // The candidate set always holds at least (last_i, 0)
                best.unwrap_or(EndCell {
                    score: scores[(last_i, 0)],
                    i: last_i,
                    j: 0,
                })
            }
        }
    }
}

/// Adds a step cost to a cell score, failing instead of wrapping.
#[inline]
pub(super) fn add_cost(score: i32, cost: i32, i: usize, j: usize) -> Result<i32> {
    score.checked_add(cost).ok_or_else(|| {
        format!(
            "Alignment score overflow at cell ({}, {}): {} + {}",
            i, j, score, cost
        )
    })
}
