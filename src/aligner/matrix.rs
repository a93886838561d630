use super::{
    grid::{Direction, Grid},
    mode::{add_cost, AlignmentMode},
    scoring::Scoring,
};
use crate::utils::Result;

/// Score grid and the parallel traceback grid of one alignment call.
#[derive(Debug)]
pub struct Matrices {
    pub scores: Grid<i32>,
    pub traceback: Grid<Direction>,
}

/// Populates both grids for `query` (rows) against `target` (columns).
///
/// Any cell score that would leave the `i32` range is reported as an error.
pub fn fill(
    query: &[u8],
    target: &[u8],
    scoring: &Scoring,
    mode: AlignmentMode,
) -> Result<Matrices> {
    let rows = query.len() + 1;
    let cols = target.len() + 1;
    let mut scores = Grid::new(rows, cols, 0)?;
    let mut traceback = Grid::new(rows, cols, Direction::Stop)?;

    mode.init_borders(&mut scores, &mut traceback, scoring.gap_scr)?;
    let zero_floor = mode.has_zero_floor();

    for (i, &query_base) in query.iter().enumerate().map(|(k, b)| (k + 1, b)) {
        for (j, &target_base) in target.iter().enumerate().map(|(k, b)| (k + 1, b)) {
            let diag = add_cost(
                scores[(i - 1, j - 1)],
                scoring.substitution(query_base, target_base),
                i,
                j,
            )?;
            let left = add_cost(
                scores[(i, j - 1)],
                scoring.insertion(traceback[(i, j - 1)]),
                i,
                j,
            )?;
            let up = add_cost(
                scores[(i - 1, j)],
                scoring.deletion(traceback[(i - 1, j)]),
                i,
                j,
            )?;

            let (score, direction) = best_step(diag, left, up, zero_floor);
            scores[(i, j)] = score;
            traceback[(i, j)] = direction;
        }
    }

    Ok(Matrices { scores, traceback })
}

/// First maximum in the order diag, left, up, then the zero floor.
#[inline]
fn best_step(diag: i32, left: i32, up: i32, zero_floor: bool) -> (i32, Direction) {
    let mut best = (diag, Direction::Diag);
    if left > best.0 {
        best = (left, Direction::Left);
    }
    if up > best.0 {
        best = (up, Direction::Up);
    }
    if zero_floor && 0 > best.0 {
        best = (0, Direction::Stop);
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ties_prefer_diag_then_left_then_up() {
        assert_eq!(best_step(1, 1, 1, false), (1, Direction::Diag));
        assert_eq!(best_step(0, 2, 2, false), (2, Direction::Left));
        assert_eq!(best_step(0, 1, 2, false), (2, Direction::Up));
        assert_eq!(best_step(0, 0, 0, true), (0, Direction::Diag));
    }

    #[test]
    fn zero_floor_only_wins_strictly() {
        assert_eq!(best_step(-1, -2, -3, true), (0, Direction::Stop));
        assert_eq!(best_step(-1, -2, -3, false), (-1, Direction::Diag));
    }

    #[test]
    fn global_linear_grid() {
        let scoring = Scoring::linear(1, -1, -1);
        let m = fill(b"AC", b"AG", &scoring, AlignmentMode::Global).unwrap();
        assert_eq!(m.scores.row(0), &[0, -1, -2]);
        assert_eq!(m.scores.row(1), &[-1, 1, 0]);
        assert_eq!(m.scores.row(2), &[-2, 0, 0]);
        assert_eq!(
            m.traceback.row(1),
            &[Direction::Up, Direction::Diag, Direction::Left]
        );
        assert_eq!(
            m.traceback.row(2),
            &[Direction::Up, Direction::Up, Direction::Diag]
        );
    }

    #[test]
    fn local_grid_never_negative() {
        let scoring = Scoring::linear(1, -3, -2);
        let m = fill(b"TTT", b"GGG", &scoring, AlignmentMode::Local).unwrap();
        for i in 0..m.scores.rows() {
            assert!(m.scores.row(i).iter().all(|&v| v == 0));
            assert!(m.traceback.row(i).iter().all(|&d| d == Direction::Stop));
        }
    }

    #[test]
    fn semiglobal_interior_has_no_floor() {
        let scoring = Scoring::linear(1, -3, -2);
        let m = fill(b"T", b"G", &scoring, AlignmentMode::SemiGlobal).unwrap();
        assert_eq!(m.scores[(1, 1)], -2);
        assert_eq!(m.traceback[(1, 1)], Direction::Left);
    }

    #[test]
    fn affine_extension_follows_neighbour_tag() {
        // A vs AGG: a match, then an opened and an extended insertion
        let scoring = Scoring::affine(2, -5, -1, -3, -1);
        let m = fill(b"A", b"AGG", &scoring, AlignmentMode::Global).unwrap();
        assert_eq!(m.scores.row(1), &[-1, 2, -1, -2]);
        assert_eq!(
            m.traceback.row(1),
            &[Direction::Up, Direction::Diag, Direction::Left, Direction::Left]
        );
    }

    #[test]
    fn affine_global_border_stays_flat() {
        let scoring = Scoring::affine(1, -1, -2, -5, -1);
        let m = fill(b"GG", b"GGG", &scoring, AlignmentMode::Global).unwrap();
        assert_eq!(m.scores.row(0), &[0, -2, -4, -6]);
        assert_eq!(m.scores[(2, 0)], -4);
    }

    #[test]
    fn empty_sequences_produce_border_only_grids() {
        let scoring = Scoring::linear(1, -1, -1);
        let m = fill(b"", b"ACG", &scoring, AlignmentMode::Global).unwrap();
        assert_eq!(m.scores.rows(), 1);
        assert_eq!(m.scores.row(0), &[0, -1, -2, -3]);
        let m = fill(b"", b"", &scoring, AlignmentMode::Local).unwrap();
        assert_eq!(m.scores[(0, 0)], 0);
        assert_eq!(m.traceback[(0, 0)], Direction::Stop);
    }

    #[test]
    fn interior_overflow_is_an_error() {
        let scoring = Scoring::linear(i32::MAX / 2 + 1, -1, -1);
        assert!(fill(b"A", b"A", &scoring, AlignmentMode::Local).is_ok());
        let err = fill(b"AA", b"AA", &scoring, AlignmentMode::Local).unwrap_err();
        assert!(err.starts_with("Alignment score overflow at cell (2, 2)"));
    }
}
