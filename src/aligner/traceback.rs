use super::{
    grid::{Direction, Grid},
    mode::EndCell,
};
use itertools::Itertools;
use std::fmt;

/// One alignment column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditOp {
    /// Match or mismatch; consumes a query and a target base.
    Match,
    /// Consumes a target base.
    Ins,
    /// Consumes a query base.
    Del,
}

impl EditOp {
    pub fn as_char(self) -> char {
        match self {
            EditOp::Match => 'M',
            EditOp::Ins => 'I',
            EditOp::Del => 'D',
        }
    }

    pub fn query_len(self) -> usize {
        match self {
            EditOp::Match | EditOp::Del => 1,
            EditOp::Ins => 0,
        }
    }

    pub fn target_len(self) -> usize {
        match self {
            EditOp::Match | EditOp::Ins => 1,
            EditOp::Del => 0,
        }
    }
}

/// Run-length encoded edit script, e.g. `3M1I1D`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cigar {
    pub ops: Vec<(usize, EditOp)>,
}

impl Cigar {
    /// Collapses consecutive identical operations into runs.
    pub fn from_ops(ops: &[EditOp]) -> Self {
        Self {
            ops: ops.iter().copied().dedup_with_count().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Number of query bases covered by the alignment.
    pub fn query_len(&self) -> usize {
        self.ops.iter().map(|(len, op)| len * op.query_len()).sum()
    }

    /// Number of target bases covered by the alignment.
    pub fn target_len(&self) -> usize {
        self.ops.iter().map(|(len, op)| len * op.target_len()).sum()
    }

    /// Expands the runs back into one operation per alignment column.
    pub fn expand(&self) -> impl Iterator<Item = EditOp> + '_ {
        self.ops
            .iter()
            .flat_map(|&(len, op)| std::iter::repeat(op).take(len))
    }
}

impl fmt::Display for Cigar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (len, op) in &self.ops {
            write!(f, "{}{}", len, op.as_char())?;
        }
        Ok(())
    }
}

/// Result of walking the traceback grid from an end cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracebackPath {
    /// Operations in alignment order (start to end).
    pub ops: Vec<EditOp>,
    /// Query index of the terminal `Stop` cell.
    pub query_begin: usize,
    /// Target index of the terminal `Stop` cell.
    pub target_begin: usize,
}

/// Follows tags from `end` until a `Stop` cell is reached.
pub fn walk(traceback: &Grid<Direction>, end: EndCell) -> TracebackPath {
    let (mut i, mut j) = (end.i, end.j);
    let mut ops = Vec::with_capacity(i + j);
    loop {
        match traceback[(i, j)] {
            Direction::Diag => {
                ops.push(EditOp::Match);
                i -= 1;
                j -= 1;
            }
            Direction::Left => {
                ops.push(EditOp::Ins);
                j -= 1;
            }
            Direction::Up => {
                ops.push(EditOp::Del);
                i -= 1;
            }
            Direction::Stop => break,
        }
    }
    ops.reverse();
    TracebackPath {
        ops,
        query_begin: i,
        target_begin: j,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cigar_run_length_encoding() {
        use EditOp::*;
        let cigar = Cigar::from_ops(&[Match, Match, Match, Ins, Del]);
        assert_eq!(cigar.to_string(), "3M1I1D");
        assert_eq!(cigar.ops, vec![(3, Match), (1, Ins), (1, Del)]);
    }

    #[test]
    fn cigar_single_run() {
        let cigar = Cigar::from_ops(&[EditOp::Match]);
        assert_eq!(cigar.to_string(), "1M");
    }

    #[test]
    fn empty_cigar_renders_empty() {
        let cigar = Cigar::from_ops(&[]);
        assert!(cigar.is_empty());
        assert_eq!(cigar.to_string(), "");
        assert_eq!(cigar.query_len(), 0);
    }

    #[test]
    fn cigar_consumed_lengths() {
        use EditOp::*;
        let cigar = Cigar::from_ops(&[Match, Match, Ins, Ins, Ins, Del, Match]);
        assert_eq!(cigar.query_len(), 4);
        assert_eq!(cigar.target_len(), 6);
        assert_eq!(
            cigar.expand().collect::<Vec<_>>(),
            vec![Match, Match, Ins, Ins, Ins, Del, Match]
        );
    }

    #[test]
    fn walk_stops_at_first_stop_cell() {
        // 3x4 grid, path (2,3) L-> (2,2) D-> (1,1) Stop
        let mut traceback = Grid::new(3, 4, Direction::Stop).unwrap();
        traceback[(2, 3)] = Direction::Left;
        traceback[(2, 2)] = Direction::Diag;
        let path = walk(&traceback, EndCell { score: 0, i: 2, j: 3 });
        assert_eq!(path.ops, vec![EditOp::Match, EditOp::Ins]);
        assert_eq!(path.query_begin, 1);
        assert_eq!(path.target_begin, 1);
    }

    #[test]
    fn walk_from_stop_cell_is_empty() {
        let traceback = Grid::new(2, 2, Direction::Stop).unwrap();
        let path = walk(&traceback, EndCell { score: 0, i: 1, j: 1 });
        assert!(path.ops.is_empty());
        assert_eq!(path.target_begin, 1);
    }

    #[test]
    fn walk_reaches_origin_through_borders() {
        let mut traceback = Grid::new(2, 3, Direction::Stop).unwrap();
        traceback[(0, 1)] = Direction::Left;
        traceback[(0, 2)] = Direction::Left;
        traceback[(1, 0)] = Direction::Up;
        traceback[(1, 2)] = Direction::Up;
        let path = walk(&traceback, EndCell { score: 0, i: 1, j: 2 });
        assert_eq!(path.ops, vec![EditOp::Ins, EditOp::Ins, EditOp::Del]);
        assert_eq!((path.query_begin, path.target_begin), (0, 0));
    }
}
