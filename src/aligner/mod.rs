//! Quadratic dynamic-programming pairwise aligner.
//!
//! One [`Aligner`] holds an immutable configuration and can be shared across
//! threads; every [`Aligner::align`] call allocates its own score and
//! traceback grids and releases them before returning.

mod grid;
mod matrix;
mod mode;
mod printer;
mod scoring;
mod traceback;

pub use grid::{Direction, Grid};
pub use matrix::{fill, Matrices};
pub use mode::{AlignmentMode, EndCell};
pub use printer::write_matrices;
pub use scoring::{GapModel, Scoring};
pub use traceback::{walk, Cigar, EditOp, TracebackPath};

use crate::utils::Result;
use std::io;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alignment {
    pub score: i32,
    /// Present when the aligner was built with `cigar(true)`.
    pub cigar: Option<Cigar>,
    /// 0-based target position where the alignment starts. Present when the
    /// aligner was built with `target_begin(true)`.
    pub target_begin: Option<usize>,
}

pub struct AlignerBuilder {
    mode: AlignmentMode,
    scoring: Scoring,
    with_cigar: bool,
    with_target_begin: bool,
    print_matrix: bool,
}

impl AlignerBuilder {
    pub fn new(mode: AlignmentMode) -> Self {
        Self {
            mode,
            scoring: Scoring::linear(1, -1, -1),
            with_cigar: true,
            with_target_begin: true,
            print_matrix: false,
        }
    }

    /// Linear gap costs: every gap step costs `gap`.
    pub fn linear(mut self, match_scr: i32, mism_scr: i32, gap_scr: i32) -> Self {
        self.scoring = Scoring::linear(match_scr, mism_scr, gap_scr);
        self
    }

    /// Affine gap costs inside the grid; `gap_scr` still prices the global border.
    pub fn affine(
        mut self,
        match_scr: i32,
        mism_scr: i32,
        gap_scr: i32,
        gapo_scr: i32,
        gape_scr: i32,
    ) -> Self {
        self.scoring = Scoring::affine(match_scr, mism_scr, gap_scr, gapo_scr, gape_scr);
        self
    }

    pub fn scoring(mut self, scoring: Scoring) -> Self {
        self.scoring = scoring;
        self
    }

    pub fn cigar(mut self, enabled: bool) -> Self {
        self.with_cigar = enabled;
        self
    }

    pub fn target_begin(mut self, enabled: bool) -> Self {
        self.with_target_begin = enabled;
        self
    }

    /// Dump both grids to stdout after they are filled.
    pub fn print_matrix(mut self, enabled: bool) -> Self {
        self.print_matrix = enabled;
        self
    }

    pub fn build(self) -> Aligner {
        Aligner {
            mode: self.mode,
            scoring: self.scoring,
            with_cigar: self.with_cigar,
            with_target_begin: self.with_target_begin,
            print_matrix: self.print_matrix,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Aligner {
    mode: AlignmentMode,
    scoring: Scoring,
    with_cigar: bool,
    with_target_begin: bool,
    print_matrix: bool,
}

impl Aligner {
    pub fn builder(mode: AlignmentMode) -> AlignerBuilder {
        AlignerBuilder::new(mode)
    }

    pub fn mode(&self) -> AlignmentMode {
        self.mode
    }

    pub fn scoring(&self) -> &Scoring {
        &self.scoring
    }

    /// Aligns `query` (grid rows) against `target` (grid columns). The slice
    /// lengths are authoritative; any byte value is a valid symbol.
    pub fn align(&self, query: &[u8], target: &[u8]) -> Result<Alignment> {
        log::trace!(
            "Aligning {}x{} ({}, affine={})",
            query.len(),
            target.len(),
            self.mode,
            self.scoring.is_affine()
        );
        let matrices = matrix::fill(query, target, &self.scoring, self.mode)?;

        if self.print_matrix {
            let mut out = io::stdout().lock();
            printer::write_matrices(&mut out, &matrices, query, target)
                .map_err(|e| format!("Failed to print alignment matrices: {}", e))?;
        }

        let end = self.mode.select_end(&matrices.scores);
        if !self.with_cigar && !self.with_target_begin {
            return Ok(Alignment {
                score: end.score,
                cigar: None,
                target_begin: None,
            });
        }

        let path = traceback::walk(&matrices.traceback, end);
        Ok(Alignment {
            score: end.score,
            cigar: self.with_cigar.then(|| Cigar::from_ops(&path.ops)),
            target_begin: self.with_target_begin.then_some(path.target_begin),
        })
    }
}
