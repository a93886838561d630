use super::grid::Direction;
use crate::utils::Result;

/// How gap steps inside the grid are charged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GapModel {
    /// Every gap step costs `Scoring::gap_scr`.
    Linear,
    /// A gap step costs `gape_scr` when the predecessor cell was reached by a
    /// step in the same direction, `gapo_scr` otherwise.
    Affine { gapo_scr: i32, gape_scr: i32 },
}

/// Substitution and gap costs for one alignment call. Costs are added to the
/// running score, so penalties are usually negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scoring {
    pub match_scr: i32,
    pub mism_scr: i32,
    /// Flat per-step gap cost. Also used for the global border in affine mode.
    pub gap_scr: i32,
    pub gap_model: GapModel,
}

impl Scoring {
    pub fn linear(match_scr: i32, mism_scr: i32, gap_scr: i32) -> Self {
        Self {
            match_scr,
            mism_scr,
            gap_scr,
            gap_model: GapModel::Linear,
        }
    }

    pub fn affine(
        match_scr: i32,
        mism_scr: i32,
        gap_scr: i32,
        gapo_scr: i32,
        gape_scr: i32,
    ) -> Self {
        Self {
            match_scr,
            mism_scr,
            gap_scr,
            gap_model: GapModel::Affine { gapo_scr, gape_scr },
        }
    }

    /// Decodes the five-number convention where a zero open and a zero extend
    /// cost mean "linear gaps". Exactly one zero is ambiguous and rejected.
    ///
    /// Library entry point for callers still passing the
    /// `(match, mismatch, gap, gap_open, gap_extend)` tuple; the CLI selects
    /// the gap model explicitly and does not go through here.
    pub fn from_legacy(
        match_scr: i32,
        mism_scr: i32,
        gap_scr: i32,
        gapo_scr: i32,
        gape_scr: i32,
    ) -> Result<Self> {
        match (gapo_scr, gape_scr) {
            (0, 0) => Ok(Self::linear(match_scr, mism_scr, gap_scr)),
            (0, _) | (_, 0) => Err(format!(
                "Gap open and gap extend must both be zero (linear) or both non-zero (affine), got open={} extend={}",
                gapo_scr, gape_scr
            )),
            _ => Ok(Self::affine(match_scr, mism_scr, gap_scr, gapo_scr, gape_scr)),
        }
    }

    pub fn is_affine(&self) -> bool {
        matches!(self.gap_model, GapModel::Affine { .. })
    }

    #[inline]
    pub fn substitution(&self, query_base: u8, target_base: u8) -> i32 {
        if query_base == target_base {
            self.match_scr
        } else {
            self.mism_scr
        }
    }

    /// Cost of a left step (insertion) into a cell whose left neighbour carries `prev`.
    #[inline]
    pub fn insertion(&self, prev: Direction) -> i32 {
        self.gap_step(prev, Direction::Left)
    }

    /// Cost of an up step (deletion) into a cell whose upper neighbour carries `prev`.
    #[inline]
    pub fn deletion(&self, prev: Direction) -> i32 {
        self.gap_step(prev, Direction::Up)
    }

    #[inline]
    fn gap_step(&self, prev: Direction, step: Direction) -> i32 {
        match self.gap_model {
            GapModel::Linear => self.gap_scr,
            GapModel::Affine { gapo_scr, gape_scr } => {
                if prev == step {
                    gape_scr
                } else {
                    gapo_scr
                }
            }
        }
    }
}
