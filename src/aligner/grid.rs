use crate::utils::Result;
use std::ops::{Index, IndexMut};

/// Predecessor of a grid cell on its optimal path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Left,
    Diag,
    Stop,
}

impl Direction {
    pub fn as_char(self) -> char {
        match self {
            Direction::Up => 'U',
            Direction::Left => 'L',
            Direction::Diag => 'D',
            Direction::Stop => 'S',
        }
    }
}

/// Dense row-major matrix backed by a single allocation.
#[derive(Debug, Clone)]
pub struct Grid<T> {
    rows: usize,
    cols: usize,
    cells: Vec<T>,
}

impl<T: Copy> Grid<T> {
    /// Allocates a `rows` x `cols` grid filled with `value`. Fails instead of
    /// aborting when the grid cannot be allocated.
    pub fn new(rows: usize, cols: usize, value: T) -> Result<Self> {
        let len = rows
            .checked_mul(cols)
            .ok_or_else(|| format!("Grid dimensions {}x{} overflow", rows, cols))?;
        let mut cells = Vec::new();
        cells.try_reserve_exact(len).map_err(|e| {
            format!(
                "Failed to allocate {}x{} alignment grid ({} cells): {}",
                rows, cols, len, e
            )
        })?;
        cells.resize(len, value);
        Ok(Self { rows, cols, cells })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn row(&self, i: usize) -> &[T] {
        &self.cells[i * self.cols..(i + 1) * self.cols]
    }
}

impl<T> Index<(usize, usize)> for Grid<T> {
    type Output = T;

    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &T {
        debug_assert!(i < self.rows && j < self.cols);
        &self.cells[i * self.cols + j]
    }
}

impl<T> IndexMut<(usize, usize)> for Grid<T> {
    #[inline]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut T {
        debug_assert!(i < self.rows && j < self.cols);
        &mut self.cells[i * self.cols + j]
    }
}
