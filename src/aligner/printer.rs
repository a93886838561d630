//! Plain-text dump of the score and traceback grids for debugging.

use super::matrix::Matrices;
use std::io::{self, Write};

const CELL_WIDTH: usize = 4;

pub fn write_matrices<W: Write>(
    out: &mut W,
    matrices: &Matrices,
    query: &[u8],
    target: &[u8],
) -> io::Result<()> {
    writeln!(out, "Score matrix:")?;
    write_grid(out, query, target, |i, j| matrices.scores[(i, j)].to_string())?;
    writeln!(out, "Traceback matrix:")?;
    write_grid(out, query, target, |i, j| {
        matrices.traceback[(i, j)].as_char().to_string()
    })?;
    Ok(())
}

fn write_grid<W, F>(out: &mut W, query: &[u8], target: &[u8], cell: F) -> io::Result<()>
where
    W: Write,
    F: Fn(usize, usize) -> String,
{
    // Two blank columns: the row label and the empty-prefix column
    write!(out, "{:>w$}{:>w$}", ' ', ' ', w = CELL_WIDTH)?;
    for &base in target {
        write!(out, "{:>w$}", base as char, w = CELL_WIDTH)?;
    }
    writeln!(out)?;

    for i in 0..=query.len() {
        let label = if i == 0 { ' ' } else { query[i - 1] as char };
        write!(out, "{:>w$}", label, w = CELL_WIDTH)?;
        for j in 0..=target.len() {
            write!(out, "{:>w$}", cell(i, j), w = CELL_WIDTH)?;
        }
        writeln!(out)?;
    }
    writeln!(out)
}
