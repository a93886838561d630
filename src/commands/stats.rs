use crate::cli::StatsArgs;
use crate::utils::{Result, SequenceReader, SequenceStats};
use std::{
    io::{self, Write},
    path::PathBuf,
};

pub fn stats(args: StatsArgs) -> Result<()> {
    let mut out = io::stdout().lock();
    write_stats(&args.paths, &mut out)
}

fn write_stats<W: Write>(paths: &[PathBuf], out: &mut W) -> Result<()> {
    for path in paths {
        let lengths = SequenceReader::from_path(path)?
            .map(|record| record.map(|seq| seq.len()))
            .collect::<Result<Vec<usize>>>()?;
        match SequenceStats::from_lengths(&lengths) {
            Ok(stats) => stats
                .write_table(out, &path.to_string_lossy())
                .map_err(|e| format!("Failed to write statistics: {}", e))?,
            Err(e) => log::warn!("{}: {}", path.display(), e),
        }
    }
    Ok(())
}
