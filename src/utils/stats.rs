use super::Result;
use std::io::{self, Write};

/// Length summary of a sequence collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceStats {
    pub num_sequences: usize,
    pub total_len: usize,
    pub min_len: usize,
    pub max_len: usize,
    /// Integer mean, rounded down.
    pub mean_len: usize,
    pub n50: usize,
}

impl SequenceStats {
    pub fn from_lengths(lengths: &[usize]) -> Result<Self> {
        if lengths.is_empty() {
            return Err("Cannot compute statistics of an empty sequence collection".into());
        }
        let mut sorted = lengths.to_vec();
        sorted.sort_unstable_by(|a, b| b.cmp(a));

        let total_len: usize = sorted.iter().sum();
        let mut running = 0;
        let mut n50 = sorted[sorted.len() - 1];
        for &len in &sorted {
            running += len;
            if 2 * running >= total_len {
                n50 = len;
                break;
            }
        }

        Ok(Self {
            num_sequences: sorted.len(),
            total_len,
            min_len: sorted[sorted.len() - 1],
            max_len: sorted[0],
            mean_len: total_len / sorted.len(),
            n50,
        })
    }

    /// Renders the statistics as a `name = value` table headed by `title`.
    pub fn write_table<W: Write>(&self, out: &mut W, title: &str) -> io::Result<()> {
        writeln!(out, "--- {} statistics ---", title)?;
        for (name, value) in [
            ("Number of sequences", self.num_sequences),
            ("Total length", self.total_len),
            ("Minimal length", self.min_len),
            ("Maximal length", self.max_len),
            ("Mean length", self.mean_len),
            ("N50 value", self.n50),
        ] {
            writeln!(out, "{:<20}= {}", name, value)?;
        }
        Ok(())
    }

    pub fn log(&self, title: &str) {
        log::info!(
            "{} statistics: sequences={}, total={}, min={}, max={}, mean={}, N50={}",
            title,
            self.num_sequences,
            self.total_len,
            self.min_len,
            self.max_len,
            self.mean_len,
            self.n50
        );
    }
}
