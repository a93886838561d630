//! Tab-separated output of mapping results, one line per fragment.

use super::MappingResult;
use crate::utils::Result;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

const HEADER: &str =
    "#fragment\tfragment_len\treference\treference_len\ttarget_begin\tscore\tcigar";

pub struct TsvWriter {
    writer: BufWriter<Box<dyn Write + Send>>,
}

impl TsvWriter {
    /// Writes to `output_path`, or to stdout when no path is given.
    pub fn new(output_path: Option<&Path>) -> Result<Self> {
        let sink: Box<dyn Write + Send> = match output_path {
            Some(path) => Box::new(
                File::create(path)
                    .map_err(|e| format!("Failed to create {}: {}", path.display(), e))?,
            ),
            None => Box::new(io::stdout()),
        };
        Self::from_writer(sink)
    }

    pub fn from_writer(sink: Box<dyn Write + Send>) -> Result<Self> {
        let mut writer = BufWriter::new(sink);
        writeln!(writer, "{}", HEADER).map_err(|e| e.to_string())?;
        Ok(Self { writer })
    }

    /// Unmapped fragments are written with `*` placeholders.
    pub fn write(&mut self, result: &MappingResult) -> Result<()> {
        match &result.hit {
            Some(hit) => writeln!(
                self.writer,
                "{}\t{}\t{}\t{}\t{}\t{}\t{}",
                result.fragment_name,
                result.fragment_len,
                hit.reference_name,
                hit.reference_len,
                hit.target_begin,
                hit.score,
                if hit.cigar.is_empty() {
                    "*".to_string()
                } else {
                    hit.cigar.to_string()
                }
            ),
            None => writeln!(
                self.writer,
                "{}\t{}\t*\t0\t0\t0\t*",
                result.fragment_name, result.fragment_len
            ),
        }
        .map_err(|e| format!("Failed to write result for {}: {}", result.fragment_name, e))
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush().map_err(|e| e.to_string())
    }
}
