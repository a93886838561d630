mod readers;
mod stats;
mod util;

pub use readers::{open_sequence_reader, read_reference, Sequence, SequenceFormat, SequenceReader};
pub use stats::SequenceStats;
pub use util::{handle_error_and_exit, Result};
