mod workflow;
mod writer;

pub use workflow::{map_fragment, stream_fragments_into_channel, Hit, MappingParams, MappingResult};
pub use writer::TsvWriter;
