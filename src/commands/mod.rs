pub mod align;
pub mod map;
pub mod stats;
