pub mod aligner;
pub mod cli;
pub mod commands;
pub mod mapping;
pub mod utils;
