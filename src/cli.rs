use crate::aligner::{AlignmentMode, Scoring};
use crate::utils::{Result, SequenceFormat};
use chrono::Datelike;
use clap::{ArgAction, ArgGroup, Parser, Subcommand};
use env_logger::fmt::Color;
use log::{Level, LevelFilter};
use once_cell::sync::Lazy;
use std::{
    io::Write,
    path::{Path, PathBuf},
};

pub static FULL_VERSION: Lazy<String> = Lazy::new(|| {
    format!(
        "{}-{}",
        env!("CARGO_PKG_VERSION"),
        env!("VERGEN_GIT_DESCRIBE")
    )
});

#[derive(Parser)]
#[command(name="ivory",
          author="Lovro Vrcek",
          version=&**FULL_VERSION,
          long_about = None,
          disable_help_subcommand = true,
          after_help = format!("Copyright (C) 2021-{}     Lovro Vrcek", chrono::Utc::now().year()),
          help_template = "{name} {version}\n{author}\n{about-section}\n{usage-heading}\n    {usage}\n\n{all-args}{after-help}",
          )]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[clap(short = 'v')]
    #[clap(long = "verbose")]
    #[clap(action = ArgAction::Count, help = "Specify multiple times to increase verbosity level (e.g., -vv for more verbosity)")]
    pub verbosity: u8,
}

#[derive(Subcommand)]
pub enum Command {
    #[clap(about = "Align a pair of sequences")]
    Align(AlignArgs),
    #[clap(about = "Map fragments to a reference")]
    Map(MapArgs),
    #[clap(about = "Report sequence collection statistics")]
    Stats(StatsArgs),
}

#[derive(Parser, Debug)]
#[command(group(ArgGroup::new("align")))]
#[command(arg_required_else_help(true))]
pub struct AlignArgs {
    #[clap(required = true)]
    #[clap(short = 'q')]
    #[clap(long = "query")]
    #[clap(help = "Query sequence")]
    #[clap(value_name = "QUERY")]
    pub query: String,

    #[clap(required = true)]
    #[clap(short = 't')]
    #[clap(long = "target")]
    #[clap(help = "Target sequence")]
    #[clap(value_name = "TARGET")]
    pub target: String,

    #[clap(short = 'm')]
    #[clap(long = "mode")]
    #[clap(value_name = "MODE")]
    #[clap(help = "Alignment mode (global, local or semiglobal)")]
    #[clap(default_value = "global")]
    pub mode: AlignmentMode,

    #[clap(short = 's')]
    #[clap(long = "scoring")]
    #[clap(value_name = "SCORING")]
    #[clap(
        help = "Scoring: MATCH,MISM,GAP for linear gaps or MATCH,MISM,GAP,GAPO,GAPE for affine gaps"
    )]
    #[clap(default_value = "1,-1,-1")]
    #[arg(value_parser = scoring_from_string, allow_hyphen_values = true)]
    pub scoring: Scoring,

    #[clap(long = "no-cigar")]
    #[clap(help = "Do not report the CIGAR string")]
    pub no_cigar: bool,

    #[clap(long = "no-target-begin")]
    #[clap(help = "Do not report the target begin position")]
    pub no_target_begin: bool,

    #[clap(help_heading("Advanced"))]
    #[clap(long = "print-matrix")]
    #[clap(help = "Print the score and traceback matrices")]
    pub print_matrix: bool,
}

#[derive(Parser, Debug)]
#[command(group(ArgGroup::new("map")))]
#[command(arg_required_else_help(true))]
pub struct MapArgs {
    #[clap(required = true)]
    #[clap(help = "Reference in FASTA format (can be compressed with gzip)")]
    #[clap(value_name = "REFERENCE")]
    #[arg(value_parser = check_reference_file)]
    pub reference_path: PathBuf,

    #[clap(required = true)]
    #[clap(help = "Fragments in FASTA/FASTQ format (can be compressed with gzip)")]
    #[clap(value_name = "FRAGMENTS")]
    #[arg(value_parser = check_sequence_file, num_args = 1..)]
    pub fragment_paths: Vec<PathBuf>,

    #[clap(short = 'o')]
    #[clap(long = "output")]
    #[clap(help = "Output TSV path [default: stdout]")]
    #[clap(value_name = "OUTPUT")]
    #[arg(value_parser = check_prefix_path)]
    pub output_path: Option<PathBuf>,

    #[clap(short = 'm')]
    #[clap(long = "mode")]
    #[clap(value_name = "MODE")]
    #[clap(help = "Alignment mode (global, local or semiglobal)")]
    #[clap(default_value = "semiglobal")]
    pub mode: AlignmentMode,

    #[clap(short = 's')]
    #[clap(long = "scoring")]
    #[clap(value_name = "SCORING")]
    #[clap(
        help = "Scoring: MATCH,MISM,GAP for linear gaps or MATCH,MISM,GAP,GAPO,GAPE for affine gaps"
    )]
    #[clap(default_value = "1,-1,-1")]
    #[arg(value_parser = scoring_from_string, allow_hyphen_values = true)]
    pub scoring: Scoring,

    #[clap(short = 't')]
    #[clap(long = "threads")]
    #[clap(help = "Number of threads")]
    #[clap(value_name = "THREADS")]
    #[clap(default_value = "1")]
    #[arg(value_parser = threads_in_range)]
    pub num_threads: usize,

    #[clap(help_heading("Advanced"))]
    #[clap(long = "max-cells")]
    #[clap(value_name = "CELLS")]
    #[clap(help = "Skip fragment/reference pairs whose alignment grid exceeds this many cells")]
    #[clap(default_value = "100000000")]
    pub max_cells: usize,
}

#[derive(Parser, Debug)]
#[command(group(ArgGroup::new("stats")))]
#[command(arg_required_else_help(true))]
pub struct StatsArgs {
    #[clap(required = true)]
    #[clap(help = "Sequence files in FASTA/FASTQ format (can be compressed with gzip)")]
    #[clap(value_name = "FILES")]
    #[arg(value_parser = check_sequence_file, num_args = 1..)]
    pub paths: Vec<PathBuf>,
}

pub fn init_verbose(args: &Cli) {
    let filter_level: LevelFilter = match args.verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };

    env_logger::Builder::from_default_env()
        .format(|buf, record| {
            let level = record.level();
            let mut style = buf.style();
            match record.level() {
                Level::Error => style.set_color(Color::Red),
                Level::Warn => style.set_color(Color::Yellow),
                Level::Info => style.set_color(Color::Green),
                Level::Debug => style.set_color(Color::Blue),
                Level::Trace => style.set_color(Color::Cyan),
            };

            writeln!(
                buf,
                "{} [{}] - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                style.value(level),
                record.args()
            )
        })
        .filter_level(filter_level)
        .init();
}

fn check_prefix_path(s: &str) -> Result<PathBuf> {
    let path = Path::new(s);
    if let Some(parent_dir) = path.parent() {
        if !parent_dir.as_os_str().is_empty() && !parent_dir.exists() {
            return Err(format!("Path does not exist: {}", parent_dir.display()));
        }
    }
    Ok(path.to_path_buf())
}

fn threads_in_range(s: &str) -> Result<usize> {
    let thread: usize = s
        .parse()
        .map_err(|_| format!("`{}` is not a valid thread number", s))?;
    if thread >= 1 {
        Ok(thread)
    } else {
        Err("Number of threads must be at least 1".into())
    }
}

fn check_file_exists(s: &str) -> Result<PathBuf> {
    let path = Path::new(s);
    if !path.exists() {
        Err(format!("File does not exist: {}", path.display()))
    } else {
        Ok(path.to_path_buf())
    }
}

fn check_sequence_file(s: &str) -> Result<PathBuf> {
    let path = check_file_exists(s)?;
    SequenceFormat::from_path(&path)?;
    Ok(path)
}

fn check_reference_file(s: &str) -> Result<PathBuf> {
    let path = check_file_exists(s)?;
    match SequenceFormat::from_path(&path)? {
        SequenceFormat::Fasta => Ok(path),
        SequenceFormat::Fastq => Err(format!(
            "Reference must be in FASTA format: {}",
            path.display()
        )),
    }
}

/// Three values select linear gaps, five select affine gaps.
fn scoring_from_string(s: &str) -> Result<Scoring> {
    let values = s
        .split(',')
        .map(|x| x.trim().parse::<i32>())
        .collect::<std::result::Result<Vec<i32>, _>>()
        .map_err(|e| format!("Invalid value in scoring {}: {}", s, e))?;

    match values[..] {
        [match_scr, mism_scr, gap_scr] => Ok(Scoring::linear(match_scr, mism_scr, gap_scr)),
        [match_scr, mism_scr, gap_scr, gapo_scr, gape_scr] => Ok(Scoring::affine(
            match_scr, mism_scr, gap_scr, gapo_scr, gape_scr,
        )),
        _ => Err(format!(
            "Expected 3 (linear) or 5 (affine) comma-separated values in scoring. Got {} -> {}",
            values.len(),
            s
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scoring_linear_from_string() {
        assert_eq!(
            scoring_from_string("1,-1,-1"),
            Ok(Scoring::linear(1, -1, -1))
        );
    }

    #[test]
    fn scoring_affine_from_string() {
        assert_eq!(
            scoring_from_string("2, -1, -2, -3, -1"),
            Ok(Scoring::affine(2, -1, -2, -3, -1))
        );
        // Zero open cost is a valid explicit affine configuration
        assert!(scoring_from_string("1,-1,-1,0,-1").unwrap().is_affine());
    }

    #[test]
    fn scoring_wrong_arity_err() {
        assert_eq!(
            scoring_from_string("1,-1"),
            Err(
                "Expected 3 (linear) or 5 (affine) comma-separated values in scoring. Got 2 -> 1,-1"
                    .to_string()
            )
        );
    }

    #[test]
    fn scoring_non_numeric_err() {
        assert!(scoring_from_string("1,x,-1").is_err());
    }

    #[test]
    fn threads_must_be_positive() {
        assert_eq!(threads_in_range("4"), Ok(4));
        assert!(threads_in_range("0").is_err());
        assert!(threads_in_range("four").is_err());
    }

    #[test]
    fn sequence_files_need_known_extension() {
        let fastq = tempfile::Builder::new().suffix(".fq.gz").tempfile().unwrap();
        let text = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        let fastq_path = fastq.path().to_str().unwrap();
        let text_path = text.path().to_str().unwrap();

        assert!(check_sequence_file(fastq_path).is_ok());
        assert!(check_sequence_file(text_path)
            .unwrap_err()
            .starts_with("Unsupported file type"));
        assert!(check_sequence_file("/nonexistent/reads.fa")
            .unwrap_err()
            .starts_with("File does not exist"));
        assert!(check_reference_file(fastq_path)
            .unwrap_err()
            .starts_with("Reference must be in FASTA format"));
    }

    #[test]
    fn map_rejects_unsupported_fragment_file() {
        let reference = tempfile::Builder::new().suffix(".fa").tempfile().unwrap();
        let reads = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        let result = Cli::try_parse_from([
            "ivory",
            "map",
            reference.path().to_str().unwrap(),
            reads.path().to_str().unwrap(),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_align_command() {
        let cli = Cli::try_parse_from([
            "ivory",
            "align",
            "-q",
            "GATTACA",
            "-t",
            "GCATGCU",
            "--mode",
            "local",
            "--scoring",
            "2,-1,-2,-3,-1",
            "--print-matrix",
        ])
        .unwrap();
        match cli.command {
            Command::Align(args) => {
                assert_eq!(args.mode, AlignmentMode::Local);
                assert_eq!(args.scoring, Scoring::affine(2, -1, -2, -3, -1));
                assert!(args.print_matrix);
                assert!(!args.no_cigar);
            }
            _ => panic!("Expected align command"),
        }
    }

    #[test]
    fn parse_align_defaults() {
        let cli = Cli::try_parse_from(["ivory", "align", "-q", "A", "-t", "C"]).unwrap();
        match cli.command {
            Command::Align(args) => {
                assert_eq!(args.mode, AlignmentMode::Global);
                assert_eq!(args.scoring, Scoring::linear(1, -1, -1));
            }
            _ => panic!("Expected align command"),
        }
    }
}
