#![allow(clippy::too_many_arguments)]

//! bedspec: check BED files and intersect them through an overlap index.
//!
//! Usage: bedspec <COMMAND> [OPTIONS]

use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use std::process;

use bedspec::commands::{IntersectCommand, IntersectMode, RecordKind, ValidateCommand};
use bedspec::error::BedError;
use bedspec::format::Delimiter;

#[derive(Parser)]
#[command(name = "bedspec")]
#[command(version)]
#[command(about = "Validate BED-family files and intersect them with an interval index", long_about = None)]
struct Cli {
    /// Number of threads to use (default: number of CPUs)
    #[arg(long, short = 't', global = true)]
    threads: Option<usize>,

    /// Reject scores outside 0-1000 instead of warning about them
    #[arg(long, global = true)]
    strict_scores: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that every line of a file decodes as one record kind
    Validate {
        /// Input BED file (use - for stdin)
        input: PathBuf,

        /// Record kind to decode as
        #[arg(short, long, default_value_t = RecordKind::Auto)]
        kind: RecordKind,

        /// Split columns on any run of whitespace instead of tabs
        #[arg(short, long)]
        whitespace: bool,
    },

    /// Report records of A by how they relate to records of B
    Intersect {
        /// Input BED file A
        #[arg(short = 'a', long)]
        a: PathBuf,

        /// Input BED file B
        #[arg(short = 'b', long)]
        b: PathBuf,

        /// Record kind both files are read as
        #[arg(short, long, default_value_t = RecordKind::Auto)]
        kind: RecordKind,

        /// Relation counted as a hit: overlapping, enclosing or enclosed-by
        #[arg(short, long, default_value_t = IntersectMode::Overlapping)]
        mode: IntersectMode,

        /// Report each A record once if it has any hit
        #[arg(short = 'u', long)]
        unique: bool,

        /// Only report A records with no hit
        #[arg(short = 'v', long = "no-overlap")]
        no_overlap: bool,

        /// Report each A record with its number of hits
        #[arg(short = 'c', long)]
        count: bool,

        /// Split columns on any run of whitespace instead of tabs
        #[arg(short, long)]
        whitespace: bool,
    },
}

fn delimiter(whitespace: bool) -> Delimiter {
    if whitespace {
        Delimiter::Whitespace
    } else {
        Delimiter::Tab
    }
}

fn init_logging() {
    let mut builder = pretty_env_logger::formatted_builder();
    builder.filter_level(log::LevelFilter::Warn);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    // A logger installed by an embedding process wins.
    let _ = builder.try_init();
}

fn main() {
    let cli = Cli::parse();
    init_logging();

    if cli.strict_scores {
        bedspec::config::set_strict_scores(true);
    }

    // Configure thread pool if --threads specified
    if let Some(n) = cli.threads {
        if let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build_global()
        {
            eprintln!("Error: failed to initialize thread pool: {}", e);
            process::exit(1);
        }
    }

    let result = match cli.command {
        Commands::Validate {
            input,
            kind,
            whitespace,
        } => run_validate(input, kind, whitespace),

        Commands::Intersect {
            a,
            b,
            kind,
            mode,
            unique,
            no_overlap,
            count,
            whitespace,
        } => run_intersect(a, b, kind, mode, unique, no_overlap, count, whitespace),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run_validate(input: PathBuf, kind: RecordKind, whitespace: bool) -> Result<(), BedError> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    let cmd = ValidateCommand {
        kind,
        delimiter: delimiter(whitespace),
    };
    cmd.run(&input, &mut handle)?;
    Ok(())
}

fn run_intersect(
    a: PathBuf,
    b: PathBuf,
    kind: RecordKind,
    mode: IntersectMode,
    unique: bool,
    no_overlap: bool,
    count: bool,
    whitespace: bool,
) -> Result<(), BedError> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    let cmd = IntersectCommand {
        kind,
        mode,
        unique,
        no_overlap,
        count,
        delimiter: delimiter(whitespace),
    };
    cmd.run(&a, &b, &mut handle)
}
