use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

const PATTERN_HELP: &str = "\
Selection patterns are tried in order:
  exact    the identifier itself, e.g. 'SOL' or '12'
  range    <prefix><start>,<end><suffix>, e.g. '1,10' or 'C1,3'
  regex    anything else, e.g. '^HW'
Any '<digits>,<digits>' run makes a pattern a range, so counted regex quantifiers
such as 'A{1,2}' are not available; write 'AA?' instead.
After each pattern answer add (a), remove (r) or done (d).";

#[derive(Parser, Debug)]
#[command(
    author = "Tony Kan",
    version,
    about = "make_ndx - A finer-grained gmx make_ndx: build GROMACS index groups from a .gro file by interactive residue and atom selection.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Select residues and atoms interactively and write the resulting groups to an index file.
    #[command(after_help = PATTERN_HELP)]
    Make(MakeArgs),
    /// List the groups of an existing index file with their sizes.
    Inspect(InspectArgs),
}

/// Arguments for the `make` subcommand.
#[derive(Args, Debug, Clone)]
pub struct MakeArgs {
    // --- Core Arguments ---
    /// Path to the input structure file (.gro).
    #[arg(short = 'f', long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the output index file (.ndx). Defaults to 'index.ndx'.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// How chosen identifiers are combined into groups: 'resnum' or 'atomname'.
    #[arg(short = 'c', long, value_name = "STRATEGY")]
    pub combine: Option<String>,

    /// Path to a configuration file in TOML format.
    /// Defaults to 'make-ndx/config.toml' in the user configuration directory, if present.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- Output Overrides ---
    /// Number of atom numbers written per line of the index file.
    #[arg(long, value_name = "INT")]
    pub chunk_size: Option<usize>,

    /// Overwrite an existing output file instead of backing it up to '#name.N#'.
    #[arg(long)]
    pub no_backup: bool,

    // --- Batch Mode ---
    /// Answer every prompt from the lines of this file instead of the terminal.
    #[arg(long, value_name = "PATH")]
    pub responses: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S chunk-size=10
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `inspect` subcommand.
#[derive(Args, Debug, Clone)]
pub struct InspectArgs {
    /// Path to the index file (.ndx) to read.
    #[arg(required = true, value_name = "PATH")]
    pub file: PathBuf,
}
