//! The `dice` command.
//!
//! Without a subcommand it opens the dice tray shell. The other
//! subcommands drive the build plan in `dice.toml`, pack and inspect asset
//! archives and roll dice non-interactively.

#![warn(missing_docs)]

mod build;
mod bundle;
mod list;
mod logging;
mod pack;
mod play;
mod project;
mod roll;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

/// Dice tray with roll macros, and the tooling that builds it.
#[derive(Parser, Debug)]
#[command(name = "dice", version, about = "Dice tray")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose (debug-level) output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a custom `dice.toml` build plan, or the directory holding it.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The subcommand to run. Defaults to `play`.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Open the interactive dice tray.
    Play(PlayArgs),
    /// Run the build plan in `dice.toml`.
    Build,
    /// Pack a directory into an asset archive.
    Pack {
        /// Directory to pack. Entry names start with its final component.
        dir: PathBuf,
        /// Archive to write.
        out: PathBuf,
    },
    /// List the entries of an archive or of a bundled executable.
    List {
        /// Archive or executable with an appended archive.
        archive: PathBuf,

        /// Output format.
        #[arg(short, long, value_enum, default_value_t = ListFormat::Text)]
        format: ListFormat,
    },
    /// Append an archive to an executable, replacing any earlier one.
    Bundle {
        /// Executable to append to.
        executable: PathBuf,
        /// Archive to append.
        archive: PathBuf,

        /// Append even if the executable already carries an archive.
        #[arg(long)]
        force: bool,
    },
    /// Roll an `NdS` expression once and print the faces.
    Roll(RollArgs),
}

/// Arguments for `dice play`.
#[derive(Parser, Debug, Default)]
pub struct PlayArgs {
    /// Asset archive to load instead of the one appended to this executable.
    #[arg(long)]
    pub assets: Option<PathBuf>,

    /// Seed for reproducible rolls.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Start with sorting enabled.
    #[arg(long)]
    pub sorted: bool,

    /// Write logs to this file while the shell runs.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Arguments for `dice roll`.
#[derive(Parser, Debug)]
pub struct RollArgs {
    /// Roll expression, e.g. `4d6`.
    pub expr: String,

    /// Seed for reproducible rolls.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print the faces in descending order.
    #[arg(long)]
    pub sorted: bool,

    /// Also count the faces at or above this value.
    #[arg(short, long)]
    pub threshold: Option<String>,
}

/// Output format for `dice list`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// One aligned line per entry.
    Text,
    /// A JSON array of entries.
    Json,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print verbose/debug information.
    pub verbose: bool,
    /// Optional path to a custom build plan.
    pub config: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        config: cli.config,
    };

    let command = cli.command.unwrap_or(Command::Play(PlayArgs::default()));
    // The shell owns the terminal; it sets up its own logging.
    if !matches!(command, Command::Play(_)) {
        logging::init_stderr(&global);
    }

    let result = match command {
        Command::Play(ref args) => play::run(args, &global),
        Command::Build => build::run(&global),
        Command::Pack { ref dir, ref out } => pack::run(dir, out, &global),
        Command::List {
            ref archive,
            format,
        } => list::run(archive, format),
        Command::Bundle {
            ref executable,
            ref archive,
            force,
        } => bundle::run(executable, archive, force, &global),
        Command::Roll(ref args) => roll::run(args),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}
