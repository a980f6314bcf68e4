use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// bindery: inspect, rebind and persist input-action bindings.
#[derive(Parser, Debug)]
#[command(name = "bindery", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Override store file (defaults to `storage.file`, then the data dir).
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the display data of every binding in a catalog.
    Show {
        /// Catalog JSON file.
        catalog: PathBuf,
        /// Leave out the device suffix.
        #[arg(long)]
        short: bool,
        /// Ignore saved overrides.
        #[arg(long)]
        defaults: bool,
        /// Emit JSON lines instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Rebind one binding from a scripted sequence of control presses.
    Rebind {
        catalog: PathBuf,
        /// Action id, `Map/Action` or name.
        #[arg(long)]
        action: String,
        /// Flat binding index; defaults to the first non-part binding.
        #[arg(long)]
        binding: Option<usize>,
        /// Control paths pressed in order, e.g. `<Keyboard>/j`.
        #[arg(long = "capture", required = true)]
        captures: Vec<String>,
    },
    /// Clear overrides of one action (or one binding), or of the whole catalog.
    Reset {
        catalog: PathBuf,
        #[arg(long)]
        action: Option<String>,
        /// Flat binding index; omitted clears the whole action.
        #[arg(long, requires = "action")]
        binding: Option<usize>,
    },
    /// Delete the saved override blob.
    Clear,
}

pub fn parse() -> Args {
    Args::parse()
}
