//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Live TSX playground: compile as you type, share as a link
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path (default: playground.toml)
    #[arg(short = 'C', long, global = true, default_value = "playground.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Compile the source once and write the sandbox
    #[command(visible_alias = "c")]
    Compile {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Recompile whenever the source has been quiet for a while
    #[command(visible_alias = "w")]
    Watch {
        #[command(flatten)]
        source: SourceArgs,

        /// Start from a permalink instead of the file's content
        #[arg(short, long, value_hint = clap::ValueHint::Url)]
        link: Option<String>,

        /// Do not read permalinks from stdin
        #[arg(long)]
        no_stdin: bool,
    },

    /// Print the permalink for a source file
    #[command(visible_alias = "s")]
    Share {
        /// Source file (default: index.tsx)
        #[arg(value_hint = clap::ValueHint::FilePath)]
        file: Option<PathBuf>,
    },

    /// Restore the source carried by a permalink
    #[command(visible_alias = "o")]
    Open {
        /// Permalink URL, `#fragment` or bare fragment
        link: String,

        /// Write the source to this file instead of stdout
        #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
        write: Option<PathBuf>,
    },

    /// List the library snapshot
    #[command(visible_alias = "l")]
    Libs,
}

/// Source and output locations shared by Compile and Watch
#[derive(clap::Args, Debug, Clone)]
pub struct SourceArgs {
    /// Source file (default: index.tsx)
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub file: Option<PathBuf>,

    /// Output directory (default: [sandbox] out)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub out: Option<PathBuf>,
}
