//! tsplay - a live TSX playground: compile as you type, share as a link.

#![allow(dead_code)]

mod actor;
mod cli;
mod compiler;
mod config;
mod embed;
mod logger;
mod pipeline;
mod render;
mod scheduler;
mod session;
mod share;
mod vfs;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::PlaygroundConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    // `open` works on the link alone
    let config = || PlaygroundConfig::load(&cli.config);

    match &cli.command {
        Commands::Compile { source } => cli::compile::compile_once(&config()?, source),
        Commands::Watch {
            source,
            link,
            no_stdin,
        } => cli::watch::watch(&config()?, source, link.as_deref(), *no_stdin),
        Commands::Share { file } => cli::share::share(&config()?, file.as_deref()),
        Commands::Open { link, write } => cli::open::open(link, write.as_deref()),
        Commands::Libs => cli::libs::list_libs(&config()?),
    }
}
