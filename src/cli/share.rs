//! `share`: print the permalink for a file.

use std::path::Path;

use anyhow::{Context, Result};

use super::common::{read_source, source_path};
use crate::config::PlaygroundConfig;
use crate::share::{ShareState, encode, permalink};

pub fn share(config: &PlaygroundConfig, file: Option<&Path>) -> Result<()> {
    let source = source_path(config, file);
    let text = read_source(&source)?;
    let base = config.share.base().context("invalid [share] base_url")?;
    println!("{}", permalink(&base, &encode(&ShareState::new(text))));
    Ok(())
}
