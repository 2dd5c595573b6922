//! `libs`: show what the compiler host can see.

use anyhow::Result;

use super::common::load_store;
use crate::config::PlaygroundConfig;
use crate::log;

pub fn list_libs(config: &PlaygroundConfig) -> Result<()> {
    let store = load_store(config)?;
    let mut entries: Vec<_> = store.iter().collect();
    entries.sort_unstable_by_key(|(path, _)| *path);

    let mut total = 0;
    for (path, content) in &entries {
        total += content.len();
        println!("{:>9}  {}", content.len(), path);
    }
    log!("libs"; "{} files, {} bytes under {}", entries.len(), total, config.libs_base().display());
    Ok(())
}
