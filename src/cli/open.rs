//! `open`: restore the source behind a permalink.

use std::path::Path;

use anyhow::{Context, Result, anyhow};

use crate::log;
use crate::session::{FileEditor, TextEditor};
use crate::share::{ShareState, fragment_of, try_decode};

/// Decode `link` and write the source to `write`, or stdout.
pub fn open(link: &str, write: Option<&Path>) -> Result<()> {
    let state = restore(link)?;
    match write {
        Some(path) => {
            FileEditor::new(path).set_text(&state.source)?;
            log!("share"; "restored {}", path.display());
        }
        None => print!("{}", state.source),
    }
    Ok(())
}

fn restore(link: &str) -> Result<ShareState> {
    let fragment = fragment_of(link).ok_or_else(|| anyhow!("`{link}` carries no fragment"))?;
    try_decode(&fragment).context("permalink could not be decoded")
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::share::encode;

    #[test]
    fn test_open_writes_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("restored.tsx");
        let fragment = encode(&ShareState::new("let x = <b/>;\n"));

        open(&format!("https://example.com/play/#{fragment}"), Some(&path)).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "let x = <b/>;\n");
    }

    #[test]
    fn test_restore_rejects_garbage() {
        assert!(restore("https://example.com/play/").is_err());
        assert!(restore("#%%%").is_err());
    }
}
