//! `compile`: one pass over the source file.

use anyhow::{Result, bail};
use tokio::time::Instant;

use super::SourceArgs;
use super::common::{file_io, load_store, source_path};
use crate::config::PlaygroundConfig;
use crate::log;
use crate::render::{FilePane, PassOutcome};
use crate::session::Session;

/// Compile once, write `output.js` and `index.html`, print the permalink.
pub fn compile_once(config: &PlaygroundConfig, args: &SourceArgs) -> Result<()> {
    let source = source_path(config, args.file.as_deref());
    let out_dir = config.out_dir(args.out.as_deref());
    let store = load_store(config)?;
    let io = file_io(config, &source, &out_dir, None)?;

    let mut session = Session::new(config, store, io);
    let outcome = session.start(Instant::now());
    let pane = FilePane::new(&out_dir);

    match outcome {
        PassOutcome::Emitted => {
            log!("compile"; "{} -> {}", source.display(), out_dir.display());
            if let Some(fragment) = session.fragment()
                && let Ok(base) = config.share.base()
            {
                log!("share"; "{}", crate::share::permalink(&base, fragment));
            }
            Ok(())
        }
        PassOutcome::Diagnostics(count) => {
            eprintln!("{}", std::fs::read_to_string(pane.path()).unwrap_or_default());
            bail!("{} has {} diagnostic(s)", source.display(), count)
        }
        PassOutcome::Failed => {
            eprintln!("{}", std::fs::read_to_string(pane.path()).unwrap_or_default());
            bail!("failed to compile {}", source.display())
        }
    }
}
