//! `watch`: the live playground loop.

use anyhow::Result;

use super::SourceArgs;
use super::common::{file_io, load_store, source_path};
use crate::actor::{Coordinator, run_until_interrupted};
use crate::config::PlaygroundConfig;
use crate::log;
use crate::logger::status_detach;
use crate::session::Session;
use crate::share::fragment_of;

/// Watch the source file until Ctrl+C.
pub fn watch(
    config: &PlaygroundConfig,
    args: &SourceArgs,
    link: Option<&str>,
    no_stdin: bool,
) -> Result<()> {
    let source = source_path(config, args.file.as_deref());
    let out_dir = config.out_dir(args.out.as_deref());
    let store = load_store(config)?;
    let fragment = link.and_then(fragment_of);
    let io = file_io(config, &source, &out_dir, fragment)?;

    let session = Session::new(config, store, io);
    log!("watch"; "{} -> {}", source.display(), out_dir.display());
    if !no_stdin {
        log!("watch"; "paste a permalink to navigate");
    }

    let coordinator = Coordinator::new(session, source).with_stdin(!no_stdin);
    let session = run_until_interrupted(coordinator)?;

    status_detach();
    log!("watch"; "stopped after {} passes", session.passes());
    Ok(())
}
