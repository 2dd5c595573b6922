//! FileSystem Actor
//!
//! Watches the edited source file and turns raw notify events into editor
//! events for the SessionActor. Timing is left to the session's scheduler.
//!
//! Architecture:
//! ```text
//! Watcher → Classifier (pure) → read file → SessionMsg
//! ```

use std::path::{Path, PathBuf};

use notify::event::{AccessKind, AccessMode, ModifyKind};
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use super::messages::SessionMsg;
use crate::session::EditorEvent;

/// What a raw event means for the watched file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsSignal {
    /// Content may have changed; re-read it.
    Changed,
    /// Opened or read without writing.
    Accessed,
}

/// Classify a notify event for `target`.
///
/// Editors often save by rename, so the parent directory is watched and
/// events for other files are dropped here.
pub fn classify(event: &notify::Event, target: &Path) -> Option<FsSignal> {
    if !event.paths.iter().any(|path| path == target) {
        return None;
    }
    match event.kind {
        EventKind::Create(_) => Some(FsSignal::Changed),
        // mtime/atime/chmod noise
        EventKind::Modify(ModifyKind::Metadata(_)) => None,
        EventKind::Modify(_) => Some(FsSignal::Changed),
        EventKind::Access(AccessKind::Close(AccessMode::Write)) => Some(FsSignal::Changed),
        EventKind::Access(_) => Some(FsSignal::Accessed),
        _ => None,
    }
}

/// FileSystem Actor - watches the source file
pub struct FsActor {
    /// Channel to receive notify events (sync -> async bridge)
    notify_rx: std::sync::mpsc::Receiver<notify::Result<notify::Event>>,
    /// Watcher handle (must be kept alive)
    _watcher: RecommendedWatcher,
    /// Channel to send messages to SessionActor
    session_tx: mpsc::Sender<SessionMsg>,
    target: PathBuf,
}

impl FsActor {
    /// Create a new FsActor; the watcher starts buffering events right away.
    pub fn new(target: PathBuf, session_tx: mpsc::Sender<SessionMsg>) -> notify::Result<Self> {
        // events carry resolved paths
        let target = target.canonicalize().unwrap_or(target);
        let (notify_tx, notify_rx) = std::sync::mpsc::channel();

        let mut watcher = notify::recommended_watcher(move |res| {
            let _ = notify_tx.send(res);
        })?;

        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        watcher.watch(&dir, RecursiveMode::NonRecursive)?;
        crate::debug!("watch"; "watching {}", target.display());

        Ok(Self {
            notify_rx,
            _watcher: watcher,
            session_tx,
            target,
        })
    }

    /// Run the actor event loop
    pub async fn run(self) {
        let notify_rx = self.notify_rx;
        let session_tx = self.session_tx;
        let target = self.target;

        let (async_tx, mut async_rx) = mpsc::channel::<notify::Event>(64);

        // Spawn a thread to poll notify events and send to async channel
        std::thread::spawn(move || {
            while let Ok(result) = notify_rx.recv() {
                match result {
                    Ok(event) => {
                        if async_tx.blocking_send(event).is_err() {
                            break; // Receiver dropped
                        }
                    }
                    Err(e) => crate::log!("watch"; "notify error: {}", e),
                }
            }
        });

        let _watcher = self._watcher;
        while let Some(event) = async_rx.recv().await {
            let Some(signal) = classify(&event, &target) else {
                continue;
            };
            crate::debug!("watch"; "{:?}: {:?}", signal, event.kind);

            let message = match signal {
                FsSignal::Accessed => EditorEvent::CursorMoved,
                FsSignal::Changed => match std::fs::read_to_string(&target) {
                    Ok(text) => EditorEvent::ContentChanged(text),
                    // mid-save: the file is back with the next event
                    Err(_) => continue,
                },
            };
            if session_tx.send(message.into()).await.is_err() {
                break; // SessionActor shut down
            }
        }
    }
}
