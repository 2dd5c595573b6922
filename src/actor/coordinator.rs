//! Actor Coordinator - wires up watch mode
//!
//! # Responsibility
//!
//! A thin orchestrator that creates channels, starts the actors and waits
//! for shutdown. Playground behavior lives in `session/`.
//!
//! # Architecture
//!
//! ```text
//! FsActor ───────┐
//!                ├──▶ SessionActor
//! stdin thread ──┘
//! ```

use std::io::BufRead;
use std::path::PathBuf;

use anyhow::Result;
use crossbeam::channel::Receiver;
use tokio::sync::mpsc;

use super::fs::FsActor;
use super::messages::SessionMsg;
use super::session::SessionActor;
use crate::session::{EditorEvent, Session};
use crate::share::fragment_of;

/// Channel buffer size
const CHANNEL_BUFFER: usize = 32;

/// Coordinator - wires up and runs the actor system
pub struct Coordinator {
    session: Session,
    source: PathBuf,
    /// Read permalinks from stdin
    stdin: bool,
    /// Optional shutdown signal receiver
    shutdown_rx: Option<Receiver<()>>,
}

impl Coordinator {
    pub fn new(session: Session, source: PathBuf) -> Self {
        Self {
            session,
            source,
            stdin: false,
            shutdown_rx: None,
        }
    }

    /// Treat each stdin line as navigation to a permalink.
    pub fn with_stdin(mut self, enabled: bool) -> Self {
        self.stdin = enabled;
        self
    }

    /// Set shutdown signal receiver
    pub fn with_shutdown_signal(mut self, rx: Receiver<()>) -> Self {
        self.shutdown_rx = Some(rx);
        self
    }

    /// Run the actor system until shutdown
    pub async fn run(self) -> Result<Session> {
        let (session_tx, session_rx) = mpsc::channel::<SessionMsg>(CHANNEL_BUFFER);

        let fs_actor = FsActor::new(self.source.clone(), session_tx.clone())
            .map_err(|e| anyhow::anyhow!("watcher failed: {}", e))?;

        if self.stdin {
            spawn_stdin_reader(session_tx.clone());
        }

        crate::debug!("actor"; "start");
        let session_handle = tokio::spawn(SessionActor::new(session_rx, self.session).run());
        let fs_handle = tokio::spawn(fs_actor.run());

        if let Some(rx) = self.shutdown_rx {
            let _ = tokio::task::spawn_blocking(move || rx.recv()).await;
            crate::debug!("actor"; "shutdown signal received");
        } else {
            let _ = fs_handle.await;
        }

        let _ = session_tx.send(SessionMsg::Shutdown).await;
        let session = session_handle.await?;
        crate::debug!("actor"; "stopped");
        Ok(session)
    }
}

/// Forward stdin lines as location fragment changes.
fn spawn_stdin_reader(tx: mpsc::Sender<SessionMsg>) {
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            let Some(fragment) = fragment_of(&line) else {
                continue;
            };
            let event = EditorEvent::FragmentChanged(fragment);
            if tx.blocking_send(event.into()).is_err() {
                break;
            }
        }
    });
}

/// Run watch mode with a Ctrl+C handler.
pub fn run_until_interrupted(coordinator: Coordinator) -> Result<Session> {
    let (shutdown_tx, shutdown_rx) = crossbeam::channel::bounded::<()>(1);
    ctrlc::set_handler(move || {
        let _ = shutdown_tx.try_send(());
    })?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let session = runtime.block_on(coordinator.with_shutdown_signal(shutdown_rx).run())?;
    Ok(session)
}
