//! Session Actor
//!
//! Owns the `Session` and sleeps until its scheduler deadline. The compile
//! pass runs inline, so a pass never overlaps the next event.

use tokio::sync::mpsc;
use tokio::time::{Instant, sleep_until};

use super::messages::SessionMsg;
use crate::logger::{status_error, status_success};
use crate::render::PassOutcome;
use crate::session::Session;

/// Callback reporting each completed pass.
pub type PassReporter = Box<dyn FnMut(&Session, PassOutcome) + Send>;

pub struct SessionActor {
    rx: mpsc::Receiver<SessionMsg>,
    session: Session,
    report: PassReporter,
}

impl SessionActor {
    pub fn new(rx: mpsc::Receiver<SessionMsg>, session: Session) -> Self {
        Self {
            rx,
            session,
            report: Box::new(report_status),
        }
    }

    pub fn with_reporter(mut self, report: PassReporter) -> Self {
        self.report = report;
        self
    }

    /// Run until shutdown or until every sender is gone. Returns the session.
    pub async fn run(mut self) -> Session {
        let outcome = self.session.start(Instant::now());
        (self.report)(&self.session, outcome);

        loop {
            let deadline = self.session.scheduler().deadline();
            tokio::select! {
                biased;
                msg = self.rx.recv() => match msg {
                    Some(SessionMsg::Editor(event)) => {
                        self.session.on_event(event, Instant::now());
                    }
                    Some(SessionMsg::Shutdown) | None => break,
                },
                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    if let Some(outcome) = self.session.tick(Instant::now()) {
                        (self.report)(&self.session, outcome);
                    }
                }
            }
        }

        crate::debug!("actor"; "session stopped after {} passes", self.session.passes());
        self.session
    }
}

/// Default reporter: the single-line watch status.
fn report_status(session: &Session, outcome: PassOutcome) {
    match outcome {
        PassOutcome::Emitted => status_success("compiled"),
        PassOutcome::Diagnostics(count) => {
            status_error(&format!("{count} diagnostic(s)"), "see output.js")
        }
        PassOutcome::Failed => status_error("compilation failed", "see output.js"),
    }
    crate::debug!("share"; "fragment {}", session.fragment().unwrap_or_default());
}
