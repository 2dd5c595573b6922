//! Playground session: the context object behind the event loop.
//!
//! Owns the compiler host, edit buffer, scheduler and fragment binding
//! together with the editor, pane, sandbox and location it talks to. The
//! actor layer only forwards events and clock ticks.

mod file;

pub use file::{FileEditor, PermalinkLocation};

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use anyhow::Result;
use tokio::time::Instant;

use crate::compiler::{self, CompilerService, EditBuffer, OxcCompiler, PlaygroundHost};
use crate::config::{CompilerOptions, PlaygroundConfig};
use crate::log;
use crate::pipeline::TransformPipeline;
use crate::render::{ExecutionSandbox, OutputPane, PassOutcome, Renderer};
use crate::scheduler::{Activity, Scheduler};
use crate::share::{FragmentSync, ShareState};
use crate::vfs::SnapshotStore;

/// Shown when neither a permalink nor the editor provides a source.
pub const DEFAULT_SOURCE: &str = r#"import { Component, run } from 'reactive-tsx'

const App: Component = () => {
    return <h1>hello!</h1>
}

run(document.body, App, {})
"#;

/// Source text the user edits.
pub trait TextEditor: Send {
    /// Current text, `None` when there is nothing to restore.
    fn text(&self) -> Option<String>;

    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// Where the permalink fragment lives.
pub trait Location: Send {
    fn fragment(&self) -> Option<String>;

    fn set_fragment(&mut self, fragment: &str) -> Result<()>;
}

/// Input to a running session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    /// The editor now holds this text.
    ContentChanged(String),
    CursorMoved,
    SelectionChanged,
    /// The location fragment changed (navigation or our own write).
    FragmentChanged(String),
}

/// The collaborators a session drives.
pub struct SessionIo {
    pub editor: Box<dyn TextEditor>,
    pub pane: Box<dyn OutputPane>,
    pub sandbox: Box<dyn ExecutionSandbox>,
    pub location: Box<dyn Location>,
}

pub struct Session {
    options: CompilerOptions,
    host: PlaygroundHost,
    service: Box<dyn CompilerService>,
    pipeline: TransformPipeline,
    scheduler: Scheduler,
    fragments: FragmentSync,
    renderer: Renderer,
    io: SessionIo,
    passes: u64,
    last_outcome: Option<PassOutcome>,
}

impl Session {
    pub fn new(config: &PlaygroundConfig, store: Arc<SnapshotStore>, io: SessionIo) -> Self {
        let options = config.compiler.clone();
        Self {
            host: PlaygroundHost::new(store, EditBuffer::new("")),
            service: Box::new(OxcCompiler::new()),
            pipeline: TransformPipeline::from_options(&options),
            scheduler: Scheduler::new(config.scheduler.quiescence()),
            fragments: FragmentSync::new(),
            renderer: Renderer::new(&config.sandbox, options.strict),
            options,
            io,
            passes: 0,
            last_outcome: None,
        }
    }

    pub fn with_service(mut self, service: impl CompilerService + 'static) -> Self {
        self.service = Box::new(service);
        self
    }

    pub fn with_pipeline(mut self, pipeline: TransformPipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    pub fn buffer(&self) -> &EditBuffer {
        self.host.buffer()
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Completed passes so far.
    pub fn passes(&self) -> u64 {
        self.passes
    }

    pub fn last_outcome(&self) -> Option<PassOutcome> {
        self.last_outcome
    }

    /// Fragment last written or accepted.
    pub fn fragment(&self) -> Option<&str> {
        self.fragments.current()
    }

    /// Choose the initial source and run the first pass right away.
    ///
    /// Preference: the location fragment, then the editor's text, then
    /// `DEFAULT_SOURCE`.
    pub fn start(&mut self, now: Instant) -> PassOutcome {
        let from_fragment = self
            .io
            .location
            .fragment()
            .and_then(|fragment| self.fragments.on_external_change(&fragment))
            .map(|state| state.source);
        let from_editor = || self.io.editor.text().filter(|text| !text.is_empty());

        let source = match from_fragment {
            Some(source) => {
                crate::debug!("session"; "restored source from permalink");
                source
            }
            None => from_editor().unwrap_or_else(|| DEFAULT_SOURCE.to_string()),
        };

        if self.io.editor.text().as_deref() != Some(source.as_str())
            && let Err(err) = self.io.editor.set_text(&source)
        {
            log!("error"; "failed to update editor: {:#}", err);
        }
        self.host.buffer().set(source);
        self.scheduler.cancel();
        crate::debug!("session"; "started at {:?}", now);

        self.compile_pass()
    }

    /// Feed one editor or location event.
    pub fn on_event(&mut self, event: EditorEvent, now: Instant) {
        match event {
            EditorEvent::ContentChanged(text) => {
                if self.host.buffer().is(&text) {
                    // e.g. our own editor write echoing back
                    self.scheduler.record(Activity::CursorMoved, now);
                } else {
                    self.host.buffer().set(text);
                    self.scheduler.record(Activity::ContentChanged, now);
                }
            }
            EditorEvent::CursorMoved => self.scheduler.record(Activity::CursorMoved, now),
            EditorEvent::SelectionChanged => {
                self.scheduler.record(Activity::SelectionChanged, now)
            }
            EditorEvent::FragmentChanged(fragment) => {
                let Some(ShareState { source }) = self.fragments.on_external_change(&fragment)
                else {
                    return;
                };
                log!("share"; "navigated to a shared source");
                if let Err(err) = self.io.editor.set_text(&source) {
                    log!("error"; "failed to update editor: {:#}", err);
                }
                self.host.buffer().set(source);
                self.scheduler.record(Activity::ContentChanged, now);
            }
        }
    }

    /// Run a pass if the quiescence window has elapsed at `now`.
    pub fn tick(&mut self, now: Instant) -> Option<PassOutcome> {
        self.scheduler.poll(now).then(|| self.compile_pass())
    }

    /// Compile the buffer, render the result and publish the permalink.
    ///
    /// Errors and panics anywhere in compile or render end up as text in
    /// the pane; the session keeps running.
    pub fn compile_pass(&mut self) -> PassOutcome {
        let attempt = panic::catch_unwind(AssertUnwindSafe(|| self.try_compile_pass()));
        let failure = match attempt {
            Ok(Ok(outcome)) => Ok(outcome),
            Ok(Err(err)) => Err(format!("{err:#}")),
            Err(payload) => Err(panic_message(payload.as_ref())),
        };

        let outcome = failure.unwrap_or_else(|message| {
            log!("error"; "compilation failed: {}", message);
            let io = &mut self.io;
            self.renderer
                .render_failure(&message, io.pane.as_mut(), io.sandbox.as_mut())
                .unwrap_or_else(|err| {
                    log!("error"; "failed to show error: {:#}", err);
                    PassOutcome::Failed
                })
        });

        self.passes += 1;
        self.last_outcome = Some(outcome);
        self.publish_fragment();
        outcome
    }

    fn try_compile_pass(&mut self) -> Result<PassOutcome> {
        let result = compiler::compile(
            &self.host,
            self.service.as_ref(),
            &self.options,
            &self.pipeline,
        )?;
        let io = &mut self.io;
        self.renderer
            .render(&result, io.pane.as_mut(), io.sandbox.as_mut())
    }

    fn publish_fragment(&mut self) {
        let state = ShareState::new(self.host.buffer().get().as_str());
        let fragment = self.fragments.write(&state);
        if let Err(err) = self.io.location.set_fragment(&fragment) {
            log!("error"; "failed to update permalink: {:#}", err);
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "compiler panicked".to_string()
    }
}

#[cfg(test)]
mod tests;
