use std::time::Duration;

use parking_lot::Mutex;

use super::*;
use crate::compiler::{CompileError, CompilerHost, EmitResult};
use crate::render::LoadedCallback;
use crate::share;

#[derive(Default)]
struct Shared {
    editor: Option<String>,
    editor_writes: usize,
    pane: String,
    document: Option<String>,
    fragment: Option<String>,
}

type State = Arc<Mutex<Shared>>;

struct Editor(State);
struct Pane(State);
struct Sandbox(State);
struct Place(State);

impl TextEditor for Editor {
    fn text(&self) -> Option<String> {
        self.0.lock().editor.clone()
    }

    fn set_text(&mut self, text: &str) -> Result<()> {
        let mut state = self.0.lock();
        state.editor = Some(text.to_string());
        state.editor_writes += 1;
        Ok(())
    }
}

impl OutputPane for Pane {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.0.lock().pane = text.to_string();
        Ok(())
    }
}

impl ExecutionSandbox for Sandbox {
    fn load(&mut self, document: String, on_loaded: LoadedCallback) -> Result<()> {
        self.0.lock().document = Some(document);
        on_loaded();
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.0.lock().document = None;
        Ok(())
    }
}

impl Location for Place {
    fn fragment(&self) -> Option<String> {
        self.0.lock().fragment.clone()
    }

    fn set_fragment(&mut self, fragment: &str) -> Result<()> {
        self.0.lock().fragment = Some(fragment.to_string());
        Ok(())
    }
}

fn store() -> Arc<SnapshotStore> {
    Arc::new(SnapshotStore::from_entries([
        ("node_modules/typescript/lib/lib.es6.d.ts", "interface Array<T> {}"),
        (
            "node_modules/reactive-tsx/lib/index.d.ts",
            "export type Component = () => any;\nexport declare function run(el: any, c: Component, p: any): void;\nexport declare function h(...args: any[]): any;",
        ),
    ]))
}

fn session_with(shared: Shared) -> (Session, State) {
    let state: State = Arc::new(Mutex::new(shared));
    let io = SessionIo {
        editor: Box::new(Editor(Arc::clone(&state))),
        pane: Box::new(Pane(Arc::clone(&state))),
        sandbox: Box::new(Sandbox(Arc::clone(&state))),
        location: Box::new(Place(Arc::clone(&state))),
    };
    let session = Session::new(&PlaygroundConfig::default(), store(), io);
    (session, state)
}

fn session() -> (Session, State) {
    session_with(Shared::default())
}

const WINDOW: Duration = Duration::from_millis(2000);

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[test]
fn test_start_with_default_source() {
    let (mut session, state) = session();
    let t0 = Instant::now();

    assert_eq!(session.start(t0), PassOutcome::Emitted);
    assert_eq!(session.passes(), 1);
    assert_eq!(session.buffer().get().as_str(), DEFAULT_SOURCE);

    let state = state.lock();
    assert_eq!(state.editor.as_deref(), Some(DEFAULT_SOURCE));
    assert!(state.pane.contains("run(document.body, App, {})"), "{}", state.pane);
    assert!(state.document.as_deref().unwrap().contains("h(\"h1\""));

    let fragment = state.fragment.as_deref().unwrap();
    assert_eq!(share::decode(fragment).unwrap().source, DEFAULT_SOURCE);
}

#[test]
fn test_start_prefers_fragment_then_editor() {
    let fragment = share::encode(&ShareState::new("console.log('shared');\n"));
    let (mut session, state) = session_with(Shared {
        editor: Some("console.log('local');\n".to_string()),
        fragment: Some(fragment),
        ..Shared::default()
    });
    session.start(Instant::now());
    assert_eq!(session.buffer().get().as_str(), "console.log('shared');\n");
    assert_eq!(
        state.lock().editor.as_deref(),
        Some("console.log('shared');\n")
    );

    let (mut session, state) = session_with(Shared {
        editor: Some("console.log('local');\n".to_string()),
        fragment: Some("not-a-valid-fragment".to_string()),
        ..Shared::default()
    });
    session.start(Instant::now());
    assert_eq!(session.buffer().get().as_str(), "console.log('local');\n");
    // the editor already had the text
    assert_eq!(state.lock().editor_writes, 0);
}

#[test]
fn test_burst_of_edits_yields_one_pass_with_final_text() {
    let (mut session, state) = session();
    let t0 = Instant::now();
    session.start(t0);

    for i in 1..=5u64 {
        let now = t0 + ms(i * 400);
        session.on_event(EditorEvent::ContentChanged(format!("console.log({i});\n")), now);
        assert_eq!(session.tick(now), None);
    }

    let last = t0 + ms(2000);
    assert_eq!(session.tick(last + ms(1999)), None);
    assert_eq!(session.tick(last + WINDOW), Some(PassOutcome::Emitted));
    assert_eq!(session.tick(last + WINDOW + ms(1)), None);
    assert_eq!(session.passes(), 2);

    let state = state.lock();
    assert!(state.pane.contains("console.log(5)"), "{}", state.pane);
    let fragment = state.fragment.as_deref().unwrap();
    assert_eq!(share::decode(fragment).unwrap().source, "console.log(5);\n");
}

#[test]
fn test_cursor_activity_extends_pending_window() {
    let (mut session, _state) = session();
    let t0 = Instant::now();
    session.start(t0);

    session.on_event(EditorEvent::ContentChanged("let a = 1;\n".to_string()), t0);
    session.on_event(EditorEvent::CursorMoved, t0 + ms(1500));
    session.on_event(EditorEvent::SelectionChanged, t0 + ms(3000));

    assert_eq!(session.tick(t0 + ms(4999)), None);
    assert!(session.tick(t0 + ms(5000)).is_some());
}

#[test]
fn test_cursor_activity_while_idle_does_nothing() {
    let (mut session, _state) = session();
    let t0 = Instant::now();
    session.start(t0);

    session.on_event(EditorEvent::CursorMoved, t0 + ms(100));
    session.on_event(EditorEvent::SelectionChanged, t0 + ms(200));
    // rewriting the same text is activity, not an edit
    session.on_event(EditorEvent::ContentChanged(DEFAULT_SOURCE.to_string()), t0 + ms(300));

    assert!(session.scheduler().deadline().is_none());
    assert_eq!(session.tick(t0 + ms(60_000)), None);
    assert_eq!(session.passes(), 1);
}

#[test]
fn test_own_fragment_echo_is_ignored() {
    let (mut session, state) = session();
    let t0 = Instant::now();
    session.start(t0);

    let own = state.lock().fragment.clone().unwrap();
    let writes = state.lock().editor_writes;
    session.on_event(EditorEvent::FragmentChanged(own), t0 + ms(10));

    assert!(session.scheduler().deadline().is_none());
    assert_eq!(state.lock().editor_writes, writes);
    assert_eq!(session.buffer().get().as_str(), DEFAULT_SOURCE);
}

#[test]
fn test_navigation_replaces_buffer_and_editor() {
    let (mut session, state) = session();
    let t0 = Instant::now();
    session.start(t0);

    let other = share::encode(&ShareState::new("console.log('other');\n"));
    session.on_event(EditorEvent::FragmentChanged(format!("#{other}")), t0 + ms(10));

    assert_eq!(session.buffer().get().as_str(), "console.log('other');\n");
    assert_eq!(
        state.lock().editor.as_deref(),
        Some("console.log('other');\n")
    );
    assert_eq!(session.scheduler().deadline(), Some(t0 + ms(10) + WINDOW));
    assert!(session.tick(t0 + ms(10) + WINDOW).is_some());
    assert!(state.lock().pane.contains("other"));
}

#[test]
fn test_undecodable_fragment_keeps_session() {
    let (mut session, _state) = session();
    let t0 = Instant::now();
    session.start(t0);

    session.on_event(EditorEvent::FragmentChanged("%%%".to_string()), t0);
    assert_eq!(session.buffer().get().as_str(), DEFAULT_SOURCE);
    assert!(session.scheduler().deadline().is_none());
}

#[test]
fn test_diagnostics_clear_sandbox_and_still_publish() {
    let (mut session, state) = session_with(Shared {
        editor: Some("const = ;\n".to_string()),
        ..Shared::default()
    });
    let outcome = session.start(Instant::now());

    assert!(matches!(outcome, PassOutcome::Diagnostics(n) if n > 0));
    let state = state.lock();
    assert!(state.pane.contains("index.tsx"), "{}", state.pane);
    assert!(state.document.is_none());
    let fragment = state.fragment.as_deref().unwrap();
    assert_eq!(share::decode(fragment).unwrap().source, "const = ;\n");
}

struct FailingService;

impl CompilerService for FailingService {
    fn emit(
        &self,
        _host: &dyn CompilerHost,
        _options: &CompilerOptions,
        _pipeline: &TransformPipeline,
    ) -> Result<EmitResult, CompileError> {
        Err(CompileError::SourceNotFound("index.tsx".to_string()))
    }
}

struct PanickingService;

impl CompilerService for PanickingService {
    fn emit(
        &self,
        _host: &dyn CompilerHost,
        _options: &CompilerOptions,
        _pipeline: &TransformPipeline,
    ) -> Result<EmitResult, CompileError> {
        panic!("internal compiler error")
    }
}

#[test]
fn test_errors_are_shown_in_pane() {
    let (session, state) = session();
    let mut session = session.with_service(FailingService);
    state.lock().document = Some("stale".to_string());

    assert_eq!(session.start(Instant::now()), PassOutcome::Failed);
    let state = state.lock();
    assert_eq!(state.pane, "source file `index.tsx` could not be resolved");
    assert!(state.document.is_none());
    assert!(state.fragment.is_some());
}

#[test]
fn test_panics_are_shown_in_pane() {
    let (session, state) = session();
    let mut session = session.with_service(PanickingService);

    assert_eq!(session.start(Instant::now()), PassOutcome::Failed);
    assert_eq!(state.lock().pane, "internal compiler error");

    // the session survives and keeps scheduling
    let t0 = Instant::now();
    session.on_event(EditorEvent::ContentChanged("1;".to_string()), t0);
    assert_eq!(session.tick(t0 + WINDOW), Some(PassOutcome::Failed));
    assert_eq!(session.passes(), 2);
}
