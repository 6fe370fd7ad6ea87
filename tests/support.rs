#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use interactive_ruleset::{
    BoxFuture, MemoryStateStore, PreviewError, PreviewRequest, PreviewResponse, PreviewService,
    RecordingShell, RuleSetEditor, State, StateRecord, StateRegistry, StateStore, StoreError,
    StoreResult, WarningLog, Widget,
};

/// Id of the state every test editor edits.
pub const STATE: &str = "s1";

/// Preview service that renders `<widget-id>` and remembers every request.
#[derive(Default)]
pub struct FakePreview {
    requests: Mutex<Vec<PreviewRequest>>,
    fail: AtomicBool,
}

impl FakePreview {
    pub fn requests(&self) -> Vec<PreviewRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn respond(request: &PreviewRequest) -> PreviewResponse {
        PreviewResponse {
            widget: Widget {
                id: request.widget_id.clone(),
                params: request.params.clone(),
                raw: format!("<{}>", request.widget_id),
            },
        }
    }
}

impl PreviewService for FakePreview {
    fn render(&self, request: &PreviewRequest) -> BoxFuture<'_, Result<PreviewResponse, PreviewError>> {
        let request = request.clone();
        Box::pin(async move {
            self.requests.lock().unwrap().push(request.clone());
            if self.fail.load(Ordering::SeqCst) {
                return Err(PreviewError::Service("offline".into()));
            }
            Ok(Self::respond(&request))
        })
    }
}

/// Memory store that logs completed creates and saves in order and can be
/// told to fail.
#[derive(Default)]
pub struct ObservedStore {
    pub inner: MemoryStateStore,
    events: Mutex<Vec<String>>,
    fail_creates: AtomicBool,
    fail_saves: AtomicBool,
}

impl ObservedStore {
    pub fn with_record(record: StateRecord) -> Self {
        Self {
            inner: MemoryStateStore::new().with_record(STATE, record),
            ..Self::default()
        }
    }

    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    pub fn save_count(&self) -> usize {
        self.inner.save_count()
    }

    pub fn saved(&self) -> StateRecord {
        self.inner.record(STATE).expect("state was never saved")
    }

    pub fn set_failing_creates(&self, fail: bool) {
        self.fail_creates.store(fail, Ordering::SeqCst);
    }

    pub fn set_failing_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }
}

impl StateStore for ObservedStore {
    fn load_state(&self, state_id: &str) -> BoxFuture<'_, StoreResult<Option<StateRecord>>> {
        self.inner.load_state(state_id)
    }

    fn save_state(&self, state_id: &str, record: &StateRecord) -> BoxFuture<'_, StoreResult<()>> {
        let save = self.inner.save_state(state_id, record);
        Box::pin(async move {
            if self.fail_saves.load(Ordering::SeqCst) {
                return Err(StoreError::Other("disk full".into()));
            }
            save.await?;
            self.events.lock().unwrap().push("save".into());
            Ok(())
        })
    }

    fn create_state(&self, name: &str) -> BoxFuture<'_, StoreResult<State>> {
        let create = self.inner.create_state(name);
        Box::pin(async move {
            if self.fail_creates.load(Ordering::SeqCst) {
                return Err(StoreError::Other("quota exceeded".into()));
            }
            let state = create.await?;
            self.events
                .lock()
                .unwrap()
                .push(format!("create:{}", state.name));
            Ok(state)
        })
    }
}

pub fn states() -> StateRegistry {
    [
        State::new("s1", "Intro"),
        State::new("s2", "Quiz"),
        State::new("s3", "Outro"),
    ]
    .into_iter()
    .collect()
}

pub struct Harness {
    pub editor: RuleSetEditor,
    pub store: Arc<ObservedStore>,
    pub preview: Arc<FakePreview>,
    pub warnings: Arc<WarningLog>,
    pub shell: Arc<RecordingShell>,
}

pub fn harness(store: ObservedStore) -> Harness {
    let store = Arc::new(store);
    let preview = Arc::new(FakePreview::default());
    let warnings = Arc::new(WarningLog::new());
    let shell = Arc::new(RecordingShell::new());
    let editor = RuleSetEditor::builder(STATE, store.clone(), preview.clone())
        .states(states())
        .warnings(warnings.clone())
        .shell(shell.clone())
        .build();
    Harness {
        editor,
        store,
        preview,
        warnings,
        shell,
    }
}
