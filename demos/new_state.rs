use std::sync::Arc;

use interactive_ruleset::{
    BoxFuture, MemoryStateStore, PreviewError, PreviewRequest, PreviewResponse, PreviewService,
    RuleDraft, RuleSetEditor, State, StateRecord, StateRegistry, WarningLog, Widget,
};

/// Renders every widget as a placeholder tag.
struct InlinePreview;

impl PreviewService for InlinePreview {
    fn render(&self, request: &PreviewRequest) -> BoxFuture<'_, Result<PreviewResponse, PreviewError>> {
        let widget = Widget {
            id: request.widget_id.clone(),
            params: request.params.clone(),
            raw: format!("<div class=\"{}\"></div>", request.widget_id),
        };
        Box::pin(async move { Ok(PreviewResponse { widget }) })
    }
}

fn main() {
    env_logger::init();

    let record = StateRecord {
        widget_id: "TextInput".into(),
        params: serde_json::Map::new(),
        rulesets: interactive_ruleset::Ruleset::with_default("submit", "Default", "intro"),
    };
    let store = Arc::new(MemoryStateStore::new().with_record("intro", record));
    let warnings = Arc::new(WarningLog::new());
    let states: StateRegistry = [State::new("intro", "Introduction")].into_iter().collect();

    let mut editor = RuleSetEditor::builder("intro", store.clone(), Arc::new(InlinePreview))
        .states(states)
        .warnings(warnings.clone())
        .build();

    pollster::block_on(async {
        if let Err(e) = editor.load().await {
            eprintln!("load failed: {e}");
            return;
        }

        // Route correct answers to a state that does not exist yet.
        editor.open_add_rule("submit");
        let draft = RuleDraft {
            rule: Some("Equals".into()),
            inputs: [("x".to_owned(), "42".into())].into_iter().collect(),
            dest: editor.config().new_state_sentinel.clone(),
            new_dest: "Celebration".into(),
            ..RuleDraft::default()
        };
        match editor.save_rule(draft).await {
            Ok(outcome) => println!("save: {outcome:?}"),
            Err(e) => eprintln!("save failed: {e}"),
        }
    });

    println!("destinations: {:?}", editor.all_dests());
    for state in store.created_states() {
        println!("created {state}");
    }
    if let Ok(Some(rule)) = editor.classify("submit", "42") {
        println!("answer 42 -> {}", editor.dest_name(&rule.dest).unwrap_or(&rule.dest));
    }
    for warning in warnings.messages() {
        println!("warning: {warning}");
    }
}
