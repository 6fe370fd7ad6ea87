use interactive_ruleset::{
    classify, ClassifyError, EditorConfig, Predicate, Rule, Ruleset, RulesetError, StateRecord,
};
use serde_json::json;

#[test]
fn insert_into_empty_list_keeps_single_rule() {
    let mut ruleset: Ruleset = serde_json::from_value(json!({"submit": []})).unwrap();
    assert_eq!(ruleset.insert("submit", Rule::new("Default", "s1")), 0);
    assert_eq!(ruleset.rules("submit").unwrap().len(), 1);
}

#[test]
fn default_only_list_still_inserts_before_it() {
    let mut ruleset = Ruleset::with_default("submit", "Default", "s1");
    ruleset.insert("submit", Rule::new("Equals", "s2").with_input("x", "a"));
    assert_eq!(ruleset.rules("submit").unwrap().last().unwrap().kind, "Default");
}

#[test]
fn swap_same_index_is_noop() {
    let mut ruleset = Ruleset::with_default("submit", "Default", "s1");
    let before = ruleset.clone();
    ruleset.swap("submit", 0, 0).unwrap();
    assert_eq!(ruleset, before);
}

#[test]
fn removing_last_rule_leaves_empty_list() {
    let mut ruleset = Ruleset::with_default("submit", "Default", "s1");
    ruleset.remove("submit", 0).unwrap();
    assert_eq!(ruleset.rules("submit"), Some(&[][..]));
    assert!(ruleset.is_empty());
    assert_eq!(
        ruleset.remove("submit", 0),
        Err(RulesetError::IndexOutOfRange {
            action: "submit".into(),
            index: 0,
            len: 0
        })
    );
}

#[test]
fn actions_are_independent() {
    let mut ruleset = Ruleset::with_default("submit", "Default", "s1");
    ruleset.insert("click", Rule::new("Default", "END"));
    ruleset.remove("click", 0).unwrap();
    assert_eq!(ruleset.rules("submit").unwrap().len(), 1);
    assert_eq!(ruleset.actions().collect::<Vec<_>>(), ["click", "submit"]);
}

#[test]
fn empty_answer_only_matches_empty_operand() {
    let rules = vec![
        Rule::new("Equals", "s1").with_input("x", "a"),
        Rule::new("StartsWith", "s2").with_input("x", ""),
    ];
    assert_eq!(classify(&rules, "").unwrap().unwrap().dest, "s2");
}

#[test]
fn unicode_case_folding() {
    let rules = vec![Rule::new("Equals", "s1").with_input("x", "ÉCOLE")];
    assert!(classify(&rules, "école").unwrap().is_some());
}

#[test]
fn unknown_predicate_before_match_is_error() {
    let rules = vec![Rule::new("Fuzzy", "s1"), Rule::new("Default", "s0")];
    assert_eq!(
        classify(&rules, "x"),
        Err(ClassifyError::UnknownPredicate {
            kind: "Fuzzy".into()
        })
    );
}

#[test]
fn empty_rule_list_classifies_nothing() {
    assert_eq!(classify(&[], "anything").unwrap(), None);
}

#[test]
fn predicate_display_matches_name() {
    for p in Predicate::ALL {
        assert_eq!(p.to_string(), p.name());
    }
}

#[test]
fn legacy_record_with_null_feedback() {
    let record: StateRecord = serde_json::from_value(json!({
        "interactive_widget": "TextInput",
        "interactive_params": {"rows": 1},
        "interactive_rulesets": {
            "submit": [
                {"rule": "Equals", "inputs": {"x": "hi"}, "dest": "s2", "feedback": null},
                {"rule": "Default", "attrs": {}, "inputs": {}, "dest": "s1", "feedback": "", "paramChanges": []}
            ]
        }
    }))
    .unwrap();

    let rules = record.rulesets.rules("submit").unwrap();
    assert_eq!(rules[0].feedback, "");
    assert!(rules[0].param_changes.is_empty());
    assert_eq!(rules[1].kind, "Default");
}

#[test]
fn custom_terminal_from_config() {
    let config = EditorConfig::from_json(r#"{"terminal": "FIN", "new_state_sentinel": "+"}"#).unwrap();
    assert_eq!(config.terminal, "FIN");
    assert_eq!(config.new_state_sentinel, "+");
    assert_eq!(config.preview_frame, "interactiveWidgetPreview");
}
