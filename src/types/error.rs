use thiserror::Error;

/// Errors from structural edits of a [`Ruleset`](super::Ruleset).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulesetError {
    #[error("no rules defined for action '{action}'")]
    UnknownAction { action: String },

    #[error("rule index {index} out of range for action '{action}' ({len} rules)")]
    IndexOutOfRange {
        action: String,
        index: usize,
        len: usize,
    },
}

/// Errors from classifying an answer against a rule list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifyError {
    #[error("unknown rule predicate '{kind}'")]
    UnknownPredicate { kind: String },

    #[error("rule '{kind}' is missing input '{input}'")]
    MissingInput { kind: String, input: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_action_message() {
        let err = RulesetError::UnknownAction {
            action: "submit".into(),
        };
        assert_eq!(err.to_string(), "no rules defined for action 'submit'");
    }

    #[test]
    fn index_out_of_range_message() {
        let err = RulesetError::IndexOutOfRange {
            action: "submit".into(),
            index: 4,
            len: 2,
        };
        assert_eq!(
            err.to_string(),
            "rule index 4 out of range for action 'submit' (2 rules)"
        );
    }

    #[test]
    fn unknown_predicate_message() {
        let err = ClassifyError::UnknownPredicate {
            kind: "IsPrime".into(),
        };
        assert_eq!(err.to_string(), "unknown rule predicate 'IsPrime'");
    }

    #[test]
    fn missing_input_message() {
        let err = ClassifyError::MissingInput {
            kind: "Equals".into(),
            input: "x".into(),
        };
        assert_eq!(err.to_string(), "rule 'Equals' is missing input 'x'");
    }
}
