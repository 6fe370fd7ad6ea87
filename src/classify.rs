use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::{ClassifyError, Rule};

/// Input name every comparison predicate reads its operand from.
const OPERAND: &str = "x";

/// Text comparison predicates a rule can name in its `rule` field.
///
/// All comparisons except [`CaseSensitiveEquals`](Predicate::CaseSensitiveEquals)
/// ignore case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Predicate {
    /// Matches every answer. Conventionally the last rule of an action.
    Default,
    Equals,
    CaseSensitiveEquals,
    StartsWith,
    Contains,
}

impl Predicate {
    pub const ALL: [Predicate; 5] = [
        Predicate::Default,
        Predicate::Equals,
        Predicate::CaseSensitiveEquals,
        Predicate::StartsWith,
        Predicate::Contains,
    ];

    /// The name stored in a rule's `rule` field.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Predicate::Default => "Default",
            Predicate::Equals => "Equals",
            Predicate::CaseSensitiveEquals => "CaseSensitiveEquals",
            Predicate::StartsWith => "StartsWith",
            Predicate::Contains => "Contains",
        }
    }

    /// Description template with `{{x}}` standing for the operand.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Predicate::Default => "Default",
            Predicate::Equals => "is equal to {{x}}, ignoring case",
            Predicate::CaseSensitiveEquals => "is equal to {{x}}, matching case",
            Predicate::StartsWith => "starts with {{x}}",
            Predicate::Contains => "contains {{x}}",
        }
    }

    /// Whether this predicate needs an operand bound to input `x`.
    #[must_use]
    pub fn takes_operand(self) -> bool {
        !matches!(self, Predicate::Default)
    }

    /// Apply the predicate. `operand` is ignored by `Default`.
    #[must_use]
    pub fn matches(self, answer: &str, operand: &str) -> bool {
        match self {
            Predicate::Default => true,
            Predicate::Equals => answer.to_lowercase() == operand.to_lowercase(),
            Predicate::CaseSensitiveEquals => answer == operand,
            Predicate::StartsWith => answer.to_lowercase().starts_with(&operand.to_lowercase()),
            Predicate::Contains => answer.to_lowercase().contains(&operand.to_lowercase()),
        }
    }
}

impl FromStr for Predicate {
    type Err = ClassifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Predicate::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| ClassifyError::UnknownPredicate { kind: s.to_owned() })
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Return the first rule in `rules` whose predicate accepts `answer`.
///
/// Rules after the match are not inspected, so a malformed rule below the
/// default never causes an error.
///
/// # Errors
///
/// Returns [`ClassifyError`] for the first rule reached that names an unknown
/// predicate or lacks its operand.
pub fn classify<'r>(rules: &'r [Rule], answer: &str) -> Result<Option<&'r Rule>, ClassifyError> {
    for rule in rules {
        let predicate: Predicate = rule.kind.parse()?;
        let operand = if predicate.takes_operand() {
            operand(rule)?
        } else {
            String::new()
        };
        if predicate.matches(answer, &operand) {
            return Ok(Some(rule));
        }
    }
    Ok(None)
}

fn operand(rule: &Rule) -> Result<String, ClassifyError> {
    match rule.inputs.get(OPERAND) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Null) | None => Err(ClassifyError::MissingInput {
            kind: rule.kind.clone(),
            input: OPERAND.to_owned(),
        }),
        Some(other) => Ok(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(kind: &str, x: &str, dest: &str) -> Rule {
        Rule::new(kind, dest).with_input("x", x)
    }

    #[test]
    fn parse_every_predicate() {
        for p in Predicate::ALL {
            assert_eq!(p.name().parse::<Predicate>().unwrap(), p);
        }
    }

    #[test]
    fn parse_unknown() {
        assert_eq!(
            "equals".parse::<Predicate>(),
            Err(ClassifyError::UnknownPredicate {
                kind: "equals".into()
            })
        );
    }

    #[test]
    fn equals_ignores_case() {
        assert!(Predicate::Equals.matches("HeLLo", "hello"));
        assert!(!Predicate::Equals.matches("hello!", "hello"));
    }

    #[test]
    fn case_sensitive_equals() {
        assert!(Predicate::CaseSensitiveEquals.matches("Hello", "Hello"));
        assert!(!Predicate::CaseSensitiveEquals.matches("hello", "Hello"));
    }

    #[test]
    fn starts_with_and_contains() {
        assert!(Predicate::StartsWith.matches("Paris, France", "paris"));
        assert!(!Predicate::StartsWith.matches("France", "paris"));
        assert!(Predicate::Contains.matches("I think it is PARIS", "paris"));
        assert!(!Predicate::Contains.matches("London", "paris"));
    }

    #[test]
    fn first_match_wins() {
        let rules = vec![
            rule("Contains", "cat", "s1"),
            rule("StartsWith", "the", "s2"),
            Rule::new("Default", "s0"),
        ];
        assert_eq!(classify(&rules, "the cat").unwrap().unwrap().dest, "s1");
        assert_eq!(classify(&rules, "the dog").unwrap().unwrap().dest, "s2");
        assert_eq!(classify(&rules, "a dog").unwrap().unwrap().dest, "s0");
    }

    #[test]
    fn no_default_no_match() {
        let rules = vec![rule("Equals", "yes", "s1")];
        assert_eq!(classify(&rules, "no").unwrap(), None);
    }

    #[test]
    fn missing_operand_is_error() {
        let rules = vec![Rule::new("Equals", "s1")];
        assert_eq!(
            classify(&rules, "anything"),
            Err(ClassifyError::MissingInput {
                kind: "Equals".into(),
                input: "x".into()
            })
        );
    }

    #[test]
    fn numeric_operand_compared_as_text() {
        let rules = vec![Rule::new("Equals", "s1").with_input("x", 42)];
        assert!(classify(&rules, "42").unwrap().is_some());
    }

    #[test]
    fn rules_after_match_are_not_checked() {
        let rules = vec![Rule::new("Default", "s0"), Rule::new("Bogus", "s1")];
        assert_eq!(classify(&rules, "x").unwrap().unwrap().dest, "s0");
    }
}
