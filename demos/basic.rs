use interactive_ruleset::{Rule, Ruleset};

fn main() {
    env_logger::init();

    // A text-input question with a fallback that sends the learner back.
    let mut ruleset = Ruleset::with_default("submit", "Default", "retry");
    ruleset.insert(
        "submit",
        Rule::new("Equals", "correct")
            .with_input("x", "Paris")
            .with_feedback("Well done!"),
    );
    ruleset.insert("submit", Rule::new("StartsWith", "hint").with_input("x", "par"));

    println!("{ruleset}");
    for rule in ruleset.rules("submit").unwrap_or_default() {
        match rule.describe() {
            Ok(text) => println!("  {text} -> {}", rule.dest),
            Err(e) => println!("  {} ({e})", rule.kind),
        }
    }

    for answer in ["paris", "Parma", "London"] {
        match ruleset.classify("submit", answer) {
            Ok(Some(rule)) => println!("{answer:>8}: go to {} {}", rule.dest, rule.feedback),
            Ok(None) => println!("{answer:>8}: no rule matched"),
            Err(e) => println!("{answer:>8}: {e}"),
        }
    }
}
