use criterion::{black_box, criterion_group, criterion_main, Criterion};
use interactive_ruleset::{template, Rule, Ruleset};

/// Build a ruleset with `n` comparison rules for `submit` (none of which
/// match the benchmark answer) in front of the default fallback.
fn build_ruleset(n: usize) -> Ruleset {
    let mut ruleset = Ruleset::with_default("submit", "Default", "s0");
    let kinds = ["Equals", "StartsWith", "Contains", "CaseSensitiveEquals"];
    for i in 0..n {
        let kind = kinds[i % kinds.len()];
        ruleset.insert(
            "submit",
            Rule::new(kind, format!("s{}", i + 1)).with_input("x", format!("answer-{i}")),
        );
    }
    ruleset
}

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");

    for &n in &[5, 20, 50] {
        let ruleset = build_ruleset(n);
        group.bench_function(&format!("{n}_rules_fallback"), |b| {
            b.iter(|| ruleset.classify("submit", black_box("something else")));
        });
        group.bench_function(&format!("{n}_rules_first_hit"), |b| {
            b.iter(|| ruleset.classify("submit", black_box("ANSWER-0")));
        });
    }

    group.finish();
}

fn bench_edit(c: &mut Criterion) {
    let base = build_ruleset(20);

    c.bench_function("insert_and_swap_20", |b| {
        b.iter(|| {
            let mut ruleset = base.clone();
            let index = ruleset.insert("submit", Rule::new("Equals", "s99").with_input("x", "new"));
            ruleset.swap("submit", 0, index).unwrap();
            black_box(ruleset)
        });
    });
}

fn bench_describe(c: &mut Criterion) {
    let rule = Rule::new("StartsWith", "s1").with_input("x", "photosynthesis");

    c.bench_function("parse_template", |b| {
        b.iter(|| template::parse(black_box("is equal to {{x}}, ignoring case")));
    });
    c.bench_function("describe_rule", |b| {
        b.iter(|| black_box(&rule).describe());
    });
}

criterion_group!(benches, bench_classify, bench_edit, bench_describe);
criterion_main!(benches);
