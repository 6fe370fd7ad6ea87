use winnow::combinator::{alt, cut_err, not, repeat, terminated};
use winnow::error::{ModalResult, StrContext, StrContextValue};
use winnow::prelude::*;
use winnow::token::{take_till, take_while};

use super::Segment;

fn ws(input: &mut &str) -> ModalResult<()> {
    take_while(0.., |c: char| c == ' ' || c == '\t')
        .void()
        .parse_next(input)
}

fn name<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    (
        take_while(1.., |c: char| c.is_ascii_alphabetic() || c == '_'),
        take_while(0.., |c: char| c.is_ascii_alphanumeric() || c == '_'),
    )
        .take()
        .parse_next(input)
}

// `{{ name }}`; once `{{` is seen the placeholder must be well formed.
fn placeholder(input: &mut &str) -> ModalResult<Segment> {
    "{{".parse_next(input)?;
    cut_err(terminated((ws, name, ws).map(|(_, n, _)| n), "}}"))
        .context(StrContext::Expected(StrContextValue::Description(
            "placeholder name followed by '}}'",
        )))
        .map(|n: &str| Segment::Placeholder(n.to_owned()))
        .parse_next(input)
}

// Text up to the next brace, or a lone `{` that does not open a placeholder.
fn literal<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    alt((take_till(1.., '{'), ('{', not('{')).take())).parse_next(input)
}

pub(super) fn template(input: &mut &str) -> ModalResult<Vec<Segment>> {
    let segments: Vec<Segment> = repeat(
        0..,
        alt((
            placeholder,
            literal.map(|s: &str| Segment::Literal(s.to_owned())),
        )),
    )
    .parse_next(input)?;
    Ok(merge_literals(segments))
}

fn merge_literals(segments: Vec<Segment>) -> Vec<Segment> {
    let mut out: Vec<Segment> = Vec::with_capacity(segments.len());
    for segment in segments {
        if let (Some(Segment::Literal(prev)), Segment::Literal(next)) = (out.last_mut(), &segment) {
            prev.push_str(next);
            continue;
        }
        out.push(segment);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Vec<Segment> {
        template.parse(input).unwrap()
    }

    #[test]
    fn plain_text() {
        assert_eq!(parse("Default"), [Segment::Literal("Default".into())]);
    }

    #[test]
    fn empty_input() {
        assert!(parse("").is_empty());
    }

    #[test]
    fn placeholder_with_spaces() {
        assert_eq!(
            parse("is {{ x }}"),
            [
                Segment::Literal("is ".into()),
                Segment::Placeholder("x".into())
            ]
        );
    }

    #[test]
    fn lone_brace_is_literal() {
        assert_eq!(parse("a { b"), [Segment::Literal("a { b".into())]);
    }

    #[test]
    fn unclosed_placeholder_fails() {
        assert!(template.parse("is {{x").is_err());
    }

    #[test]
    fn empty_placeholder_fails() {
        assert!(template.parse("is {{}}").is_err());
    }
}
