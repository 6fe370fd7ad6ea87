//! Rule description templates.
//!
//! A template is plain text with `{{name}}` placeholders that are filled from
//! a rule's inputs, e.g. `starts with {{x}}`.

mod error;
mod grammar;

use serde_json::{Map, Value};

pub use error::TemplateError;

/// One piece of a parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Placeholder(String),
}

/// A parsed description template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Placeholder names in order of appearance, duplicates included.
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Placeholder(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Substitute every placeholder with the matching input. String inputs are
    /// inserted verbatim, other JSON values in their JSON text form.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::MissingInput`] for the first placeholder with
    /// no input.
    pub fn render(&self, inputs: &Map<String, Value>) -> Result<String, TemplateError> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(name) => match inputs.get(name) {
                    Some(Value::String(s)) => out.push_str(s),
                    Some(Value::Null) | None => {
                        return Err(TemplateError::MissingInput { name: name.clone() });
                    }
                    Some(other) => out.push_str(&other.to_string()),
                },
            }
        }
        Ok(out)
    }
}

/// Parse template text into a [`Template`].
///
/// # Errors
///
/// Returns [`TemplateError::Syntax`] if a `{{` is not followed by a
/// placeholder name and a closing `}}`.
pub fn parse(input: &str) -> Result<Template, TemplateError> {
    use winnow::Parser;
    grammar::template
        .parse(input)
        .map(|segments| Template { segments })
        .map_err(|e| TemplateError::Syntax {
            message: e.to_string(),
        })
}
