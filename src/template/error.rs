use thiserror::Error;

/// Errors from parsing or rendering a description template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("template syntax error: {message}")]
    Syntax { message: String },

    #[error("no input bound for placeholder '{name}'")]
    MissingInput { name: String },
}
