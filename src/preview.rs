//! Widget preview rendering requests.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use url::form_urlencoded;

use crate::store::BoxFuture;
use crate::{ParamChange, Widget};

/// Errors from building a preview request or from the preview service.
#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("failed to encode preview request: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("failed to decode preview response: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("preview service error: {0}")]
    Service(String),
}

/// A request to render widget `widget_id` with `params`.
///
/// Sent as a form-encoded POST to `<prefix><widget_id>` carrying two fields:
/// `params` and `state_params`, each a JSON document.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewRequest {
    pub widget_id: String,
    pub params: Map<String, Value>,
    /// Parameter changes in effect for the state, passed as context.
    pub state_params: Vec<ParamChange>,
}

impl PreviewRequest {
    pub const CONTENT_TYPE: &'static str = "application/x-www-form-urlencoded";

    /// Request path under `prefix`, with the widget id percent-encoded.
    #[must_use]
    pub fn path(&self, prefix: &str) -> String {
        let id: String = form_urlencoded::byte_serialize(self.widget_id.as_bytes()).collect();
        format!("{prefix}{id}")
    }

    /// The form-encoded request body.
    ///
    /// # Errors
    ///
    /// Returns [`PreviewError::Encode`] if a parameter cannot be serialized.
    pub fn form_body(&self) -> Result<String, PreviewError> {
        let params = serde_json::to_string(&self.params).map_err(PreviewError::Encode)?;
        let state_params =
            serde_json::to_string(&self.state_params).map_err(PreviewError::Encode)?;
        Ok(form_urlencoded::Serializer::new(String::new())
            .append_pair("params", &params)
            .append_pair("state_params", &state_params)
            .finish())
    }
}

/// Response of the preview service. `widget.raw` holds the markup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewResponse {
    pub widget: Widget,
}

impl PreviewResponse {
    /// Decode a JSON response body.
    ///
    /// # Errors
    ///
    /// Returns [`PreviewError::Decode`] if the body is not a widget response.
    pub fn from_json(body: &str) -> Result<Self, PreviewError> {
        serde_json::from_str(body).map_err(PreviewError::Decode)
    }
}

/// Renders widget markup for a given configuration.
pub trait PreviewService: Send + Sync {
    fn render(&self, request: &PreviewRequest) -> BoxFuture<'_, Result<PreviewResponse, PreviewError>>;
}

/// Identifies one issued preview request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PreviewTicket(u64);

impl PreviewTicket {
    #[must_use]
    pub fn sequence(self) -> u64 {
        self.0
    }
}

/// Issues increasing [`PreviewTicket`]s and tells whether a ticket is still
/// the most recent one, so only the latest request's response is applied.
#[derive(Debug, Default)]
pub struct PreviewSequencer {
    issued: u64,
}

impl PreviewSequencer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self) -> PreviewTicket {
        self.issued += 1;
        PreviewTicket(self.issued)
    }

    #[must_use]
    pub fn is_current(&self, ticket: PreviewTicket) -> bool {
        ticket.0 == self.issued
    }
}

/// A preview request that has been issued but whose response has not been
/// applied yet.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingPreview {
    pub ticket: PreviewTicket,
    pub request: PreviewRequest,
}
