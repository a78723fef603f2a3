//! Inbound webhook request as received on the wire.

/// An inbound webhook delivery, captured before any interpretation.
///
/// `body` holds the exact bytes received; it must never be re-serialized
/// before signature verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookRequest {
    pub body: Vec<u8>,
    pub signature: Option<String>,
    pub content_type: Option<String>,
    /// Processor-assigned delivery id, used for log correlation only.
    pub event_id: Option<String>,
}

impl WebhookRequest {
    pub fn new(body: impl Into<Vec<u8>>, signature: Option<String>) -> Self {
        Self {
            body: body.into(),
            signature,
            content_type: None,
            event_id: None,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn with_event_id(mut self, event_id: impl Into<String>) -> Self {
        self.event_id = Some(event_id.into());
        self
    }
}
