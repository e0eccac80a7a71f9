//! Envelope returned by paginated list endpoints.

use serde::Deserialize;
use serde_json::Value;

/// One page of a list response.
///
/// Items stay as raw JSON until the caller's handler decodes them, so the
/// pagination loop never needs to know the resource type.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListEnvelope {
    #[serde(default)]
    pub results: Vec<Value>,
    /// Absolute URL of the following page, used verbatim.
    #[serde(default)]
    pub next: Option<String>,
}
