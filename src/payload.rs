//! Extraction of the Gherkin document from an upstream response body.
//!
//! The generator service either answers with a JSON object carrying the
//! document in a `feature_text` field, or with the document itself.

use serde::Deserialize;

/// The field of a JSON response that carries the Gherkin document.
pub const FEATURE_TEXT_FIELD: &str = "feature_text";

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Payload {
    Response { feature_text: Option<String> },
    Text(String),
}

/// Returns the Gherkin document carried by a response body.
///
/// - A JSON object with a non-empty string `feature_text` yields that field.
/// - A JSON string yields the decoded string.
/// - Anything else, including plain Gherkin, is returned verbatim.
#[must_use]
pub fn extract_feature_text(body: &str) -> String {
    match serde_json::from_str::<Payload>(body) {
        Ok(Payload::Response {
            feature_text: Some(text),
        }) if !text.is_empty() => {
            tracing::debug!("Using '{FEATURE_TEXT_FIELD}' from JSON response");
            text
        }
        Ok(Payload::Text(text)) => {
            tracing::debug!("Using JSON string response");
            text
        }
        _ => body.to_string(),
    }
}
