use serde::Serialize;
use serde_json::{Map, Value};

/// Response bodies are capped at this many characters before serialization.
pub const MAX_BODY_CHARS: usize = 200_000;

/// One HTTP response, shaped for single-line JSON output.
///
/// Serializes as `{"status": ..., "statusText": ..., "headers": {...},
/// "body": ...}` with header names lowercased and the body capped at
/// [`MAX_BODY_CHARS`].
#[derive(Debug, Serialize)]
pub struct BridgeResponse {
    pub status: u16,
    #[serde(rename = "statusText")]
    pub status_text: String,
    pub headers: Map<String, Value>,
    pub body: String,
}

impl BridgeResponse {
    /// Shapes raw transport output: header names are lowercased (last value
    /// wins, first appearance fixes the position) and the body is truncated
    /// to [`MAX_BODY_CHARS`] characters.
    #[must_use]
    pub fn new(
        status: u16,
        status_text: String,
        headers: impl IntoIterator<Item = (String, String)>,
        body: String,
    ) -> Self {
        Self {
            status,
            status_text,
            headers: fold_headers(headers),
            body: truncate_chars(body, MAX_BODY_CHARS),
        }
    }
}

fn fold_headers(headers: impl IntoIterator<Item = (String, String)>) -> Map<String, Value> {
    let mut folded = Map::new();
    for (name, value) in headers {
        folded.insert(name.to_ascii_lowercase(), Value::String(value));
    }
    folded
}

/// Truncates to a character count, never splitting a multibyte character.
fn truncate_chars(mut text: String, max_chars: usize) -> String {
    if let Some((boundary, _)) = text.char_indices().nth(max_chars) {
        text.truncate(boundary);
    }
    text
}
