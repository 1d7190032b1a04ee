use std::fmt;

use serde::Serialize;

/// Usage line reported when the required positional arguments are missing.
pub const USAGE: &str = "Usage: fetch-cli <method> <url> <headers_json> [body]";

/// Rebuild instruction reported when the emulation transport is compiled out.
pub const CAPABILITY_HINT: &str =
    "browser emulation not compiled in. Run: cargo build --features emulation";

/// Every failure the bridge can report. Each variant converges on the same
/// external shape: one `{"error": <message>}` line on stdout and exit code 1.
#[derive(Debug)]
pub enum AppError {
    /// Fewer than three positional arguments, or argv otherwise unparseable.
    Usage,
    /// HEADERS_JSON is not a JSON object of string values.
    InvalidHeaders(String),
    /// The emulation transport was compiled out of this binary.
    MissingCapability,
    /// Client construction or the network call itself failed.
    Request(String),
    /// The response could not be serialized for output.
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Usage => write!(f, "{USAGE}"),
            Self::MissingCapability => write!(f, "{CAPABILITY_HINT}"),
            Self::InvalidHeaders(message) | Self::Request(message) | Self::Internal(message) => {
                write!(f, "{message}")
            }
        }
    }
}

impl std::error::Error for AppError {}

impl AppError {
    #[must_use]
    pub fn to_json(&self) -> String {
        let message = self.to_string();
        let output = ErrorOutput { error: &message };
        serde_json::to_string(&output).unwrap_or_else(|_| format!(r#"{{"error":"{message}"}}"#))
    }

    /// Failures share stdout with successful responses; the caller tells
    /// them apart by the exit code and the presence of the `error` key.
    pub fn print_json_stdout(&self) {
        println!("{}", self.to_json());
    }
}

#[derive(Serialize)]
struct ErrorOutput<'a> {
    error: &'a str,
}
