use crate::error::AppError;

/// Methods that carry the optional BODY argument as a request payload.
const METHODS_WITH_BODY: [&str; 3] = ["POST", "PUT", "PATCH"];

/// One HTTP request, built from argv and immutable afterwards.
///
/// Header names keep their input case and order; the transport decides how
/// they appear on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeRequest {
    pub method: String,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl BridgeRequest {
    /// Builds the request model from the raw positional arguments.
    ///
    /// The method is uppercased and the headers argument is parsed as a JSON
    /// object of string values. The body is attached only for POST, PUT, and
    /// PATCH; an empty body argument counts as absent.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidHeaders`] when the headers argument does
    /// not parse as a JSON object of string values.
    pub fn from_args(
        method: &str,
        url: &str,
        headers_json: &str,
        body: Option<&str>,
    ) -> Result<Self, AppError> {
        let method = method.to_ascii_uppercase();
        let headers = parse_headers(headers_json)?;
        let body = body
            .filter(|raw| !raw.is_empty() && METHODS_WITH_BODY.contains(&method.as_str()))
            .map(str::to_owned);
        Ok(Self {
            method,
            url: url.to_owned(),
            headers,
            body,
        })
    }
}

fn parse_headers(raw: &str) -> Result<Vec<(String, String)>, AppError> {
    let parsed: serde_json::Value =
        serde_json::from_str(raw).map_err(|e| AppError::InvalidHeaders(e.to_string()))?;
    let object = parsed
        .as_object()
        .ok_or_else(|| AppError::InvalidHeaders("headers must be a JSON object".into()))?;
    object
        .iter()
        .map(|(name, value)| {
            let value = value.as_str().ok_or_else(|| {
                AppError::InvalidHeaders(format!("header '{name}' must have a string value"))
            })?;
            Ok((name.clone(), value.to_owned()))
        })
        .collect()
}
