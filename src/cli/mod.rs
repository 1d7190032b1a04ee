#![allow(clippy::doc_markdown)]

use clap::{CommandFactory, Parser, ValueEnum};

use crate::fetch::DEFAULT_TIMEOUT_MS;

#[derive(Parser)]
#[command(
    name = "fetch-cli",
    version,
    about = "Single-shot HTTP requests with a real browser's TLS fingerprint",
    long_about = "fetch-cli issues exactly one HTTP request whose TLS handshake and HTTP/2 frames \
        match a real browser, then prints the response as a single JSON line on stdout. It is \
        designed to be spawned as a subprocess by agents and scripts that need responses \
        indistinguishable from browser traffic: arguments in argv, result on stdout, success or \
        failure in the exit code.\n\n\
        The response object carries the status code, its canonical reason phrase, all response \
        headers with lowercased names, and the decoded body truncated to 200000 characters. Every \
        failure - bad arguments, malformed headers JSON, transport errors, timeouts - is reported \
        the same way: a single {\"error\": ...} line on stdout and exit code 1.",
    after_long_help = "\
EXAMPLES:
  # Plain GET with no extra headers
  fetch-cli GET https://example.com/ '{}'

  # POST a JSON payload with custom headers
  fetch-cli POST https://api.example.com/v1/items \\
    '{\"content-type\": \"application/json\"}' '{\"name\": \"widget\"}'

  # Impersonate Firefox instead of Chrome
  fetch-cli --impersonate firefox GET https://example.com/ '{}'

  # Fail fast against a slow origin
  fetch-cli --timeout 5000 GET https://example.com/ '{}'

OUTPUT:
  Success: {\"status\": 200, \"statusText\": \"OK\", \"headers\": {\"content-type\": ...}, \"body\": ...}
  Failure: {\"error\": \"<message>\"}
  Header names are lowercased; the body is capped at 200000 characters.

EXIT CODES:
  0  Success (a response was received, whatever its HTTP status)
  1  Error (usage, malformed headers JSON, missing capability, request failure)

ENVIRONMENT VARIABLES:
  FETCH_CLI_IMPERSONATE  Browser profile to impersonate (chrome, firefox, safari, edge)
  FETCH_CLI_TIMEOUT      Request timeout in milliseconds (default: 30000)",
    term_width = 100
)]
pub struct Cli {
    /// HTTP method (GET, POST, PUT, PATCH, DELETE, ...); uppercased before sending
    #[arg(value_name = "METHOD")]
    pub method: String,

    /// Absolute URL to request
    #[arg(value_name = "URL")]
    pub url: String,

    /// Request headers as a JSON object of string values, e.g. '{"accept": "text/html"}'
    #[arg(value_name = "HEADERS_JSON")]
    pub headers_json: String,

    /// Request body, attached only for POST, PUT, and PATCH
    #[arg(value_name = "BODY", allow_hyphen_values = true)]
    pub body: Option<String>,

    /// Browser profile whose TLS/HTTP2 fingerprint the request presents
    #[arg(
        long,
        value_enum,
        default_value = "chrome",
        env = "FETCH_CLI_IMPERSONATE"
    )]
    pub impersonate: ImpersonateTarget,

    /// Total request timeout in milliseconds
    #[arg(
        long,
        value_name = "MS",
        default_value_t = DEFAULT_TIMEOUT_MS,
        env = "FETCH_CLI_TIMEOUT"
    )]
    pub timeout: u64,

    /// Pretty-print the JSON output (machine callers keep the single-line default)
    #[arg(long)]
    pub pretty: bool,
}

/// Browser profiles the transport can impersonate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ImpersonateTarget {
    Chrome,
    Firefox,
    Safari,
    Edge,
}

/// Builds the clap command definition (used by xtask for man pages and
/// shell completions).
#[must_use]
pub fn command() -> clap::Command {
    Cli::command()
}
