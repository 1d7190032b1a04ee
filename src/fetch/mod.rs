mod client;
mod request;
mod response;

pub use client::{Browser, DEFAULT_TIMEOUT_MS, FetchOptions, execute};
pub use request::BridgeRequest;
pub use response::{BridgeResponse, MAX_BODY_CHARS};
