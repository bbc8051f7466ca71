/// Failure while fetching or normalizing a track from an upstream API.
///
/// Never surfaces past `Platform::get_track`; it only ends up in the log.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Failed to build http client: {0}")]
    Client(reqwest::Error),
    #[error("Failed to send http request: {0}")]
    Request(reqwest::Error),
    #[error("Unexpected status {0}")]
    Status(u16),
    #[error("Failed to parse response: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid field `{field}`: {reason}")]
    Field { field: &'static str, reason: String },
}
