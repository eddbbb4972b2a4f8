use thiserror::Error;

/// Why a single gateway request produced nothing usable.
///
/// These never fail a whole fetch cycle; the orchestrator turns them into
/// placeholder observations.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("gateway responded with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed gateway response: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("UV index missing from response")]
    MissingUv,
}
