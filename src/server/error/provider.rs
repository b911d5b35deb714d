use thiserror::Error;

/// Failures talking to SMS, email, OCR and identity providers.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("{provider} request failed: {source}")]
    Request {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider} responded with status {status}: {body}")]
    Status {
        provider: &'static str,
        status: u16,
        body: String,
    },

    #[error("{provider} returned an unexpected response: {reason}")]
    InvalidResponse {
        provider: &'static str,
        reason: String,
    },
}
