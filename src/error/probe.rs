use thiserror::Error;

/// Failure causes for a single network operation inside a probe or load
/// worker. Probes capture these into their reports instead of propagating;
/// only the cancellation causes cut a run short.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("DNS resolution for '{host}' failed: {source}")]
    Resolve {
        host: String,
        #[source]
        source: std::io::Error,
    },
    #[error("No addresses resolved for '{host}'.")]
    NoAddresses { host: String },
    #[error("Connection to '{authority}' failed: {source}")]
    Connect {
        authority: String,
        #[source]
        source: std::io::Error,
    },
    #[error("TLS handshake with '{host}' failed: {source}")]
    Handshake {
        host: String,
        #[source]
        source: native_tls::Error,
    },
    #[error("Request failed: {source}")]
    Request {
        #[from]
        source: reqwest::Error,
    },
    #[error("Probe task was lost: {source}")]
    Task {
        #[source]
        source: tokio::task::JoinError,
    },
    #[error("Operation cancelled.")]
    Cancelled,
    #[error("Deadline exceeded.")]
    DeadlineExceeded,
}

impl ProbeError {
    /// True for the causes that short-circuit remaining retries.
    #[must_use]
    pub const fn is_cancellation(&self) -> bool {
        matches!(self, ProbeError::Cancelled | ProbeError::DeadlineExceeded)
    }
}
