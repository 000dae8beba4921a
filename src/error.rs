//! Error taxonomy for classification requests.
//!
//! Every failure a request can hit maps to exactly one variant here; the
//! HTTP layer translates variants to status codes. Metadata-lookup failure
//! has no variant: it degrades to a fallback symbol instead of failing the
//! request.

use thiserror::Error;

/// Failure talking to an external provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Transport-level failure (connect, TLS, timeout on the socket).
    #[error("provider request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The provider answered with a non-success status.
    #[error("provider returned status {status}: {body}")]
    Status { status: u16, body: String },
    /// The provider payload did not match the expected shape.
    #[error("provider returned malformed payload: {0}")]
    Malformed(String),
}

/// Request-level failure of the classification pipeline.
#[derive(Debug, Error)]
pub enum ClassifyError {
    /// No qualifying sell inside the scan bounds. Not a transport failure;
    /// carries the page count for diagnosability.
    #[error(
        "no sell transaction found for token {token} in wallet {wallet}; scanned {pages_scanned} pages"
    )]
    NoSellFound {
        wallet: String,
        token: String,
        pages_scanned: u32,
    },
    /// The request exceeded its fixed time budget. Partial work is
    /// discarded, never cached.
    #[error("request timed out after {seconds}s")]
    Timeout { seconds: u64 },
    /// A history or metadata provider call failed; propagated unretried.
    #[error("upstream provider failure: {0}")]
    Upstream(#[from] ProviderError),
    /// The winning venue has no registry entry. The registry and the
    /// scorer must agree on the venue universe, so this is a bug, not an
    /// input condition.
    #[error("unknown venue {program_id} won attribution with score {score}")]
    UnknownVenue { program_id: String, score: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_sell_message_includes_diagnostics() {
        let err = ClassifyError::NoSellFound {
            wallet: "Wal1et".to_string(),
            token: "M1nt".to_string(),
            pages_scanned: 7,
        };
        let message = err.to_string();
        assert!(message.contains("Wal1et"));
        assert!(message.contains("M1nt"));
        assert!(message.contains("7 pages"));
    }

    #[test]
    fn provider_error_converts_to_upstream() {
        let provider = ProviderError::Status {
            status: 503,
            body: "overloaded".to_string(),
        };
        let err: ClassifyError = provider.into();
        assert!(matches!(err, ClassifyError::Upstream(_)));
        assert!(err.to_string().contains("503"));
    }
}
