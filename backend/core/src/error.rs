use thiserror::Error;

/// Top-level error type for the PlantGuard diagnosis flow.
///
/// Everything below the HTTP/CLI boundary fails with one of these; the
/// boundary converts them into the Error view with the `Display` message.
#[derive(Debug, Error)]
pub enum DiagnosisError {
    #[error("unsupported media type \"{0}\": please upload a valid image file")]
    InvalidMediaType(String),

    #[error("could not reach the inference endpoint: {0}")]
    Transport(String),

    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("empty response from AI")]
    EmptyResponse,

    #[error("failed to parse diagnosis results: {0}")]
    MalformedJson(String),

    #[error("invalid diagnosis structure: {0}")]
    InvalidSchema(String),

    #[error("invalid transition: cannot {action} while {from}")]
    InvalidTransition {
        from: &'static str,
        action: &'static str,
    },
}

impl DiagnosisError {
    /// Generic status-coded API error, used when the endpoint's reply
    /// carries no error message of its own.
    pub fn api_status(status: u16) -> Self {
        Self::Api {
            status,
            message: format!("API error: {status}"),
        }
    }
}
