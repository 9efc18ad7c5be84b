//! Error types for capture loading, script generation and replay.

/// Replay errors.
#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    /// DNS, connect, TLS or protocol failure while talking to the server.
    #[error("transport error: {message}")]
    Transport { message: String },

    /// Method string is not a valid HTTP token.
    #[error("invalid method: {method:?}")]
    InvalidMethod { method: String },

    /// Header name or value the HTTP stack cannot put on the wire.
    #[error("invalid header {name:?}: {reason}")]
    InvalidHeader { name: String, reason: String },

    /// Target URL could not be parsed.
    #[error("invalid url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Capture file could not be parsed.
    #[error("invalid capture {source_name}: {message}")]
    Capture {
        source_name: String,
        message: String,
    },

    /// Capture carries neither an explicit host nor a Host header.
    #[error("capture has no host: set `host` or include a Host header")]
    MissingHost,

    /// Script generation failed.
    #[error("generate error: {message}")]
    Generate { message: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ReplayError {
    /// Exit code for CLI.
    pub fn exit_code(&self) -> i32 {
        match self {
            // The exchange never completed
            Self::Transport { .. } => 1,
            Self::InvalidMethod { .. } => 1,
            Self::InvalidHeader { .. } => 1,
            Self::InvalidUrl { .. } => 1,

            // Inputs and outputs around the exchange
            Self::Capture { .. } => 2,
            Self::MissingHost => 2,
            Self::Generate { .. } => 2,
            Self::Io(_) => 2,
        }
    }
}

impl From<reqwest::Error> for ReplayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            if let Some(url) = err.url() {
                return Self::InvalidUrl {
                    url: url.to_string(),
                    reason: err.to_string(),
                };
            }
        }
        Self::Transport {
            message: error_chain(&err),
        }
    }
}

// reqwest hides the interesting part (DNS, TLS, refused) in the source chain.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Result type for replay operations.
pub type ReplayResult<T> = Result<T, ReplayError>;
