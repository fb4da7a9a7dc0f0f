//! Auth errors — one taxonomy shared by the backend client, the token store,
//! and the controller.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Errors produced by auth operations.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The HTTP request could not complete (connect, timeout, transport).
    #[error("request failed: {0}")]
    Network(String),

    /// The backend answered with a non-success status.
    ///
    /// Displays as the bare backend message so it can be shown verbatim.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// A success response body could not be parsed.
    #[error("unexpected response body: {0}")]
    Decode(String),

    /// The durable token slot could not be read or written.
    #[error("token storage failed: {0}")]
    Storage(#[from] std::io::Error),

    /// A stored or freshly issued token could not be turned into a user.
    #[error("session resolution failed: {0}")]
    Resolution(#[source] Box<AuthError>),
}

impl AuthError {
    /// Wrap any failure encountered while resolving a token.
    #[must_use]
    pub fn resolution(cause: Self) -> Self {
        match cause {
            already @ Self::Resolution(_) => already,
            other => Self::Resolution(Box::new(other)),
        }
    }

    /// Stable machine-readable code, used as a structured log field.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Network(_) => "E_NETWORK",
            Self::Rejected { .. } => "E_REJECTED",
            Self::Decode(_) => "E_DECODE",
            Self::Storage(_) => "E_STORAGE",
            Self::Resolution(_) => "E_RESOLUTION",
        }
    }

    /// Message suitable for showing to the user.
    ///
    /// Backend rejections surface the backend's own text; a rejection hidden
    /// behind a resolution failure surfaces that text too.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected { message, .. } => message.clone(),
            Self::Resolution(cause) => cause.user_message(),
            other => other.to_string(),
        }
    }
}
