/// Failure of a single backend call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (connect failure, timeout, reset).
    #[error("Network failure: {0}")]
    Network(String),

    /// The backend answered with a non-2xx status.
    #[error("Server returned status {status}{}", message_suffix(.message))]
    Server { status: u16, message: Option<String> },

    /// A 2xx answer whose body did not match the expected envelope.
    #[error("Unexpected response: {0}")]
    Decode(String),

    /// A 2xx answer whose envelope reported `success: false`.
    #[error("Request rejected{}", message_suffix(.message))]
    Rejected { message: Option<String> },

    /// An authenticated call was attempted without a session token.
    #[error("Not signed in")]
    Unauthenticated,
}

fn message_suffix(message: &Option<String>) -> String {
    message.as_deref().map(|m| format!(": {m}")).unwrap_or_default()
}

impl ApiError {
    /// Text suitable for a toast or inline error: the server's own message
    /// when it sent one, otherwise a generic description.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Server {
                message: Some(message),
                ..
            } => message.clone(),
            ApiError::Server { status, message: None } => format!("Request failed with status {status}"),
            ApiError::Rejected {
                message: Some(message),
            } => message.clone(),
            ApiError::Rejected { message: None } => "The server rejected the request".to_string(),
            ApiError::Network(_) => "Network failure: the server could not be reached".to_string(),
            ApiError::Decode(detail) => format!("Unexpected server response: {detail}"),
            ApiError::Unauthenticated => "Your session has ended, please sign in again".to_string(),
        }
    }

    pub fn is_unauthenticated(&self) -> bool {
        matches!(
            self,
            ApiError::Unauthenticated | ApiError::Server { status: 401, .. }
        )
    }
}
