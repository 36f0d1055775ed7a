use serde::Deserialize;

/// `{ data: T }` envelope used by the fleet endpoints.
#[derive(Debug, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

/// `{ success, data?, message? }` envelope used by the content endpoints.
#[derive(Debug, Deserialize)]
pub struct ResultEnvelope<T> {
    pub success: bool,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub file_path: String,
}

/// Error body some endpoints attach to non-2xx answers.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    /// Extract the server message from a raw error body, if there is one.
    pub fn message_from(raw: &[u8]) -> Option<String> {
        serde_json::from_slice::<ErrorBody>(raw)
            .ok()
            .and_then(|body| body.message)
            .map(|message| message.trim().to_string())
            .filter(|message| !message.is_empty())
    }
}
