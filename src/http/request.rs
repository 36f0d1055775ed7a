use serde::Serialize;

use crate::domain::Atv;

/// Body of `PUT /atvs`: the complete proposed fleet.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplaceAtvsBody<'a> {
    pub atv_models: &'a [Atv],
}

/// Multipart form field the backend reads the uploaded image from.
pub const UPLOAD_FIELD: &str = "atvImage";
