use std::path::Path;

use crate::api::AdminApi;
use crate::domain::PendingAsset;

use super::EditorError;

/// Read an image picked from disk so it can be attached to a draft.
pub async fn load_asset(path: &Path) -> Result<PendingAsset, EditorError> {
    PendingAsset::from_path(path)
        .await
        .map_err(|err| EditorError::Asset(format!("{}: {err}", path.display())))
}

/// Turn a draft's image into a server path.
///
/// Without a pending asset the current path comes back unchanged and no
/// request is made. Otherwise the asset is uploaded and the server-assigned
/// path is returned.
pub async fn resolve(
    api: &dyn AdminApi,
    current_image: &str,
    asset: Option<PendingAsset>,
) -> Result<String, EditorError> {
    let Some(asset) = asset else {
        return Ok(current_image.to_string());
    };

    tracing::info!(file = %asset.file_name, size = asset.size_bytes(), "uploading image");
    match api.upload_image(asset).await {
        Ok(path) => Ok(path),
        Err(err) => {
            tracing::error!(error = %err, "image upload failed");
            Err(EditorError::Upload(err))
        }
    }
}
