use std::path::Path;

/// An image picked for a draft but not uploaded yet.
#[derive(Clone, PartialEq, Eq)]
pub struct PendingAsset {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl PendingAsset {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let mime = mime_for(&file_name).to_string();
        Self {
            file_name,
            mime,
            bytes,
        }
    }

    pub async fn from_path(path: &Path) -> Result<Self, std::io::Error> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self::new(file_name, bytes))
    }

    pub fn size_bytes(&self) -> usize {
        self.bytes.len()
    }
}

// Image bytes are left out of debug output.
impl std::fmt::Debug for PendingAsset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingAsset")
            .field("file_name", &self.file_name)
            .field("mime", &self.mime)
            .field("len", &self.bytes.len())
            .finish()
    }
}

fn mime_for(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_follows_extension() {
        assert_eq!(PendingAsset::new("grizzly.PNG", vec![1]).mime, "image/png");
        assert_eq!(PendingAsset::new("a.jpeg", vec![]).mime, "image/jpeg");
        assert_eq!(PendingAsset::new("noext", vec![]).mime, "application/octet-stream");
    }

    #[tokio::test]
    async fn reads_file_from_disk() {
        let path = std::env::temp_dir().join(format!("atv-asset-{}.webp", std::process::id()));
        tokio::fs::write(&path, [7u8, 8, 9]).await.unwrap();

        let asset = PendingAsset::from_path(&path).await.unwrap();
        assert_eq!(asset.size_bytes(), 3);
        assert_eq!(asset.mime, "image/webp");
        assert!(asset.file_name.ends_with(".webp"));

        let _ = tokio::fs::remove_file(path).await;
    }
}
