//! Backend contract consumed by the admin panel.
//!
//! Writes are whole-resource replacements: the fleet is only ever written
//! as a complete list and the content record as a complete record. There
//! is no version field, so two admins saving at once overwrite each other.

use std::future::Future;
use std::pin::Pin;

use reqwest::multipart::{Form, Part};

use crate::domain::{Atv, ContentRecord, PendingAsset};
use crate::http::request::{ReplaceAtvsBody, UPLOAD_FIELD};
use crate::http::response::{DataEnvelope, ResultEnvelope, UploadResponse};
use crate::http::{ApiClient, ApiError, Auth};

/// REST operations the admin panel needs from the backend.
pub trait AdminApi: Send + Sync {
    /// `GET /atvs`
    fn list_atvs(&self) -> Pin<Box<dyn Future<Output = Result<Vec<Atv>, ApiError>> + Send + '_>>;

    /// `PUT /atvs` with the complete proposed fleet; resolves to the
    /// server's canonical fleet.
    fn replace_atvs(
        &self,
        atvs: Vec<Atv>,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Atv>, ApiError>> + Send + '_>>;

    /// `POST /upload`; resolves to the server-relative image path.
    fn upload_image(
        &self,
        asset: PendingAsset,
    ) -> Pin<Box<dyn Future<Output = Result<String, ApiError>> + Send + '_>>;

    /// `GET /contact`
    fn get_content(&self) -> Pin<Box<dyn Future<Output = Result<ContentRecord, ApiError>> + Send + '_>>;

    /// `PUT /contact` with the complete record.
    fn replace_content(
        &self,
        record: ContentRecord,
    ) -> Pin<Box<dyn Future<Output = Result<ContentRecord, ApiError>> + Send + '_>>;
}

/// [`AdminApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct RestApi {
    client: ApiClient,
}

impl RestApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

impl AdminApi for RestApi {
    fn list_atvs(&self) -> Pin<Box<dyn Future<Output = Result<Vec<Atv>, ApiError>> + Send + '_>> {
        Box::pin(async move {
            let envelope: DataEnvelope<Vec<Atv>> = self.client.get_json("/atvs", Auth::Optional).await?;
            Ok(envelope.data)
        })
    }

    fn replace_atvs(
        &self,
        atvs: Vec<Atv>,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Atv>, ApiError>> + Send + '_>> {
        Box::pin(async move {
            let body = ReplaceAtvsBody { atv_models: &atvs };
            let envelope: DataEnvelope<Vec<Atv>> =
                self.client.put_json("/atvs", &body, Auth::Required).await?;
            Ok(envelope.data)
        })
    }

    fn upload_image(
        &self,
        asset: PendingAsset,
    ) -> Pin<Box<dyn Future<Output = Result<String, ApiError>> + Send + '_>> {
        Box::pin(async move {
            let part = Part::bytes(asset.bytes)
                .file_name(asset.file_name)
                .mime_str(&asset.mime)
                .map_err(|err| ApiError::Decode(format!("Invalid upload type `{}`: {err}", asset.mime)))?;
            let form = Form::new().part(UPLOAD_FIELD, part);

            let response: UploadResponse = self.client.post_multipart("/upload", form, Auth::Required).await?;
            Ok(response.file_path)
        })
    }

    fn get_content(&self) -> Pin<Box<dyn Future<Output = Result<ContentRecord, ApiError>> + Send + '_>> {
        Box::pin(async move {
            let envelope: ResultEnvelope<ContentRecord> =
                self.client.get_json("/contact", Auth::Optional).await?;
            unwrap_result(envelope)
        })
    }

    fn replace_content(
        &self,
        record: ContentRecord,
    ) -> Pin<Box<dyn Future<Output = Result<ContentRecord, ApiError>> + Send + '_>> {
        Box::pin(async move {
            let envelope: ResultEnvelope<ContentRecord> =
                self.client.put_json("/contact", &record, Auth::Required).await?;
            unwrap_result(envelope)
        })
    }
}

fn unwrap_result<T>(envelope: ResultEnvelope<T>) -> Result<T, ApiError> {
    if !envelope.success {
        return Err(ApiError::Rejected {
            message: envelope.message,
        });
    }
    envelope
        .data
        .ok_or_else(|| ApiError::Decode("response is missing `data`".to_string()))
}
