//! In-memory backend used by the unit tests.
//!
//! Behaves like the real server: assigns ids to new listings on write,
//! echoes the stored fleet back, and can be scripted to fail a call once
//! or to reorder what it stores.

use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;

use crate::api::AdminApi;
use crate::domain::{Atv, AtvId, ContentRecord, PendingAsset};
use crate::http::ApiError;

/// One recorded backend call.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListAtvs,
    ReplaceAtvs(Vec<Atv>),
    Upload(String),
    GetContent,
    ReplaceContent(ContentRecord),
}

#[derive(Default)]
struct FakeState {
    fleet: Vec<Atv>,
    content: ContentRecord,
    next_id: u64,
    reverse_on_replace: bool,
    fail_list: Option<ApiError>,
    fail_replace: Option<ApiError>,
    fail_upload: Option<ApiError>,
    fail_get_content: Option<ApiError>,
    fail_replace_content: Option<ApiError>,
    calls: Vec<Call>,
}

#[derive(Default)]
pub struct FakeApi {
    state: Mutex<FakeState>,
}

impl FakeApi {
    pub fn with_fleet(fleet: Vec<Atv>) -> Self {
        let api = Self::default();
        api.state.lock().unwrap().fleet = fleet;
        api
    }

    pub fn with_content(self, content: ContentRecord) -> Self {
        self.state.lock().unwrap().content = content;
        self
    }

    /// Store and return the fleet in reverse order on every replace.
    pub fn reorder_on_replace(self) -> Self {
        self.state.lock().unwrap().reverse_on_replace = true;
        self
    }

    pub fn fail_next_list(&self, err: ApiError) {
        self.state.lock().unwrap().fail_list = Some(err);
    }

    pub fn fail_next_replace(&self, err: ApiError) {
        self.state.lock().unwrap().fail_replace = Some(err);
    }

    pub fn fail_next_upload(&self, err: ApiError) {
        self.state.lock().unwrap().fail_upload = Some(err);
    }

    pub fn fail_next_get_content(&self, err: ApiError) {
        self.state.lock().unwrap().fail_get_content = Some(err);
    }

    pub fn fail_next_replace_content(&self, err: ApiError) {
        self.state.lock().unwrap().fail_replace_content = Some(err);
    }

    pub fn fleet(&self) -> Vec<Atv> {
        self.state.lock().unwrap().fleet.clone()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn replace_calls(&self) -> Vec<Vec<Atv>> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::ReplaceAtvs(atvs) => Some(atvs),
                _ => None,
            })
            .collect()
    }

    pub fn upload_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, Call::Upload(_)))
            .count()
    }
}

impl AdminApi for FakeApi {
    fn list_atvs(&self) -> Pin<Box<dyn Future<Output = Result<Vec<Atv>, ApiError>> + Send + '_>> {
        Box::pin(async move {
            let mut state = self.state.lock().unwrap();
            state.calls.push(Call::ListAtvs);
            if let Some(err) = state.fail_list.take() {
                return Err(err);
            }
            Ok(state.fleet.clone())
        })
    }

    fn replace_atvs(
        &self,
        atvs: Vec<Atv>,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Atv>, ApiError>> + Send + '_>> {
        Box::pin(async move {
            let mut state = self.state.lock().unwrap();
            state.calls.push(Call::ReplaceAtvs(atvs.clone()));
            if let Some(err) = state.fail_replace.take() {
                return Err(err);
            }

            let mut stored = atvs;
            for atv in stored.iter_mut().filter(|atv| atv.id.is_none()) {
                state.next_id += 1;
                atv.id = Some(AtvId::new(format!("srv-{}", state.next_id)));
            }
            if state.reverse_on_replace {
                stored.reverse();
            }
            state.fleet = stored.clone();
            Ok(stored)
        })
    }

    fn upload_image(
        &self,
        asset: PendingAsset,
    ) -> Pin<Box<dyn Future<Output = Result<String, ApiError>> + Send + '_>> {
        Box::pin(async move {
            let mut state = self.state.lock().unwrap();
            state.calls.push(Call::Upload(asset.file_name.clone()));
            if let Some(err) = state.fail_upload.take() {
                return Err(err);
            }
            Ok(format!("/atv_images/atvImage-{}", asset.file_name))
        })
    }

    fn get_content(&self) -> Pin<Box<dyn Future<Output = Result<ContentRecord, ApiError>> + Send + '_>> {
        Box::pin(async move {
            let mut state = self.state.lock().unwrap();
            state.calls.push(Call::GetContent);
            if let Some(err) = state.fail_get_content.take() {
                return Err(err);
            }
            Ok(state.content.clone())
        })
    }

    fn replace_content(
        &self,
        record: ContentRecord,
    ) -> Pin<Box<dyn Future<Output = Result<ContentRecord, ApiError>> + Send + '_>> {
        Box::pin(async move {
            let mut state = self.state.lock().unwrap();
            state.calls.push(Call::ReplaceContent(record.clone()));
            if let Some(err) = state.fail_replace_content.take() {
                return Err(err);
            }
            let mut stored = record;
            stored.title = stored.title.trim().to_string();
            state.content = stored.clone();
            Ok(stored)
        })
    }
}

/// A persisted listing with the given id, name and hourly price.
pub fn atv(id: &str, name: &str, price: f64) -> Atv {
    Atv {
        id: Some(AtvId::new(id)),
        name: name.to_string(),
        price,
        ..Atv::template()
    }
}
