use crate::api::AdminApi;
use crate::domain::{ContentField, ContentRecord};
use crate::editor::EditorError;
use crate::http::ApiError;
use crate::notify::Toasts;

use super::{Generation, Settled, Ticket};

/// A content save ready to be sent.
#[derive(Debug, Clone)]
pub struct SavePlan {
    pub ticket: Ticket,
    pub record: ContentRecord,
}

/// The about/contact record: server copy plus the admin's working copy.
#[derive(Debug, Clone, Default)]
pub struct ContentStore {
    record: Option<ContentRecord>,
    working: ContentRecord,
    error: Option<String>,
    loading: bool,
    saving: bool,
    generation: Generation,
}

impl ContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last copy confirmed by the server, if one was loaded.
    pub fn record(&self) -> Option<&ContentRecord> {
        self.record.as_ref()
    }

    pub fn working(&self) -> &ContentRecord {
        &self.working
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn is_dirty(&self) -> bool {
        match &self.record {
            Some(record) => record != &self.working,
            None => false,
        }
    }

    pub fn invalidate(&mut self) {
        self.generation.bump();
        self.loading = false;
        self.saving = false;
    }

    /// Forget the record and the working copy.
    pub fn clear(&mut self) {
        self.invalidate();
        self.record = None;
        self.working = ContentRecord::default();
        self.error = None;
    }

    pub fn begin_load(&mut self) -> Ticket {
        self.loading = true;
        self.generation.ticket()
    }

    pub fn finish_load(&mut self, ticket: Ticket, result: Result<ContentRecord, ApiError>) -> Settled {
        if !self.generation.is_current(ticket) {
            tracing::debug!("dropping content load answer for an invalidated view");
            return Settled::Stale;
        }
        self.loading = false;

        match result {
            Ok(record) => {
                tracing::info!("content record loaded");
                self.working = record.clone();
                self.record = Some(record);
                self.error = None;
                Settled::Applied
            }
            Err(err) => {
                tracing::error!(error = %err, "content load failed");
                self.error = Some(format!("Error loading page content: {}", err.user_message()));
                Settled::Failed(err)
            }
        }
    }

    /// Change one field of the working copy.
    pub fn edit(&mut self, field: ContentField, value: String) -> Result<(), EditorError> {
        if field.apply(&mut self.working, value) {
            Ok(())
        } else {
            match field {
                ContentField::StatValue(index) | ContentField::StatLabel(index) => {
                    Err(EditorError::StatIndexOutOfRange(index))
                }
                _ => Ok(()),
            }
        }
    }

    /// Throw away unsaved edits.
    pub fn reset(&mut self) {
        if let Some(record) = &self.record {
            self.working = record.clone();
        }
    }

    /// Refused until a load has succeeded: the working copy would otherwise
    /// be the empty default and the write would blank the server record.
    pub fn prepare_save(&mut self) -> Result<SavePlan, EditorError> {
        if self.saving {
            return Err(EditorError::CommitInFlight);
        }
        if self.record.is_none() || self.loading {
            return Err(EditorError::ContentNotLoaded);
        }
        self.saving = true;
        Ok(SavePlan {
            ticket: self.generation.ticket(),
            record: self.working.clone(),
        })
    }

    pub fn finish_save(
        &mut self,
        ticket: Ticket,
        result: Result<ContentRecord, ApiError>,
        toasts: &mut Toasts,
        now: u64,
    ) -> Settled {
        if !self.generation.is_current(ticket) {
            tracing::debug!("dropping content save answer for an invalidated view");
            return Settled::Stale;
        }
        self.saving = false;

        match result {
            Ok(record) => {
                tracing::info!("content record saved");
                self.working = record.clone();
                self.record = Some(record);
                toasts.success("Saved", "Changes saved successfully!", now);
                Settled::Applied
            }
            Err(err) => {
                tracing::warn!(error = %err, "content save failed");
                toasts.error("Error", format!("Error saving data: {}", err.user_message()), now);
                Settled::Failed(err)
            }
        }
    }

    pub async fn load(&mut self, api: &dyn AdminApi) -> Settled {
        let ticket = self.begin_load();
        let result = api.get_content().await;
        self.finish_load(ticket, result)
    }

    pub async fn save(&mut self, api: &dyn AdminApi, toasts: &mut Toasts, now: u64) -> Result<(), EditorError> {
        let plan = self.prepare_save()?;
        let result = api.replace_content(plan.record).await;
        self.finish_save(plan.ticket, result, toasts, now)
            .into_result()
            .map_err(EditorError::Save)
    }
}
