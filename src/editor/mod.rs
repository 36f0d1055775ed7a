mod confirm;
mod delete;
mod draft;
mod error;
pub mod upload;

pub use confirm::ConfirmFlow;
pub use delete::{DeleteFlow, DeletePlan, DeleteTarget, confirm_delete, finish_delete, plan_delete};
pub use draft::{CommitOutcome, CommitPlan, Draft, DraftEditor, DraftMode, run_commit};
pub use error::EditorError;
