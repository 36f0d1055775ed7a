use crate::domain::AtvId;
use crate::http::ApiError;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EditorError {
    #[error("Another listing is already being edited")]
    DraftAlreadyOpen,

    #[error("No listing is being edited")]
    NoDraft,

    #[error("Listing has no id and cannot be edited")]
    NotPersisted,

    #[error("Listing {0} is no longer in the fleet")]
    UnknownEntity(AtvId),

    #[error("The ATV list has not finished loading; reload it before saving")]
    FleetNotLoaded,

    #[error("The page content has not been loaded; reload it before saving")]
    ContentNotLoaded,

    #[error("A save is already in progress")]
    CommitInFlight,

    #[error("Feature index {index} is out of range for {len} features")]
    FeatureIndexOutOfRange { index: usize, len: usize },

    #[error("Stat index {0} is out of range")]
    StatIndexOutOfRange(usize),

    #[error("Could not read image: {0}")]
    Asset(String),

    #[error("Image upload failed: {0}")]
    Upload(ApiError),

    #[error("Saving failed: {0}")]
    Save(ApiError),
}
