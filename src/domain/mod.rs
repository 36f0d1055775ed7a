mod asset;
mod atv;
mod content;

pub use asset::PendingAsset;
pub use atv::{Atv, AtvField, AtvId, DriveType, Transmission};
pub use content::{ContentField, ContentRecord, STAT_COUNT};
