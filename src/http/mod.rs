pub mod client;
pub mod error;
pub mod request;
pub mod response;

pub use client::{ApiClient, Auth};
pub use error::ApiError;
