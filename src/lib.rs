//! Admin client for the ATV rental site: fleet listings and the
//! about/contact page, edited against the rental backend's REST API.

pub mod api;
pub mod auth;
pub mod config;
pub mod domain;
pub mod editor;
pub mod http;
pub mod notify;
pub mod storage;
pub mod store;

#[cfg(test)]
pub mod testing;
