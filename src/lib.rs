//! Client library for the CareNest orphanage-management API.
//!
//! [`context::AppContext`] ties together configuration, the HTTP client and
//! the persisted session; the view-models in [`screens`] take it by reference.

pub mod api;
pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod models;
pub mod screens;
pub mod session;

pub use context::AppContext;
pub use error::{ClientError, ClientResult};
