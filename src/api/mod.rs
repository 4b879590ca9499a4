pub mod client;
pub mod endpoints;
pub mod envelope;
pub mod files;

pub use client::{CareNestClient, SignInPayload};
pub use endpoints::Endpoint;
pub use envelope::ApiEnvelope;
pub use files::{resolve_object_urls, ResolvedUrls, PLACEHOLDER_IMAGE};
