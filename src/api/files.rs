use futures::future::join_all;
use serde::Serialize;
use std::collections::HashMap;

use super::client::CareNestClient;

/// Shown while a URL is unresolved or when resolution failed.
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/50";

/// Display URLs keyed by record id.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResolvedUrls {
    urls: HashMap<String, String>,
    failures: HashMap<String, String>,
}

impl ResolvedUrls {
    pub fn get(&self, record_id: &str) -> Option<&str> {
        self.urls.get(record_id).map(String::as_str)
    }

    pub fn url_or_placeholder(&self, record_id: &str) -> &str {
        self.get(record_id).unwrap_or(PLACEHOLDER_IMAGE)
    }

    pub fn failure(&self, record_id: &str) -> Option<&str> {
        self.failures.get(record_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }
}

/// Resolve each record's object reference into a display URL.
///
/// `refs` pairs a record id with its (possibly absent) object reference.
/// Records without a reference are skipped and duplicate ids resolve once.
/// Requests run concurrently with no ordering among them; a failed lookup is
/// recorded per id and never fails the batch.
pub async fn resolve_object_urls<I>(
    client: &CareNestClient,
    token: &str,
    refs: I,
    fallback: &str,
) -> ResolvedUrls
where
    I: IntoIterator<Item = (String, Option<String>)>,
{
    let mut pending: HashMap<String, String> = HashMap::new();
    for (record_id, object_ref) in refs {
        if let Some(object_ref) = object_ref.filter(|r| !r.is_empty()) {
            pending.entry(record_id).or_insert(object_ref);
        }
    }

    let lookups = pending.into_iter().map(|(record_id, object_ref)| async move {
        let result = client.resolve_file_url(token, &object_ref, fallback).await;
        (record_id, result)
    });

    let mut resolved = ResolvedUrls::default();
    for (record_id, result) in join_all(lookups).await {
        match result {
            Ok(url) => {
                resolved.urls.insert(record_id, url);
            }
            Err(e) => {
                tracing::warn!(record = %record_id, "could not resolve image: {}", e);
                resolved.failures.insert(record_id, e.user_message());
            }
        }
    }

    resolved
}
