//! Display image resolution with a session-lifetime memo.
//!
//! Lookup order for a record:
//! 1. its explicit `image_url`;
//! 2. the name-keyed cache (negative answers included);
//! 3. the [`ImageLookup`] source, whose answer is cached;
//! 4. the placeholder.
//!
//! Lookup failures are not cached, so the next render asks again.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use gameshelf_api::{GameRecord, ImageLookup};
use tracing::{debug, warn};

/// Default placeholder asset path.
pub const DEFAULT_PLACEHOLDER: &str = "/static/images/placeholder.png";

/// Resolves the image source shown for each game.
pub struct ImageResolver {
    lookup: Option<Arc<dyn ImageLookup>>,
    placeholder: String,
    cache: Mutex<HashMap<String, Option<String>>>,
}

impl ImageResolver {
    /// Resolver backed by a remote lookup source.
    pub fn new(lookup: Arc<dyn ImageLookup>, placeholder: impl Into<String>) -> Self {
        Self {
            lookup: Some(lookup),
            placeholder: placeholder.into(),
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Resolver that only uses explicit image URLs and the placeholder.
    pub fn offline(placeholder: impl Into<String>) -> Self {
        Self {
            lookup: None,
            placeholder: placeholder.into(),
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Number of memoized names.
    pub fn cached_len(&self) -> usize {
        self.cache.lock().map(|c| c.len()).unwrap_or(0)
    }

    /// Image source for `record`.
    pub async fn resolve(&self, record: &GameRecord) -> String {
        if let Some(url) = record.explicit_image() {
            return url.to_string();
        }

        if let Some(cached) = self.cached(&record.name) {
            debug!(name = %record.name, hit = cached.is_some(), "image cache hit");
            return cached.unwrap_or_else(|| self.placeholder.clone());
        }

        let Some(lookup) = &self.lookup else {
            return self.placeholder.clone();
        };

        match lookup.find_image(&record.name).await {
            Ok(answer) => {
                if let Ok(mut cache) = self.cache.lock() {
                    cache.insert(record.name.clone(), answer.clone());
                }
                answer.unwrap_or_else(|| self.placeholder.clone())
            }
            Err(e) => {
                warn!(name = %record.name, error = %e, "image lookup failed");
                self.placeholder.clone()
            }
        }
    }

    /// Resolves every record, in order.
    pub async fn resolve_all(&self, records: &[GameRecord]) -> Vec<String> {
        let mut sources = Vec::with_capacity(records.len());
        for record in records {
            sources.push(self.resolve(record).await);
        }
        sources
    }

    fn cached(&self, name: &str) -> Option<Option<String>> {
        self.cache.lock().ok()?.get(name).cloned()
    }
}
