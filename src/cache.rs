use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

use crate::model::SummarizationRequest;

#[derive(Debug, Clone)]
pub struct CachedSummary {
    pub summary: String,
    pub timestamp: DateTime<Utc>,
}

/// Time-based cache of previous summaries keyed by request content.
///
/// Holds at most `max_entries` summaries; when full, the oldest one is
/// evicted to make room.
#[derive(Debug)]
pub struct SummaryCache {
    enabled: bool,
    expiry: chrono::Duration,
    max_entries: usize,
    entries: Mutex<HashMap<String, CachedSummary>>,
}

impl SummaryCache {
    pub fn new(enabled: bool, expiry: Duration, max_entries: usize) -> Self {
        Self {
            enabled: enabled && max_entries > 0,
            expiry: chrono::Duration::from_std(expiry).unwrap_or(chrono::Duration::MAX),
            max_entries,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn disabled() -> Self {
        Self::new(false, Duration::ZERO, 0)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn key(request: &SummarizationRequest) -> String {
        let mut hasher = Sha256::new();
        hasher.update(request.method.as_str().as_bytes());
        hasher.update([0u8]);
        hasher.update(request.limit.to_le_bytes());
        hasher.update([0u8]);
        hasher.update(crate::text::normalize_whitespace(&request.text).as_bytes());
        hex::encode(hasher.finalize())
    }

    pub fn get(&self, request: &SummarizationRequest) -> Option<String> {
        self.get_at(request, Utc::now())
    }

    pub fn insert(&self, request: &SummarizationRequest, summary: &str) {
        self.insert_at(request, summary, Utc::now());
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get_at(&self, request: &SummarizationRequest, now: DateTime<Utc>) -> Option<String> {
        if !self.enabled {
            return None;
        }
        let cache = self.lock();
        cache
            .get(&Self::key(request))
            .filter(|cached| now - cached.timestamp < self.expiry)
            .map(|cached| cached.summary.clone())
    }

    fn insert_at(&self, request: &SummarizationRequest, summary: &str, now: DateTime<Utc>) {
        if !self.enabled {
            return;
        }
        let key = Self::key(request);
        let mut cache = self.lock();
        cache.retain(|_, cached| now - cached.timestamp < self.expiry);
        if !cache.contains_key(&key) && cache.len() >= self.max_entries {
            let oldest = cache
                .iter()
                .min_by_key(|(_, cached)| cached.timestamp)
                .map(|(k, _)| k.clone());
            if let Some(oldest) = oldest {
                cache.remove(&oldest);
            }
        }
        cache.insert(
            key,
            CachedSummary {
                summary: summary.to_string(),
                timestamp: now,
            },
        );
    }

    // Entries are replaced whole, so a poisoned map is still consistent
    fn lock(&self) -> MutexGuard<'_, HashMap<String, CachedSummary>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
