//! Startup record model and the content-store interface.
//!
//! The content store is an external collaborator: this subsystem only reads
//! records, user signals, and popularity orderings from it. An in-memory
//! implementation ships here as the reference double for tests and embedded
//! callers.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::taxonomy::contains_word;
use crate::text;

/// A startup record as read from the content store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub pitch: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub author_id: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub dislikes: u64,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub socials: Vec<String>,
}

impl ContentRecord {
    /// All searchable text of the record, lowercased, for relevance gating.
    pub fn combined_text(&self) -> String {
        format!(
            "{} {} {} {} {}",
            self.title,
            self.category,
            self.description,
            self.pitch,
            self.tags.join(" ")
        )
        .to_lowercase()
    }
}

/// Filter for bulk fetches; all fields are conjunctive.
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    pub category: Option<String>,
    pub author_id: Option<String>,
    pub min_views: Option<u64>,
}

impl RecordFilter {
    pub fn matches(&self, record: &ContentRecord) -> bool {
        if let Some(ref category) = self.category {
            if !record.category.eq_ignore_ascii_case(category) {
                return false;
            }
        }
        if let Some(ref author) = self.author_id {
            if &record.author_id != author {
                return false;
            }
        }
        if let Some(min_views) = self.min_views {
            if record.views < min_views {
                return false;
            }
        }
        true
    }
}

/// A user's behavioral signals, gathered per recommendation request.
#[derive(Debug, Clone, Default)]
pub struct UserSignals {
    pub saved: Vec<String>,
    pub interested: Vec<String>,
    pub liked: Vec<String>,
    pub commented: Vec<String>,
    pub disliked: Vec<String>,
}

impl UserSignals {
    /// True when no positive signal exists at all.
    pub fn is_cold(&self) -> bool {
        self.saved.is_empty()
            && self.interested.is_empty()
            && self.liked.is_empty()
            && self.commented.is_empty()
    }
}

/// Read interface over the external content store.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Fetch records by id. Unknown ids are silently skipped; order follows
    /// the input ids.
    async fn fetch_by_ids(&self, ids: &[String]) -> Result<Vec<ContentRecord>>;

    /// Fetch all records matching a filter.
    async fn fetch_by_filter(&self, filter: &RecordFilter) -> Result<Vec<ContentRecord>>;

    /// Lightweight text matching, used only by the degraded search fallback.
    /// Phrase match first; falls back to OR-of-words.
    async fn text_match(&self, query: &str, limit: usize) -> Result<Vec<ContentRecord>>;

    /// Top records by views descending, likes descending.
    async fn top_by_popularity(&self, limit: usize) -> Result<Vec<ContentRecord>>;

    /// Behavioral signals for a user. Unknown users yield empty signals.
    async fn user_signals(&self, user_id: &str) -> Result<UserSignals>;
}

/// In-memory content store: the reference double for tests and small
/// embedded deployments.
#[derive(Default)]
pub struct InMemoryContentStore {
    records: RwLock<HashMap<String, ContentRecord>>,
    signals: RwLock<HashMap<String, UserSignals>>,
}

impl InMemoryContentStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub async fn put(&self, record: ContentRecord) {
        self.records.write().await.insert(record.id.clone(), record);
    }

    pub async fn remove(&self, id: &str) {
        self.records.write().await.remove(id);
    }

    pub async fn set_signals(&self, user_id: &str, signals: UserSignals) {
        self.signals
            .write()
            .await
            .insert(user_id.to_string(), signals);
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl ContentStore for InMemoryContentStore {
    async fn fetch_by_ids(&self, ids: &[String]) -> Result<Vec<ContentRecord>> {
        let records = self.records.read().await;
        Ok(ids.iter().filter_map(|id| records.get(id).cloned()).collect())
    }

    async fn fetch_by_filter(&self, filter: &RecordFilter) -> Result<Vec<ContentRecord>> {
        let records = self.records.read().await;
        Ok(records.values().filter(|r| filter.matches(r)).cloned().collect())
    }

    async fn text_match(&self, query: &str, limit: usize) -> Result<Vec<ContentRecord>> {
        let clean = text::preprocess(query);
        if clean.is_empty() {
            return Ok(Vec::new());
        }
        let records = self.records.read().await;

        // Phrase match first.
        let mut hits: Vec<ContentRecord> = records
            .values()
            .filter(|r| r.combined_text().contains(&clean))
            .cloned()
            .collect();

        // Fall back to OR-of-words.
        if hits.is_empty() {
            let words = text::meaningful_tokens(&clean);
            hits = records
                .values()
                .filter(|r| {
                    let combined = r.combined_text();
                    words.iter().any(|w| contains_word(&combined, w))
                })
                .cloned()
                .collect();
        }

        hits.sort_by(|a, b| b.views.cmp(&a.views).then(b.likes.cmp(&a.likes)));
        hits.truncate(limit);
        Ok(hits)
    }

    async fn top_by_popularity(&self, limit: usize) -> Result<Vec<ContentRecord>> {
        let records = self.records.read().await;
        let mut all: Vec<ContentRecord> = records.values().cloned().collect();
        all.sort_by(|a, b| b.views.cmp(&a.views).then(b.likes.cmp(&a.likes)));
        all.truncate(limit);
        Ok(all)
    }

    async fn user_signals(&self, user_id: &str) -> Result<UserSignals> {
        Ok(self
            .signals
            .read()
            .await
            .get(user_id)
            .cloned()
            .unwrap_or_default())
    }
}
