//! Vector index interface and the in-memory reference implementation.
//!
//! The production index is an external nearest-neighbor store; this module
//! defines the interface the rest of the crate consumes (`upsert`, `query`,
//! `delete`) plus an in-memory cosine index used in tests and small
//! deployments. The vector dimension is fixed for the lifetime of an index.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::error::IndexError;

/// Denormalized snapshot stored beside each vector so search hits can be
/// displayed without a second record fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordMetadata {
    pub title: String,
    pub category: String,
    pub description: String,
    pub pitch: String,
    pub tags: Vec<String>,
    pub views: u64,
    pub likes: u64,
}

/// One nearest-neighbor hit.
#[derive(Debug, Clone)]
pub struct ScoredId {
    pub id: String,
    pub score: f32,
    pub metadata: Option<RecordMetadata>,
}

/// Interface over an external nearest-neighbor store.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Insert or replace the vector for `id`.
    async fn upsert(
        &self,
        id: &str,
        vector: &[f32],
        metadata: RecordMetadata,
    ) -> Result<(), IndexError>;

    /// Nearest neighbors of `vector`, best first.
    async fn query(&self, vector: &[f32], top_k: usize) -> Result<Vec<ScoredId>, IndexError>;

    async fn delete(&self, id: &str) -> Result<(), IndexError>;

    /// Fixed dimension of every vector in this index.
    fn dimensions(&self) -> usize;
}

struct Entry {
    vector: Vec<f32>,
    metadata: RecordMetadata,
}

/// In-memory cosine-similarity index.
pub struct InMemoryVectorIndex {
    dimensions: usize,
    entries: RwLock<HashMap<String, Entry>>,
}

impl InMemoryVectorIndex {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn check_dimension(&self, vector: &[f32]) -> Result<(), IndexError> {
        if vector.len() != self.dimensions {
            return Err(IndexError::DimensionMismatch {
                expected: self.dimensions,
                got: vector.len(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl VectorIndex for InMemoryVectorIndex {
    async fn upsert(
        &self,
        id: &str,
        vector: &[f32],
        metadata: RecordMetadata,
    ) -> Result<(), IndexError> {
        self.check_dimension(vector)?;
        self.entries.write().await.insert(
            id.to_string(),
            Entry {
                vector: vector.to_vec(),
                metadata,
            },
        );
        Ok(())
    }

    async fn query(&self, vector: &[f32], top_k: usize) -> Result<Vec<ScoredId>, IndexError> {
        self.check_dimension(vector)?;
        let query_norm = l2_norm(vector);
        if query_norm < f32::EPSILON {
            return Ok(Vec::new());
        }

        let entries = self.entries.read().await;
        let mut results: Vec<ScoredId> = entries
            .iter()
            .map(|(id, entry)| ScoredId {
                id: id.clone(),
                score: cosine_similarity(vector, &entry.vector, query_norm),
                metadata: Some(entry.metadata.clone()),
            })
            .collect();

        results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        results.truncate(top_k);
        Ok(results)
    }

    async fn delete(&self, id: &str) -> Result<(), IndexError> {
        self.entries.write().await.remove(id);
        Ok(())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

fn l2_norm(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

fn cosine_similarity(query: &[f32], target: &[f32], query_norm: f32) -> f32 {
    let target_norm = l2_norm(target);
    if target_norm < f32::EPSILON {
        return 0.0;
    }
    let dot: f32 = query.iter().zip(target.iter()).map(|(a, b)| a * b).sum();
    dot / (query_norm * target_norm)
}
