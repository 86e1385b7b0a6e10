use serde::{Deserialize, Serialize};

use crate::domain::common::AggregateId;

// ============================================================================
// ID Type
// ============================================================================

/// Идентификатор категории перерабатываемых материалов
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecyclingItemId(pub i64);

impl RecyclingItemId {
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl AggregateId for RecyclingItemId {
    fn from_string(s: &str) -> Result<Self, String> {
        i64::from_string(s).map(RecyclingItemId)
    }
}

// ============================================================================
// Aggregate
// ============================================================================

/// Категория материала, которую принимает пункт сбора (лампы, батарейки, ...)
///
/// `image_url` is absolute: the backend resolves the stored file name against its
/// public url before sending the catalog out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecyclingItem {
    pub id: RecyclingItemId,
    pub title: String,
    pub image_url: String,
}

impl RecyclingItem {
    pub fn new(id: i64, title: impl Into<String>, image_url: impl Into<String>) -> Self {
        Self {
            id: RecyclingItemId(id),
            title: title.into(),
            image_url: image_url.into(),
        }
    }
}
