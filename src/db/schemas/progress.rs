//! Progress document schema
//!
//! One record per (user, course) pair. The compound unique index keeps
//! that invariant at the store level; callers still check-then-act when
//! initializing (see `ProgressService::initialize_progress`).

use bson::{doc, oid::ObjectId, Document};
use mongodb::options::IndexOptions;
use serde::{Deserialize, Serialize};

use crate::db::mongo::{IntoIndexes, MutMetadata};
use crate::db::schemas::Metadata;

/// Collection name for progress records
pub const PROGRESS_COLLECTION: &str = "progress";

/// Per-user, per-course completion state
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ProgressDoc {
    /// MongoDB document ID
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    /// Common metadata (created_at, updated_at)
    #[serde(default)]
    pub metadata: Metadata,

    /// Owning user
    pub user_id: ObjectId,

    /// Owning course (store-local id)
    pub course_id: ObjectId,

    /// Completed module ids (set semantics, duplicates never accumulate)
    #[serde(default)]
    pub completed_modules: Vec<String>,

    /// Whether every module of the course is completed
    #[serde(default)]
    pub is_completed: bool,
}

impl Default for ProgressDoc {
    fn default() -> Self {
        Self::empty(ObjectId::new(), ObjectId::new())
    }
}

impl ProgressDoc {
    /// Create an empty progress record for a (user, course) pair
    pub fn empty(user_id: ObjectId, course_id: ObjectId) -> Self {
        Self {
            id: None,
            metadata: Metadata::new(),
            user_id,
            course_id,
            completed_modules: Vec::new(),
            is_completed: false,
        }
    }
}

impl IntoIndexes for ProgressDoc {
    fn into_indices() -> Vec<(Document, Option<IndexOptions>)> {
        vec![
            // One record per (user, course)
            (
                doc! { "user_id": 1, "course_id": 1 },
                Some(
                    IndexOptions::builder()
                        .unique(true)
                        .name("user_course_unique".to_string())
                        .build(),
                ),
            ),
            // Per-user listing
            (doc! { "user_id": 1 }, None),
        ]
    }
}

impl MutMetadata for ProgressDoc {
    fn mut_metadata(&mut self) -> &mut Metadata {
        &mut self.metadata
    }
}
