//! Course document schema
//!
//! Courses are read-only from the application's perspective: the seed
//! operation replaces the whole catalog, nothing else writes here.
//! Module ids are human-assigned strings that survive reseeding; course
//! titles are the stable join key across database instances.

use bson::{doc, oid::ObjectId, Document};
use mongodb::options::IndexOptions;
use serde::{Deserialize, Serialize};

use crate::db::mongo::{IntoIndexes, MutMetadata};
use crate::db::schemas::Metadata;

/// Collection name for courses
pub const COURSE_COLLECTION: &str = "courses";

/// A single piece of module content
///
/// Serialized as `{ "type": "...", "data": { ... } }`, one variant per
/// block type with typed fields.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum ContentBlock {
    Text {
        text: String,
    },
    Code {
        language: String,
        code: String,
    },
    Image {
        url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        alt: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        caption: Option<String>,
    },
    Callout {
        style: String,
        text: String,
    },
    Exercise {
        prompt: String,
        solution: String,
        #[serde(default)]
        hints: Vec<String>,
    },
    Video {
        url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
    },
}

/// One module within a course
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Module {
    /// Human-assigned stable id, unique within the course
    pub id: String,

    /// Module title
    pub title: String,

    /// Ordered content blocks
    #[serde(default)]
    pub content: Vec<ContentBlock>,

    /// Optional companion video
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
}

/// Course document stored in MongoDB
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct CourseDoc {
    /// MongoDB document ID (stable only within one database instance)
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    /// Common metadata (created_at, updated_at)
    #[serde(default)]
    pub metadata: Metadata,

    /// Course title (unique across the catalog)
    pub title: String,

    /// Course description
    pub description: String,

    /// Ordered modules
    #[serde(default)]
    pub modules: Vec<Module>,
}

impl CourseDoc {
    /// Create a new course document
    pub fn new(title: String, description: String, modules: Vec<Module>) -> Self {
        Self {
            id: None,
            metadata: Metadata::new(),
            title,
            description,
            modules,
        }
    }

    /// Document id as a hex string, empty when unassigned
    pub fn id_hex(&self) -> String {
        self.id.map(|id| id.to_hex()).unwrap_or_default()
    }

    /// Whether the given module id belongs to this course
    pub fn has_module(&self, module_id: &str) -> bool {
        self.modules.iter().any(|m| m.id == module_id)
    }
}

impl IntoIndexes for CourseDoc {
    fn into_indices() -> Vec<(Document, Option<IndexOptions>)> {
        vec![(
            doc! { "title": 1 },
            Some(
                IndexOptions::builder()
                    .unique(true)
                    .name("title_unique".to_string())
                    .build(),
            ),
        )]
    }
}

impl MutMetadata for CourseDoc {
    fn mut_metadata(&mut self) -> &mut Metadata {
        &mut self.metadata
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_block_wire_format() {
        let block = ContentBlock::Code {
            language: "rust".into(),
            code: "fn main() {}".into(),
        };

        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["type"], "code");
        assert_eq!(json["data"]["language"], "rust");
        assert_eq!(json["data"]["code"], "fn main() {}");
    }

    #[test]
    fn content_block_roundtrip_through_bson() {
        let block = ContentBlock::Exercise {
            prompt: "Rename a branch".into(),
            solution: "git branch -m new-name".into(),
            hints: vec!["look at branch flags".into()],
        };

        let doc = bson::to_document(&block).unwrap();
        let back: ContentBlock = bson::from_document(doc).unwrap();
        assert_eq!(back, block);
    }

    #[test]
    fn has_module_checks_ids() {
        let course = CourseDoc::new(
            "Git".into(),
            "Version control".into(),
            vec![
                Module {
                    id: "git-1".into(),
                    title: "Basics".into(),
                    content: vec![],
                    video_url: None,
                },
                Module {
                    id: "git-2".into(),
                    title: "Branching".into(),
                    content: vec![],
                    video_url: None,
                },
            ],
        );

        assert!(course.has_module("git-1"));
        assert!(!course.has_module("git-9"));
    }
}
