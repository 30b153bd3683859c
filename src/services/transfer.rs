//! Cross-environment user and progress transfer
//!
//! Shared by the copy-to-dev and migrate CLIs. Moves one user (matched
//! by email) and their progress records from a source database instance
//! to a target instance. Course ids are store-local, so records are
//! remapped by exact course-title match; the whole operation is safe to
//! re-run because target progress is deleted before reinsertion.
//!
//! The two stores share no transaction. A failure after user creation
//! leaves the target user in place; re-running picks the user up by
//! email and rebuilds their progress from scratch.

use bson::oid::ObjectId;
use std::collections::HashMap;
use tracing::{info, warn};

use crate::db::schemas::ProgressDoc;
use crate::db::Repository;
use crate::types::{PathwayError, Result};

/// Outcome of a transfer, for CLI reporting
#[derive(Debug, Clone)]
pub struct TransferSummary {
    /// Target-store user id (hex)
    pub target_user_id: String,
    /// Whether the user had to be created in the target
    pub user_created: bool,
    /// Courses matched by title between the two catalogs
    pub mapped_courses: usize,
    /// Progress records copied
    pub copied: usize,
    /// Progress records dropped because their course has no target match
    pub skipped: usize,
}

/// Copy a user and their progress from one store to another
pub async fn copy_user_and_progress(
    source: &dyn Repository,
    target: &dyn Repository,
    email: &str,
) -> Result<TransferSummary> {
    // 1. The user must exist in the source
    info!(email, "fetching user from source");
    let source_user = source
        .user_by_email(email)
        .await?
        .ok_or_else(|| PathwayError::NotFound(format!("user {}", email)))?;
    let source_user_id = source_user.id_hex();
    info!(email, %source_user_id, "found source user");

    // 2. Reuse the target user when present, otherwise create a copy
    // with a cleared id and re-fetch to learn the assigned one (the
    // re-fetch also covers stores that don't echo the inserted doc).
    let (target_user_oid, user_created) = match target.user_by_email(email).await? {
        Some(existing) => {
            let oid = existing.id.ok_or_else(|| {
                PathwayError::Database(format!("target user {} has no id", email))
            })?;
            info!(email, target_user_id = %oid.to_hex(), "user already exists in target");
            (oid, false)
        }
        None => {
            info!(email, "copying user to target");
            let mut copy = source_user.clone();
            copy.id = None;
            target.create_user(copy).await?;

            let created = target.user_by_email(email).await?.ok_or_else(|| {
                PathwayError::Database(format!("user {} not visible after insert", email))
            })?;
            let oid = created.id.ok_or_else(|| {
                PathwayError::Database(format!("created user {} has no id", email))
            })?;
            info!(email, target_user_id = %oid.to_hex(), "user created in target");
            (oid, true)
        }
    };
    let target_user_id = target_user_oid.to_hex();

    // 3. Source progress
    let source_progress = source.progress_for_user(&source_user_id).await?;
    info!(count = source_progress.len(), "fetched source progress records");

    // 4. Course id mapping by title (titles are the only stable
    // cross-environment key)
    let course_map = build_course_map(source, target).await?;

    // 5. Idempotency: wipe the target user's progress before inserting
    let deleted = target.delete_progress_for_user(&target_user_id).await?;
    if deleted > 0 {
        info!(deleted, "removed existing target progress");
    }

    // 6. Remap and collect
    let mut records = Vec::new();
    let mut skipped = 0usize;
    for prog in &source_progress {
        let Some(&target_course_id) = course_map.get(&prog.course_id) else {
            warn!(
                course_id = %prog.course_id.to_hex(),
                "course has no match in target, skipping progress record"
            );
            skipped += 1;
            continue;
        };

        let mut record = ProgressDoc::empty(target_user_oid, target_course_id);
        record.completed_modules = prog.completed_modules.clone();
        record.is_completed = prog.is_completed;
        records.push(record);
    }

    // 7. Zero eligible records is still success
    let copied = if records.is_empty() {
        info!("no progress records to copy");
        0
    } else {
        let inserted = target.insert_progress(records).await?;
        info!(inserted, "copied progress records to target");
        inserted
    };

    Ok(TransferSummary {
        target_user_id,
        user_created,
        mapped_courses: course_map.len(),
        copied,
        skipped,
    })
}

/// Map source course ids to target course ids by exact title match
async fn build_course_map(
    source: &dyn Repository,
    target: &dyn Repository,
) -> Result<HashMap<ObjectId, ObjectId>> {
    let source_courses = source.all_courses().await?;
    let target_courses = target.all_courses().await?;

    let by_title: HashMap<&str, ObjectId> = target_courses
        .iter()
        .filter_map(|c| c.id.map(|id| (c.title.as_str(), id)))
        .collect();

    let mut map = HashMap::new();
    for course in &source_courses {
        let Some(source_id) = course.id else { continue };
        if let Some(&target_id) = by_title.get(course.title.as_str()) {
            map.insert(source_id, target_id);
        }
    }

    info!(
        mapped = map.len(),
        total = source_courses.len(),
        "built course id mapping"
    );
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schemas::{CourseDoc, Module, UserDoc, UserRole};
    use crate::db::MemoryRepository;

    fn course(title: &str, module_ids: &[&str]) -> CourseDoc {
        CourseDoc::new(
            title.into(),
            format!("{} course", title),
            module_ids
                .iter()
                .map(|id| Module {
                    id: id.to_string(),
                    title: format!("Module {}", id),
                    content: vec![],
                    video_url: None,
                })
                .collect(),
        )
    }

    fn user(email: &str) -> UserDoc {
        UserDoc::new("Test User".into(), email.into(), "hash".into(), UserRole::Student)
    }

    /// Source with a Git and Scrum course and a user with progress in both
    async fn seeded_source() -> (MemoryRepository, String) {
        let source = MemoryRepository::new();
        let git_id = source.create_course(course("Git", &["git-1", "git-2"])).await.unwrap();
        let scrum_id = source
            .create_course(course("Scrum", &["scrum-1"]))
            .await
            .unwrap();

        let user_id = source.create_user(user("test@example.com")).await.unwrap();
        let user_oid = ObjectId::parse_str(&user_id).unwrap();

        let mut git_progress =
            ProgressDoc::empty(user_oid, ObjectId::parse_str(&git_id).unwrap());
        git_progress.completed_modules = vec!["git-1".into()];

        let mut scrum_progress =
            ProgressDoc::empty(user_oid, ObjectId::parse_str(&scrum_id).unwrap());
        scrum_progress.completed_modules = vec!["scrum-1".into()];
        scrum_progress.is_completed = true;

        source
            .insert_progress(vec![git_progress, scrum_progress])
            .await
            .unwrap();

        (source, user_id)
    }

    #[tokio::test]
    async fn missing_source_user_is_fatal() {
        let source = MemoryRepository::new();
        let target = MemoryRepository::new();

        let err = copy_user_and_progress(&source, &target, "nobody@example.com")
            .await
            .unwrap_err();
        assert!(matches!(err, PathwayError::NotFound(_)));
    }

    #[tokio::test]
    async fn creates_user_and_remaps_course_ids() {
        let (source, _) = seeded_source().await;

        let target = MemoryRepository::new();
        let target_git = target
            .create_course(course("Git", &["git-1", "git-2"]))
            .await
            .unwrap();
        target
            .create_course(course("Scrum", &["scrum-1"]))
            .await
            .unwrap();

        let summary = copy_user_and_progress(&source, &target, "test@example.com")
            .await
            .unwrap();

        assert!(summary.user_created);
        assert_eq!(summary.mapped_courses, 2);
        assert_eq!(summary.copied, 2);
        assert_eq!(summary.skipped, 0);

        // Records reference target-store course ids, never source ids
        let records = target.progress_for_user(&summary.target_user_id).await.unwrap();
        let git_record = records
            .iter()
            .find(|p| p.course_id.to_hex() == target_git)
            .expect("git record remapped to target id");
        assert_eq!(git_record.completed_modules, vec!["git-1".to_string()]);
    }

    #[tokio::test]
    async fn unmatched_courses_are_dropped_not_fatal() {
        let (source, _) = seeded_source().await;

        // Target has Git but no Scrum
        let target = MemoryRepository::new();
        target
            .create_course(course("Git", &["git-1", "git-2"]))
            .await
            .unwrap();

        let summary = copy_user_and_progress(&source, &target, "test@example.com")
            .await
            .unwrap();

        assert_eq!(summary.mapped_courses, 1);
        assert_eq!(summary.copied, 1);
        assert_eq!(summary.skipped, 1);

        let records = target.progress_for_user(&summary.target_user_id).await.unwrap();
        assert_eq!(records.len(), 1);
    }

    #[tokio::test]
    async fn rerun_is_idempotent() {
        let (source, _) = seeded_source().await;

        let target = MemoryRepository::new();
        target
            .create_course(course("Git", &["git-1", "git-2"]))
            .await
            .unwrap();
        target
            .create_course(course("Scrum", &["scrum-1"]))
            .await
            .unwrap();

        let first = copy_user_and_progress(&source, &target, "test@example.com")
            .await
            .unwrap();
        let second = copy_user_and_progress(&source, &target, "test@example.com")
            .await
            .unwrap();

        // Second run reuses the user and replaces, not duplicates
        assert!(first.user_created);
        assert!(!second.user_created);
        assert_eq!(first.target_user_id, second.target_user_id);
        assert_eq!(second.copied, 2);

        let records = target.progress_for_user(&second.target_user_id).await.unwrap();
        assert_eq!(records.len(), 2);

        // Only one user with this email exists
        let target_user = target.user_by_email("test@example.com").await.unwrap();
        assert!(target_user.is_some());
    }

    #[tokio::test]
    async fn user_without_progress_still_provisions() {
        let source = MemoryRepository::new();
        source.create_user(user("fresh@example.com")).await.unwrap();

        let target = MemoryRepository::new();
        let summary = copy_user_and_progress(&source, &target, "fresh@example.com")
            .await
            .unwrap();

        assert!(summary.user_created);
        assert_eq!(summary.copied, 0);
        assert_eq!(summary.skipped, 0);
    }
}
