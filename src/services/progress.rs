//! Progress tracking and course aggregation
//!
//! `ProgressService` owns the three progress operations:
//!
//! - `course_progress` joins every course with the user's completion
//!   state, lazily initializing records on a user's first read
//! - `mark_module_complete` records one module completion
//! - `initialize_progress` creates one empty record per course
//!
//! Initialization is a blind batch insert; callers must only invoke it
//! when the user has no records yet. `course_progress` honors that
//! contract, and the store's unique (user, course) index rejects a
//! duplicate batch instead of letting records accumulate.

use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

use crate::db::schemas::{CourseDoc, ProgressDoc};
use crate::db::Repository;
use crate::types::{PathwayError, Result};

/// One course joined with the user's completion state
#[derive(Debug, Clone, Serialize)]
pub struct CourseProgressView {
    pub course: CourseDoc,
    pub completed_modules: Vec<String>,
    pub is_completed: bool,
    pub progress_percent: f64,
}

/// Progress operations over an injected repository
pub struct ProgressService {
    repo: Arc<dyn Repository>,
}

impl ProgressService {
    pub fn new(repo: Arc<dyn Repository>) -> Self {
        Self { repo }
    }

    /// Completion state for every course in the catalog
    ///
    /// Emits exactly one view per course. Courses without a progress
    /// record (added after the user's records were initialized) appear
    /// with empty completion state rather than failing.
    pub async fn course_progress(&self, user_id: &str) -> Result<Vec<CourseProgressView>> {
        if self.repo.user_by_id(user_id).await?.is_none() {
            return Err(PathwayError::NotFound(format!("user {}", user_id)));
        }

        let mut records = self.repo.progress_for_user(user_id).await?;

        // First read for this user: create one record per course, then
        // aggregate from the freshly inserted state.
        if records.is_empty() {
            let created = self.initialize_progress(user_id).await?;
            debug!(user_id, created, "initialized progress on first read");
            records = self.repo.progress_for_user(user_id).await?;
        }

        let by_course: HashMap<String, ProgressDoc> = records
            .into_iter()
            .map(|p| (p.course_id.to_hex(), p))
            .collect();

        let courses = self.repo.all_courses().await?;

        Ok(courses
            .into_iter()
            .map(|course| {
                let (completed_modules, is_completed) = match by_course.get(&course.id_hex()) {
                    Some(p) => (p.completed_modules.clone(), p.is_completed),
                    None => (Vec::new(), false),
                };

                let progress_percent = percent(completed_modules.len(), course.modules.len());

                CourseProgressView {
                    course,
                    completed_modules,
                    is_completed,
                    progress_percent,
                }
            })
            .collect())
    }

    /// Create one empty progress record per course for a new user
    ///
    /// Returns the number of records inserted. Callers must ensure the
    /// user has no records yet; this operation does not guard against
    /// double initialization itself.
    pub async fn initialize_progress(&self, user_id: &str) -> Result<usize> {
        let user_oid = bson::oid::ObjectId::parse_str(user_id)
            .map_err(|_| PathwayError::NotFound(format!("user {}", user_id)))?;

        let courses = self.repo.all_courses().await?;

        let records: Vec<ProgressDoc> = courses
            .iter()
            .filter_map(|course| course.id.map(|cid| ProgressDoc::empty(user_oid, cid)))
            .collect();

        if records.is_empty() {
            return Ok(0);
        }

        let inserted = self.repo.insert_progress(records).await?;
        info!(user_id, inserted, "initialized user progress");
        Ok(inserted)
    }

    /// Record a module as completed for a user within a course
    ///
    /// Idempotent: completing an already-completed module changes
    /// nothing. The module id must belong to the course definition.
    pub async fn mark_module_complete(
        &self,
        user_id: &str,
        course_id: &str,
        module_id: &str,
    ) -> Result<()> {
        let course = self
            .repo
            .course_by_id(course_id)
            .await?
            .ok_or_else(|| PathwayError::NotFound(format!("course {}", course_id)))?;

        if !course.has_module(module_id) {
            return Err(PathwayError::InvalidModule {
                course_id: course_id.to_string(),
                module_id: module_id.to_string(),
            });
        }

        self.repo
            .add_completed_module(user_id, course_id, module_id, course.modules.len())
            .await?;

        debug!(user_id, course_id, module_id, "module marked complete");
        Ok(())
    }
}

fn percent(completed: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    completed as f64 / total as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schemas::{Module, UserDoc, UserRole};
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

    fn git_course() -> CourseDoc {
        course(
            "Git",
            &["git-1", "git-2", "git-3", "git-4", "git-5", "git-6", "git-7"],
        )
    }

    async fn setup(courses: Vec<CourseDoc>) -> (ProgressService, Arc<MemoryRepository>, String) {
        let repo = Arc::new(MemoryRepository::new());
        for c in courses {
            repo.create_course(c).await.unwrap();
        }
        let user_id = repo
            .create_user(UserDoc::new(
                "Test User".into(),
                "test@example.com".into(),
                "hash".into(),
                UserRole::Student,
            ))
            .await
            .unwrap();

        let service = ProgressService::new(repo.clone() as Arc<dyn Repository>);
        (service, repo, user_id)
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let (service, _, _) = setup(vec![git_course()]).await;
        let err = service
            .course_progress(&bson::oid::ObjectId::new().to_hex())
            .await
            .unwrap_err();
        assert!(matches!(err, PathwayError::NotFound(_)));
    }

    #[tokio::test]
    async fn first_read_initializes_one_record_per_course() {
        let (service, repo, user_id) = setup(vec![git_course(), course("Scrum", &["scrum-1"])]).await;

        let views = service.course_progress(&user_id).await.unwrap();
        assert_eq!(views.len(), 2);
        assert!(views.iter().all(|v| v.completed_modules.is_empty()));
        assert!(views.iter().all(|v| !v.is_completed));

        let records = repo.progress_for_user(&user_id).await.unwrap();
        assert_eq!(records.len(), 2);
    }

    #[tokio::test]
    async fn repeated_reads_do_not_duplicate_records() {
        let (service, repo, user_id) = setup(vec![git_course()]).await;

        service.course_progress(&user_id).await.unwrap();
        service.course_progress(&user_id).await.unwrap();

        let records = repo.progress_for_user(&user_id).await.unwrap();
        assert_eq!(records.len(), 1);
    }

    #[tokio::test]
    async fn course_added_after_init_appears_with_empty_progress() {
        let (service, repo, user_id) = setup(vec![git_course()]).await;
        service.course_progress(&user_id).await.unwrap();

        repo.create_course(course("Testing", &["testing-1"]))
            .await
            .unwrap();

        let views = service.course_progress(&user_id).await.unwrap();
        assert_eq!(views.len(), 2);

        let testing = views.iter().find(|v| v.course.title == "Testing").unwrap();
        assert!(testing.completed_modules.is_empty());
        assert_eq!(testing.progress_percent, 0.0);

        // The lazily-initialized user still has just the Git record
        let records = repo.progress_for_user(&user_id).await.unwrap();
        assert_eq!(records.len(), 1);
    }

    #[tokio::test]
    async fn percent_reflects_completed_share() {
        let (service, _, user_id) = setup(vec![git_course()]).await;

        let views = service.course_progress(&user_id).await.unwrap();
        let course_id = views[0].course.id_hex();

        service
            .mark_module_complete(&user_id, &course_id, "git-1")
            .await
            .unwrap();
        service
            .mark_module_complete(&user_id, &course_id, "git-2")
            .await
            .unwrap();

        let views = service.course_progress(&user_id).await.unwrap();
        assert!((views[0].progress_percent - 2.0 / 7.0 * 100.0).abs() < 1e-9);
        assert!(!views[0].is_completed);
    }

    #[tokio::test]
    async fn completing_every_module_sets_the_flag() {
        let (service, _, user_id) = setup(vec![git_course()]).await;

        let views = service.course_progress(&user_id).await.unwrap();
        let course_id = views[0].course.id_hex();

        for module_id in [
            "git-1", "git-2", "git-3", "git-4", "git-5", "git-6", "git-7",
        ] {
            service
                .mark_module_complete(&user_id, &course_id, module_id)
                .await
                .unwrap();
        }

        let views = service.course_progress(&user_id).await.unwrap();
        assert!(views[0].is_completed);
        assert_eq!(views[0].progress_percent, 100.0);
    }

    #[tokio::test]
    async fn completion_is_idempotent() {
        let (service, repo, user_id) = setup(vec![git_course()]).await;

        let views = service.course_progress(&user_id).await.unwrap();
        let course_id = views[0].course.id_hex();

        service
            .mark_module_complete(&user_id, &course_id, "git-1")
            .await
            .unwrap();
        service
            .mark_module_complete(&user_id, &course_id, "git-1")
            .await
            .unwrap();

        let records = repo.progress_for_user(&user_id).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].completed_modules, vec!["git-1".to_string()]);
    }

    #[tokio::test]
    async fn unknown_module_is_rejected() {
        let (service, _, user_id) = setup(vec![git_course()]).await;

        let views = service.course_progress(&user_id).await.unwrap();
        let course_id = views[0].course.id_hex();

        let err = service
            .mark_module_complete(&user_id, &course_id, "git-99")
            .await
            .unwrap_err();
        assert!(matches!(err, PathwayError::InvalidModule { .. }));
    }

    #[tokio::test]
    async fn completion_without_initialization_is_not_found() {
        let (service, _, user_id) = setup(vec![git_course()]).await;

        // No course_progress call yet, so no records exist
        let courses = service.repo.all_courses().await.unwrap();
        let err = service
            .mark_module_complete(&user_id, &courses[0].id_hex(), "git-1")
            .await
            .unwrap_err();
        assert!(matches!(err, PathwayError::NotFound(_)));
    }

    #[tokio::test]
    async fn zero_module_course_yields_zero_percent() {
        let (service, _, user_id) = setup(vec![course("Empty", &[])]).await;

        let views = service.course_progress(&user_id).await.unwrap();
        assert_eq!(views[0].progress_percent, 0.0);
        assert!(!views[0].is_completed);
    }

    #[tokio::test]
    async fn initialize_with_no_courses_is_a_noop() {
        let (service, _, user_id) = setup(vec![]).await;
        assert_eq!(service.initialize_progress(&user_id).await.unwrap(), 0);
    }
}
