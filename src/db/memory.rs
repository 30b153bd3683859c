//! In-memory repository
//!
//! Backs dev mode (no MongoDB required) and the service tests. Mirrors
//! the MongoDB implementation's observable behavior, including the
//! unique email and (user, course) constraints.

use async_trait::async_trait;
use bson::oid::ObjectId;
use tokio::sync::RwLock;

use crate::db::repository::Repository;
use crate::db::schemas::{CourseDoc, ProgressDoc, UserDoc};
use crate::types::{PathwayError, Result};

#[derive(Default)]
struct State {
    courses: Vec<CourseDoc>,
    users: Vec<UserDoc>,
    progress: Vec<ProgressDoc>,
}

/// In-memory store with the same constraints as the Mongo collections
#[derive(Default)]
pub struct MemoryRepository {
    state: RwLock<State>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Repository for MemoryRepository {
    async fn all_courses(&self) -> Result<Vec<CourseDoc>> {
        Ok(self.state.read().await.courses.clone())
    }

    async fn course_by_id(&self, id: &str) -> Result<Option<CourseDoc>> {
        let oid = match ObjectId::parse_str(id) {
            Ok(oid) => oid,
            Err(_) => return Ok(None),
        };

        Ok(self
            .state
            .read()
            .await
            .courses
            .iter()
            .find(|c| c.id == Some(oid))
            .cloned())
    }

    async fn create_course(&self, mut course: CourseDoc) -> Result<String> {
        let mut state = self.state.write().await;

        if state.courses.iter().any(|c| c.title == course.title) {
            return Err(PathwayError::Database(format!(
                "duplicate key: course title '{}'",
                course.title
            )));
        }

        let oid = ObjectId::new();
        course.id = Some(oid);
        state.courses.push(course);
        Ok(oid.to_hex())
    }

    async fn delete_all_courses(&self) -> Result<u64> {
        let mut state = self.state.write().await;
        let count = state.courses.len() as u64;
        state.courses.clear();
        Ok(count)
    }

    async fn create_user(&self, mut user: UserDoc) -> Result<String> {
        let mut state = self.state.write().await;

        if state.users.iter().any(|u| u.email == user.email) {
            return Err(PathwayError::Database(format!(
                "duplicate key: email '{}'",
                user.email
            )));
        }

        let oid = ObjectId::new();
        user.id = Some(oid);
        state.users.push(user);
        Ok(oid.to_hex())
    }

    async fn user_by_email(&self, email: &str) -> Result<Option<UserDoc>> {
        Ok(self
            .state
            .read()
            .await
            .users
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn user_by_id(&self, id: &str) -> Result<Option<UserDoc>> {
        let oid = match ObjectId::parse_str(id) {
            Ok(oid) => oid,
            Err(_) => return Ok(None),
        };

        Ok(self
            .state
            .read()
            .await
            .users
            .iter()
            .find(|u| u.id == Some(oid))
            .cloned())
    }

    async fn update_user_password(&self, user_id: &str, password_hash: &str) -> Result<()> {
        let oid = ObjectId::parse_str(user_id)
            .map_err(|_| PathwayError::NotFound(format!("user {}", user_id)))?;

        let mut state = self.state.write().await;
        let user = state
            .users
            .iter_mut()
            .find(|u| u.id == Some(oid))
            .ok_or_else(|| PathwayError::NotFound(format!("user {}", user_id)))?;

        user.password_hash = password_hash.to_string();
        user.metadata.updated_at = Some(bson::DateTime::now());
        Ok(())
    }

    async fn progress_for_user(&self, user_id: &str) -> Result<Vec<ProgressDoc>> {
        let oid = ObjectId::parse_str(user_id)
            .map_err(|_| PathwayError::NotFound(format!("user {}", user_id)))?;

        Ok(self
            .state
            .read()
            .await
            .progress
            .iter()
            .filter(|p| p.user_id == oid)
            .cloned()
            .collect())
    }

    async fn insert_progress(&self, records: Vec<ProgressDoc>) -> Result<usize> {
        let mut state = self.state.write().await;

        // Reject the whole batch on any (user, course) collision, against
        // stored records or within the batch, like the unique index would
        let mut pairs: Vec<(ObjectId, ObjectId)> = state
            .progress
            .iter()
            .map(|p| (p.user_id, p.course_id))
            .collect();
        for record in &records {
            let pair = (record.user_id, record.course_id);
            if pairs.contains(&pair) {
                return Err(PathwayError::Database(format!(
                    "duplicate key: progress for user {} in course {}",
                    record.user_id.to_hex(),
                    record.course_id.to_hex()
                )));
            }
            pairs.push(pair);
        }

        let count = records.len();
        for mut record in records {
            if record.id.is_none() {
                record.id = Some(ObjectId::new());
            }
            state.progress.push(record);
        }
        Ok(count)
    }

    async fn delete_progress_for_user(&self, user_id: &str) -> Result<u64> {
        let oid = ObjectId::parse_str(user_id)
            .map_err(|_| PathwayError::NotFound(format!("user {}", user_id)))?;

        let mut state = self.state.write().await;
        let before = state.progress.len();
        state.progress.retain(|p| p.user_id != oid);
        Ok((before - state.progress.len()) as u64)
    }

    async fn add_completed_module(
        &self,
        user_id: &str,
        course_id: &str,
        module_id: &str,
        module_count: usize,
    ) -> Result<()> {
        let user_oid = ObjectId::parse_str(user_id)
            .map_err(|_| PathwayError::NotFound(format!("user {}", user_id)))?;
        let course_oid = ObjectId::parse_str(course_id)
            .map_err(|_| PathwayError::NotFound(format!("course {}", course_id)))?;

        let mut state = self.state.write().await;
        let record = state
            .progress
            .iter_mut()
            .find(|p| p.user_id == user_oid && p.course_id == course_oid)
            .ok_or_else(|| {
                PathwayError::NotFound(format!(
                    "progress for user {} in course {}",
                    user_id, course_id
                ))
            })?;

        if !record.completed_modules.iter().any(|m| m == module_id) {
            record.completed_modules.push(module_id.to_string());
        }
        record.is_completed = record.completed_modules.len() == module_count;
        record.metadata.updated_at = Some(bson::DateTime::now());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schemas::UserRole;

    #[tokio::test]
    async fn email_uniqueness_enforced() {
        let repo = MemoryRepository::new();
        let user = UserDoc::new(
            "A".into(),
            "a@example.com".into(),
            "hash".into(),
            UserRole::Student,
        );

        repo.create_user(user.clone()).await.unwrap();
        let err = repo.create_user(user).await.unwrap_err();
        assert!(matches!(err, PathwayError::Database(_)));
    }

    #[tokio::test]
    async fn progress_pair_uniqueness_enforced() {
        let repo = MemoryRepository::new();
        let user = ObjectId::new();
        let course = ObjectId::new();

        repo.insert_progress(vec![ProgressDoc::empty(user, course)])
            .await
            .unwrap();
        let err = repo
            .insert_progress(vec![ProgressDoc::empty(user, course)])
            .await
            .unwrap_err();
        assert!(matches!(err, PathwayError::Database(_)));
    }

    #[tokio::test]
    async fn add_completed_module_requires_record() {
        let repo = MemoryRepository::new();
        let err = repo
            .add_completed_module(
                &ObjectId::new().to_hex(),
                &ObjectId::new().to_hex(),
                "git-1",
                7,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, PathwayError::NotFound(_)));
    }
}
