//! Repository abstraction over the document store
//!
//! Components receive a `dyn Repository` so tests can substitute the
//! in-memory implementation. `MongoRepository` is the production
//! implementation; every operation carries a bounded deadline and fails
//! with `Timeout` instead of hanging on an unresponsive store.

use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use mongodb::options::UpdateModifications;
use std::future::Future;
use std::time::Duration;

use crate::db::mongo::{MongoClient, MongoCollection};
use crate::db::schemas::{
    CourseDoc, ProgressDoc, UserDoc, COURSE_COLLECTION, PROGRESS_COLLECTION, USER_COLLECTION,
};
use crate::types::{PathwayError, Result};

/// Store operations needed by the services and CLIs
#[async_trait]
pub trait Repository: Send + Sync {
    // ==================== Course Methods ====================

    /// All courses in catalog order
    async fn all_courses(&self) -> Result<Vec<CourseDoc>>;

    /// A single course by id; unknown or unparsable ids yield None
    async fn course_by_id(&self, id: &str) -> Result<Option<CourseDoc>>;

    /// Insert a course, returning the assigned id
    async fn create_course(&self, course: CourseDoc) -> Result<String>;

    /// Remove every course (seeding replaces the whole catalog)
    async fn delete_all_courses(&self) -> Result<u64>;

    // ==================== User Methods ====================

    /// Insert a user, returning the assigned id
    async fn create_user(&self, user: UserDoc) -> Result<String>;

    /// Find a user by email
    async fn user_by_email(&self, email: &str) -> Result<Option<UserDoc>>;

    /// Find a user by id; unknown or unparsable ids yield None
    async fn user_by_id(&self, id: &str) -> Result<Option<UserDoc>>;

    /// Replace a user's password hash
    async fn update_user_password(&self, user_id: &str, password_hash: &str) -> Result<()>;

    // ==================== Progress Methods ====================

    /// All progress records owned by a user
    async fn progress_for_user(&self, user_id: &str) -> Result<Vec<ProgressDoc>>;

    /// Batch-insert progress records, returning the number inserted
    async fn insert_progress(&self, records: Vec<ProgressDoc>) -> Result<usize>;

    /// Delete every progress record owned by a user
    async fn delete_progress_for_user(&self, user_id: &str) -> Result<u64>;

    /// Add a module id to the completed set of the (user, course) record
    /// and recompute the completion flag, atomically on that one record.
    ///
    /// `module_count` is the course's total module count, used for the
    /// flag recomputation. Fails `NotFound` when no record exists for
    /// the pair.
    async fn add_completed_module(
        &self,
        user_id: &str,
        course_id: &str,
        module_id: &str,
        module_count: usize,
    ) -> Result<()>;
}

/// Parse an ObjectId hex string, mapping failure to `NotFound`
fn parse_oid(id: &str, what: &str) -> Result<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| PathwayError::NotFound(format!("{} {}", what, id)))
}

/// MongoDB-backed repository
#[derive(Clone)]
pub struct MongoRepository {
    users: MongoCollection<UserDoc>,
    courses: MongoCollection<CourseDoc>,
    progress: MongoCollection<ProgressDoc>,
    timeout: Duration,
}

impl MongoRepository {
    /// Connect and prepare the three typed collections (indexes applied once)
    pub async fn new(uri: &str, db_name: &str, timeout: Duration) -> Result<Self> {
        let client = MongoClient::new(uri, db_name).await?;

        Ok(Self {
            users: client.collection(USER_COLLECTION).await?,
            courses: client.collection(COURSE_COLLECTION).await?,
            progress: client.collection(PROGRESS_COLLECTION).await?,
            timeout,
        })
    }

    /// Run a store operation under the configured deadline
    async fn bounded<T, F>(&self, op: &str, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>> + Send,
    {
        tokio::time::timeout(self.timeout, fut)
            .await
            .map_err(|_| {
                PathwayError::Timeout(format!("{} exceeded {}ms", op, self.timeout.as_millis()))
            })?
    }
}

#[async_trait]
impl Repository for MongoRepository {
    async fn all_courses(&self) -> Result<Vec<CourseDoc>> {
        self.bounded("all_courses", self.courses.find_many(doc! {}))
            .await
    }

    async fn course_by_id(&self, id: &str) -> Result<Option<CourseDoc>> {
        let oid = match ObjectId::parse_str(id) {
            Ok(oid) => oid,
            Err(_) => return Ok(None),
        };

        self.bounded("course_by_id", self.courses.find_one(doc! { "_id": oid }))
            .await
    }

    async fn create_course(&self, course: CourseDoc) -> Result<String> {
        let oid = self
            .bounded("create_course", self.courses.insert_one(course))
            .await?;
        Ok(oid.to_hex())
    }

    async fn delete_all_courses(&self) -> Result<u64> {
        let result = self
            .bounded("delete_all_courses", self.courses.delete_many(doc! {}))
            .await?;
        Ok(result.deleted_count)
    }

    async fn create_user(&self, user: UserDoc) -> Result<String> {
        let oid = self
            .bounded("create_user", self.users.insert_one(user))
            .await?;
        Ok(oid.to_hex())
    }

    async fn user_by_email(&self, email: &str) -> Result<Option<UserDoc>> {
        self.bounded("user_by_email", self.users.find_one(doc! { "email": email }))
            .await
    }

    async fn user_by_id(&self, id: &str) -> Result<Option<UserDoc>> {
        let oid = match ObjectId::parse_str(id) {
            Ok(oid) => oid,
            Err(_) => return Ok(None),
        };

        self.bounded("user_by_id", self.users.find_one(doc! { "_id": oid }))
            .await
    }

    async fn update_user_password(&self, user_id: &str, password_hash: &str) -> Result<()> {
        let oid = parse_oid(user_id, "user")?;

        let update = doc! {
            "$set": {
                "password_hash": password_hash,
                "metadata.updated_at": bson::DateTime::now(),
            }
        };

        let result = self
            .bounded(
                "update_user_password",
                self.users.update_one(doc! { "_id": oid }, update),
            )
            .await?;

        if result.matched_count == 0 {
            return Err(PathwayError::NotFound(format!("user {}", user_id)));
        }

        Ok(())
    }

    async fn progress_for_user(&self, user_id: &str) -> Result<Vec<ProgressDoc>> {
        let oid = parse_oid(user_id, "user")?;

        self.bounded(
            "progress_for_user",
            self.progress.find_many(doc! { "user_id": oid }),
        )
        .await
    }

    async fn insert_progress(&self, records: Vec<ProgressDoc>) -> Result<usize> {
        self.bounded("insert_progress", self.progress.insert_many(records))
            .await
    }

    async fn delete_progress_for_user(&self, user_id: &str) -> Result<u64> {
        let oid = parse_oid(user_id, "user")?;

        let result = self
            .bounded(
                "delete_progress_for_user",
                self.progress.delete_many(doc! { "user_id": oid }),
            )
            .await?;
        Ok(result.deleted_count)
    }

    async fn add_completed_module(
        &self,
        user_id: &str,
        course_id: &str,
        module_id: &str,
        module_count: usize,
    ) -> Result<()> {
        let user_oid = parse_oid(user_id, "user")?;
        let course_oid = parse_oid(course_id, "course")?;

        // Aggregation-pipeline update: set-union the module id, then
        // recompute the flag from the resulting set. One atomic write on
        // the record, so concurrent completions cannot lose updates.
        let update = UpdateModifications::Pipeline(vec![
            doc! {
                "$set": {
                    "completed_modules": {
                        "$setUnion": ["$completed_modules", [module_id]]
                    },
                    "metadata.updated_at": bson::DateTime::now(),
                }
            },
            doc! {
                "$set": {
                    "is_completed": {
                        "$eq": [{ "$size": "$completed_modules" }, module_count as i32]
                    }
                }
            },
        ]);

        let result = self
            .bounded(
                "add_completed_module",
                self.progress.update_one(
                    doc! { "user_id": user_oid, "course_id": course_oid },
                    update,
                ),
            )
            .await?;

        if result.matched_count == 0 {
            return Err(PathwayError::NotFound(format!(
                "progress for user {} in course {}",
                user_id, course_id
            )));
        }

        Ok(())
    }
}
