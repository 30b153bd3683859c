//! Course catalog seeding
//!
//! Seeding replaces the whole catalog: every existing course is deleted,
//! then the fixed catalog is inserted in order. Progress records are
//! untouched; module ids are stable across reseeds so completion state
//! stays meaningful.

pub mod catalog;

use tracing::info;

use crate::db::Repository;
use crate::types::Result;

/// Delete all courses and insert the fixed catalog
///
/// Returns the number of courses inserted.
pub async fn seed_courses(repo: &dyn Repository) -> Result<usize> {
    let deleted = repo.delete_all_courses().await?;
    info!(deleted, "cleared existing courses");

    let courses = catalog::all_courses();
    let total = courses.len();

    for course in courses {
        let title = course.title.clone();
        repo.create_course(course).await?;
        info!(%title, "created course");
    }

    info!(total, "seeded course catalog");
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryRepository;

    #[tokio::test]
    async fn seeding_replaces_the_catalog() {
        let repo = MemoryRepository::new();

        let first = seed_courses(&repo).await.unwrap();
        let second = seed_courses(&repo).await.unwrap();
        assert_eq!(first, second);

        // Reseeding must not accumulate courses
        let courses = repo.all_courses().await.unwrap();
        assert_eq!(courses.len(), second);
    }

    #[tokio::test]
    async fn catalog_titles_are_unique() {
        let courses = catalog::all_courses();
        let mut titles: Vec<_> = courses.iter().map(|c| c.title.clone()).collect();
        titles.sort();
        titles.dedup();
        assert_eq!(titles.len(), courses.len());
    }

    #[tokio::test]
    async fn module_ids_are_unique_within_each_course() {
        for course in catalog::all_courses() {
            let mut ids: Vec<_> = course.modules.iter().map(|m| m.id.clone()).collect();
            ids.sort();
            ids.dedup();
            assert_eq!(ids.len(), course.modules.len(), "course {}", course.title);
        }
    }
}
