//! MongoDB document schemas

pub mod course;
pub mod metadata;
pub mod progress;
pub mod user;

pub use course::{ContentBlock, CourseDoc, Module, COURSE_COLLECTION};
pub use metadata::Metadata;
pub use progress::{ProgressDoc, PROGRESS_COLLECTION};
pub use user::{UserDoc, UserRole, USER_COLLECTION};
