//! Application services

pub mod progress;
pub mod transfer;

pub use progress::{CourseProgressView, ProgressService};
pub use transfer::{copy_user_and_progress, TransferSummary};
