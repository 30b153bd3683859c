//! Database layer: MongoDB client, document schemas, repositories

pub mod memory;
pub mod mongo;
pub mod repository;
pub mod schemas;

pub use memory::MemoryRepository;
pub use mongo::{MongoClient, MongoCollection};
pub use repository::{MongoRepository, Repository};
