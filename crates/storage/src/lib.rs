#![forbid(unsafe_code)]

pub mod json;
pub mod remote;
pub mod repository;
pub mod sqlite;

pub use repository::{InMemoryRepository, Storage, StorageError, WordRepository};
