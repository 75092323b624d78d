//! PostgreSQL implementation of the directory repository.
mod directory_repository;
mod rows;

pub use directory_repository::PostgresDirectoryRepository;
