//! # Directory Repository
//! This crate provides the read interface the directory core issues its queries
//! against. It includes the error type, the `DirectoryRepository` trait, a
//! PostgreSQL implementation and an in-memory implementation.
pub mod errors;
pub mod interfaces;
pub mod memory;
pub mod postgres;

pub use errors::DirectoryRepositoryError;
pub use interfaces::DirectoryRepository;
pub use memory::InMemoryDirectoryRepository;
pub use postgres::PostgresDirectoryRepository;
