//! Error types for the directory repository.
mod directory;

pub use directory::DirectoryRepositoryError;
