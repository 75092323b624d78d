//! This module defines and re-exports the interfaces for the directory repository.
mod directory;

pub use directory::DirectoryRepository;
