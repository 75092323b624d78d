//! # Directory Shared
//! This crate defines the plain records shared across the directory workspace:
//! activities, buildings, organizations and the assembled organization detail view.
pub mod types;
