//! # Directory Query
//!
//! Query and aggregation engine for the organization directory.
//!
//! ## Components
//!
//! 1. **Activity tree**: expands an activity id into its full descendant subtree
//! 2. **Geo predicates**: radius and rectangle membership over building coordinates
//! 3. **Aggregator**: assembles the detail record of a single organization
//! 4. **Service**: the façade answering every directory query
//!
//! ## Modules
//!
//! - [`activity_tree`]: subtree resolution with cycle protection
//! - [`geo`]: planar radius and inclusive rectangle predicates
//! - [`aggregator`]: organization detail assembly
//! - [`service`]: `DirectoryQueryService`
//! - [`config`]: service configuration
//! - [`errors`]: error types for the engine

pub mod activity_tree;
pub mod aggregator;
pub mod config;
pub mod errors;
pub mod geo;
pub mod service;

pub use activity_tree::{ActivityTree, ActivityTreeResolver};
pub use aggregator::OrganizationAggregator;
pub use config::{DirectoryServiceConfig, SubtreeStrategy};
pub use errors::DirectoryError;
pub use geo::GeoPredicate;
pub use service::DirectoryQueryService;
