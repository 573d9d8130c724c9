//! # reqtrace-core
//!
//! Foundation crate for the reqtrace traceability engine.
//! Defines the data model, requirement identifiers, config, and errors.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod errors;
pub mod ids;
pub mod model;

// Re-export the most commonly used types at the crate root.
pub use config::TraceConfig;
pub use errors::TraceError;
pub use model::matrix::{AuditTrail, CoverageSummary, Matrix, TraceabilityLink};
pub use model::requirement::Requirement;
