//! # reqtrace-engine
//!
//! Traceability matrix engine: scans requirement files, test files, git
//! history, compliance mappings, and feature descriptors; resolves the
//! cross-references between them; computes coverage; signs the result.
//!
//! Data flows strictly forward: scanners → link builder → coverage →
//! signer → exporters. No phase mutates another's output.

pub mod coverage;
pub mod export;
pub mod frontmatter;
pub mod linker;
pub mod locator;
pub mod pipeline;
pub mod scanner;
pub mod signer;
pub mod vcs;

pub use pipeline::TraceEngine;
pub use vcs::{CommitRecord, VersionControlGateway};
