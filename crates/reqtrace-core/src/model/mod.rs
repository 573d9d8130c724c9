//! Typed records for every scanned artifact kind plus the aggregate matrix.

pub mod artifacts;
pub mod matrix;
pub mod requirement;

pub use artifacts::{FeatureRecord, FrameworkCoverage, TestRecord};
pub use matrix::{
    percentage, AuditTrail, ComplianceLink, CoverageSummary, FeatureCoverage, FeatureLink,
    Matrix, MatrixMetadata, RequirementCoverage, TraceabilityLink,
};
pub use requirement::Requirement;
