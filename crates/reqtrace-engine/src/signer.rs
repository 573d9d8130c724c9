//! Audit signer: tamper evidence for the generated matrix.
//!
//! The signature is SHA-256 over a canonical JSON serialization of the
//! matrix body. Canonical means: fixed struct field order (serde derive)
//! and sorted map keys (every matrix map is a BTreeMap). The signed view
//! excludes `metadata` and `audit_trail`, since both carry wall-clock
//! timestamps, and two runs over unchanged inputs must produce a
//! byte-identical signature. Signing runs strictly after every other
//! field is finalized.

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::Utc;
use serde::Serialize;
use sha2::{Digest, Sha256};

use reqtrace_core::model::{
    AuditTrail, CoverageSummary, FeatureRecord, FrameworkCoverage, Matrix, Requirement,
    TestRecord, TraceabilityLink,
};
use reqtrace_core::TraceError;

/// The deterministic subset of the matrix covered by the signature.
#[derive(Serialize)]
struct SignedView<'a> {
    requirements: &'a BTreeMap<String, Requirement>,
    tests: &'a BTreeMap<PathBuf, TestRecord>,
    git_branches: &'a BTreeMap<String, Vec<String>>,
    compliance_frameworks: &'a BTreeMap<String, FrameworkCoverage>,
    features: &'a BTreeMap<String, FeatureRecord>,
    traceability_links: &'a BTreeMap<String, TraceabilityLink>,
    coverage: &'a CoverageSummary,
}

/// Canonical serialized form of the signable matrix body.
fn canonical_payload(matrix: &Matrix) -> Result<String, TraceError> {
    let view = SignedView {
        requirements: &matrix.requirements,
        tests: &matrix.tests,
        git_branches: &matrix.git_branches,
        compliance_frameworks: &matrix.compliance_frameworks,
        features: &matrix.features,
        traceability_links: &matrix.traceability_links,
        coverage: &matrix.coverage,
    };
    serde_json::to_string(&view).map_err(|e| TraceError::Serialization {
        message: e.to_string(),
    })
}

fn digest(payload: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(payload.as_bytes());
    let out = hasher.finalize();
    out.iter().map(|b| format!("{b:02x}")).collect()
}

/// Compute and attach the audit trail. Must be the last build step.
pub fn sign(matrix: &mut Matrix) -> Result<(), TraceError> {
    let payload = canonical_payload(matrix)?;
    matrix.audit_trail = Some(AuditTrail {
        signature: digest(&payload),
        timestamp: Utc::now(),
    });
    Ok(())
}

/// Recompute the digest and compare against the stored signature.
/// False for unsigned matrices or any body/signature mismatch.
pub fn verify(matrix: &Matrix) -> bool {
    let Some(trail) = &matrix.audit_trail else {
        return false;
    };
    match canonical_payload(matrix) {
        Ok(payload) => digest(&payload) == trail.signature,
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_matrix() -> Matrix {
        let mut matrix = Matrix::new("test");
        matrix.requirements.insert(
            "REQ-010".to_string(),
            Requirement {
                id: "REQ-010".to_string(),
                title: "Login".to_string(),
                epic: None,
                status: "active".to_string(),
                priority: "high".to_string(),
                compliance_standards: vec!["SOC2".to_string()],
                dependencies: Vec::new(),
                file_path: PathBuf::from("requirements/req-010.md"),
                last_modified: None,
            },
        );
        matrix
            .traceability_links
            .insert("REQ-010".to_string(), TraceabilityLink::default());
        matrix
    }

    #[test]
    fn identical_bodies_sign_identically() {
        let mut a = sample_matrix();
        let mut b = sample_matrix();
        // Different generation timestamps must not affect the signature.
        b.metadata.generated_at = a.metadata.generated_at + chrono::Duration::hours(1);

        sign(&mut a).unwrap();
        sign(&mut b).unwrap();
        assert_eq!(
            a.audit_trail.as_ref().unwrap().signature,
            b.audit_trail.as_ref().unwrap().signature
        );
    }

    #[test]
    fn signature_changes_with_body() {
        let mut a = sample_matrix();
        let mut b = sample_matrix();
        b.git_branches
            .insert("REQ-010".to_string(), vec!["feature/req-010".to_string()]);

        sign(&mut a).unwrap();
        sign(&mut b).unwrap();
        assert_ne!(
            a.audit_trail.as_ref().unwrap().signature,
            b.audit_trail.as_ref().unwrap().signature
        );
    }

    #[test]
    fn verify_detects_tampering() {
        let mut matrix = sample_matrix();
        sign(&mut matrix).unwrap();
        assert!(verify(&matrix));

        matrix
            .requirements
            .get_mut("REQ-010")
            .unwrap()
            .status = "done".to_string();
        assert!(!verify(&matrix));
    }

    #[test]
    fn unsigned_matrix_never_verifies() {
        assert!(!verify(&sample_matrix()));
    }
}
