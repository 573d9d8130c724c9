//! JSON exporter: verbatim pretty serialization of the matrix.

use reqtrace_core::model::Matrix;
use reqtrace_core::TraceError;

pub fn render(matrix: &Matrix) -> Result<String, TraceError> {
    serde_json::to_string_pretty(matrix).map_err(|e| TraceError::Serialization {
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_the_matrix() {
        let mut matrix = Matrix::new("test");
        matrix
            .git_branches
            .insert("REQ-001".to_string(), vec!["feature/req-001".to_string()]);
        crate::signer::sign(&mut matrix).unwrap();

        let rendered = render(&matrix).unwrap();
        let parsed: Matrix = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed, matrix);
    }
}
