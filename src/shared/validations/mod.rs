use crate::shared::types::{DomainError, DomainResult};

pub fn validate_pagination(page: Option<u32>, limit: Option<u32>) -> (u32, u32) {
    let page = page.unwrap_or(1).max(1);
    let limit = limit.unwrap_or(50).clamp(1, 100);
    (page, limit)
}

/// A rendered-artifact location must be an http(s) URL or an absolute path.
pub fn validate_artifact_url(url: &str) -> DomainResult<()> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Err(DomainError::Validation(
            "certificate URL must not be empty".to_string(),
        ));
    }
    let ok = trimmed.starts_with("https://")
        || trimmed.starts_with("http://")
        || trimmed.starts_with('/');
    if !ok {
        return Err(DomainError::Validation(format!(
            "certificate URL must be an http(s) URL or absolute path: {}",
            trimmed
        )));
    }
    Ok(())
}

/// Scores are percentages.
pub fn validate_score(score: f32) -> DomainResult<()> {
    if !(0.0..=100.0).contains(&score) {
        return Err(DomainError::Validation(format!(
            "score must be within 0-100, got {}",
            score
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_defaults_and_clamping() {
        assert_eq!(validate_pagination(None, None), (1, 50));
        assert_eq!(validate_pagination(Some(0), Some(0)), (1, 1));
        assert_eq!(validate_pagination(Some(3), Some(500)), (3, 100));
    }

    #[test]
    fn artifact_url_accepts_http_and_paths() {
        assert!(validate_artifact_url("https://cdn.example.com/certs/1.pdf").is_ok());
        assert!(validate_artifact_url("http://localhost:9000/certs/1.pdf").is_ok());
        assert!(validate_artifact_url("/var/certs/1.pdf").is_ok());
    }

    #[test]
    fn artifact_url_rejects_empty_and_relative() {
        assert!(validate_artifact_url("").is_err());
        assert!(validate_artifact_url("   ").is_err());
        assert!(validate_artifact_url("certs/1.pdf").is_err());
        assert!(validate_artifact_url("ftp://example.com/1.pdf").is_err());
    }

    #[test]
    fn score_range() {
        assert!(validate_score(0.0).is_ok());
        assert!(validate_score(100.0).is_ok());
        assert!(validate_score(100.5).is_err());
        assert!(validate_score(-1.0).is_err());
    }
}
