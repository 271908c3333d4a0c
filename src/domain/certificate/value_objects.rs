//! Certificate value objects

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Datelike, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque certificate identity, generated at issuance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CertificateId(Uuid);

impl CertificateId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for CertificateId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CertificateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for CertificateId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

/// Process-lifetime sequence backing certificate numbering.
///
/// Owned by the composition root and injected wherever numbers are
/// generated. The counter is NOT persisted: uniqueness across restarts
/// or multiple instances is not guaranteed by this sequence, and callers
/// needing that must back it with a durable counter.
#[derive(Debug)]
pub struct CertificateSequence {
    counter: AtomicU64,
}

impl CertificateSequence {
    pub fn new() -> Self {
        Self {
            counter: AtomicU64::new(0),
        }
    }

    /// Starts counting from `last` (next number will be `last + 1`).
    pub fn starting_at(last: u64) -> Self {
        Self {
            counter: AtomicU64::new(last),
        }
    }

    fn next(&self) -> u64 {
        self.counter.fetch_add(1, Ordering::SeqCst) + 1
    }
}

impl Default for CertificateSequence {
    fn default() -> Self {
        Self::new()
    }
}

/// Human-readable certificate number: `CERT-<year>-<6-digit sequence>`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CertificateNumber(String);

impl CertificateNumber {
    pub fn generate(sequence: &CertificateSequence) -> Self {
        let year = Utc::now().year();
        Self(format!("CERT-{}-{:06}", year, sequence.next()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CertificateNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for CertificateNumber {
    fn from(s: String) -> Self {
        Self(s)
    }
}

const VERIFICATION_CODE_LEN: usize = 10;
const VERIFICATION_CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Public verification lookup code.
///
/// Uniform random over 36^10; generation alone does not guarantee
/// uniqueness, the repository enforces it at save time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VerificationCode(String);

impl VerificationCode {
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let code: String = (0..VERIFICATION_CODE_LEN)
            .map(|_| {
                let idx = rng.gen_range(0..VERIFICATION_CODE_ALPHABET.len());
                VERIFICATION_CODE_ALPHABET[idx] as char
            })
            .collect();
        Self(code)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VerificationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for VerificationCode {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Immutable descriptive snapshot taken at issuance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CertificateMetadata {
    pub student_name: String,
    pub course_name: String,
    pub instructor_name: String,
    pub completion_date: DateTime<Utc>,
    pub score: Option<f32>,
    pub grade: Option<String>,
    pub course_duration_hours: Option<u32>,
    #[serde(default)]
    pub custom_fields: HashMap<String, String>,
}

impl CertificateMetadata {
    /// Explicit grade if set, else A-F banding over the score,
    /// else "Pass" when neither is available.
    pub fn display_grade(&self) -> String {
        if let Some(grade) = &self.grade {
            return grade.clone();
        }
        match self.score {
            Some(s) if s >= 90.0 => "A".to_string(),
            Some(s) if s >= 80.0 => "B".to_string(),
            Some(s) if s >= 70.0 => "C".to_string(),
            Some(s) if s >= 60.0 => "D".to_string(),
            Some(_) => "F".to_string(),
            None => "Pass".to_string(),
        }
    }

    /// Completion date formatted for rendering, e.g. `January 15, 2024`.
    pub fn formatted_completion_date(&self) -> String {
        self.completion_date.format("%B %-d, %Y").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn metadata(score: Option<f32>, grade: Option<&str>) -> CertificateMetadata {
        CertificateMetadata {
            student_name: "Ada Lovelace".to_string(),
            course_name: "Applied Rust".to_string(),
            instructor_name: "G. Hopper".to_string(),
            completion_date: Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap(),
            score,
            grade: grade.map(String::from),
            course_duration_hours: Some(40),
            custom_fields: HashMap::new(),
        }
    }

    #[test]
    fn sequence_numbers_are_strictly_increasing_and_zero_padded() {
        let seq = CertificateSequence::new();
        let year = Utc::now().year();
        let first = CertificateNumber::generate(&seq);
        let second = CertificateNumber::generate(&seq);
        let third = CertificateNumber::generate(&seq);

        assert_eq!(first.as_str(), format!("CERT-{}-000001", year));
        assert_eq!(second.as_str(), format!("CERT-{}-000002", year));
        assert_eq!(third.as_str(), format!("CERT-{}-000003", year));
    }

    #[test]
    fn sequence_can_resume_from_a_known_point() {
        let seq = CertificateSequence::starting_at(41);
        let year = Utc::now().year();
        let number = CertificateNumber::generate(&seq);
        assert_eq!(number.as_str(), format!("CERT-{}-000042", year));
    }

    #[test]
    fn verification_code_is_ten_uppercase_alphanumerics() {
        for _ in 0..100 {
            let code = VerificationCode::generate();
            assert_eq!(code.as_str().len(), 10);
            assert!(code
                .as_str()
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
        }
    }

    #[test]
    fn display_grade_bands_over_score() {
        assert_eq!(metadata(Some(95.0), None).display_grade(), "A");
        assert_eq!(metadata(Some(85.0), None).display_grade(), "B");
        assert_eq!(metadata(Some(72.5), None).display_grade(), "C");
        assert_eq!(metadata(Some(65.0), None).display_grade(), "D");
        assert_eq!(metadata(Some(12.0), None).display_grade(), "F");
    }

    #[test]
    fn display_grade_prefers_explicit_grade() {
        assert_eq!(metadata(Some(95.0), Some("Merit")).display_grade(), "Merit");
    }

    #[test]
    fn display_grade_defaults_to_pass() {
        assert_eq!(metadata(None, None).display_grade(), "Pass");
    }

    #[test]
    fn formatted_date_is_long_form() {
        assert_eq!(
            metadata(None, None).formatted_completion_date(),
            "January 15, 2024"
        );
    }
}
