//! Certificate aggregate root

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::value_objects::{
    CertificateId, CertificateMetadata, CertificateNumber, CertificateSequence, VerificationCode,
};
use crate::domain::events::{CertificateGeneratedEvent, CertificateRevokedEvent, DomainEvent};
use crate::shared::validations::validate_artifact_url;
use crate::shared::{DomainError, DomainResult};
use crate::tenant::TenantId;

/// Derived lifecycle status; never stored, re-evaluated on every read.
/// Priority when reporting: revoked > expired > valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CertificateStatus {
    Valid,
    Expired,
    Revoked,
}

impl std::fmt::Display for CertificateStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Valid => write!(f, "valid"),
            Self::Expired => write!(f, "expired"),
            Self::Revoked => write!(f, "revoked"),
        }
    }
}

/// Inputs for [`Certificate::issue`]
#[derive(Debug, Clone)]
pub struct IssueCertificateProps {
    pub tenant_id: TenantId,
    pub student_id: Uuid,
    pub course_id: Option<Uuid>,
    pub enrollment_id: Option<Uuid>,
    pub template_id: Uuid,
    pub metadata: CertificateMetadata,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Certificate aggregate.
///
/// Constructed only through [`Certificate::issue`]; all lifecycle
/// mutation flows through this type. Revocation is one-way, validity
/// is computed against the wall clock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Certificate {
    pub id: CertificateId,
    pub tenant_id: TenantId,
    pub student_id: Uuid,
    pub course_id: Option<Uuid>,
    pub enrollment_id: Option<Uuid>,
    pub template_id: Uuid,
    pub number: CertificateNumber,
    pub verification_code: VerificationCode,
    pub metadata: CertificateMetadata,
    pub issued_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub certificate_url: Option<String>,
    pub revoked_at: Option<DateTime<Utc>>,
    pub revocation_reason: Option<String>,

    /// Events recorded by mutations and not yet published.
    #[serde(skip)]
    uncommitted_events: Vec<DomainEvent>,
}

impl Certificate {
    /// Issue a new certificate. The only construction path.
    ///
    /// Generates identity, number and verification code, stamps the
    /// issuance time and records a `CertificateGenerated` event for the
    /// caller to publish once the aggregate is saved.
    pub fn issue(props: IssueCertificateProps, sequence: &CertificateSequence) -> Self {
        let id = CertificateId::new();
        let number = CertificateNumber::generate(sequence);
        let verification_code = VerificationCode::generate();

        let event = DomainEvent::CertificateGenerated(CertificateGeneratedEvent {
            aggregate_id: id,
            certificate_number: number.clone(),
            tenant_id: props.tenant_id.clone(),
            timestamp: Utc::now(),
        });

        Self {
            id,
            tenant_id: props.tenant_id,
            student_id: props.student_id,
            course_id: props.course_id,
            enrollment_id: props.enrollment_id,
            template_id: props.template_id,
            number,
            verification_code,
            metadata: props.metadata,
            issued_at: Utc::now(),
            expires_at: props.expires_at,
            certificate_url: None,
            revoked_at: None,
            revocation_reason: None,
            uncommitted_events: vec![event],
        }
    }

    /// Record where the rendered artifact lives.
    ///
    /// Idempotent: re-setting the same or a newer location is fine. The
    /// value must be an http(s) URL or an absolute path.
    pub fn set_certificate_url(&mut self, url: impl Into<String>) -> DomainResult<()> {
        let url = url.into();
        let url = url.trim().to_string();
        validate_artifact_url(&url)?;
        self.certificate_url = Some(url);
        Ok(())
    }

    /// Revoke the certificate. Irreversible; fails on a second call and
    /// leaves the original reason and timestamp untouched.
    pub fn revoke(&mut self, reason: impl Into<String>) -> DomainResult<()> {
        if self.revoked_at.is_some() {
            return Err(DomainError::InvalidTransition(
                "Certificate is already revoked".to_string(),
            ));
        }
        let reason = reason.into();
        self.revoked_at = Some(Utc::now());
        self.revocation_reason = Some(reason.clone());
        self.uncommitted_events
            .push(DomainEvent::CertificateRevoked(CertificateRevokedEvent {
                aggregate_id: self.id,
                reason,
                timestamp: Utc::now(),
            }));
        Ok(())
    }

    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|at| Utc::now() > at)
    }

    /// Derived validity: false once revoked or past expiry.
    pub fn is_valid(&self) -> bool {
        !self.is_revoked() && !self.is_expired()
    }

    pub fn status(&self) -> CertificateStatus {
        if self.is_revoked() {
            CertificateStatus::Revoked
        } else if self.is_expired() {
            CertificateStatus::Expired
        } else {
            CertificateStatus::Valid
        }
    }

    /// Public-safe projection for the verification endpoint.
    pub fn verification_data(&self) -> VerificationData {
        VerificationData {
            certificate_number: self.number.clone(),
            verification_code: self.verification_code.clone(),
            issued_at: self.issued_at,
            status: self.status(),
            student_name: self.metadata.student_name.clone(),
            course_name: self.metadata.course_name.clone(),
        }
    }

    /// Drain events recorded since the last call. Callers publish these
    /// after a successful save.
    pub fn take_events(&mut self) -> Vec<DomainEvent> {
        std::mem::take(&mut self.uncommitted_events)
    }

    /// Replace the verification code before the first save, used when
    /// the repository reports a code collision.
    pub(crate) fn regenerate_verification_code(&mut self) {
        self.verification_code = VerificationCode::generate();
    }
}

/// What the public verification endpoint is allowed to reveal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationData {
    pub certificate_number: CertificateNumber,
    pub verification_code: VerificationCode,
    pub issued_at: DateTime<Utc>,
    pub status: CertificateStatus,
    pub student_name: String,
    pub course_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use std::collections::HashMap;

    fn props(expires_at: Option<DateTime<Utc>>) -> IssueCertificateProps {
        IssueCertificateProps {
            tenant_id: TenantId::from("acme-academy"),
            student_id: Uuid::new_v4(),
            course_id: Some(Uuid::new_v4()),
            enrollment_id: None,
            template_id: Uuid::new_v4(),
            metadata: CertificateMetadata {
                student_name: "Ada Lovelace".to_string(),
                course_name: "Applied Rust".to_string(),
                instructor_name: "G. Hopper".to_string(),
                completion_date: Utc::now(),
                score: Some(95.0),
                grade: None,
                course_duration_hours: Some(40),
                custom_fields: HashMap::new(),
            },
            expires_at,
        }
    }

    fn issue(expires_at: Option<DateTime<Utc>>) -> Certificate {
        Certificate::issue(props(expires_at), &CertificateSequence::new())
    }

    #[test]
    fn freshly_issued_certificate_is_valid() {
        let cert = issue(None);
        assert!(cert.is_valid());
        assert_eq!(cert.status(), CertificateStatus::Valid);
    }

    #[test]
    fn issue_records_generated_event() {
        let mut cert = issue(None);
        let events = cert.take_events();
        assert_eq!(events.len(), 1);
        match &events[0] {
            DomainEvent::CertificateGenerated(e) => {
                assert_eq!(e.aggregate_id, cert.id);
                assert_eq!(e.certificate_number, cert.number);
            }
            other => panic!("unexpected event: {:?}", other),
        }
        // Drained: a second take yields nothing.
        assert!(cert.take_events().is_empty());
    }

    #[test]
    fn past_expiry_makes_certificate_invalid() {
        let cert = issue(Some(Utc::now() - Duration::hours(1)));
        assert!(!cert.is_valid());
        assert_eq!(cert.status(), CertificateStatus::Expired);
        assert_eq!(cert.verification_data().status, CertificateStatus::Expired);
    }

    #[test]
    fn future_expiry_keeps_certificate_valid() {
        let cert = issue(Some(Utc::now() + Duration::days(365)));
        assert!(cert.is_valid());
    }

    #[test]
    fn revocation_invalidates_and_outranks_expiry() {
        let mut cert = issue(Some(Utc::now() - Duration::hours(1)));
        cert.revoke("fraudulent completion").unwrap();
        assert!(!cert.is_valid());
        assert_eq!(cert.status(), CertificateStatus::Revoked);
        assert_eq!(cert.verification_data().status, CertificateStatus::Revoked);
    }

    #[test]
    fn second_revoke_fails_and_preserves_original() {
        let mut cert = issue(None);
        cert.revoke("first reason").unwrap();
        let original_at = cert.revoked_at;

        let err = cert.revoke("second reason").unwrap_err();
        assert!(matches!(err, DomainError::InvalidTransition(_)));
        assert_eq!(err.to_string(), "Certificate is already revoked");
        assert_eq!(cert.revocation_reason.as_deref(), Some("first reason"));
        assert_eq!(cert.revoked_at, original_at);
    }

    #[test]
    fn revoke_records_event_with_reason() {
        let mut cert = issue(None);
        cert.take_events();
        cert.revoke("issued in error").unwrap();
        let events = cert.take_events();
        assert_eq!(events.len(), 1);
        match &events[0] {
            DomainEvent::CertificateRevoked(e) => {
                assert_eq!(e.aggregate_id, cert.id);
                assert_eq!(e.reason, "issued in error");
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn certificate_url_is_validated_and_idempotent() {
        let mut cert = issue(None);
        assert!(cert.set_certificate_url("not a url").is_err());
        assert!(cert.certificate_url.is_none());

        cert.set_certificate_url("https://cdn.example.com/c/1.pdf")
            .unwrap();
        cert.set_certificate_url("https://cdn.example.com/c/1.pdf")
            .unwrap();
        cert.set_certificate_url("https://cdn.example.com/c/2.pdf")
            .unwrap();
        assert_eq!(
            cert.certificate_url.as_deref(),
            Some("https://cdn.example.com/c/2.pdf")
        );
    }

    #[test]
    fn certificate_url_is_stored_trimmed() {
        let mut cert = issue(None);
        cert.set_certificate_url("  https://cdn.example.com/c/3.pdf \n")
            .unwrap();
        assert_eq!(
            cert.certificate_url.as_deref(),
            Some("https://cdn.example.com/c/3.pdf")
        );
    }

    #[test]
    fn verification_data_exposes_public_fields_only() {
        let cert = issue(None);
        let data = cert.verification_data();
        assert_eq!(data.certificate_number, cert.number);
        assert_eq!(data.verification_code, cert.verification_code);
        assert_eq!(data.student_name, "Ada Lovelace");
        assert_eq!(data.course_name, "Applied Rust");
        assert_eq!(data.status, CertificateStatus::Valid);
    }
}
