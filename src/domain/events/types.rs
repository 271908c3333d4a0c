//! Domain event payloads
//!
//! Facts about what happened in the system, published for independent
//! consumers (notifications, analytics) to react to.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::certificate::{CertificateId, CertificateNumber};
use crate::tenant::TenantId;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum DomainEvent {
    CertificateGenerated(CertificateGeneratedEvent),
    CertificateRevoked(CertificateRevokedEvent),
    /// Defined for the verification flow but currently never raised by
    /// the aggregate; the trigger is awaiting product clarification.
    CertificateValidated(CertificateValidatedEvent),
    EnrollmentCompleted(EnrollmentCompletedEvent),
    ExperimentExposure(ExperimentExposureEvent),
}

impl DomainEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            DomainEvent::CertificateGenerated(_) => "certificate_generated",
            DomainEvent::CertificateRevoked(_) => "certificate_revoked",
            DomainEvent::CertificateValidated(_) => "certificate_validated",
            DomainEvent::EnrollmentCompleted(_) => "enrollment_completed",
            DomainEvent::ExperimentExposure(_) => "experiment_exposure",
        }
    }

    /// Identity of the aggregate (or subject) the event is about.
    pub fn aggregate_id(&self) -> String {
        match self {
            DomainEvent::CertificateGenerated(e) => e.aggregate_id.to_string(),
            DomainEvent::CertificateRevoked(e) => e.aggregate_id.to_string(),
            DomainEvent::CertificateValidated(e) => e.aggregate_id.to_string(),
            DomainEvent::EnrollmentCompleted(e) => e.aggregate_id.to_string(),
            DomainEvent::ExperimentExposure(e) => e.subject_id.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CertificateGeneratedEvent {
    pub aggregate_id: CertificateId,
    pub certificate_number: CertificateNumber,
    pub tenant_id: TenantId,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CertificateRevokedEvent {
    pub aggregate_id: CertificateId,
    pub reason: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CertificateValidatedEvent {
    pub aggregate_id: CertificateId,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrollmentCompletedEvent {
    pub aggregate_id: Uuid,
    pub student_id: Uuid,
    pub course_id: Uuid,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentExposureEvent {
    pub experiment: String,
    pub variant: String,
    pub subject_id: Uuid,
    pub timestamp: DateTime<Utc>,
}

/// Envelope handed to subscribers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventMessage {
    pub event: DomainEvent,
    pub published_at: DateTime<Utc>,
}

impl EventMessage {
    pub fn new(event: DomainEvent) -> Self {
        Self {
            event,
            published_at: Utc::now(),
        }
    }
}
