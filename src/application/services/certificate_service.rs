//! Certificate use cases
//!
//! Orchestrates the aggregate, repositories and event bus: resolves
//! course/enrollment context into metadata, drives lifecycle
//! transitions and publishes the resulting domain events after a
//! successful save.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use metrics::counter;
use tracing::{info, warn};
use uuid::Uuid;

use crate::application::events::SharedEventBus;
use crate::domain::certificate::{
    Certificate, CertificateId, CertificateMetadata, CertificateRepository, CertificateSequence,
    CertificateTemplateRepository, IssueCertificateProps, VerificationCode, VerificationData,
};
use crate::domain::course::CourseRepository;
use crate::domain::enrollment::EnrollmentRepository;
use crate::shared::{DomainError, DomainResult};
use crate::tenant::TenantId;

/// Issuance request as the application layer sees it. Names that are
/// not supplied explicitly are resolved from the referenced course and
/// enrollment.
#[derive(Debug, Clone)]
pub struct IssueCertificateInput {
    pub student_id: Uuid,
    pub student_name: String,
    pub course_id: Option<Uuid>,
    pub enrollment_id: Option<Uuid>,
    /// Explicit template; the tenant default is used when absent
    pub template_id: Option<Uuid>,
    pub score: Option<f32>,
    pub grade: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub custom_fields: HashMap<String, String>,
}

pub struct CertificateService {
    certificates: Arc<dyn CertificateRepository>,
    templates: Arc<dyn CertificateTemplateRepository>,
    courses: Arc<dyn CourseRepository>,
    enrollments: Arc<dyn EnrollmentRepository>,
    event_bus: SharedEventBus,
    sequence: Arc<CertificateSequence>,
}

impl CertificateService {
    pub fn new(
        certificates: Arc<dyn CertificateRepository>,
        templates: Arc<dyn CertificateTemplateRepository>,
        courses: Arc<dyn CourseRepository>,
        enrollments: Arc<dyn EnrollmentRepository>,
        event_bus: SharedEventBus,
        sequence: Arc<CertificateSequence>,
    ) -> Self {
        Self {
            certificates,
            templates,
            courses,
            enrollments,
            event_bus,
            sequence,
        }
    }

    /// Issue a certificate for a student.
    ///
    /// Course name, instructor and duration come from the referenced
    /// course; completion date and score fall back to the referenced
    /// enrollment. A verification-code collision at save time is
    /// retried once with a fresh code.
    pub async fn issue(
        &self,
        tenant_id: &TenantId,
        input: IssueCertificateInput,
    ) -> DomainResult<Certificate> {
        let course = match input.course_id {
            Some(course_id) => self.courses.find_by_id(tenant_id, course_id).await?,
            None => None,
        };
        let enrollment = match input.enrollment_id {
            Some(enrollment_id) => self.enrollments.find_by_id(tenant_id, enrollment_id).await?,
            None => None,
        };

        let template = match input.template_id {
            Some(id) => self
                .templates
                .find_by_id(tenant_id, id)
                .await?
                .ok_or_else(|| DomainError::not_found("template", "id", id.to_string()))?,
            None => self.templates.find_default(tenant_id).await?.ok_or_else(|| {
                DomainError::Validation(format!(
                    "tenant {} has no default certificate template",
                    tenant_id
                ))
            })?,
        };

        let completion_date = enrollment
            .as_ref()
            .and_then(|e| e.completed_at)
            .unwrap_or_else(Utc::now);
        let score = input.score.or(enrollment.as_ref().and_then(|e| e.score));

        let metadata = CertificateMetadata {
            student_name: input.student_name,
            course_name: course
                .as_ref()
                .map(|c| c.title.clone())
                .unwrap_or_else(|| "Course".to_string()),
            instructor_name: course
                .as_ref()
                .map(|c| c.instructor_name.clone())
                .unwrap_or_default(),
            completion_date,
            score,
            grade: input.grade,
            course_duration_hours: course.as_ref().and_then(|c| c.duration_hours),
            custom_fields: input.custom_fields,
        };

        let mut certificate = Certificate::issue(
            IssueCertificateProps {
                tenant_id: tenant_id.clone(),
                student_id: input.student_id,
                course_id: input.course_id,
                enrollment_id: input.enrollment_id,
                template_id: template.id,
                metadata,
                expires_at: input.expires_at,
            },
            &self.sequence,
        );
        let events = certificate.take_events();

        // Verification codes are random, not unique by construction;
        // one retry with a fresh code covers a save-time collision.
        let saved = match self.certificates.save(certificate.clone()).await {
            Ok(saved) => saved,
            Err(DomainError::Conflict(msg)) => {
                warn!(%msg, "Verification code collision, regenerating");
                certificate.regenerate_verification_code();
                self.certificates.save(certificate).await?
            }
            Err(e) => return Err(e),
        };

        for event in events {
            self.event_bus.publish(event);
        }
        counter!("certificates_issued_total").increment(1);
        info!(
            certificate = %saved.number,
            tenant = %tenant_id,
            student = %saved.student_id,
            "Certificate issued"
        );
        Ok(saved)
    }

    pub async fn get(
        &self,
        tenant_id: &TenantId,
        id: CertificateId,
    ) -> DomainResult<Certificate> {
        self.certificates
            .find_by_id(tenant_id, id)
            .await?
            .ok_or_else(|| DomainError::not_found("certificate", "id", id.to_string()))
    }

    pub async fn list_for_student(
        &self,
        tenant_id: &TenantId,
        student_id: Uuid,
    ) -> DomainResult<Vec<Certificate>> {
        self.certificates.find_by_student(tenant_id, student_id).await
    }

    pub async fn list_for_course(
        &self,
        tenant_id: &TenantId,
        course_id: Uuid,
    ) -> DomainResult<Vec<Certificate>> {
        self.certificates.find_by_course(tenant_id, course_id).await
    }

    /// Revoke a certificate. The aggregate rejects a second revocation.
    pub async fn revoke(
        &self,
        tenant_id: &TenantId,
        id: CertificateId,
        reason: String,
    ) -> DomainResult<Certificate> {
        let mut certificate = self.get(tenant_id, id).await?;
        certificate.revoke(reason)?;
        let events = certificate.take_events();
        let saved = self.certificates.save(certificate).await?;

        for event in events {
            self.event_bus.publish(event);
        }
        counter!("certificates_revoked_total").increment(1);
        info!(certificate = %saved.number, tenant = %tenant_id, "Certificate revoked");
        Ok(saved)
    }

    pub async fn set_certificate_url(
        &self,
        tenant_id: &TenantId,
        id: CertificateId,
        url: String,
    ) -> DomainResult<Certificate> {
        let mut certificate = self.get(tenant_id, id).await?;
        certificate.set_certificate_url(url)?;
        self.certificates.save(certificate).await
    }

    /// Public verification lookup by code. Not tenant-scoped.
    ///
    /// Deliberately does not emit `CertificateValidated`; the event type
    /// exists but its trigger is awaiting product clarification.
    pub async fn verify(&self, code: &VerificationCode) -> DomainResult<VerificationData> {
        counter!("certificate_verifications_total").increment(1);
        let certificate = self
            .certificates
            .find_by_verification_code(code)
            .await?
            .ok_or_else(|| DomainError::not_found("certificate", "verification_code", code.as_str()))?;
        Ok(certificate.verification_data())
    }
}
