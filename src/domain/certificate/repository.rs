//! Certificate repository interfaces
//!
//! Persistence contracts only; no implementation is prescribed here.
//! Absence is signalled with `Ok(None)`/empty collections, never errors.

use async_trait::async_trait;
use uuid::Uuid;

use super::model::Certificate;
use super::template::CertificateTemplate;
use super::value_objects::{CertificateId, CertificateNumber, VerificationCode};
use crate::shared::DomainResult;
use crate::tenant::TenantId;

#[async_trait]
pub trait CertificateRepository: Send + Sync {
    async fn find_by_id(
        &self,
        tenant_id: &TenantId,
        id: CertificateId,
    ) -> DomainResult<Option<Certificate>>;

    async fn find_by_number(
        &self,
        tenant_id: &TenantId,
        number: &CertificateNumber,
    ) -> DomainResult<Option<Certificate>>;

    /// Public verification lookup; deliberately not tenant-scoped.
    async fn find_by_verification_code(
        &self,
        code: &VerificationCode,
    ) -> DomainResult<Option<Certificate>>;

    async fn find_by_student(
        &self,
        tenant_id: &TenantId,
        student_id: Uuid,
    ) -> DomainResult<Vec<Certificate>>;

    async fn find_by_course(
        &self,
        tenant_id: &TenantId,
        course_id: Uuid,
    ) -> DomainResult<Vec<Certificate>>;

    /// Upsert. Must reject a verification code already held by a
    /// different certificate with `DomainError::Conflict`.
    async fn save(&self, certificate: Certificate) -> DomainResult<Certificate>;
}

#[async_trait]
pub trait CertificateTemplateRepository: Send + Sync {
    async fn find_by_id(
        &self,
        tenant_id: &TenantId,
        id: Uuid,
    ) -> DomainResult<Option<CertificateTemplate>>;

    async fn find_default(&self, tenant_id: &TenantId)
        -> DomainResult<Option<CertificateTemplate>>;

    async fn list(&self, tenant_id: &TenantId) -> DomainResult<Vec<CertificateTemplate>>;

    /// Upsert. Saving a template with `is_default` set clears the flag
    /// on the tenant's previous default.
    async fn save(&self, template: CertificateTemplate) -> DomainResult<CertificateTemplate>;
}
