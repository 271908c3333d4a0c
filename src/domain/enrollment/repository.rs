//! Enrollment repository interface

use async_trait::async_trait;
use uuid::Uuid;

use super::model::Enrollment;
use crate::shared::DomainResult;
use crate::tenant::TenantId;

#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    async fn find_by_id(&self, tenant_id: &TenantId, id: Uuid) -> DomainResult<Option<Enrollment>>;

    async fn find_by_student_and_course(
        &self,
        tenant_id: &TenantId,
        student_id: Uuid,
        course_id: Uuid,
    ) -> DomainResult<Option<Enrollment>>;

    async fn list_by_student(
        &self,
        tenant_id: &TenantId,
        student_id: Uuid,
    ) -> DomainResult<Vec<Enrollment>>;

    async fn save(&self, enrollment: Enrollment) -> DomainResult<Enrollment>;
}
