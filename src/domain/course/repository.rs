//! Course repository interface

use async_trait::async_trait;
use uuid::Uuid;

use super::model::Course;
use crate::shared::DomainResult;
use crate::tenant::TenantId;

#[async_trait]
pub trait CourseRepository: Send + Sync {
    async fn find_by_id(&self, tenant_id: &TenantId, id: Uuid) -> DomainResult<Option<Course>>;
    async fn list(&self, tenant_id: &TenantId) -> DomainResult<Vec<Course>>;
    async fn save(&self, course: Course) -> DomainResult<Course>;
}
