//! Course catalog use cases

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use crate::domain::course::{Course, CourseRepository};
use crate::shared::{DomainError, DomainResult};
use crate::tenant::TenantId;

#[derive(Debug, Clone)]
pub struct CreateCourseInput {
    pub title: String,
    pub description: Option<String>,
    pub instructor_name: String,
    pub duration_hours: Option<u32>,
    pub price: Option<Decimal>,
    pub currency: Option<String>,
}

pub struct CourseService {
    courses: Arc<dyn CourseRepository>,
}

impl CourseService {
    pub fn new(courses: Arc<dyn CourseRepository>) -> Self {
        Self { courses }
    }

    pub async fn create(
        &self,
        tenant_id: &TenantId,
        input: CreateCourseInput,
    ) -> DomainResult<Course> {
        if input.title.trim().is_empty() {
            return Err(DomainError::Validation(
                "course title must not be empty".to_string(),
            ));
        }

        let mut course = Course::new(tenant_id.clone(), input.title, input.instructor_name);
        course.description = input.description;
        course.duration_hours = input.duration_hours;
        course.price = input.price;
        if let Some(currency) = input.currency {
            course.currency = currency;
        }

        let saved = self.courses.save(course).await?;
        info!(course = %saved.id, title = %saved.title, "Course created");
        Ok(saved)
    }

    pub async fn get(&self, tenant_id: &TenantId, id: Uuid) -> DomainResult<Course> {
        self.courses
            .find_by_id(tenant_id, id)
            .await?
            .ok_or_else(|| DomainError::not_found("course", "id", id.to_string()))
    }

    pub async fn list(&self, tenant_id: &TenantId) -> DomainResult<Vec<Course>> {
        self.courses.list(tenant_id).await
    }

    pub async fn publish(&self, tenant_id: &TenantId, id: Uuid) -> DomainResult<Course> {
        let mut course = self.get(tenant_id, id).await?;
        course.publish();
        self.courses.save(course).await
    }
}
