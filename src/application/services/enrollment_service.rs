//! Enrollment use cases

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::application::events::SharedEventBus;
use crate::domain::course::CourseRepository;
use crate::domain::enrollment::{Enrollment, EnrollmentRepository};
use crate::shared::{DomainError, DomainResult};
use crate::tenant::TenantId;

pub struct EnrollmentService {
    enrollments: Arc<dyn EnrollmentRepository>,
    courses: Arc<dyn CourseRepository>,
    event_bus: SharedEventBus,
}

impl EnrollmentService {
    pub fn new(
        enrollments: Arc<dyn EnrollmentRepository>,
        courses: Arc<dyn CourseRepository>,
        event_bus: SharedEventBus,
    ) -> Self {
        Self {
            enrollments,
            courses,
            event_bus,
        }
    }

    /// Enroll a student in a published course. Re-enrolling returns the
    /// existing enrollment unchanged.
    pub async fn enroll(
        &self,
        tenant_id: &TenantId,
        student_id: Uuid,
        course_id: Uuid,
    ) -> DomainResult<Enrollment> {
        let course = self
            .courses
            .find_by_id(tenant_id, course_id)
            .await?
            .ok_or_else(|| DomainError::not_found("course", "id", course_id.to_string()))?;
        if !course.is_published {
            return Err(DomainError::Validation(format!(
                "course '{}' is not published",
                course.title
            )));
        }

        if let Some(existing) = self
            .enrollments
            .find_by_student_and_course(tenant_id, student_id, course_id)
            .await?
        {
            return Ok(existing);
        }

        let enrollment = Enrollment::new(tenant_id.clone(), student_id, course_id);
        let saved = self.enrollments.save(enrollment).await?;
        info!(enrollment = %saved.id, course = %course.title, "Student enrolled");
        Ok(saved)
    }

    pub async fn get(&self, tenant_id: &TenantId, id: Uuid) -> DomainResult<Enrollment> {
        self.enrollments
            .find_by_id(tenant_id, id)
            .await?
            .ok_or_else(|| DomainError::not_found("enrollment", "id", id.to_string()))
    }

    /// Record course progress; completion publishes `EnrollmentCompleted`.
    pub async fn record_progress(
        &self,
        tenant_id: &TenantId,
        id: Uuid,
        percent: u8,
        score: Option<f32>,
    ) -> DomainResult<Enrollment> {
        let mut enrollment = self.get(tenant_id, id).await?;
        enrollment.record_progress(percent, score)?;
        let events = enrollment.take_events();
        let saved = self.enrollments.save(enrollment).await?;

        for event in events {
            self.event_bus.publish(event);
        }
        Ok(saved)
    }
}
