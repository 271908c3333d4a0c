//! Enrollment and progress tracking

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::events::{DomainEvent, EnrollmentCompletedEvent};
use crate::shared::validations::validate_score;
use crate::shared::DomainResult;
use crate::tenant::TenantId;

/// A student's enrollment in a course.
///
/// Progress is monotonic: recording a lower percentage than already
/// reached is a no-op. Completion is reached once at 100 percent and
/// records an `EnrollmentCompleted` event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: Uuid,
    pub tenant_id: TenantId,
    pub student_id: Uuid,
    pub course_id: Uuid,
    pub enrolled_at: DateTime<Utc>,
    /// 0-100
    pub progress_percent: u8,
    pub score: Option<f32>,
    pub completed_at: Option<DateTime<Utc>>,

    #[serde(skip)]
    uncommitted_events: Vec<DomainEvent>,
}

impl Enrollment {
    pub fn new(tenant_id: TenantId, student_id: Uuid, course_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            tenant_id,
            student_id,
            course_id,
            enrolled_at: Utc::now(),
            progress_percent: 0,
            score: None,
            completed_at: None,
            uncommitted_events: Vec::new(),
        }
    }

    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }

    /// Record progress. Clamped to 100, never moves backwards; the
    /// first time 100 is reached the enrollment completes.
    pub fn record_progress(&mut self, percent: u8, score: Option<f32>) -> DomainResult<()> {
        if let Some(score) = score {
            validate_score(score)?;
            self.score = Some(score);
        }

        let percent = percent.min(100);
        if percent <= self.progress_percent {
            return Ok(());
        }
        self.progress_percent = percent;

        if percent == 100 && self.completed_at.is_none() {
            let now = Utc::now();
            self.completed_at = Some(now);
            self.uncommitted_events
                .push(DomainEvent::EnrollmentCompleted(EnrollmentCompletedEvent {
                    aggregate_id: self.id,
                    student_id: self.student_id,
                    course_id: self.course_id,
                    timestamp: now,
                }));
        }
        Ok(())
    }

    pub fn take_events(&mut self) -> Vec<DomainEvent> {
        std::mem::take(&mut self.uncommitted_events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enrollment() -> Enrollment {
        Enrollment::new(TenantId::from("acme-academy"), Uuid::new_v4(), Uuid::new_v4())
    }

    #[test]
    fn progress_is_monotonic() {
        let mut e = enrollment();
        e.record_progress(40, None).unwrap();
        e.record_progress(20, None).unwrap();
        assert_eq!(e.progress_percent, 40);
    }

    #[test]
    fn progress_is_clamped_to_100() {
        let mut e = enrollment();
        e.record_progress(250, None).unwrap();
        assert_eq!(e.progress_percent, 100);
        assert!(e.is_completed());
    }

    #[test]
    fn completion_happens_once_and_records_event() {
        let mut e = enrollment();
        e.record_progress(100, Some(88.0)).unwrap();
        let first_completed_at = e.completed_at;
        let events = e.take_events();
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], DomainEvent::EnrollmentCompleted(_)));

        e.record_progress(100, None).unwrap();
        assert!(e.take_events().is_empty());
        assert_eq!(e.completed_at, first_completed_at);
    }

    #[test]
    fn invalid_score_is_rejected() {
        let mut e = enrollment();
        assert!(e.record_progress(50, Some(120.0)).is_err());
        assert_eq!(e.progress_percent, 0);
    }
}
