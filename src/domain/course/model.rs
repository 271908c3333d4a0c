//! Course catalog entity

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::tenant::TenantId;

/// A catalog course owned by a tenant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub id: Uuid,
    pub tenant_id: TenantId,
    pub title: String,
    pub description: Option<String>,
    pub instructor_name: String,
    pub duration_hours: Option<u32>,
    /// List price; `None` means free
    pub price: Option<Decimal>,
    /// Currency code (ISO 4217)
    pub currency: String,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Course {
    pub fn new(
        tenant_id: TenantId,
        title: impl Into<String>,
        instructor_name: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            tenant_id,
            title: title.into(),
            description: None,
            instructor_name: instructor_name.into(),
            duration_hours: None,
            price: None,
            currency: "USD".to_string(),
            is_published: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn publish(&mut self) {
        self.is_published = true;
        self.updated_at = Utc::now();
    }

    pub fn is_free(&self) -> bool {
        self.price.is_none() || self.price == Some(Decimal::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_course_is_unpublished_and_free() {
        let course = Course::new(TenantId::from("acme-academy"), "Applied Rust", "G. Hopper");
        assert!(!course.is_published);
        assert!(course.is_free());
    }

    #[test]
    fn priced_course_is_not_free() {
        let mut course = Course::new(TenantId::from("acme-academy"), "Applied Rust", "G. Hopper");
        course.price = Some(Decimal::new(4999, 2));
        assert!(!course.is_free());
    }
}
