//! Certificate template entity
//!
//! Tenant-owned design documents rendered into issued certificates.
//! Templates have a lifecycle independent of the certificates produced
//! from them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::tenant::TenantId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PageOrientation {
    Landscape,
    Portrait,
}

impl Default for PageOrientation {
    fn default() -> Self {
        Self::Landscape
    }
}

/// A positioned element on the template canvas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TemplateElement {
    /// Element kind: `text`, `image`, `signature`, `qr_code`
    pub kind: String,
    /// Variable substituted at render time, e.g. `student_name`
    pub variable: Option<String>,
    pub x: f32,
    pub y: f32,
    pub font_size: Option<u16>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TemplateDesign {
    pub orientation: PageOrientation,
    /// Page size, e.g. `A4`, `Letter`
    pub page_size: String,
    pub font_family: String,
    pub elements: Vec<TemplateElement>,
    /// Variable names the design expects to be supplied at render time
    pub variables: Vec<String>,
}

impl Default for TemplateDesign {
    fn default() -> Self {
        Self {
            orientation: PageOrientation::Landscape,
            page_size: "A4".to_string(),
            font_family: "Serif".to_string(),
            elements: Vec::new(),
            variables: vec![
                "student_name".to_string(),
                "course_name".to_string(),
                "completion_date".to_string(),
            ],
        }
    }
}

/// Certificate design document owned by a tenant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CertificateTemplate {
    pub id: Uuid,
    pub tenant_id: TenantId,
    pub name: String,
    pub design: TemplateDesign,
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CertificateTemplate {
    pub fn new(tenant_id: TenantId, name: impl Into<String>, design: TemplateDesign) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            tenant_id,
            name: name.into(),
            design,
            is_default: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn update_design(&mut self, design: TemplateDesign) {
        self.design = design;
        self.updated_at = Utc::now();
    }

    pub fn set_default(&mut self, value: bool) {
        self.is_default = value;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_template_is_not_default() {
        let t = CertificateTemplate::new(
            TenantId::from("acme-academy"),
            "Completion",
            TemplateDesign::default(),
        );
        assert!(!t.is_default);
        assert_eq!(t.design.page_size, "A4");
    }

    #[test]
    fn mutators_bump_updated_at() {
        let mut t = CertificateTemplate::new(
            TenantId::from("acme-academy"),
            "Completion",
            TemplateDesign::default(),
        );
        let before = t.updated_at;
        t.set_default(true);
        assert!(t.is_default);
        assert!(t.updated_at >= before);
    }

    #[test]
    fn update_design_replaces_the_design() {
        let mut t = CertificateTemplate::new(
            TenantId::from("acme-academy"),
            "Completion",
            TemplateDesign::default(),
        );
        let before = t.updated_at;

        let new_design = TemplateDesign {
            orientation: PageOrientation::Portrait,
            page_size: "Letter".to_string(),
            ..TemplateDesign::default()
        };
        t.update_design(new_design.clone());

        assert_eq!(t.design, new_design);
        assert_eq!(t.design.orientation, PageOrientation::Portrait);
        assert!(t.updated_at >= before);
    }
}
