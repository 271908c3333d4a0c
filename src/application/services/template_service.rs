//! Certificate template management

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::domain::certificate::{
    CertificateTemplate, CertificateTemplateRepository, TemplateDesign,
};
use crate::shared::{DomainError, DomainResult};
use crate::tenant::TenantId;

pub struct TemplateService {
    templates: Arc<dyn CertificateTemplateRepository>,
}

impl TemplateService {
    pub fn new(templates: Arc<dyn CertificateTemplateRepository>) -> Self {
        Self { templates }
    }

    pub async fn create(
        &self,
        tenant_id: &TenantId,
        name: String,
        design: TemplateDesign,
        make_default: bool,
    ) -> DomainResult<CertificateTemplate> {
        if name.trim().is_empty() {
            return Err(DomainError::Validation(
                "template name must not be empty".to_string(),
            ));
        }
        let mut template = CertificateTemplate::new(tenant_id.clone(), name, design);
        if make_default {
            template.set_default(true);
        }
        let saved = self.templates.save(template).await?;
        info!(template = %saved.id, tenant = %tenant_id, "Template created");
        Ok(saved)
    }

    pub async fn list(&self, tenant_id: &TenantId) -> DomainResult<Vec<CertificateTemplate>> {
        self.templates.list(tenant_id).await
    }

    pub async fn set_default(
        &self,
        tenant_id: &TenantId,
        id: Uuid,
    ) -> DomainResult<CertificateTemplate> {
        let mut template = self
            .templates
            .find_by_id(tenant_id, id)
            .await?
            .ok_or_else(|| DomainError::not_found("template", "id", id.to_string()))?;
        template.set_default(true);
        self.templates.save(template).await
    }
}
