//! In-memory repository implementations
//!
//! Development and test stand-ins for the domain repository contracts.
//! All lookups are tenant-filtered except verification-code lookup,
//! which is global by design.

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use crate::domain::certificate::{
    Certificate, CertificateId, CertificateNumber, CertificateRepository, CertificateTemplate,
    CertificateTemplateRepository, VerificationCode,
};
use crate::domain::course::{Course, CourseRepository};
use crate::domain::enrollment::{Enrollment, EnrollmentRepository};
use crate::shared::{DomainError, DomainResult};
use crate::tenant::TenantId;

#[derive(Default)]
pub struct InMemoryCertificateRepository {
    certificates: DashMap<CertificateId, Certificate>,
}

impl InMemoryCertificateRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CertificateRepository for InMemoryCertificateRepository {
    async fn find_by_id(
        &self,
        tenant_id: &TenantId,
        id: CertificateId,
    ) -> DomainResult<Option<Certificate>> {
        Ok(self
            .certificates
            .get(&id)
            .filter(|c| &c.tenant_id == tenant_id)
            .map(|c| c.clone()))
    }

    async fn find_by_number(
        &self,
        tenant_id: &TenantId,
        number: &CertificateNumber,
    ) -> DomainResult<Option<Certificate>> {
        Ok(self
            .certificates
            .iter()
            .find(|c| &c.tenant_id == tenant_id && &c.number == number)
            .map(|c| c.clone()))
    }

    async fn find_by_verification_code(
        &self,
        code: &VerificationCode,
    ) -> DomainResult<Option<Certificate>> {
        Ok(self
            .certificates
            .iter()
            .find(|c| &c.verification_code == code)
            .map(|c| c.clone()))
    }

    async fn find_by_student(
        &self,
        tenant_id: &TenantId,
        student_id: Uuid,
    ) -> DomainResult<Vec<Certificate>> {
        Ok(self
            .certificates
            .iter()
            .filter(|c| &c.tenant_id == tenant_id && c.student_id == student_id)
            .map(|c| c.clone())
            .collect())
    }

    async fn find_by_course(
        &self,
        tenant_id: &TenantId,
        course_id: Uuid,
    ) -> DomainResult<Vec<Certificate>> {
        Ok(self
            .certificates
            .iter()
            .filter(|c| &c.tenant_id == tenant_id && c.course_id == Some(course_id))
            .map(|c| c.clone())
            .collect())
    }

    async fn save(&self, certificate: Certificate) -> DomainResult<Certificate> {
        let collision = self.certificates.iter().any(|c| {
            c.verification_code == certificate.verification_code && c.id != certificate.id
        });
        if collision {
            return Err(DomainError::Conflict(format!(
                "verification code {} already in use",
                certificate.verification_code
            )));
        }
        self.certificates.insert(certificate.id, certificate.clone());
        Ok(certificate)
    }
}

#[derive(Default)]
pub struct InMemoryTemplateRepository {
    templates: DashMap<Uuid, CertificateTemplate>,
}

impl InMemoryTemplateRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CertificateTemplateRepository for InMemoryTemplateRepository {
    async fn find_by_id(
        &self,
        tenant_id: &TenantId,
        id: Uuid,
    ) -> DomainResult<Option<CertificateTemplate>> {
        Ok(self
            .templates
            .get(&id)
            .filter(|t| &t.tenant_id == tenant_id)
            .map(|t| t.clone()))
    }

    async fn find_default(
        &self,
        tenant_id: &TenantId,
    ) -> DomainResult<Option<CertificateTemplate>> {
        Ok(self
            .templates
            .iter()
            .find(|t| &t.tenant_id == tenant_id && t.is_default)
            .map(|t| t.clone()))
    }

    async fn list(&self, tenant_id: &TenantId) -> DomainResult<Vec<CertificateTemplate>> {
        Ok(self
            .templates
            .iter()
            .filter(|t| &t.tenant_id == tenant_id)
            .map(|t| t.clone())
            .collect())
    }

    async fn save(&self, template: CertificateTemplate) -> DomainResult<CertificateTemplate> {
        if template.is_default {
            // Only one default per tenant.
            let previous: Vec<Uuid> = self
                .templates
                .iter()
                .filter(|t| {
                    t.tenant_id == template.tenant_id && t.is_default && t.id != template.id
                })
                .map(|t| t.id)
                .collect();
            for id in previous {
                if let Some(mut t) = self.templates.get_mut(&id) {
                    t.is_default = false;
                }
            }
        }
        self.templates.insert(template.id, template.clone());
        Ok(template)
    }
}

#[derive(Default)]
pub struct InMemoryCourseRepository {
    courses: DashMap<Uuid, Course>,
}

impl InMemoryCourseRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CourseRepository for InMemoryCourseRepository {
    async fn find_by_id(&self, tenant_id: &TenantId, id: Uuid) -> DomainResult<Option<Course>> {
        Ok(self
            .courses
            .get(&id)
            .filter(|c| &c.tenant_id == tenant_id)
            .map(|c| c.clone()))
    }

    async fn list(&self, tenant_id: &TenantId) -> DomainResult<Vec<Course>> {
        Ok(self
            .courses
            .iter()
            .filter(|c| &c.tenant_id == tenant_id)
            .map(|c| c.clone())
            .collect())
    }

    async fn save(&self, course: Course) -> DomainResult<Course> {
        self.courses.insert(course.id, course.clone());
        Ok(course)
    }
}

#[derive(Default)]
pub struct InMemoryEnrollmentRepository {
    enrollments: DashMap<Uuid, Enrollment>,
}

impl InMemoryEnrollmentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EnrollmentRepository for InMemoryEnrollmentRepository {
    async fn find_by_id(&self, tenant_id: &TenantId, id: Uuid) -> DomainResult<Option<Enrollment>> {
        Ok(self
            .enrollments
            .get(&id)
            .filter(|e| &e.tenant_id == tenant_id)
            .map(|e| e.clone()))
    }

    async fn find_by_student_and_course(
        &self,
        tenant_id: &TenantId,
        student_id: Uuid,
        course_id: Uuid,
    ) -> DomainResult<Option<Enrollment>> {
        Ok(self
            .enrollments
            .iter()
            .find(|e| {
                &e.tenant_id == tenant_id && e.student_id == student_id && e.course_id == course_id
            })
            .map(|e| e.clone()))
    }

    async fn list_by_student(
        &self,
        tenant_id: &TenantId,
        student_id: Uuid,
    ) -> DomainResult<Vec<Enrollment>> {
        Ok(self
            .enrollments
            .iter()
            .filter(|e| &e.tenant_id == tenant_id && e.student_id == student_id)
            .map(|e| e.clone())
            .collect())
    }

    async fn save(&self, enrollment: Enrollment) -> DomainResult<Enrollment> {
        self.enrollments.insert(enrollment.id, enrollment.clone());
        Ok(enrollment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::certificate::{
        CertificateMetadata, CertificateSequence, IssueCertificateProps,
    };
    use crate::domain::certificate::TemplateDesign;
    use chrono::Utc;
    use std::collections::HashMap;

    fn tenant() -> TenantId {
        TenantId::from("acme-academy")
    }

    fn issue_certificate(tenant_id: &TenantId) -> Certificate {
        Certificate::issue(
            IssueCertificateProps {
                tenant_id: tenant_id.clone(),
                student_id: Uuid::new_v4(),
                course_id: Some(Uuid::new_v4()),
                enrollment_id: None,
                template_id: Uuid::new_v4(),
                metadata: CertificateMetadata {
                    student_name: "Ada Lovelace".to_string(),
                    course_name: "Applied Rust".to_string(),
                    instructor_name: "G. Hopper".to_string(),
                    completion_date: Utc::now(),
                    score: None,
                    grade: None,
                    course_duration_hours: None,
                    custom_fields: HashMap::new(),
                },
                expires_at: None,
            },
            &CertificateSequence::new(),
        )
    }

    #[tokio::test]
    async fn certificate_lookups_are_tenant_scoped() {
        let repo = InMemoryCertificateRepository::new();
        let cert = issue_certificate(&tenant());
        let id = cert.id;
        repo.save(cert).await.unwrap();

        assert!(repo.find_by_id(&tenant(), id).await.unwrap().is_some());
        assert!(repo
            .find_by_id(&TenantId::from("other"), id)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn certificate_number_lookup_is_tenant_scoped() {
        let repo = InMemoryCertificateRepository::new();
        let cert = issue_certificate(&tenant());
        let number = cert.number.clone();
        repo.save(cert).await.unwrap();

        let found = repo.find_by_number(&tenant(), &number).await.unwrap();
        assert_eq!(found.unwrap().number, number);
        assert!(repo
            .find_by_number(&TenantId::from("other"), &number)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn verification_code_lookup_is_global() {
        let repo = InMemoryCertificateRepository::new();
        let cert = issue_certificate(&tenant());
        let code = cert.verification_code.clone();
        repo.save(cert).await.unwrap();

        let found = repo.find_by_verification_code(&code).await.unwrap();
        assert!(found.is_some());
    }

    #[tokio::test]
    async fn duplicate_verification_code_is_a_conflict() {
        let repo = InMemoryCertificateRepository::new();
        let first = issue_certificate(&tenant());
        let mut second = issue_certificate(&tenant());
        second.verification_code = first.verification_code.clone();

        repo.save(first).await.unwrap();
        let err = repo.save(second).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn save_is_an_upsert() {
        let repo = InMemoryCertificateRepository::new();
        let mut cert = issue_certificate(&tenant());
        let id = cert.id;
        repo.save(cert.clone()).await.unwrap();

        cert.set_certificate_url("https://cdn.example.com/c/1.pdf")
            .unwrap();
        repo.save(cert).await.unwrap();

        let found = repo.find_by_id(&tenant(), id).await.unwrap().unwrap();
        assert_eq!(
            found.certificate_url.as_deref(),
            Some("https://cdn.example.com/c/1.pdf")
        );
    }

    #[tokio::test]
    async fn saving_default_template_clears_previous_default() {
        let repo = InMemoryTemplateRepository::new();

        let mut first =
            CertificateTemplate::new(tenant(), "Classic", TemplateDesign::default());
        first.set_default(true);
        let first_id = first.id;
        repo.save(first).await.unwrap();

        let mut second =
            CertificateTemplate::new(tenant(), "Modern", TemplateDesign::default());
        second.set_default(true);
        repo.save(second).await.unwrap();

        let default = repo.find_default(&tenant()).await.unwrap().unwrap();
        assert_eq!(default.name, "Modern");
        let old = repo.find_by_id(&tenant(), first_id).await.unwrap().unwrap();
        assert!(!old.is_default);
    }
}
