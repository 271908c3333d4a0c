//! Domain layer: entities, value objects, repository contracts and
//! domain events. No I/O happens here; persistence and transport live
//! behind the interfaces this module defines.

pub mod certificate;
pub mod course;
pub mod enrollment;
pub mod events;

pub use certificate::{
    Certificate, CertificateId, CertificateMetadata, CertificateNumber, CertificateRepository,
    CertificateSequence, CertificateStatus, CertificateTemplate, CertificateTemplateRepository,
    IssueCertificateProps, TemplateDesign, VerificationCode, VerificationData,
};
pub use course::{Course, CourseRepository};
pub use enrollment::{Enrollment, EnrollmentRepository};
pub use events::{DomainEvent, EventMessage};

pub use crate::shared::{DomainError, DomainResult};
