//! Certificate bounded context: aggregate, value objects, templates
//! and the persistence contracts they are saved through.

pub mod model;
pub mod repository;
pub mod template;
pub mod value_objects;

pub use model::{Certificate, CertificateStatus, IssueCertificateProps, VerificationData};
pub use repository::{CertificateRepository, CertificateTemplateRepository};
pub use template::{CertificateTemplate, PageOrientation, TemplateDesign, TemplateElement};
pub use value_objects::{
    CertificateId, CertificateMetadata, CertificateNumber, CertificateSequence, VerificationCode,
};
