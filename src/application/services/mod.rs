//! Application services (use cases)

pub mod certificate_service;
pub mod course_service;
pub mod enrollment_service;
pub mod template_service;

pub use certificate_service::{CertificateService, IssueCertificateInput};
pub use course_service::{CourseService, CreateCourseInput};
pub use enrollment_service::EnrollmentService;
pub use template_service::TemplateService;
