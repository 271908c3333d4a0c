pub mod model;
pub mod repository;

pub use model::Enrollment;
pub use repository::EnrollmentRepository;
