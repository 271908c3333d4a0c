pub mod memory;

pub use memory::{
    InMemoryCertificateRepository, InMemoryCourseRepository, InMemoryEnrollmentRepository,
    InMemoryTemplateRepository,
};
