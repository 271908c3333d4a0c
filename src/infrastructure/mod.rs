//! Infrastructure: concrete implementations of the domain's
//! persistence contracts. Only in-memory stores are provided; any
//! durable store satisfying the repository traits is a drop-in.

pub mod storage;

pub use storage::{
    InMemoryCertificateRepository, InMemoryCourseRepository, InMemoryEnrollmentRepository,
    InMemoryTemplateRepository,
};
