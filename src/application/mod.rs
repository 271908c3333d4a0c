//! Application layer: use cases, the event bus and the experiment
//! provider. Services own no state beyond injected repositories.

pub mod events;
pub mod experiments;
pub mod services;

pub use events::{create_event_bus, EventBus, SharedEventBus};
pub use experiments::{Experiment, ExperimentProvider, Variant};
pub use services::{
    CertificateService, CourseService, CreateCourseInput, EnrollmentService,
    IssueCertificateInput, TemplateService,
};
