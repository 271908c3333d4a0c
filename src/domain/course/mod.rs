pub mod model;
pub mod repository;

pub use model::Course;
pub use repository::CourseRepository;
