pub mod course_service;
pub mod grading;
pub mod quiz_attempt_service;
pub mod quiz_service;
pub mod user_service;

pub use course_service::CourseService;
pub use quiz_attempt_service::QuizAttemptService;
pub use quiz_service::QuizService;
pub use user_service::UserService;
