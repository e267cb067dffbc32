pub mod activity_repository;
pub mod course_repository;
pub mod credential_repository;
pub mod enrollment_repository;
pub mod question_repository;
pub mod quiz_repository;
pub mod submission_repository;
pub mod user_repository;

pub use activity_repository::{
    AnalyticsRepository, AuditLogRepository, MongoAnalyticsRepository, MongoAuditLogRepository,
    MongoNotificationRepository, NotificationRepository,
};
pub use course_repository::{CourseRepository, MongoCourseRepository};
pub use credential_repository::{CredentialRepository, MongoCredentialRepository};
pub use enrollment_repository::{EnrollmentRepository, MongoEnrollmentRepository};
pub use question_repository::{MongoQuestionRepository, QuestionRepository};
pub use quiz_repository::{MongoQuizRepository, QuizRepository};
pub use submission_repository::{MongoSubmissionRepository, SubmissionRepository};
pub use user_repository::{MongoUserRepository, UserRepository};
