pub mod activity;
pub mod course;
pub mod credential;
pub mod enrollment;
pub mod question;
pub mod quiz;
pub mod submission;
pub mod user;

pub use activity::{AuditLogEntry, Notification, StudentAnalytics};
pub use course::{Course, CourseDifficulty, CourseMaterial, CourseUpdate, CourseVisibility};
pub use credential::Credential;
pub use enrollment::{Enrollment, EnrollmentStatus};
pub use question::{Question, QuestionOption, QuestionType};
pub use quiz::{Quiz, QuizVisibility};
pub use submission::{Evaluation, GradedAnswer, Reopen, Submission, SubmissionStatus};
pub use user::{User, UserMetadata, UserRole, UserUpdate};
