use std::sync::Arc;

use crate::{
    auth::{IdentityProvider, JwtIdentityProvider, JwtService},
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{
        AnalyticsRepository, AuditLogRepository, CourseRepository, CredentialRepository,
        EnrollmentRepository, MongoAnalyticsRepository, MongoAuditLogRepository,
        MongoCourseRepository, MongoCredentialRepository, MongoEnrollmentRepository,
        MongoNotificationRepository, MongoQuestionRepository, MongoQuizRepository,
        MongoSubmissionRepository, MongoUserRepository, NotificationRepository,
        QuestionRepository, QuizRepository, SubmissionRepository, UserRepository,
    },
    services::{CourseService, QuizAttemptService, QuizService, UserService},
};

/// Every store the services are built from.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub credentials: Arc<dyn CredentialRepository>,
    pub courses: Arc<dyn CourseRepository>,
    pub enrollments: Arc<dyn EnrollmentRepository>,
    pub quizzes: Arc<dyn QuizRepository>,
    pub questions: Arc<dyn QuestionRepository>,
    pub submissions: Arc<dyn SubmissionRepository>,
    pub analytics: Arc<dyn AnalyticsRepository>,
    pub audit_logs: Arc<dyn AuditLogRepository>,
    pub notifications: Arc<dyn NotificationRepository>,
}

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub course_service: Arc<CourseService>,
    pub quiz_service: Arc<QuizService>,
    pub quiz_attempt_service: Arc<QuizAttemptService>,
    pub identity: Arc<dyn IdentityProvider>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(db: &Database, config: Config) -> AppResult<Self> {
        let users = Arc::new(MongoUserRepository::new(db));
        users.ensure_indexes().await?;
        let credentials = Arc::new(MongoCredentialRepository::new(db));
        credentials.ensure_indexes().await?;
        let courses = Arc::new(MongoCourseRepository::new(db));
        courses.ensure_indexes().await?;
        let enrollments = Arc::new(MongoEnrollmentRepository::new(db));
        enrollments.ensure_indexes().await?;
        let quizzes = Arc::new(MongoQuizRepository::new(db));
        quizzes.ensure_indexes().await?;
        let questions = Arc::new(MongoQuestionRepository::new(db));
        questions.ensure_indexes().await?;
        let submissions = Arc::new(MongoSubmissionRepository::new(db));
        submissions.ensure_indexes().await?;
        let analytics = Arc::new(MongoAnalyticsRepository::new(db));
        analytics.ensure_indexes().await?;

        let repositories = Repositories {
            users,
            credentials,
            courses,
            enrollments,
            quizzes,
            questions,
            submissions,
            analytics,
            audit_logs: Arc::new(MongoAuditLogRepository::new(db)),
            notifications: Arc::new(MongoNotificationRepository::new(db)),
        };

        Ok(Self::from_repositories(config, repositories))
    }

    pub fn from_repositories(config: Config, repos: Repositories) -> Self {
        let jwt = JwtService::new(&config.jwt_secret, config.jwt_expiration_hours);
        let identity: Arc<dyn IdentityProvider> =
            Arc::new(JwtIdentityProvider::new(repos.credentials.clone(), jwt));

        let user_service = Arc::new(UserService::new(
            repos.users.clone(),
            identity.clone(),
            config.allow_admin_signup,
        ));
        let course_service = Arc::new(CourseService::new(
            repos.courses.clone(),
            repos.enrollments.clone(),
            repos.users.clone(),
        ));
        let quiz_service = Arc::new(QuizService::new(
            repos.quizzes.clone(),
            repos.questions.clone(),
            repos.courses.clone(),
            repos.enrollments.clone(),
            repos.submissions.clone(),
            repos.users.clone(),
        ));
        let quiz_attempt_service = Arc::new(QuizAttemptService::new(
            repos.quizzes,
            repos.questions,
            repos.enrollments,
            repos.submissions,
            repos.analytics,
            repos.audit_logs,
            repos.notifications,
        ));

        Self {
            user_service,
            course_service,
            quiz_service,
            quiz_attempt_service,
            identity,
            config: Arc::new(config),
        }
    }
}
