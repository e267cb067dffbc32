#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;

use lms_server::{
    app_state::{AppState, Repositories},
    auth::{JwtService, Principal},
    config::Config,
    errors::{AppError, AppResult},
    models::domain::{
        AuditLogEntry, Course, CourseDifficulty, CourseUpdate, CourseVisibility, Credential,
        Enrollment, Evaluation, Notification, Question, QuestionOption, QuestionType, Quiz,
        QuizVisibility, Reopen, Submission, SubmissionStatus, User, UserRole, UserUpdate,
    },
    repositories::{
        submission_repository::{ATTEMPT_CONFLICT, ATTEMPT_IN_PROGRESS},
        AnalyticsRepository, AuditLogRepository, CourseRepository, CredentialRepository,
        EnrollmentRepository, NotificationRepository, QuestionRepository, QuizRepository,
        SubmissionRepository, UserRepository,
    },
};

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<String, User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> AppResult<User> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.uid) {
            return Err(AppError::AlreadyExists("Record already exists".to_string()));
        }
        users.insert(user.uid.clone(), user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, uid: &str) -> AppResult<Option<User>> {
        Ok(self.users.read().await.get(uid).cloned())
    }

    async fn update_profile(&self, uid: &str, update: UserUpdate) -> AppResult<User> {
        let mut users = self.users.write().await;
        let user = users
            .get_mut(uid)
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        if let Some(display_name) = update.display_name {
            user.display_name = display_name;
        }
        if let Some(photo_url) = update.photo_url {
            user.photo_url = Some(photo_url);
        }
        if let Some(department) = update.department {
            user.metadata.department = Some(department);
        }
        if let Some(roll_number) = update.roll_number {
            user.metadata.roll_number = Some(roll_number);
        }
        if let Some(employee_id) = update.employee_id {
            user.metadata.employee_id = Some(employee_id);
        }
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn set_role(&self, uid: &str, role: UserRole) -> AppResult<()> {
        let mut users = self.users.write().await;
        let user = users
            .get_mut(uid)
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
        user.role = role;
        Ok(())
    }

    async fn touch_last_login(&self, uid: &str, at: DateTime<Utc>) -> AppResult<()> {
        if let Some(user) = self.users.write().await.get_mut(uid) {
            user.metadata.last_login = Some(at);
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryCredentialRepository {
    credentials: RwLock<HashMap<String, Credential>>,
}

#[async_trait]
impl CredentialRepository for InMemoryCredentialRepository {
    async fn create(&self, credential: Credential) -> AppResult<Credential> {
        let mut credentials = self.credentials.write().await;
        if credentials.values().any(|c| c.email == credential.email) {
            return Err(AppError::AlreadyExists("Record already exists".to_string()));
        }
        credentials.insert(credential.uid.clone(), credential.clone());
        Ok(credential)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Credential>> {
        let credentials = self.credentials.read().await;
        Ok(credentials.values().find(|c| c.email == email).cloned())
    }

    async fn set_role(&self, uid: &str, role: UserRole) -> AppResult<()> {
        let mut credentials = self.credentials.write().await;
        let credential = credentials
            .get_mut(uid)
            .ok_or_else(|| AppError::NotFound("Account not found".to_string()))?;
        credential.role = role;
        Ok(())
    }

    async fn delete(&self, uid: &str) -> AppResult<()> {
        self.credentials.write().await.remove(uid);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryCourseRepository {
    courses: RwLock<HashMap<String, Course>>,
}

#[async_trait]
impl CourseRepository for InMemoryCourseRepository {
    async fn create(&self, course: Course) -> AppResult<Course> {
        self.courses
            .write()
            .await
            .insert(course.id.clone(), course.clone());
        Ok(course)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Course>> {
        Ok(self.courses.read().await.get(id).cloned())
    }

    async fn list(
        &self,
        visibility: CourseVisibility,
        offset: u64,
        limit: u64,
    ) -> AppResult<Vec<Course>> {
        let courses = self.courses.read().await;
        let mut items: Vec<Course> = courses
            .values()
            .filter(|c| !c.is_deleted)
            .filter(|c| match &visibility {
                CourseVisibility::Published => c.is_published,
                CourseVisibility::OwnedBy(teacher_id) => &c.teacher_id == teacher_id,
                CourseVisibility::All => true,
            })
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(items
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn update(&self, id: &str, update: CourseUpdate) -> AppResult<Course> {
        let mut courses = self.courses.write().await;
        let course = courses
            .get_mut(id)
            .filter(|c| !c.is_deleted)
            .ok_or_else(|| AppError::NotFound("Course not found".to_string()))?;

        if let Some(title) = update.title {
            course.title = title;
        }
        if let Some(description) = update.description {
            course.description = description;
        }
        if let Some(syllabus) = update.syllabus {
            course.syllabus = syllabus;
        }
        if let Some(category) = update.category {
            course.category = category;
        }
        if let Some(difficulty) = update.difficulty {
            course.difficulty = difficulty;
        }
        if let Some(thumbnail) = update.thumbnail {
            course.thumbnail = Some(thumbnail);
        }
        if let Some(materials) = update.materials {
            course.materials = materials;
        }
        if let Some(is_published) = update.is_published {
            course.is_published = is_published;
        }
        course.updated_at = Utc::now();
        Ok(course.clone())
    }

    async fn soft_delete(&self, id: &str) -> AppResult<()> {
        let mut courses = self.courses.write().await;
        let course = courses
            .get_mut(id)
            .ok_or_else(|| AppError::NotFound("Course not found".to_string()))?;
        course.is_deleted = true;
        Ok(())
    }

    async fn increment_enrollment_count(&self, id: &str) -> AppResult<()> {
        if let Some(course) = self.courses.write().await.get_mut(id) {
            course.enrollment_count += 1;
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryEnrollmentRepository {
    enrollments: RwLock<Vec<Enrollment>>,
}

#[async_trait]
impl EnrollmentRepository for InMemoryEnrollmentRepository {
    async fn create(&self, enrollment: Enrollment) -> AppResult<Enrollment> {
        let mut enrollments = self.enrollments.write().await;
        if enrollments
            .iter()
            .any(|e| e.student_id == enrollment.student_id && e.course_id == enrollment.course_id)
        {
            return Err(AppError::AlreadyExists(
                "Already enrolled in this course".to_string(),
            ));
        }
        enrollments.push(enrollment.clone());
        Ok(enrollment)
    }

    async fn find(&self, student_id: &str, course_id: &str) -> AppResult<Option<Enrollment>> {
        let enrollments = self.enrollments.read().await;
        Ok(enrollments
            .iter()
            .find(|e| e.student_id == student_id && e.course_id == course_id)
            .cloned())
    }

    async fn find_active(
        &self,
        student_id: &str,
        course_id: &str,
    ) -> AppResult<Option<Enrollment>> {
        Ok(self
            .find(student_id, course_id)
            .await?
            .filter(|e| e.is_active()))
    }

    async fn list_for_student(&self, student_id: &str) -> AppResult<Vec<Enrollment>> {
        let enrollments = self.enrollments.read().await;
        let mut items: Vec<Enrollment> = enrollments
            .iter()
            .filter(|e| e.student_id == student_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| b.enrolled_at.cmp(&a.enrolled_at));
        Ok(items)
    }

    async fn active_course_ids(&self, student_id: &str) -> AppResult<Vec<String>> {
        let enrollments = self.enrollments.read().await;
        Ok(enrollments
            .iter()
            .filter(|e| e.student_id == student_id && e.is_active())
            .map(|e| e.course_id.clone())
            .collect())
    }
}

#[derive(Default)]
pub struct InMemoryQuizRepository {
    quizzes: RwLock<HashMap<String, Quiz>>,
}

#[async_trait]
impl QuizRepository for InMemoryQuizRepository {
    async fn create(&self, quiz: Quiz) -> AppResult<Quiz> {
        self.quizzes
            .write()
            .await
            .insert(quiz.id.clone(), quiz.clone());
        Ok(quiz)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Quiz>> {
        Ok(self.quizzes.read().await.get(id).cloned())
    }

    async fn list(
        &self,
        visibility: QuizVisibility,
        course_id: Option<String>,
        limit: i64,
    ) -> AppResult<Vec<Quiz>> {
        let quizzes = self.quizzes.read().await;
        let mut items: Vec<Quiz> = quizzes
            .values()
            .filter(|q| match &visibility {
                QuizVisibility::All => true,
                QuizVisibility::OwnedBy(teacher_id) => &q.teacher_id == teacher_id,
                QuizVisibility::PublishedInCourses(course_ids) => {
                    q.is_published && course_ids.contains(&q.course_id)
                }
            })
            .filter(|q| course_id.as_ref().map_or(true, |id| &q.course_id == id))
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        items.truncate(limit.max(0) as usize);
        Ok(items)
    }

    async fn record_question_added(&self, id: &str, points: f64) -> AppResult<Quiz> {
        let mut quizzes = self.quizzes.write().await;
        let quiz = quizzes
            .get_mut(id)
            .ok_or_else(|| AppError::NotFound("Quiz not found".to_string()))?;
        quiz.question_count += 1;
        quiz.total_marks += points;
        Ok(quiz.clone())
    }

    async fn revert_question_added(&self, id: &str, points: f64) -> AppResult<()> {
        if let Some(quiz) = self.quizzes.write().await.get_mut(id) {
            quiz.question_count -= 1;
            quiz.total_marks -= points;
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryQuestionRepository {
    questions: RwLock<Vec<Question>>,
}

#[async_trait]
impl QuestionRepository for InMemoryQuestionRepository {
    async fn create(&self, question: Question) -> AppResult<Question> {
        self.questions.write().await.push(question.clone());
        Ok(question)
    }

    async fn list_for_quiz(&self, quiz_id: &str) -> AppResult<Vec<Question>> {
        let questions = self.questions.read().await;
        let mut items: Vec<Question> = questions
            .iter()
            .filter(|q| q.quiz_id == quiz_id)
            .cloned()
            .collect();
        items.sort_by_key(|q| q.order);
        Ok(items)
    }
}

/// Holds one lock across check and write so the open-attempt and
/// status-guarded transitions behave like the unique index and
/// conditional updates of the document store.
#[derive(Default)]
pub struct InMemorySubmissionRepository {
    submissions: RwLock<HashMap<String, Submission>>,
}

impl InMemorySubmissionRepository {
    pub async fn backdate(&self, id: &str, minutes: i64) {
        if let Some(submission) = self.submissions.write().await.get_mut(id) {
            submission.started_at = submission.started_at - Duration::minutes(minutes);
        }
    }

    pub async fn get(&self, id: &str) -> Option<Submission> {
        self.submissions.read().await.get(id).cloned()
    }

    pub async fn count(&self) -> usize {
        self.submissions.read().await.len()
    }
}

fn has_open_attempt(
    submissions: &HashMap<String, Submission>,
    student_id: &str,
    quiz_id: &str,
) -> bool {
    submissions.values().any(|s| {
        s.student_id == student_id
            && s.quiz_id == quiz_id
            && s.status == SubmissionStatus::InProgress
    })
}

#[async_trait]
impl SubmissionRepository for InMemorySubmissionRepository {
    async fn create(&self, submission: Submission) -> AppResult<Submission> {
        let mut submissions = self.submissions.write().await;
        let number_taken = submissions.values().any(|s| {
            s.student_id == submission.student_id
                && s.quiz_id == submission.quiz_id
                && s.attempt_number == submission.attempt_number
        });
        if number_taken
            || has_open_attempt(&submissions, &submission.student_id, &submission.quiz_id)
        {
            return Err(AppError::AlreadyExists(ATTEMPT_CONFLICT.to_string()));
        }
        submissions.insert(submission.id.clone(), submission.clone());
        Ok(submission)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Submission>> {
        Ok(self.submissions.read().await.get(id).cloned())
    }

    async fn find_in_progress(
        &self,
        student_id: &str,
        quiz_id: &str,
    ) -> AppResult<Option<Submission>> {
        let submissions = self.submissions.read().await;
        Ok(submissions
            .values()
            .find(|s| {
                s.student_id == student_id
                    && s.quiz_id == quiz_id
                    && s.status == SubmissionStatus::InProgress
            })
            .cloned())
    }

    async fn count_completed(&self, student_id: &str, quiz_id: &str) -> AppResult<u64> {
        let submissions = self.submissions.read().await;
        Ok(submissions
            .values()
            .filter(|s| s.student_id == student_id && s.quiz_id == quiz_id)
            .filter(|s| s.status.is_completed())
            .count() as u64)
    }

    async fn record_evaluation(
        &self,
        id: &str,
        evaluation: Evaluation,
    ) -> AppResult<Option<Submission>> {
        let mut submissions = self.submissions.write().await;
        match submissions.get_mut(id) {
            Some(submission) if submission.status == SubmissionStatus::InProgress => {
                submission.apply_evaluation(&evaluation);
                Ok(Some(submission.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn reopen(&self, id: &str, reopen: Reopen) -> AppResult<Option<Submission>> {
        let mut submissions = self.submissions.write().await;
        let Some(current) = submissions.get(id) else {
            return Ok(None);
        };
        if !current.status.is_completed() {
            return Ok(None);
        }
        if has_open_attempt(&submissions, &current.student_id, &current.quiz_id) {
            return Err(AppError::AlreadyExists(ATTEMPT_IN_PROGRESS.to_string()));
        }

        let Some(submission) = submissions.get_mut(id) else {
            return Ok(None);
        };
        submission.apply_reopen(&reopen);
        Ok(Some(submission.clone()))
    }

    async fn list_completed(
        &self,
        quiz_id: &str,
        student_id: Option<String>,
    ) -> AppResult<Vec<Submission>> {
        let submissions = self.submissions.read().await;
        let mut items: Vec<Submission> = submissions
            .values()
            .filter(|s| s.quiz_id == quiz_id && s.status.is_completed())
            .filter(|s| student_id.as_ref().map_or(true, |id| &s.student_id == id))
            .cloned()
            .collect();
        items.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        Ok(items)
    }
}

#[derive(Default)]
pub struct InMemoryAnalyticsRepository {
    totals: RwLock<HashMap<String, (i64, f64)>>,
    failing: AtomicBool,
}

impl InMemoryAnalyticsRepository {
    pub fn fail_writes(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    pub async fn totals(&self, student_id: &str) -> Option<(i64, f64)> {
        self.totals.read().await.get(student_id).copied()
    }
}

#[async_trait]
impl AnalyticsRepository for InMemoryAnalyticsRepository {
    async fn record_quiz_completion(&self, student_id: &str, score: f64) -> AppResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::DatabaseError("analytics unavailable".to_string()));
        }
        let mut totals = self.totals.write().await;
        let entry = totals.entry(student_id.to_string()).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += score;
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryAuditLogRepository {
    entries: RwLock<Vec<AuditLogEntry>>,
}

impl InMemoryAuditLogRepository {
    pub async fn entries(&self) -> Vec<AuditLogEntry> {
        self.entries.read().await.clone()
    }
}

#[async_trait]
impl AuditLogRepository for InMemoryAuditLogRepository {
    async fn append(&self, entry: AuditLogEntry) -> AppResult<()> {
        self.entries.write().await.push(entry);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryNotificationRepository {
    notifications: RwLock<Vec<Notification>>,
    failing: AtomicBool,
}

impl InMemoryNotificationRepository {
    pub fn fail_writes(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    pub async fn for_user(&self, user_id: &str) -> Vec<Notification> {
        self.notifications
            .read()
            .await
            .iter()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl NotificationRepository for InMemoryNotificationRepository {
    async fn create(&self, notification: Notification) -> AppResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::DatabaseError("notifications unavailable".to_string()));
        }
        self.notifications.write().await.push(notification);
        Ok(())
    }
}

/// Concrete handles on every in-memory store plus the state built from them.
pub struct TestContext {
    pub users: Arc<InMemoryUserRepository>,
    pub credentials: Arc<InMemoryCredentialRepository>,
    pub courses: Arc<InMemoryCourseRepository>,
    pub enrollments: Arc<InMemoryEnrollmentRepository>,
    pub quizzes: Arc<InMemoryQuizRepository>,
    pub questions: Arc<InMemoryQuestionRepository>,
    pub submissions: Arc<InMemorySubmissionRepository>,
    pub analytics: Arc<InMemoryAnalyticsRepository>,
    pub audit_logs: Arc<InMemoryAuditLogRepository>,
    pub notifications: Arc<InMemoryNotificationRepository>,
    pub state: AppState,
}

impl TestContext {
    pub fn new() -> Self {
        let users = Arc::new(InMemoryUserRepository::default());
        let credentials = Arc::new(InMemoryCredentialRepository::default());
        let courses = Arc::new(InMemoryCourseRepository::default());
        let enrollments = Arc::new(InMemoryEnrollmentRepository::default());
        let quizzes = Arc::new(InMemoryQuizRepository::default());
        let questions = Arc::new(InMemoryQuestionRepository::default());
        let submissions = Arc::new(InMemorySubmissionRepository::default());
        let analytics = Arc::new(InMemoryAnalyticsRepository::default());
        let audit_logs = Arc::new(InMemoryAuditLogRepository::default());
        let notifications = Arc::new(InMemoryNotificationRepository::default());

        let repositories = Repositories {
            users: users.clone(),
            credentials: credentials.clone(),
            courses: courses.clone(),
            enrollments: enrollments.clone(),
            quizzes: quizzes.clone(),
            questions: questions.clone(),
            submissions: submissions.clone(),
            analytics: analytics.clone(),
            audit_logs: audit_logs.clone(),
            notifications: notifications.clone(),
        };
        let state = AppState::from_repositories(Config::test_config(), repositories);

        Self {
            users,
            credentials,
            courses,
            enrollments,
            quizzes,
            questions,
            submissions,
            analytics,
            audit_logs,
            notifications,
            state,
        }
    }

    /// A bearer token the state's identity provider accepts.
    pub fn token_for(&self, principal: &Principal) -> String {
        let config = Config::test_config();
        let jwt = JwtService::new(&config.jwt_secret, config.jwt_expiration_hours);
        match jwt.create_token(&principal.user_id, &principal.email, principal.role) {
            Ok(token) => token,
            Err(err) => panic!("failed to mint test token: {}", err),
        }
    }

    pub async fn seed_user(&self, principal: &Principal) {
        let user = User::new(
            &principal.user_id,
            &principal.email,
            &format!("User {}", principal.user_id),
            principal.role,
        );
        self.users
            .create(user)
            .await
            .expect("seeding a user should succeed");
    }

    pub async fn seed_course(&self, id: &str, teacher_id: &str) -> Course {
        self.courses
            .create(course(id, teacher_id))
            .await
            .expect("seeding a course should succeed")
    }

    pub async fn seed_quiz(&self, quiz: Quiz) -> Quiz {
        self.quizzes
            .create(quiz)
            .await
            .expect("seeding a quiz should succeed")
    }

    pub async fn seed_question(&self, question: Question) -> Question {
        self.questions
            .create(question)
            .await
            .expect("seeding a question should succeed")
    }

    pub async fn enroll(&self, student_id: &str, course_id: &str) {
        self.enrollments
            .create(Enrollment::new(student_id, course_id))
            .await
            .expect("seeding an enrollment should succeed");
    }

    /// Published course `course-1` owned by `teacher-1`, a quiz with one
    /// 10-point mcq keyed on `A`, and `student-1` enrolled.
    pub async fn seed_standard_quiz(&self, quiz: Quiz) -> Quiz {
        self.seed_course(&quiz.course_id, &quiz.teacher_id).await;
        let quiz = self.seed_quiz(quiz).await;
        self.seed_question(mcq(
            "q1",
            &quiz.id,
            10.0,
            1,
            vec![option("A", true), option("B", false), option("C", false)],
        ))
        .await;
        self.enroll(&student().user_id, &quiz.course_id).await;
        quiz
    }
}

pub fn admin() -> Principal {
    Principal::new("admin-1", "admin@example.com", UserRole::Admin)
}

pub fn teacher() -> Principal {
    Principal::new("teacher-1", "teacher@example.com", UserRole::Teacher)
}

pub fn other_teacher() -> Principal {
    Principal::new("teacher-2", "other@example.com", UserRole::Teacher)
}

pub fn student() -> Principal {
    Principal::new("student-1", "student@example.com", UserRole::Student)
}

pub fn other_student() -> Principal {
    Principal::new("student-2", "student2@example.com", UserRole::Student)
}

pub fn course(id: &str, teacher_id: &str) -> Course {
    let now = Utc::now();
    Course {
        id: id.to_string(),
        title: "Intro to Algebra".to_string(),
        description: "Equations and inequalities".to_string(),
        syllabus: String::new(),
        teacher_id: teacher_id.to_string(),
        teacher_name: "Teacher One".to_string(),
        category: "Mathematics".to_string(),
        difficulty: CourseDifficulty::Beginner,
        thumbnail: None,
        materials: Vec::new(),
        enrollment_count: 0,
        is_published: true,
        is_deleted: false,
        created_at: now,
        updated_at: now,
    }
}

/// Published, 30 minutes, 10 total marks, 6 to pass, one attempt.
pub fn quiz(id: &str) -> Quiz {
    let now = Utc::now();
    Quiz {
        id: id.to_string(),
        course_id: "course-1".to_string(),
        teacher_id: teacher().user_id,
        title: "Chapter 1 check".to_string(),
        description: String::new(),
        instructions: String::new(),
        duration: 30,
        total_marks: 10.0,
        passing_marks: 6.0,
        question_count: 1,
        max_attempts: 1,
        deadline: None,
        is_published: true,
        show_results_after_submit: true,
        allow_review: false,
        shuffle_questions: false,
        randomize_question_order: false,
        shuffle_options: false,
        prevent_tab_switch: false,
        max_tab_switches: 0,
        require_fullscreen: false,
        disable_copy_paste: false,
        enable_proctoring: false,
        lock_after_submit: true,
        allow_teacher_resume: false,
        allow_teacher_extend_time: false,
        created_at: now,
        updated_at: now,
    }
}

pub fn option(id: &str, is_correct: bool) -> QuestionOption {
    QuestionOption {
        id: id.to_string(),
        text: format!("Option {}", id),
        is_correct,
    }
}

pub fn mcq(
    id: &str,
    quiz_id: &str,
    points: f64,
    order: i32,
    options: Vec<QuestionOption>,
) -> Question {
    let now = Utc::now();
    Question {
        id: id.to_string(),
        quiz_id: quiz_id.to_string(),
        question_type: QuestionType::Mcq,
        text: format!("Question {}", id),
        points,
        options,
        explanation: Some("See chapter 1".to_string()),
        image_url: None,
        order,
        created_at: now,
        updated_at: now,
    }
}
