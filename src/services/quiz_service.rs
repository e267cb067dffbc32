use std::{collections::HashSet, sync::Arc};

use chrono::Utc;
use uuid::Uuid;

use crate::{
    auth::{require_owner_or_admin, require_staff, Principal},
    errors::{AppError, AppResult},
    models::{
        domain::{
            quiz::{DEFAULT_MAX_ATTEMPTS, DEFAULT_MAX_TAB_SWITCHES},
            Question, QuestionOption, Quiz, QuizVisibility, Submission, UserRole,
        },
        dto::{
            quiz_dto::{
                AttemptView, QuestionView, QuizDetail, QuizList, QuizResults, QuizStatistics,
                SubmissionResult,
            },
            request::{AddQuestionRequest, CreateQuizRequest, QuizListParams},
        },
    },
    repositories::{
        CourseRepository, EnrollmentRepository, QuestionRepository, QuizRepository,
        SubmissionRepository, UserRepository,
    },
};

/// Quiz authoring, listing and result reporting.
pub struct QuizService {
    quizzes: Arc<dyn QuizRepository>,
    questions: Arc<dyn QuestionRepository>,
    courses: Arc<dyn CourseRepository>,
    enrollments: Arc<dyn EnrollmentRepository>,
    submissions: Arc<dyn SubmissionRepository>,
    users: Arc<dyn UserRepository>,
}

impl QuizService {
    pub fn new(
        quizzes: Arc<dyn QuizRepository>,
        questions: Arc<dyn QuestionRepository>,
        courses: Arc<dyn CourseRepository>,
        enrollments: Arc<dyn EnrollmentRepository>,
        submissions: Arc<dyn SubmissionRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            quizzes,
            questions,
            courses,
            enrollments,
            submissions,
            users,
        }
    }

    async fn load_quiz(&self, id: &str) -> AppResult<Quiz> {
        self.quizzes
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Quiz not found".to_string()))
    }

    pub async fn create(&self, principal: &Principal, request: CreateQuizRequest) -> AppResult<Quiz> {
        require_staff(principal, "Only teachers can create quizzes")?;

        if request.total_marks <= 0.0 {
            return Err(AppError::ValidationError(
                "totalMarks must be greater than 0".to_string(),
            ));
        }
        if request.passing_marks < 0.0 || request.passing_marks > request.total_marks {
            return Err(AppError::ValidationError(
                "passingMarks must be between 0 and totalMarks".to_string(),
            ));
        }
        let now = Utc::now();
        if request.deadline.is_some_and(|deadline| deadline <= now) {
            return Err(AppError::ValidationError(
                "deadline must be in the future".to_string(),
            ));
        }

        let course = self
            .courses
            .find_by_id(&request.course_id)
            .await?
            .filter(|course| !course.is_deleted)
            .ok_or_else(|| AppError::NotFound("Course not found".to_string()))?;
        require_owner_or_admin(
            principal,
            &course.teacher_id,
            "You can only create quizzes for your own courses",
        )?;

        let max_tab_switches = match request.max_tab_switches {
            Some(max) if max > 0 => max,
            _ if request.prevent_tab_switch => DEFAULT_MAX_TAB_SWITCHES,
            _ => 0,
        };

        let quiz = Quiz {
            id: Uuid::new_v4().to_string(),
            course_id: course.id,
            teacher_id: principal.user_id.clone(),
            title: request.title.trim().to_string(),
            description: request.description,
            instructions: request.instructions,
            duration: request.duration,
            total_marks: request.total_marks,
            passing_marks: request.passing_marks,
            question_count: 0,
            max_attempts: request.max_attempts.unwrap_or(DEFAULT_MAX_ATTEMPTS),
            deadline: request.deadline,
            is_published: request.is_published,
            show_results_after_submit: request.show_results_after_submit,
            allow_review: request.allow_review,
            shuffle_questions: request.shuffle_questions,
            randomize_question_order: request.randomize_question_order,
            shuffle_options: request.shuffle_options,
            prevent_tab_switch: request.prevent_tab_switch,
            max_tab_switches,
            require_fullscreen: request.require_fullscreen,
            disable_copy_paste: request.disable_copy_paste,
            enable_proctoring: request.enable_proctoring,
            lock_after_submit: true,
            allow_teacher_resume: request.allow_teacher_resume,
            allow_teacher_extend_time: request.allow_teacher_extend_time,
            created_at: now,
            updated_at: now,
        };

        let created = self.quizzes.create(quiz).await?;
        log::info!(
            "Teacher {} created quiz {} in course {}",
            principal.user_id,
            created.id,
            created.course_id
        );
        Ok(created)
    }

    pub async fn list(&self, principal: &Principal, params: &QuizListParams) -> AppResult<QuizList> {
        let visibility = match principal.role {
            UserRole::Admin => QuizVisibility::All,
            UserRole::Teacher => QuizVisibility::OwnedBy(principal.user_id.clone()),
            UserRole::Student => QuizVisibility::PublishedInCourses(
                self.enrollments.active_course_ids(&principal.user_id).await?,
            ),
        };

        let quizzes = self
            .quizzes
            .list(visibility, params.course_id.clone(), params.limit())
            .await?;
        Ok(QuizList { quizzes })
    }

    pub async fn get(&self, principal: &Principal, id: &str) -> AppResult<QuizDetail> {
        let quiz = self.load_quiz(id).await?;

        match principal.role {
            UserRole::Admin => {}
            UserRole::Teacher => {
                if !quiz.is_owned_by(&principal.user_id) {
                    return Err(AppError::Forbidden(
                        "You can only view your own quizzes".to_string(),
                    ));
                }
            }
            UserRole::Student => {
                if !quiz.is_published {
                    return Err(AppError::Forbidden("Quiz not available".to_string()));
                }
                if self
                    .enrollments
                    .find_active(&principal.user_id, &quiz.course_id)
                    .await?
                    .is_none()
                {
                    return Err(AppError::Forbidden(
                        "You must be enrolled in this course".to_string(),
                    ));
                }
            }
        }

        let reveal_key = principal.role.is_staff();
        let questions = self
            .questions
            .list_for_quiz(&quiz.id)
            .await?
            .iter()
            .map(|question| QuestionView::from_question(question, reveal_key))
            .collect();

        Ok(QuizDetail { quiz, questions })
    }

    pub async fn add_question(
        &self,
        principal: &Principal,
        request: AddQuestionRequest,
    ) -> AppResult<Question> {
        require_staff(principal, "Only teachers can add questions")?;
        validate_question(&request)?;

        let quiz = self.load_quiz(&request.quiz_id).await?;
        require_owner_or_admin(
            principal,
            &quiz.teacher_id,
            "You can only add questions to your own quizzes",
        )?;

        let updated = self
            .quizzes
            .record_question_added(&quiz.id, request.points)
            .await?;

        let now = Utc::now();
        let question = Question {
            id: Uuid::new_v4().to_string(),
            quiz_id: quiz.id.clone(),
            question_type: request.question_type,
            text: request.text.trim().to_string(),
            points: request.points,
            options: request
                .options
                .into_iter()
                .map(|option| QuestionOption {
                    id: option.id,
                    text: option.text,
                    is_correct: option.is_correct,
                })
                .collect(),
            explanation: request.explanation,
            image_url: request.image_url,
            order: updated.question_count,
            created_at: now,
            updated_at: now,
        };

        match self.questions.create(question).await {
            Ok(created) => {
                log::info!("Added question {} to quiz {}", created.id, quiz.id);
                Ok(created)
            }
            Err(err) => {
                if let Err(revert_err) = self
                    .quizzes
                    .revert_question_added(&quiz.id, request.points)
                    .await
                {
                    log::error!(
                        "Failed to revert question counters on quiz {}: {}",
                        quiz.id,
                        revert_err
                    );
                }
                Err(err)
            }
        }
    }

    pub async fn submission_result(
        &self,
        principal: &Principal,
        submission_id: &str,
    ) -> AppResult<SubmissionResult> {
        let submission = self
            .submissions
            .find_by_id(submission_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Submission not found".to_string()))?;
        let quiz = self.load_quiz(&submission.quiz_id).await?;

        match principal.role {
            UserRole::Admin => {}
            UserRole::Teacher => {
                if !quiz.is_owned_by(&principal.user_id) {
                    return Err(AppError::Forbidden(
                        "You can only view results for your own quizzes".to_string(),
                    ));
                }
            }
            UserRole::Student => {
                if submission.student_id != principal.user_id {
                    return Err(AppError::Forbidden(
                        "You can only view your own results".to_string(),
                    ));
                }
            }
        }

        Ok(self.with_student(&submission, reveal_for(principal, &quiz)).await)
    }

    pub async fn quiz_results(&self, principal: &Principal, quiz_id: &str) -> AppResult<QuizResults> {
        let quiz = self.load_quiz(quiz_id).await?;

        let student_filter = match principal.role {
            UserRole::Admin => None,
            UserRole::Teacher => {
                if !quiz.is_owned_by(&principal.user_id) {
                    return Err(AppError::Forbidden(
                        "You can only view results for your own quizzes".to_string(),
                    ));
                }
                None
            }
            UserRole::Student => Some(principal.user_id.clone()),
        };

        let completed = self.submissions.list_completed(&quiz.id, student_filter).await?;
        let reveal_key = reveal_for(principal, &quiz);

        let statistics = if principal.role.is_staff() {
            QuizStatistics::summarize(&completed)
        } else {
            QuizStatistics::count_only(&completed)
        };

        let mut submissions = Vec::with_capacity(completed.len());
        for submission in &completed {
            if principal.role.is_staff() {
                submissions.push(self.with_student(submission, reveal_key).await);
            } else {
                submissions.push(SubmissionResult {
                    submission: AttemptView::from_submission(submission, reveal_key),
                    student_name: None,
                    student_email: None,
                });
            }
        }

        Ok(QuizResults {
            submissions,
            statistics,
        })
    }

    async fn with_student(&self, submission: &Submission, reveal_key: bool) -> SubmissionResult {
        let student = match self.users.find_by_id(&submission.student_id).await {
            Ok(student) => student,
            Err(err) => {
                log::warn!(
                    "Failed to load student {} for results: {}",
                    submission.student_id,
                    err
                );
                None
            }
        };

        SubmissionResult {
            submission: AttemptView::from_submission(submission, reveal_key),
            student_name: student.as_ref().map(|s| s.display_name.clone()),
            student_email: student.map(|s| s.email),
        }
    }
}

fn reveal_for(principal: &Principal, quiz: &Quiz) -> bool {
    principal.role.is_staff() || quiz.allow_review
}

fn validate_question(request: &AddQuestionRequest) -> AppResult<()> {
    if request.points <= 0.0 {
        return Err(AppError::ValidationError(
            "points must be greater than 0".to_string(),
        ));
    }

    let mut ids = HashSet::new();
    for option in &request.options {
        if option.id.trim().is_empty() {
            return Err(AppError::ValidationError("Option id is required".to_string()));
        }
        if !ids.insert(option.id.as_str()) {
            return Err(AppError::ValidationError(format!(
                "Duplicate option id '{}'",
                option.id
            )));
        }
    }

    if request.question_type.is_objective() {
        if request.options.is_empty() {
            return Err(AppError::ValidationError(
                "Objective questions need at least one option".to_string(),
            ));
        }
        if !request.options.iter().any(|option| option.is_correct) {
            return Err(AppError::ValidationError(
                "Objective questions need at least one correct option".to_string(),
            ));
        }
    }

    Ok(())
}
