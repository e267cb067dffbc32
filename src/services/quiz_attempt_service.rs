use std::sync::Arc;

use chrono::{Duration, Utc};
use rand::{seq::SliceRandom, Rng};
use uuid::Uuid;

use crate::{
    auth::{require_owner_or_admin, require_staff, require_student, Principal},
    errors::{AppError, AppResult},
    models::{
        domain::{AuditLogEntry, Evaluation, Notification, Question, Quiz, Reopen, Submission},
        dto::{
            quiz_dto::{
                AttemptView, CheatingPrevention, ResumeAttemptResponse, StartAttemptResponse,
                SubmitAttemptResponse,
            },
            request::{ResumeQuizRequest, SubmitQuizRequest},
        },
    },
    repositories::{
        AnalyticsRepository, AuditLogRepository, EnrollmentRepository, NotificationRepository,
        QuestionRepository, QuizRepository, SubmissionRepository,
    },
    services::grading,
};

const START_CLAIM_RETRIES: usize = 3;

/// Longest single time extension a teacher may grant, in minutes.
pub const MAX_EXTENSION_MINUTES: i32 = 1440;

/// Runs the attempt lifecycle: start (or resume), submit, and teacher reopen.
pub struct QuizAttemptService {
    quizzes: Arc<dyn QuizRepository>,
    questions: Arc<dyn QuestionRepository>,
    enrollments: Arc<dyn EnrollmentRepository>,
    submissions: Arc<dyn SubmissionRepository>,
    analytics: Arc<dyn AnalyticsRepository>,
    audit_logs: Arc<dyn AuditLogRepository>,
    notifications: Arc<dyn NotificationRepository>,
}

impl QuizAttemptService {
    pub fn new(
        quizzes: Arc<dyn QuizRepository>,
        questions: Arc<dyn QuestionRepository>,
        enrollments: Arc<dyn EnrollmentRepository>,
        submissions: Arc<dyn SubmissionRepository>,
        analytics: Arc<dyn AnalyticsRepository>,
        audit_logs: Arc<dyn AuditLogRepository>,
        notifications: Arc<dyn NotificationRepository>,
    ) -> Self {
        Self {
            quizzes,
            questions,
            enrollments,
            submissions,
            analytics,
            audit_logs,
            notifications,
        }
    }

    async fn load_quiz(&self, quiz_id: &str) -> AppResult<Quiz> {
        self.quizzes
            .find_by_id(quiz_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Quiz not found".to_string()))
    }

    async fn load_submission(&self, submission_id: &str) -> AppResult<Submission> {
        self.submissions
            .find_by_id(submission_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Submission not found".to_string()))
    }

    fn resumed(submission: &Submission, quiz: &Quiz) -> StartAttemptResponse {
        StartAttemptResponse {
            submission: AttemptView::from_submission(submission, false),
            resumed: true,
            cheating_prevention: CheatingPrevention::from(quiz),
        }
    }

    pub async fn start_attempt(
        &self,
        principal: &Principal,
        quiz_id: &str,
    ) -> AppResult<StartAttemptResponse> {
        require_student(principal, "Only students can take quizzes")?;

        let quiz = self.load_quiz(quiz_id).await?;
        if !quiz.is_published {
            return Err(AppError::Forbidden("This quiz is not published".to_string()));
        }
        if quiz.deadline_passed(Utc::now()) {
            return Err(AppError::Forbidden("Quiz deadline has passed".to_string()));
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

        let questions = self.questions.list_for_quiz(&quiz.id).await?;
        if questions.is_empty() {
            return Err(AppError::BadRequest("Quiz has no questions".to_string()));
        }

        // Each pass re-reads the attempt state; a lost insert means another
        // start or submit moved it on.
        for _ in 0..START_CLAIM_RETRIES {
            if let Some(existing) = self
                .submissions
                .find_in_progress(&principal.user_id, &quiz.id)
                .await?
            {
                log::debug!("Resuming attempt {} for quiz {}", existing.id, quiz.id);
                return Ok(Self::resumed(&existing, &quiz));
            }

            let completed = self
                .submissions
                .count_completed(&principal.user_id, &quiz.id)
                .await?;
            if quiz.attempts_exhausted(completed) {
                return Err(AppError::Forbidden("Maximum attempts reached".to_string()));
            }

            let prepared = {
                let mut rng = rand::thread_rng();
                Self::prepare_questions(questions.clone(), &quiz, &mut rng)
            };
            let submission = Submission::start(
                &quiz,
                &principal.user_id,
                completed as i32 + 1,
                prepared,
            );

            match self.submissions.create(submission).await {
                Ok(created) => {
                    log::info!(
                        "Student {} started attempt {} (#{}) on quiz {}",
                        principal.user_id,
                        created.id,
                        created.attempt_number,
                        quiz.id
                    );
                    return Ok(StartAttemptResponse {
                        submission: AttemptView::from_submission(&created, false),
                        resumed: false,
                        cheating_prevention: CheatingPrevention::from(&quiz),
                    });
                }
                Err(AppError::AlreadyExists(msg)) => {
                    log::debug!(
                        "Start of quiz {} by {} lost a race: {}",
                        quiz.id,
                        principal.user_id,
                        msg
                    );
                }
                Err(err) => return Err(err),
            }
        }

        Err(AppError::AlreadyExists(
            "Could not start the attempt, please retry".to_string(),
        ))
    }

    /// Apply the quiz's shuffle policy to questions already sorted by `order`.
    pub fn prepare_questions<R: Rng + ?Sized>(
        mut questions: Vec<Question>,
        quiz: &Quiz,
        rng: &mut R,
    ) -> Vec<Question> {
        if quiz.should_shuffle_questions() {
            questions.shuffle(rng);
        }
        if quiz.shuffle_options {
            for question in &mut questions {
                question.options.shuffle(rng);
            }
        }
        questions
    }

    pub async fn submit_attempt(
        &self,
        principal: &Principal,
        request: SubmitQuizRequest,
    ) -> AppResult<SubmitAttemptResponse> {
        require_student(principal, "Only students can submit quizzes")?;

        let submission = self.load_submission(&request.submission_id).await?;
        if submission.student_id != principal.user_id {
            return Err(AppError::Forbidden(
                "You can only submit your own quiz attempts".to_string(),
            ));
        }
        if submission.status.is_completed() {
            return Err(AppError::BadRequest("Quiz already submitted".to_string()));
        }

        let quiz = self.load_quiz(&submission.quiz_id).await?;

        let now = Utc::now();
        let elapsed = now - submission.started_at;
        let timed_out =
            request.timed_out || elapsed > Duration::minutes(i64::from(submission.time_limit));

        let outcome = grading::grade_answers(&submission.questions, &request.answers);
        let percentage = grading::percentage(outcome.score, quiz.total_marks);
        let passed = grading::passed(outcome.score, quiz.passing_marks);
        let suspicious_activity = grading::suspicious_activity(
            &quiz,
            request.tab_switches,
            request.fullscreen_exits,
            timed_out,
        );
        let time_taken = elapsed.num_minutes().clamp(0, i64::from(i32::MAX)) as i32;

        let evaluation = Evaluation {
            answers: outcome.answers,
            score: outcome.score,
            total_marks: quiz.total_marks,
            percentage,
            passed,
            submitted_at: now,
            time_taken,
            tab_switch_count: request.tab_switches,
            fullscreen_exits: request.fullscreen_exits,
            suspicious_activity,
        };

        let evaluated = self
            .submissions
            .record_evaluation(&submission.id, evaluation)
            .await?
            .ok_or_else(|| AppError::BadRequest("Quiz already submitted".to_string()))?;

        if !evaluated.suspicious_activity.is_empty() {
            log::warn!(
                "Attempt {} flagged: {}",
                evaluated.id,
                evaluated.suspicious_activity.join(", ")
            );
        }

        if let Err(err) = self
            .analytics
            .record_quiz_completion(&principal.user_id, evaluated.score)
            .await
        {
            log::warn!(
                "Failed to update analytics for student {}: {}",
                principal.user_id,
                err
            );
        }

        log::info!(
            "Attempt {} evaluated: {}/{} passed={}",
            evaluated.id,
            evaluated.score,
            evaluated.total_marks,
            evaluated.passed
        );

        let (answers, suspicious_activity) = if quiz.show_results_after_submit {
            (
                Some(evaluated.answers.clone()),
                Some(evaluated.suspicious_activity.clone()),
            )
        } else {
            (None, None)
        };

        Ok(SubmitAttemptResponse {
            submission_id: evaluated.id,
            score: evaluated.score,
            total_marks: evaluated.total_marks,
            percentage: evaluated.percentage,
            passed: evaluated.passed,
            time_taken: evaluated.time_taken,
            answers,
            suspicious_activity,
        })
    }

    pub async fn resume_attempt(
        &self,
        principal: &Principal,
        request: ResumeQuizRequest,
    ) -> AppResult<ResumeAttemptResponse> {
        require_staff(principal, "Only teachers can resume quizzes")?;

        let submission = self.load_submission(&request.submission_id).await?;
        let quiz = self.load_quiz(&submission.quiz_id).await?;

        require_owner_or_admin(
            principal,
            &quiz.teacher_id,
            "You can only resume submissions for your own quizzes",
        )?;
        if !quiz.allow_teacher_resume {
            return Err(AppError::Forbidden(
                "Teacher resume is not allowed for this quiz".to_string(),
            ));
        }
        if !submission.status.is_completed() {
            return Err(AppError::BadRequest(
                "Only submitted quizzes can be resumed".to_string(),
            ));
        }

        let extend_minutes = request.extend_time.unwrap_or(0);
        if extend_minutes < 0 {
            return Err(AppError::ValidationError(
                "extendTime cannot be negative".to_string(),
            ));
        }
        if extend_minutes > MAX_EXTENSION_MINUTES
            || submission.time_limit.checked_add(extend_minutes).is_none()
        {
            return Err(AppError::ValidationError(format!(
                "extendTime cannot exceed {} minutes",
                MAX_EXTENSION_MINUTES
            )));
        }
        if extend_minutes > 0 && !quiz.allow_teacher_extend_time {
            return Err(AppError::Forbidden(
                "Time extension is not allowed for this quiz".to_string(),
            ));
        }

        let reopen = Reopen {
            resumed_by: principal.user_id.clone(),
            resumed_at: Utc::now(),
            reason: request.reason.clone(),
            extend_minutes,
        };

        let reopened = self
            .submissions
            .reopen(&submission.id, reopen)
            .await?
            .ok_or_else(|| {
                AppError::BadRequest("Only submitted quizzes can be resumed".to_string())
            })?;

        log::info!(
            "Teacher {} resumed attempt {} (extended {} min)",
            principal.user_id,
            reopened.id,
            extend_minutes
        );

        let entry = AuditLogEntry {
            id: Uuid::new_v4().to_string(),
            action: AuditLogEntry::QUIZ_RESUMED.to_string(),
            submission_id: reopened.id.clone(),
            quiz_id: quiz.id.clone(),
            student_id: reopened.student_id.clone(),
            actor_id: principal.user_id.clone(),
            reason: request.reason,
            extend_time: extend_minutes,
            timestamp: Utc::now(),
        };
        if let Err(err) = self.audit_logs.append(entry).await {
            log::warn!("Failed to write audit log for {}: {}", reopened.id, err);
        }

        let notification = Notification::quiz_resumed(&reopened.student_id, &quiz.id, &quiz.title);
        if let Err(err) = self.notifications.create(notification).await {
            log::warn!(
                "Failed to notify student {} about resumed quiz: {}",
                reopened.student_id,
                err
            );
        }

        Ok(ResumeAttemptResponse {
            submission_id: reopened.id,
            extended_time: extend_minutes,
            new_time_limit: reopened.time_limit,
        })
    }
}
