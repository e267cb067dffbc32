use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

use crate::models::domain::{
    CourseDifficulty, CourseMaterial, CourseUpdate, QuestionType, UserRole, UserUpdate,
};

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    #[validate(length(min = 1, max = 100, message = "Display name is required"))]
    pub display_name: String,

    pub role: UserRole,

    #[validate(length(max = 100))]
    pub department: Option<String>,

    #[validate(length(max = 50))]
    pub roll_number: Option<String>,

    #[validate(length(max = 50))]
    pub employee_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 100))]
    pub display_name: Option<String>,

    #[validate(url)]
    pub photo_url: Option<String>,

    #[validate(length(max = 100))]
    pub department: Option<String>,

    #[validate(length(max = 50))]
    pub roll_number: Option<String>,

    #[validate(length(max = 50))]
    pub employee_id: Option<String>,
}

impl From<UpdateProfileRequest> for UserUpdate {
    fn from(request: UpdateProfileRequest) -> Self {
        UserUpdate {
            display_name: request.display_name,
            photo_url: request.photo_url,
            department: request.department,
            roll_number: request.roll_number,
            employee_id: request.employee_id,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SetRoleRequest {
    #[validate(length(min = 1, message = "uid is required"))]
    pub uid: String,

    pub role: UserRole,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseRequest {
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    pub title: String,

    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,

    #[serde(default)]
    pub syllabus: String,

    #[validate(length(min = 1, max = 100, message = "Category is required"))]
    pub category: String,

    pub difficulty: CourseDifficulty,

    #[validate(url)]
    pub thumbnail: Option<String>,

    #[serde(default)]
    pub materials: Vec<CourseMaterial>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCourseRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,

    #[validate(length(min = 1))]
    pub description: Option<String>,

    pub syllabus: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub category: Option<String>,

    pub difficulty: Option<CourseDifficulty>,

    #[validate(url)]
    pub thumbnail: Option<String>,

    pub materials: Option<Vec<CourseMaterial>>,

    pub is_published: Option<bool>,
}

impl From<UpdateCourseRequest> for CourseUpdate {
    fn from(request: UpdateCourseRequest) -> Self {
        CourseUpdate {
            title: request.title,
            description: request.description,
            syllabus: request.syllabus,
            category: request.category,
            difficulty: request.difficulty,
            thumbnail: request.thumbnail,
            materials: request.materials,
            is_published: request.is_published,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EnrollRequest {
    #[validate(length(min = 1, message = "courseId is required"))]
    pub course_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IdQuery {
    pub id: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CourseListParams {
    #[validate(range(min = 1))]
    pub page: Option<u64>,

    #[validate(range(min = 1, max = 100))]
    pub page_size: Option<u64>,

    /// `me` restricts a teacher's listing to their own courses.
    pub teacher: Option<String>,
}

impl CourseListParams {
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn page_size(&self) -> u64 {
        self.page_size.unwrap_or(20).clamp(1, 100)
    }

    pub fn offset(&self) -> u64 {
        (self.page() - 1) * self.page_size()
    }

    pub fn own_courses_only(&self) -> bool {
        self.teacher.as_deref() == Some("me")
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuizRequest {
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    pub title: String,

    #[validate(length(min = 1, message = "courseId is required"))]
    pub course_id: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub instructions: String,

    #[validate(range(min = 1, message = "Duration must be greater than 0"))]
    pub duration: i32,

    pub total_marks: f64,

    pub passing_marks: f64,

    /// Absent allows one attempt; `0` allows unlimited attempts.
    #[validate(range(min = 0))]
    pub max_attempts: Option<i32>,

    pub deadline: Option<DateTime<Utc>>,

    #[serde(default)]
    pub is_published: bool,
    #[serde(default = "default_true")]
    pub show_results_after_submit: bool,
    #[serde(default)]
    pub allow_review: bool,
    #[serde(default)]
    pub shuffle_questions: bool,
    #[serde(default)]
    pub randomize_question_order: bool,
    #[serde(default)]
    pub shuffle_options: bool,
    #[serde(default)]
    pub prevent_tab_switch: bool,
    #[validate(range(min = 0))]
    pub max_tab_switches: Option<i32>,
    #[serde(default)]
    pub require_fullscreen: bool,
    #[serde(default)]
    pub disable_copy_paste: bool,
    #[serde(default)]
    pub enable_proctoring: bool,
    #[serde(default)]
    pub allow_teacher_resume: bool,
    #[serde(default)]
    pub allow_teacher_extend_time: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct QuizListParams {
    pub course_id: Option<String>,

    #[validate(range(min = 1, max = 100))]
    pub limit: Option<i64>,
}

impl QuizListParams {
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(20).clamp(1, 100)
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct QuestionOptionInput {
    #[validate(length(min = 1, message = "Option id is required"))]
    pub id: String,

    #[validate(length(min = 1, message = "Option text is required"))]
    pub text: String,

    #[serde(default)]
    pub is_correct: bool,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddQuestionRequest {
    #[validate(length(min = 1, message = "quizId is required"))]
    pub quiz_id: String,

    #[serde(rename = "type")]
    pub question_type: QuestionType,

    #[validate(length(min = 1, message = "Question text is required"))]
    pub text: String,

    pub points: f64,

    #[serde(default)]
    #[validate(nested)]
    pub options: Vec<QuestionOptionInput>,

    pub explanation: Option<String>,

    #[validate(url)]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StartQuizRequest {
    #[validate(length(min = 1, message = "quizId is required"))]
    pub quiz_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerInput {
    pub question_id: String,
    #[serde(default)]
    pub selected_options: Vec<String>,
    #[serde(default)]
    pub text_answer: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitQuizRequest {
    #[validate(length(min = 1, message = "submissionId is required"))]
    pub submission_id: String,

    #[serde(default)]
    pub answers: Vec<AnswerInput>,

    #[serde(default)]
    #[validate(range(min = 0))]
    pub tab_switches: i32,

    #[serde(default)]
    #[validate(range(min = 0))]
    pub fullscreen_exits: i32,

    #[serde(default)]
    pub timed_out: bool,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ResumeQuizRequest {
    #[validate(length(min = 1, message = "submissionId is required"))]
    pub submission_id: String,

    #[validate(range(
        min = 0,
        max = 1440,
        message = "extendTime must be between 0 and 1440 minutes"
    ))]
    pub extend_time: Option<i32>,

    #[validate(length(max = 500))]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsQuery {
    pub submission_id: Option<String>,
    pub quiz_id: Option<String>,
}
