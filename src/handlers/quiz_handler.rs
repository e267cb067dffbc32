use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::{
        request::{
            AddQuestionRequest, CreateQuizRequest, IdQuery, QuizListParams, ResultsQuery,
            ResumeQuizRequest, StartQuizRequest, SubmitQuizRequest,
        },
        response::ApiResponse,
    },
};

pub async fn create_quiz(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    request: web::Json<CreateQuizRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let quiz = state.quiz_service.create(&auth.0, request).await?;
    Ok(HttpResponse::Created().json(ApiResponse::with_message(quiz, "Quiz created")))
}

pub async fn list_quizzes(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    query: web::Query<QuizListParams>,
) -> Result<HttpResponse, AppError> {
    let params = query.into_inner();
    params.validate()?;

    let quizzes = state.quiz_service.list(&auth.0, &params).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(quizzes)))
}

pub async fn get_quiz(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    query: web::Query<IdQuery>,
) -> Result<HttpResponse, AppError> {
    let quiz = state.quiz_service.get(&auth.0, &query.id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(quiz)))
}

pub async fn add_question(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    request: web::Json<AddQuestionRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let question = state.quiz_service.add_question(&auth.0, request).await?;
    Ok(HttpResponse::Created().json(ApiResponse::with_message(question, "Question added")))
}

pub async fn start_quiz(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    request: web::Json<StartQuizRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let response = state
        .quiz_attempt_service
        .start_attempt(&auth.0, &request.quiz_id)
        .await?;
    let message = if response.resumed {
        "Resuming quiz attempt"
    } else {
        "Quiz started"
    };
    Ok(HttpResponse::Ok().json(ApiResponse::with_message(response, message)))
}

pub async fn submit_quiz(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    request: web::Json<SubmitQuizRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let response = state
        .quiz_attempt_service
        .submit_attempt(&auth.0, request)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::with_message(response, "Quiz submitted")))
}

pub async fn resume_quiz(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    request: web::Json<ResumeQuizRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let response = state
        .quiz_attempt_service
        .resume_attempt(&auth.0, request)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::with_message(response, "Quiz resumed")))
}

pub async fn quiz_results(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    query: web::Query<ResultsQuery>,
) -> Result<HttpResponse, AppError> {
    let query = query.into_inner();

    if let Some(submission_id) = query.submission_id.as_deref() {
        let result = state
            .quiz_service
            .submission_result(&auth.0, submission_id)
            .await?;
        return Ok(HttpResponse::Ok().json(ApiResponse::ok(result)));
    }

    let Some(quiz_id) = query.quiz_id.as_deref() else {
        return Err(AppError::ValidationError(
            "submissionId or quizId is required".to_string(),
        ));
    };
    let results = state.quiz_service.quiz_results(&auth.0, quiz_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(results)))
}
