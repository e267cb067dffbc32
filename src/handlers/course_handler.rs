use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::{
        request::{
            CourseListParams, CreateCourseRequest, EnrollRequest, IdQuery, UpdateCourseRequest,
        },
        response::ApiResponse,
    },
};

pub async fn create_course(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    request: web::Json<CreateCourseRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let course = state.course_service.create(&auth.0, request).await?;
    Ok(HttpResponse::Created().json(ApiResponse::with_message(course, "Course created")))
}

pub async fn list_courses(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    query: web::Query<CourseListParams>,
) -> Result<HttpResponse, AppError> {
    let params = query.into_inner();
    params.validate()?;

    let page = state.course_service.list(&auth.0, &params).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(page)))
}

pub async fn get_course(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    query: web::Query<IdQuery>,
) -> Result<HttpResponse, AppError> {
    let course = state.course_service.get(&auth.0, &query.id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(course)))
}

pub async fn update_course(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    query: web::Query<IdQuery>,
    request: web::Json<UpdateCourseRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let course = state
        .course_service
        .update(&auth.0, &query.id, request)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::with_message(course, "Course updated")))
}

pub async fn delete_course(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    query: web::Query<IdQuery>,
) -> Result<HttpResponse, AppError> {
    state.course_service.delete(&auth.0, &query.id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::message("Course deleted")))
}

pub async fn enroll(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    request: web::Json<EnrollRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let enrollment = state.course_service.enroll(&auth.0, request).await?;
    Ok(HttpResponse::Created().json(ApiResponse::with_message(
        enrollment,
        "Enrolled successfully",
    )))
}

pub async fn my_enrollments(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let enrollments = state.course_service.my_enrollments(&auth.0).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(enrollments)))
}
