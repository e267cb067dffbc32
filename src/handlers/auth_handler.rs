use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::{
        request::{LoginRequest, RegisterRequest, SetRoleRequest, UpdateProfileRequest},
        response::ApiResponse,
    },
};

pub async fn register(
    state: web::Data<AppState>,
    request: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let response = state.user_service.register(request).await?;
    Ok(HttpResponse::Created().json(ApiResponse::with_message(
        response,
        "User registered successfully",
    )))
}

pub async fn login(
    state: web::Data<AppState>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let response = state.user_service.login(request).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(response)))
}

pub async fn profile(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let user = state.user_service.profile(&auth.0).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(user)))
}

pub async fn update_profile(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    request: web::Json<UpdateProfileRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let user = state.user_service.update_profile(&auth.0, request).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::with_message(user, "Profile updated")))
}

pub async fn set_role(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    request: web::Json<SetRoleRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let response = state.user_service.set_role(&auth.0, request).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::with_message(response, "Role updated")))
}
