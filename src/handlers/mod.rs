pub mod auth_handler;
pub mod course_handler;
pub mod health_handler;
pub mod quiz_handler;

use actix_web::{
    error::{JsonPayloadError, QueryPayloadError},
    web, HttpRequest, HttpResponse, Route,
};

use crate::errors::AppError;

pub async fn method_not_allowed() -> Result<HttpResponse, AppError> {
    Err(AppError::MethodNotAllowed)
}

pub async fn not_found() -> Result<HttpResponse, AppError> {
    Err(AppError::NotFound("Route not found".to_string()))
}

/// Malformed or mistyped JSON bodies become 400 envelopes.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    log::debug!("Rejected JSON payload: {}", err);
    AppError::BadRequest(format!("Invalid request body: {}", err)).into()
}

pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(format!("Invalid query string: {}", err)).into()
}

fn resource(path: &str, route: Route) -> actix_web::Resource {
    web::resource(path)
        .route(route)
        .default_service(web::to(method_not_allowed))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler));

    cfg.service(resource("/health", web::get().to(health_handler::health_check)))
        .service(resource("/health/live", web::get().to(health_handler::health_check_live)))
        .service(resource("/health/ready", web::get().to(health_handler::health_check_ready)));

    cfg.service(
        web::scope("/api/auth")
            .service(resource("/register", web::post().to(auth_handler::register)))
            .service(resource("/login", web::post().to(auth_handler::login)))
            .service(resource("/profile", web::get().to(auth_handler::profile)))
            .service(resource("/update", web::put().to(auth_handler::update_profile)))
            .service(resource("/set-role", web::post().to(auth_handler::set_role))),
    );

    cfg.service(
        web::scope("/api/courses")
            .service(resource("/create", web::post().to(course_handler::create_course)))
            .service(resource("/list", web::get().to(course_handler::list_courses)))
            .service(resource("/get", web::get().to(course_handler::get_course)))
            .service(resource("/update", web::put().to(course_handler::update_course)))
            .service(resource("/delete", web::delete().to(course_handler::delete_course)))
            .service(resource("/enroll", web::post().to(course_handler::enroll)))
            .service(resource(
                "/my-enrollments",
                web::get().to(course_handler::my_enrollments),
            )),
    );

    cfg.service(
        web::scope("/api/quizzes")
            .service(resource("/create", web::post().to(quiz_handler::create_quiz)))
            .service(resource("/list", web::get().to(quiz_handler::list_quizzes)))
            .service(resource("/get", web::get().to(quiz_handler::get_quiz)))
            .service(resource("/add-question", web::post().to(quiz_handler::add_question)))
            .service(resource("/start", web::post().to(quiz_handler::start_quiz)))
            .service(resource("/submit", web::post().to(quiz_handler::submit_quiz)))
            .service(resource("/resume", web::post().to(quiz_handler::resume_quiz)))
            .service(resource("/results", web::get().to(quiz_handler::quiz_results))),
    );
}
