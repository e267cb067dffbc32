use actix_cors::Cors;
use actix_web::{http::header, middleware::Logger, web, App, HttpServer};

use lms_server::{
    app_state::AppState, auth::AuthMiddleware, config::Config, db::Database, handlers,
    middleware::RequestIdMiddleware,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env();
    if config.is_production() {
        config.validate_for_production();
    }

    let db = Database::connect(&config)
        .await
        .map_err(|e| std::io::Error::other(format!("Failed to connect to MongoDB: {}", e)))?;

    let host = config.web_server_host.clone();
    let port = config.web_server_port;
    let cors_origin = config.cors_allowed_origin.clone();

    let state = AppState::new(&db, config)
        .await
        .map_err(|e| std::io::Error::other(format!("Failed to initialise services: {}", e)))?;

    log::info!("Starting HTTP server on {}:{}", host, port);

    let state = web::Data::new(state);
    let db = web::Data::new(db);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&cors_origin)
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![header::CONTENT_TYPE, header::AUTHORIZATION])
            .max_age(3600);

        App::new()
            .app_data(state.clone())
            .app_data(db.clone())
            .wrap(AuthMiddleware)
            .wrap(RequestIdMiddleware)
            .wrap(Logger::default())
            .wrap(cors)
            .configure(handlers::configure)
            .default_service(web::to(handlers::not_found))
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
