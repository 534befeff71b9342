use actix_cors::Cors;
use actix_multipart::form::MultipartFormConfig;
use actix_web::dev::Server;
use actix_web::{http, web, App, HttpResponse, HttpServer};
use sqlx::PgPool;
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
mod handlers;
mod middleware;
pub mod models;
mod routes;
pub mod telemetry;

use crate::config::jwt::JwtSettings;
use crate::config::settings::ApplicationSettings;
use crate::error::ApiError;
use crate::models::common::ErrorResponse;
use crate::routes::init_routes;

const MAX_JSON_BODY: usize = 1024 * 1024;
const MAX_UPLOAD_BODY: usize = 6 * 1024 * 1024;

pub fn run(
    listener: TcpListener,
    db_pool: PgPool,
    jwt_settings: JwtSettings,
    application: ApplicationSettings,
) -> Result<Server, std::io::Error> {
    // Wrap using web::Data, which boils down to an Arc smart pointer
    let db_pool_data = web::Data::new(db_pool);
    let jwt_settings = web::Data::new(jwt_settings);
    let application_data = web::Data::new(application);

    let server = HttpServer::new(move || {
        let mut cors = Cors::default();
        for origin in &application_data.allowed_origins {
            cors = cors.allowed_origin(origin);
        }
        let cors = cors
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
            .allowed_headers(vec![
                http::header::AUTHORIZATION,
                http::header::ACCEPT,
                http::header::CONTENT_TYPE,
            ])
            .supports_credentials()
            .max_age(3600);

        // Malformed bodies and query strings get the same envelope as handler errors
        let json_config = web::JsonConfig::default()
            .limit(MAX_JSON_BODY)
            .error_handler(|err, _req| {
                ApiError::BadRequest(format!("Invalid request body: {}", err)).into()
            });
        let query_config = web::QueryConfig::default().error_handler(|err, _req| {
            ApiError::BadRequest(format!("Invalid query string: {}", err)).into()
        });
        let multipart_config = MultipartFormConfig::default()
            .total_limit(MAX_UPLOAD_BODY)
            .error_handler(|err, _req| {
                ApiError::BadRequest(format!("Invalid upload: {}", err)).into()
            });

        App::new()
            .wrap(TracingLogger::default())
            .wrap(cors)
            // Get a pointer copy and attach it to the application state
            .app_data(db_pool_data.clone())
            .app_data(jwt_settings.clone())
            .app_data(application_data.clone())
            .app_data(json_config)
            .app_data(query_config)
            .app_data(multipart_config)
            .configure(init_routes)
            .default_service(web::to(|| async {
                HttpResponse::NotFound().json(ErrorResponse::new("not_found", "Endpoint not found"))
            }))
    })
    .listen(listener)?
    .run();

    Ok(server)
}
