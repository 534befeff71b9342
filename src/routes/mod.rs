use actix_web::web;

pub mod admin;
pub mod auth;
pub mod backend_health;
pub mod registration;
pub mod tickets;
pub mod tournaments;

use crate::handlers::{auth_handler, media_handler};
use crate::middleware::auth::AuthMiddleware;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(backend_health::backend_health);

    cfg.service(
        web::scope("/api")
            .service(
                web::scope("/auth")
                    .service(registration::register)
                    .service(auth::login)
                    // Profile requires authentication
                    .service(
                        web::resource("/profile")
                            .wrap(AuthMiddleware)
                            .route(web::get().to(auth_handler::get_profile))
                    )
            )
            .configure(tournaments::init_tournament_routes)
            .configure(tickets::init_ticket_routes)
            .configure(admin::init_admin_routes)
    );

    // Uploaded images are public
    cfg.service(
        web::resource("/uploads/{category}/{file}")
            .route(web::get().to(media_handler::serve_upload))
    );
}
