use actix_web::web;

use crate::handlers::tournament_handler;

/// Public read-only tournament views.
pub fn init_tournament_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/tournaments")
            .service(
                web::resource("")
                    .route(web::get().to(tournament_handler::list_tournaments))
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(tournament_handler::get_tournament))
            )
            .service(
                web::resource("/{id}/tickets")
                    .route(web::get().to(tournament_handler::get_tournament_tickets))
            )
    );
}
