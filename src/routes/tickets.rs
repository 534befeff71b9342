use actix_web::web;

use crate::handlers::user_ticket_handler;
use crate::middleware::auth::AuthMiddleware;

/// Ticket purchase and the caller's own tickets; both need a signed-in user.
/// Guards sit on the resources so unknown paths under `/tickets` and `/me`
/// still reach the JSON 404.
pub fn init_ticket_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/tickets/purchase")
            .wrap(AuthMiddleware)
            .route(web::post().to(user_ticket_handler::purchase_ticket))
    );
    cfg.service(
        web::resource("/me/tickets")
            .wrap(AuthMiddleware)
            .route(web::get().to(user_ticket_handler::get_my_tickets))
    );
}
