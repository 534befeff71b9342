use actix_web::web;

use crate::handlers::admin::{
    match_handler,
    player_handler,
    team_handler,
    ticket_handler,
    tournament_handler,
    upload_handler,
    user_handler,
};
use crate::middleware::admin::AdminMiddleware;

pub fn init_admin_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .wrap(AdminMiddleware)
            // Player management routes
            .service(
                web::resource("/players")
                    .route(web::get().to(player_handler::get_players))
                    .route(web::post().to(player_handler::create_player))
            )
            .service(
                web::resource("/players/{id}")
                    .route(web::get().to(player_handler::get_player_by_id))
                    .route(web::put().to(player_handler::update_player))
                    .route(web::delete().to(player_handler::delete_player))
            )

            // Team management routes
            .service(
                web::resource("/teams")
                    .route(web::get().to(team_handler::get_teams))
                    .route(web::post().to(team_handler::create_team))
            )
            .service(
                web::resource("/teams/{id}")
                    .route(web::get().to(team_handler::get_team_by_id))
                    .route(web::put().to(team_handler::update_team))
                    .route(web::delete().to(team_handler::delete_team))
            )

            // Tournament management routes
            .service(
                web::resource("/tournaments")
                    .route(web::get().to(tournament_handler::get_tournaments))
                    .route(web::post().to(tournament_handler::create_tournament))
            )
            .service(
                web::resource("/tournaments/{id}")
                    .route(web::get().to(tournament_handler::get_tournament_by_id))
                    .route(web::put().to(tournament_handler::update_tournament))
                    .route(web::delete().to(tournament_handler::delete_tournament))
            )

            // Match management routes
            .service(
                web::resource("/matches")
                    .route(web::get().to(match_handler::get_matches))
                    .route(web::post().to(match_handler::create_match))
            )
            .service(
                web::resource("/matches/{id}")
                    .route(web::get().to(match_handler::get_match_by_id))
                    .route(web::put().to(match_handler::update_match))
                    .route(web::delete().to(match_handler::delete_match))
            )

            // Ticket type management routes
            .service(
                web::resource("/tickets")
                    .route(web::get().to(ticket_handler::get_tickets))
                    .route(web::post().to(ticket_handler::create_ticket))
            )
            .service(
                web::resource("/tickets/{id}")
                    .route(web::get().to(ticket_handler::get_ticket_by_id))
                    .route(web::put().to(ticket_handler::update_ticket))
                    .route(web::delete().to(ticket_handler::delete_ticket))
            )

            // User management routes
            .service(
                web::resource("/users")
                    .route(web::get().to(user_handler::get_users))
            )
            .service(
                web::resource("/users/{id}")
                    .route(web::get().to(user_handler::get_user_by_id))
                    .route(web::put().to(user_handler::update_user))
                    .route(web::delete().to(user_handler::delete_user))
            )

            // Image uploads
            .service(
                web::resource("/upload/team-logo")
                    .route(web::post().to(upload_handler::upload_team_logo))
            )
            .service(
                web::resource("/upload/player-avatar")
                    .route(web::post().to(upload_handler::upload_player_avatar))
            )
    );
}
