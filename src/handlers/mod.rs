pub mod admin;
pub mod auth_handler;
pub mod backend_health_handler;
pub mod media_handler;
pub mod registration_handler;
pub mod tournament_handler;
pub mod user_ticket_handler;
