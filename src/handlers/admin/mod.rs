pub mod match_handler;
pub mod player_handler;
pub mod team_handler;
pub mod ticket_handler;
pub mod tournament_handler;
pub mod upload_handler;
pub mod user_handler;
