pub mod auth;
pub mod common;
pub mod matches;
pub mod player;
pub mod team;
pub mod ticket;
pub mod tournament;
pub mod upload;
pub mod user;
pub mod user_ticket;
