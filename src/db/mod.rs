pub mod matches;
pub mod players;
pub mod teams;
pub mod tickets;
pub mod tournaments;
pub mod user_tickets;
pub mod users;
