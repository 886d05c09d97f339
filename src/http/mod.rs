pub mod health;
pub mod identity;
pub mod match_handler;
