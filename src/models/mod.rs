pub mod flight;
pub mod search;
pub mod user;
