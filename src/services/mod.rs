pub mod flight_service;
pub mod search_service;
pub mod user_service;
