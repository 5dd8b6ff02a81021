pub mod flight_route;
pub mod search_route;
pub mod user_route;
