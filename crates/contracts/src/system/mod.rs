pub mod auth;
pub mod rights;
pub mod routes;
pub mod users;
