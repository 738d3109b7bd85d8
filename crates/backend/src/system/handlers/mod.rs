pub mod auth;
pub mod rights;
pub mod users;
