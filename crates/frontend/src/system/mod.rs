pub mod auth;
pub mod pages;
pub mod rights;
pub mod users;
