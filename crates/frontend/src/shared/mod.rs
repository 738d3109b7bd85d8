pub mod api_utils;
pub mod crud;
pub mod form;
pub mod mutation;
pub mod navigation;
pub mod notify;
pub mod query;
pub mod request;
pub mod screen;
pub mod table;
