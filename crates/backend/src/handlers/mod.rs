pub mod a008_motor_quote;
pub mod a009_order;
pub mod a010_call_us;
pub mod a011_api_user_product;
pub mod d100_overview;
pub mod resource;
