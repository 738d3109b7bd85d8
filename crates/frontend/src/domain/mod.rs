pub mod a001_branch;
pub mod a002_agent;
pub mod a003_client;
pub mod a004_courier;
pub mod a005_product;
pub mod a006_plan;
pub mod a007_coupon;
pub mod a008_motor_quote;
pub mod a009_order;
pub mod a010_call_us;
pub mod a011_api_user_product;
