use axum::{
    middleware,
    routing::{get, post, MethodRouter},
    Router,
};
use contracts::domain::a001_branch::Branch;
use contracts::domain::a002_agent::Agent;
use contracts::domain::a003_client::Client;
use contracts::domain::a004_courier::Courier;
use contracts::domain::a005_product::Product;
use contracts::domain::a006_plan::Plan;
use contracts::domain::a007_coupon::Coupon;
use contracts::domain::a008_motor_quote::MotorQuote;
use contracts::domain::a009_order::Order;
use contracts::domain::a010_call_us::CallUsRequest;
use contracts::domain::common::AggregateRoot;

use crate::handlers::{self, resource};
use crate::system;
use crate::system::auth::middleware::{require_admin, require_auth};

/// CRUD routes of one collection; `list` serves `GET /api/{collection}`
fn collection<A: AggregateRoot>(list: MethodRouter) -> Router {
    let base = A::api_path();
    Router::new()
        .route(&base, list.post(resource::create::<A>))
        .route(&format!("{}/lookup", base), get(resource::lookup::<A>))
        .route(
            &format!("{}/:id", base),
            get(resource::get_by_id::<A>)
                .put(resource::update::<A>)
                .delete(resource::delete::<A>),
        )
}

fn plain<A: AggregateRoot>() -> Router {
    collection::<A>(get(resource::list::<A>))
}

/// Business routes; every one of them needs a signed-in user
fn business_routes() -> Router {
    Router::new()
        .merge(plain::<Branch>())
        .merge(plain::<Agent>())
        .merge(plain::<Client>())
        .merge(plain::<Courier>())
        .merge(plain::<Product>())
        .merge(plain::<Plan>())
        .merge(plain::<Coupon>())
        .merge(plain::<MotorQuote>())
        .merge(collection::<Order>(get(handlers::a009_order::list_filtered)))
        .merge(collection::<CallUsRequest>(get(
            handlers::a010_call_us::list_by_status,
        )))
        .route(
            "/api/motor-quotes/:id/status",
            post(handlers::a008_motor_quote::change_status),
        )
        .route(
            "/api/call-us/:id/status",
            post(handlers::a010_call_us::change_status),
        )
        .route(
            "/api/api-users/:id/products",
            get(handlers::a011_api_user_product::get_products)
                .post(handlers::a011_api_user_product::assign_products),
        )
        .route(
            "/api/dashboard/summary",
            get(handlers::d100_overview::get_summary),
        )
        .route("/api/system/rights", get(system::handlers::rights::my_rights))
        .route(
            "/api/system/users/lookup",
            get(system::handlers::users::lookup),
        )
        .route("/api/system/auth/me", get(system::handlers::auth::current_user))
        .layer(middleware::from_fn(require_auth))
}

/// User and rights administration
fn admin_routes() -> Router {
    Router::new()
        .route(
            "/api/system/users",
            get(system::handlers::users::list).post(system::handlers::users::create),
        )
        .route(
            "/api/system/users/:id",
            get(system::handlers::users::get_by_id)
                .put(system::handlers::users::update)
                .delete(system::handlers::users::delete),
        )
        .route(
            "/api/system/users/:id/rights",
            get(system::handlers::rights::get_user_rights)
                .put(system::handlers::rights::save_user_rights),
        )
        .layer(middleware::from_fn(require_admin))
}

/// All routes of the application
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // SYSTEM AUTH ROUTES (PUBLIC)
        // ========================================
        .route(
            "/api/system/auth/login",
            post(system::handlers::auth::login),
        )
        .route(
            "/api/system/auth/refresh",
            post(system::handlers::auth::refresh),
        )
        .route(
            "/api/system/auth/logout",
            post(system::handlers::auth::logout),
        )
        .merge(business_routes())
        .merge(admin_routes())
}
