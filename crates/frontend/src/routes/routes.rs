use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;
use thaw::*;

use crate::dashboards::OverviewDashboard;
use crate::domain::a001_branch::ui::{BranchAdd, BranchEdit, BranchList};
use crate::domain::a002_agent::ui::{AgentAdd, AgentEdit, AgentList};
use crate::domain::a003_client::ui::{ClientAdd, ClientEdit, ClientList};
use crate::domain::a004_courier::ui::{CourierAdd, CourierEdit, CourierList};
use crate::domain::a005_product::ui::{ProductAdd, ProductEdit, ProductList};
use crate::domain::a006_plan::ui::{PlanAdd, PlanEdit, PlanList};
use crate::domain::a007_coupon::ui::{CouponAdd, CouponEdit, CouponList};
use crate::domain::a008_motor_quote::ui::{MotorQuoteAdd, MotorQuoteEdit, MotorQuoteList};
use crate::domain::a009_order::ui::{OrderAdd, OrderEdit, OrderList};
use crate::domain::a010_call_us::ui::{CallUsAdd, CallUsEdit, CallUsList};
use crate::domain::a011_api_user_product::ui::ApiUserProductsPage;
use crate::layout::Shell;
use crate::shared::notify::Toasts;
use crate::system::auth::context::use_auth;
use crate::system::pages::home::HomePage;
use crate::system::pages::login::LoginPage;
use crate::system::users::ui::{UserAdd, UserEdit, UserList, UserRightsEditor};

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="screen">
            <MessageBar intent=MessageBarIntent::Warning>"This page does not exist."</MessageBar>
        </div>
    }
}

#[component]
fn MainLayout() -> impl IntoView {
    view! {
        <Shell>
            <Routes fallback=|| view! { <NotFound /> }>
                <Route path=path!("/") view=HomePage />
                <Route path=path!("/dashboard") view=OverviewDashboard />

                <Route path=path!("/branches-clients/branch-list") view=BranchList />
                <Route path=path!("/branches-clients/branch-add") view=BranchAdd />
                <Route path=path!("/branches-clients/branch-edit/:id") view=BranchEdit />
                <Route path=path!("/branches-clients/client-list") view=ClientList />
                <Route path=path!("/branches-clients/client-add") view=ClientAdd />
                <Route path=path!("/branches-clients/client-edit/:id") view=ClientEdit />

                <Route path=path!("/agents/agent-list") view=AgentList />
                <Route path=path!("/agents/agent-add") view=AgentAdd />
                <Route path=path!("/agents/agent-edit/:id") view=AgentEdit />

                <Route path=path!("/motor-quotes/quote-list") view=MotorQuoteList />
                <Route path=path!("/motor-quotes/quote-add") view=MotorQuoteAdd />
                <Route path=path!("/motor-quotes/quote-edit/:id") view=MotorQuoteEdit />

                <Route path=path!("/couriers/courier-list") view=CourierList />
                <Route path=path!("/couriers/courier-add") view=CourierAdd />
                <Route path=path!("/couriers/courier-edit/:id") view=CourierEdit />

                <Route path=path!("/orders/order-list") view=OrderList />
                <Route path=path!("/orders/order-add") view=OrderAdd />
                <Route path=path!("/orders/order-edit/:id") view=OrderEdit />

                <Route path=path!("/call-us/request-list") view=CallUsList />
                <Route path=path!("/call-us/request-add") view=CallUsAdd />
                <Route path=path!("/call-us/request-edit/:id") view=CallUsEdit />

                <Route path=path!("/products/product-list") view=ProductList />
                <Route path=path!("/products/product-add") view=ProductAdd />
                <Route path=path!("/products/product-edit/:id") view=ProductEdit />
                <Route path=path!("/products/plan-list") view=PlanList />
                <Route path=path!("/products/plan-add") view=PlanAdd />
                <Route path=path!("/products/plan-edit/:id") view=PlanEdit />

                <Route path=path!("/coupons/coupon-list") view=CouponList />
                <Route path=path!("/coupons/coupon-add") view=CouponAdd />
                <Route path=path!("/coupons/coupon-edit/:id") view=CouponEdit />

                <Route path=path!("/api-users/user-products") view=ApiUserProductsPage />

                <Route path=path!("/users/user-list") view=UserList />
                <Route path=path!("/users/user-add") view=UserAdd />
                <Route path=path!("/users/user-edit/:id") view=UserEdit />
                <Route path=path!("/users/user-rights/:id") view=UserRightsEditor />
            </Routes>
        </Shell>
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    let (auth_state, _) = use_auth();

    view! {
        <Router>
            <Show
                when=move || !auth_state.with(|s| s.restoring)
                fallback=|| view! {
                    <div class="app-restoring">
                        <Spinner />
                    </div>
                }
            >
                <Show
                    when=move || auth_state.with(|s| s.is_authenticated())
                    fallback=|| view! { <LoginPage /> }
                >
                    <MainLayout />
                </Show>
            </Show>
            <Toasts />
        </Router>
    }
}

#[cfg(test)]
mod tests {
    use contracts::system::routes::SCREEN_ROUTES;

    use crate::shared::navigation::{add_path, edit_path};

    /// Every catalogued listing has add/edit siblings under the same base
    #[test]
    fn test_catalogue_paths_derive_form_paths() {
        for route in SCREEN_ROUTES {
            if route.path.ends_with("-list") {
                assert!(add_path(route.path).starts_with(route.base()));
                assert!(edit_path(route.path, "x").ends_with("-edit/x"));
            }
        }
    }
}
