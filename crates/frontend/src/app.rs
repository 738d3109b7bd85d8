use leptos::prelude::*;

use crate::routes::routes::AppRoutes;
use crate::shared::notify::Notifications;
use crate::shared::query::QueryClient;
use crate::system::auth::context::AuthProvider;

#[component]
pub fn App() -> impl IntoView {
    // One cache and one toast queue for the whole session
    provide_context(QueryClient::new());
    provide_context(Notifications::new());

    view! {
        <AuthProvider>
            <AppRoutes />
        </AuthProvider>
    }
}
