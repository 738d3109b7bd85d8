//! Sidebar menu: the screens the signed-in user may view, grouped by section.

use contracts::system::routes::ScreenRoute;
use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_location;

use crate::shared::screen::HOME_PATH;
use crate::system::auth::context::use_auth;
use crate::system::rights::viewable_routes;

/// Group routes by section, keeping the catalogue order
pub fn menu_sections(routes: &[&'static ScreenRoute]) -> Vec<(&'static str, Vec<&'static ScreenRoute>)> {
    let mut sections: Vec<(&'static str, Vec<&'static ScreenRoute>)> = Vec::new();
    for route in routes {
        match sections.iter_mut().find(|(section, _)| *section == route.section) {
            Some((_, items)) => items.push(route),
            None => sections.push((route.section, vec![route])),
        }
    }
    sections
}

/// A menu item is active on its listing and on the add/edit screens below it
fn is_active(current: &str, route: &ScreenRoute) -> bool {
    let prefix = route.path.trim_end_matches("-list");
    current == route.path || current.starts_with(prefix)
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let (auth_state, _) = use_auth();
    let location = use_location();
    let sections = Memo::new(move |_| auth_state.with(|s| menu_sections(&viewable_routes(&s.rights))));

    view! {
        <nav class="sidebar">
            <A href=HOME_PATH attr:class="sidebar__home">"Home"</A>
            {move || {
                sections
                    .get()
                    .into_iter()
                    .map(|(section, routes)| {
                        view! {
                            <div class="sidebar__section">
                                <div class="sidebar__section-title">{section}</div>
                                {routes
                                    .into_iter()
                                    .map(|route| {
                                        let class = move || {
                                            if is_active(&location.pathname.get(), route) {
                                                "sidebar__item sidebar__item--active"
                                            } else {
                                                "sidebar__item"
                                            }
                                        };
                                        view! {
                                            <A href=route.path attr:class=class>
                                                {route.title}
                                            </A>
                                        }
                                    })
                                    .collect_view()}
                            </div>
                        }
                    })
                    .collect_view()
            }}
        </nav>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::system::routes::{AGENTS, BRANCHES, CLIENTS, ORDERS};

    #[test]
    fn test_sections_keep_catalogue_order() {
        let sections = menu_sections(&[&BRANCHES, &AGENTS, &CLIENTS, &ORDERS]);
        let names: Vec<_> = sections.iter().map(|(s, _)| *s).collect();
        assert_eq!(names, vec!["Branches & Clients", "Sales", "Operations"]);
        assert_eq!(sections[0].1, vec![&BRANCHES, &CLIENTS]);
    }

    #[test]
    fn test_active_item_covers_add_and_edit() {
        assert!(is_active("/agents/agent-list", &AGENTS));
        assert!(is_active("/agents/agent-edit/a-1", &AGENTS));
        assert!(!is_active("/branches-clients/client-list", &BRANCHES));
    }
}
