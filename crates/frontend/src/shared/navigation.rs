//! Navigation requests to the client router and the screen path scheme.
//!
//! A module's listing lives at its catalogued route (`.../branch-list`);
//! its add and edit screens are siblings (`.../branch-add`,
//! `.../branch-edit/:id`). The edit screen gets its id from the path only.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use leptos_router::NavigateOptions;

pub fn use_navigator() -> Callback<String> {
    let navigate = use_navigate();
    Callback::new(move |path: String| {
        log::debug!("navigate to {}", path);
        navigate(&path, NavigateOptions::default());
    })
}

fn sibling(list_path: &str, action: &str) -> String {
    match list_path.strip_suffix("-list") {
        Some(stem) => format!("{}-{}", stem, action),
        None => format!("{}/{}", list_path, action),
    }
}

pub fn add_path(list_path: &str) -> String {
    sibling(list_path, "add")
}

pub fn edit_path(list_path: &str, id: &str) -> String {
    format!("{}/{}", sibling(list_path, "edit"), urlencoding::encode(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::system::routes::{AGENTS, BRANCHES, MOTOR_QUOTES};

    #[test]
    fn test_sibling_paths() {
        assert_eq!(add_path(BRANCHES.path), "/branches-clients/branch-add");
        assert_eq!(edit_path(AGENTS.path, "a-7"), "/agents/agent-edit/a-7");
        assert_eq!(
            edit_path(MOTOR_QUOTES.path, "q 1"),
            "/motor-quotes/quote-edit/q%201"
        );
        assert_eq!(add_path("/api-users/user-products"), "/api-users/user-products/add");
    }
}
