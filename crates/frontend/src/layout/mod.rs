pub mod left;
pub mod top_header;

use leptos::prelude::*;
use top_header::TopHeader;

/// Layout flags shared by the header and the sidebar
#[derive(Clone, Copy)]
pub struct LayoutContext {
    pub sidebar_open: RwSignal<bool>,
}

impl LayoutContext {
    pub fn new() -> Self {
        Self {
            sidebar_open: RwSignal::new(true),
        }
    }

    pub fn toggle_sidebar(&self) {
        self.sidebar_open.update(|open| *open = !*open);
    }
}

impl Default for LayoutContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Application shell.
///
/// ```text
/// +------------------------------+
/// |          TopHeader           |
/// +---------+--------------------+
/// | Sidebar |      Content       |
/// +---------+--------------------+
/// ```
#[component]
pub fn Shell(children: Children) -> impl IntoView {
    let layout = LayoutContext::new();
    provide_context(layout);

    view! {
        <div class="app-layout">
            <TopHeader />
            <div class="app-body">
                <Show when=move || layout.sidebar_open.get()>
                    <aside class="app-sidebar">
                        <left::sidebar::Sidebar />
                    </aside>
                </Show>
                <main class="app-main">{children()}</main>
            </div>
        </div>
    }
}
