use super::tabs::Tabs;
use crate::layout::global_context::use_app_context;
use leptos::prelude::*;

#[component]
pub fn Center() -> impl IntoView {
    let ctx = use_app_context();
    let has_tabs = move || ctx.opened.with(|t| !t.is_empty());

    view! {
        <div data-zone="center" class="app-tabs" style="flex: 1; overflow: auto;">
            <Show
                when=has_tabs
                fallback=|| view! {
                    <div class="app-tabs__empty">"Escolha uma página no menu ao lado."</div>
                }
            >
                <Tabs />
            </Show>
        </div>
    }
}
