use super::sidebar::Sidebar;
use crate::layout::global_context::use_app_context;
use leptos::prelude::*;

#[component]
pub fn Left() -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <div data-zone="left" class="left" class:hidden=move || !ctx.left_open.get()>
            <Sidebar />
        </div>
    }
}
