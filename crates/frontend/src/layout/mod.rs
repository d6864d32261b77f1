pub mod center;
pub mod global_context;
pub mod left;
pub mod tabs;

use global_context::use_app_context;
use leptos::prelude::*;

/// Casca da aplicação:
/// ```text
/// +------------------------------------+
/// |  barra superior                    |
/// +-----------+------------------------+
/// |  menu     |  abas + conteúdo       |
/// +-----------+------------------------+
/// ```
#[component]
pub fn Shell() -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <div class="app-layout">
            <div class="app-topbar">
                <button
                    class="app-topbar__toggle"
                    title="Mostrar/ocultar menu"
                    on:click=move |_| ctx.toggle_left()
                >
                    "☰"
                </button>
                <span class="app-topbar__brand">"Moldura"</span>
            </div>
            <div class="app-body">
                <left::Left />
                <div class="app-main">
                    <center::Center />
                </div>
            </div>
        </div>
    }
}
