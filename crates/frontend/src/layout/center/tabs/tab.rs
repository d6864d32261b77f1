use crate::layout::global_context::use_app_context;
use crate::shared::icons::icon;
use leptos::ev;
use leptos::prelude::*;

/// Botão da aba na barra. O título é lido do contexto para acompanhar
/// `update_tab_title` e a marca de alterações não salvas.
#[component]
pub fn Tab(key: String) -> impl IntoView {
    let ctx = use_app_context();

    let key_active = key.clone();
    let is_active = Memo::new(move |_| ctx.active.with(|a| a.as_deref() == Some(key_active.as_str())));

    let key_title = key.clone();
    let title = move || {
        ctx.opened.with(|tabs| {
            tabs.iter()
                .find(|t| t.key == key_title)
                .map(|t| if t.dirty { format!("{} *", t.title) } else { t.title.clone() })
                .unwrap_or_default()
        })
    };

    let key_click = key.clone();
    let on_click = move |_| ctx.activate_tab(&key_click);

    let on_close = move |ev: ev::MouseEvent| {
        ev.stop_propagation();
        let dirty = ctx
            .opened
            .with_untracked(|tabs| tabs.iter().any(|t| t.key == key && t.dirty));
        if dirty {
            let confirmed = web_sys::window()
                .and_then(|w| w.confirm_with_message("Descartar as alterações não salvas?").ok())
                .unwrap_or(false);
            if !confirmed {
                return;
            }
        }
        ctx.close_tab(&key);
    };

    view! {
        <div class="tab" class:active=is_active on:click=on_click>
            <span>{title}</span>
            <button class="tab-close" title="Fechar" on:click=on_close>
                {icon("x")}
            </button>
        </div>
    }
}
