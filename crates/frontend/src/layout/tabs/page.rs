use super::registry::render_tab_content;
use crate::layout::global_context::{AppGlobalContext, Tab};
use leptos::prelude::*;

/// Conteúdo de uma aba. Fica montado enquanto a aba estiver aberta; a aba
/// inativa só é escondida, preservando o estado dos formulários.
#[component]
pub fn TabPage(tab: Tab, tabs_store: AppGlobalContext) -> impl IntoView {
    let key = tab.key.clone();
    let key_for_active = key.clone();
    let is_active = move || tabs_store.active.with(|a| a.as_deref() == Some(key_for_active.as_str()));

    log::debug!("tab page mounted: '{}'", key);
    let key_for_cleanup = key.clone();
    on_cleanup(move || log::debug!("tab page dropped: '{}'", key_for_cleanup));

    let content = render_tab_content(&key, tabs_store);

    view! {
        <div class="tabs__item" class:tabs__item--hidden=move || !is_active() data-tab-key=key>
            {content}
        </div>
    }
}
