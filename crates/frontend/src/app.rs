use crate::layout::global_context::AppGlobalContext;
use crate::layout::Shell;
use crate::shared::config::config;
use crate::shared::modal_stack::{ModalHost, ModalStackService};
use crate::shared::toast::Notifier;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn App() -> impl IntoView {
    view! {
        <ConfigProvider>
            <ToasterProvider>
                <AppRoot />
            </ToasterProvider>
        </ConfigProvider>
    }
}

/// Tudo que precisa do toaster fica abaixo do `ToasterProvider`
#[component]
fn AppRoot() -> impl IntoView {
    let cfg = config();
    log::info!(
        "starting: api port {}, locale {}, page size {}",
        cfg.api.port,
        cfg.ui.locale,
        cfg.ui.page_size
    );

    provide_context(Notifier::new());
    provide_context(ModalStackService::new());

    let ctx = AppGlobalContext::new();
    provide_context(ctx);
    ctx.init_router_integration();

    view! {
        <Shell />
        <ModalHost />
    }
}
