//! Raiz padrão das páginas abertas em abas.
//!
//! ```rust,ignore
//! view! {
//!     <PageFrame page_id="a006_order--list" category=PAGE_CAT_LIST>
//!         <div class="page__header">...</div>
//!         <div class="page__content">...</div>
//!     </PageFrame>
//! }
//! ```

use super::page_standard::{is_valid_page_id, page_class};
use leptos::prelude::*;

#[component]
pub fn PageFrame(
    /// `{agregado}--{categoria}`
    page_id: &'static str,
    /// Uma das constantes `PAGE_CAT_*`
    category: &'static str,
    children: Children,
) -> impl IntoView {
    if !is_valid_page_id(page_id) {
        log::warn!("page id '{}' does not follow {{entity}}--{{category}}", page_id);
    }

    view! {
        <div id=page_id class=page_class(category) data-page-category=category>
            {children()}
        </div>
    }
}
