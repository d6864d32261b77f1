//! Chave da aba → página. Todas as chaves de aba passam por aqui.

use super::tab_labels::{order_id_from_key, MEMBERSHIP_REPORT_KEY, ORDER_DETAIL_PREFIX};
use crate::domain::a001_account_payable::ui::list::AccountPayableList;
use crate::domain::a002_product_return::ui::list::ProductReturnList;
use crate::domain::a003_production_item::ui::board::ProductionBoard;
use crate::domain::a004_marketing_task::ui::board::MarketingBoard;
use crate::domain::a005_membership::ui::list::MembershipList;
use crate::domain::a005_membership::ui::report::MembershipReportPage;
use crate::domain::a006_order::ui::details::OrderDetails;
use crate::domain::a006_order::ui::list::OrderList;
use crate::layout::global_context::AppGlobalContext;
use leptos::prelude::*;

pub fn render_tab_content(key: &str, tabs_store: AppGlobalContext) -> AnyView {
    match key {
        "a001_account_payable" => view! { <AccountPayableList /> }.into_any(),
        "a002_product_return" => view! { <ProductReturnList /> }.into_any(),
        "a003_production_item" => view! { <ProductionBoard /> }.into_any(),
        "a004_marketing_task" => view! { <MarketingBoard /> }.into_any(),
        "a005_membership" => view! { <MembershipList /> }.into_any(),
        MEMBERSHIP_REPORT_KEY => view! { <MembershipReportPage /> }.into_any(),
        "a006_order" => view! { <OrderList /> }.into_any(),
        k if k.starts_with(ORDER_DETAIL_PREFIX) => {
            let tab_key = k.to_string();
            let id = order_id_from_key(k);
            view! {
                <OrderDetails
                    id=id
                    tab_key=tab_key.clone()
                    on_close=Callback::new(move |_| tabs_store.close_tab(&tab_key))
                />
            }
            .into_any()
        }
        _ => {
            log::warn!("unknown tab key '{}'", key);
            view! {
                <div class="page page--placeholder">
                    <p>"Página não encontrada: " {key.to_string()}</p>
                </div>
            }
            .into_any()
        }
    }
}
