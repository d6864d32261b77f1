//! Títulos das abas, por chave.
//!
//! Agregados usam o `list_name()` dos contratos; o resto é fixo aqui.

use contracts::domain::a001_account_payable::aggregate::AccountPayable;
use contracts::domain::a002_product_return::aggregate::ProductReturn;
use contracts::domain::a003_production_item::aggregate::ProductionItem;
use contracts::domain::a004_marketing_task::aggregate::MarketingTask;
use contracts::domain::a005_membership::aggregate::Membership;
use contracts::domain::a006_order::aggregate::Order;
use contracts::domain::common::AggregateRoot;

/// Prefixo das abas de formulário de pedido: `a006_order_detail_{id|new}`
pub const ORDER_DETAIL_PREFIX: &str = "a006_order_detail_";

pub const MEMBERSHIP_REPORT_KEY: &str = "a005_membership_report";

pub fn order_detail_key(id: Option<&str>) -> String {
    format!("{}{}", ORDER_DETAIL_PREFIX, id.unwrap_or("new"))
}

/// Id do pedido numa chave de formulário; `None` para pedido novo
pub fn order_id_from_key(key: &str) -> Option<String> {
    key.strip_prefix(ORDER_DETAIL_PREFIX)
        .filter(|rest| !rest.is_empty() && *rest != "new")
        .map(str::to_string)
}

/// Título legível da aba; a própria chave quando desconhecida
pub fn tab_label_for_key(key: &str) -> String {
    let label = match key {
        "a001_account_payable" => AccountPayable::list_name(),
        "a002_product_return" => ProductReturn::list_name(),
        "a003_production_item" => ProductionItem::list_name(),
        "a004_marketing_task" => MarketingTask::list_name(),
        "a005_membership" => Membership::list_name(),
        MEMBERSHIP_REPORT_KEY => "Relatório de associados",
        "a006_order" => Order::list_name(),
        _ => return detail_tab_label(key).unwrap_or_else(|| key.to_string()),
    };
    label.to_string()
}

/// "Novo pedido" ou "Pedido {número}"
pub fn detail_tab_label(key: &str) -> Option<String> {
    if !key.starts_with(ORDER_DETAIL_PREFIX) {
        return None;
    }
    Some(match order_id_from_key(key) {
        None => "Novo pedido".to_string(),
        Some(_) => Order::element_name().to_string(),
    })
}

/// Título do formulário já carregado: número se houver, senão o cliente
pub fn pick_identifier(number: Option<&str>, customer: &str) -> String {
    match number.map(str::trim).filter(|n| !n.is_empty()) {
        Some(n) => format!("{} {}", Order::element_name(), n),
        None if !customer.trim().is_empty() => {
            format!("{} · {}", Order::element_name(), customer.trim())
        }
        None => Order::element_name().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_for_known_keys() {
        assert_eq!(tab_label_for_key("a006_order"), "Pedidos");
        assert_eq!(tab_label_for_key(MEMBERSHIP_REPORT_KEY), "Relatório de associados");
        assert_eq!(tab_label_for_key("a006_order_detail_new"), "Novo pedido");
        assert_eq!(tab_label_for_key("x_unknown"), "x_unknown");
    }

    #[test]
    fn detail_keys() {
        assert_eq!(order_detail_key(None), "a006_order_detail_new");
        assert_eq!(order_detail_key(Some("abc")), "a006_order_detail_abc");
        assert_eq!(order_id_from_key("a006_order_detail_abc"), Some("abc".to_string()));
        assert_eq!(order_id_from_key("a006_order_detail_new"), None);
        assert_eq!(order_id_from_key("a006_order"), None);
    }

    #[test]
    fn identifier_prefers_number() {
        assert_eq!(pick_identifier(Some("1042"), "Ana"), "Pedido 1042");
        assert_eq!(pick_identifier(Some(" "), "Ana"), "Pedido · Ana");
        assert_eq!(pick_identifier(None, ""), "Pedido");
    }
}
