//! Tabela de tradução compartilhada
//!
//! O backend fala em chaves técnicas (`pending`, `in_progress`, ...). A UI
//! mostra rótulos em pt-BR. As chaves são qualificadas pelo grupo
//! (`payable_status.pending`) para evitar colisões entre enums.

use once_cell::sync::Lazy;
use std::collections::HashMap;

static TRANSLATIONS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        // a001 contas a pagar
        ("payable_status.pending", "Pendente"),
        ("payable_status.overdue", "Vencida"),
        ("payable_status.paid", "Paga"),
        ("payable_status.cancelled", "Cancelada"),
        // formas de pagamento
        ("payment_method.cash", "Dinheiro"),
        ("payment_method.pix", "Pix"),
        ("payment_method.debit", "Cartão de débito"),
        ("payment_method.credit", "Cartão de crédito"),
        ("payment_method.boleto", "Boleto"),
        ("payment_method.transfer", "Transferência"),
        // a002 devoluções
        ("return_reason.defect", "Defeito de fabricação"),
        ("return_reason.damaged", "Avariado no transporte"),
        ("return_reason.wrong_item", "Item errado"),
        ("return_reason.regret", "Desistência"),
        ("return_reason.other", "Outro"),
        ("return_status.requested", "Solicitada"),
        ("return_status.received", "Recebida"),
        ("return_status.refunded", "Reembolsada"),
        ("return_status.rejected", "Recusada"),
        // a003 produção
        ("production_stage.queued", "Na fila"),
        ("production_stage.cutting", "Corte"),
        ("production_stage.assembly", "Montagem"),
        ("production_stage.finishing", "Acabamento"),
        ("production_stage.ready", "Pronto"),
        ("production_stage.delivered", "Entregue"),
        // a004 marketing
        ("task_column.backlog", "Ideias"),
        ("task_column.todo", "A fazer"),
        ("task_column.in_progress", "Em andamento"),
        ("task_column.review", "Revisão"),
        ("task_column.done", "Concluído"),
        ("task_priority.low", "Baixa"),
        ("task_priority.medium", "Média"),
        ("task_priority.high", "Alta"),
        // a005 associados
        ("membership_plan.monthly", "Mensal"),
        ("membership_plan.quarterly", "Trimestral"),
        ("membership_plan.annual", "Anual"),
        ("membership_status.active", "Ativo"),
        ("membership_status.suspended", "Suspenso"),
        ("membership_status.cancelled", "Cancelado"),
        // a006 pedidos
        ("order_kind.quote", "Orçamento"),
        ("order_kind.order", "Pedido"),
        ("order_status.open", "Em aberto"),
        ("order_status.approved", "Aprovado"),
        ("order_status.in_production", "Em produção"),
        ("order_status.ready", "Pronto para retirada"),
        ("order_status.delivered", "Entregue"),
        ("order_status.cancelled", "Cancelado"),
        ("glass_type.none", "Sem vidro"),
        ("glass_type.common", "Vidro comum"),
        ("glass_type.anti_glare", "Vidro antirreflexo"),
        ("glass_type.mirror", "Espelho"),
        ("adjustment_anchor.percent", "%"),
        ("adjustment_anchor.value", "R$"),
    ])
});

/// Rótulo da chave; a própria chave quando não há tradução
pub fn translate(key: &str) -> &str {
    TRANSLATIONS.get(key).copied().unwrap_or(key)
}

/// Rótulo de um valor de enum dentro do seu grupo.
///
/// Sem tradução cadastrada, devolve o valor cru (o que o backend mandou).
pub fn label(group: &str, value: &'static str) -> &'static str {
    let key = format!("{}.{}", group, value);
    TRANSLATIONS.get(key.as_str()).copied().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_keys_are_translated() {
        assert_eq!(translate("order_kind.quote"), "Orçamento");
        assert_eq!(label("production_stage", "cutting"), "Corte");
    }

    #[test]
    fn unknown_keys_fall_back_to_themselves() {
        assert_eq!(translate("nao.existe"), "nao.existe");
        assert_eq!(label("order_status", "archived"), "archived");
    }
}
