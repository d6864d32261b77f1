//! Estado do formulário de pedido/orçamento.
//!
//! O `OrderDto` inteiro vive num único sinal. Toda edição passa pelos
//! métodos do DTO, que recalculam `pricing` na hora, e marca a aba como
//! alterada.

use crate::domain::a006_order::api;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::tab_labels::{order_detail_key, pick_identifier};
use crate::shared::config::config;
use crate::shared::toast::Notifier;
use contracts::domain::a006_order::aggregate::{OrderDto, OrderItem};
use contracts::domain::a006_order::calculation::CalculationRequest;
use contracts::domain::a006_order::pricing::{FeeSchedule, PricingError};
use contracts::enums::PaymentMethod;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::collections::HashMap;

/// A resposta de `/calcular` só vale se o item ainda tem as mesmas medidas e
/// opções de quando a requisição saiu
fn still_matches(item: Option<&OrderItem>, sent: &CalculationRequest) -> bool {
    item.and_then(|i| i.calculation_request().ok())
        .is_some_and(|current| &current == sent)
}

/// Opções de parcelamento para a forma de pagamento
pub fn installment_options(method: PaymentMethod, fees: &FeeSchedule) -> Vec<u32> {
    if method.allows_installments() {
        (1..=fees.max_installments()).collect()
    } else {
        vec![1]
    }
}

/// Cálculos em andamento. Cada requisição recebe um número e acompanha a
/// posição do seu item quando linhas acima são removidas ou duplicadas.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InFlight {
    next_ticket: u64,
    positions: HashMap<u64, usize>,
}

impl InFlight {
    pub fn start(&mut self, index: usize) -> u64 {
        self.next_ticket += 1;
        self.positions.insert(self.next_ticket, index);
        self.next_ticket
    }

    /// Posição atual do item; `None` se ele foi removido
    pub fn position(&self, ticket: u64) -> Option<usize> {
        self.positions.get(&ticket).copied()
    }

    pub fn finish(&mut self, ticket: u64) {
        self.positions.remove(&ticket);
    }

    pub fn is_busy(&self, index: usize) -> bool {
        self.positions.values().any(|i| *i == index)
    }

    pub fn item_removed(&mut self, index: usize) {
        self.positions.retain(|_, i| *i != index);
        for i in self.positions.values_mut() {
            if *i > index {
                *i -= 1;
            }
        }
    }

    pub fn item_inserted(&mut self, index: usize) {
        for i in self.positions.values_mut() {
            if *i >= index {
                *i += 1;
            }
        }
    }
}

#[derive(Clone, Copy)]
pub struct OrderFormVm {
    pub dto: RwSignal<OrderDto>,
    pub loading: RwSignal<bool>,
    pub saving: RwSignal<bool>,
    /// Itens com `/calcular` em andamento
    pub calculating: RwSignal<InFlight>,
    pub dirty: RwSignal<bool>,
    fees: StoredValue<FeeSchedule>,
    tab_key: StoredValue<String>,
    tabs: AppGlobalContext,
    notifier: Notifier,
}

impl OrderFormVm {
    pub fn new(notifier: Notifier, tabs: AppGlobalContext, tab_key: String) -> Self {
        Self {
            dto: RwSignal::new(OrderDto::default()),
            loading: RwSignal::new(false),
            saving: RwSignal::new(false),
            calculating: RwSignal::new(InFlight::default()),
            dirty: RwSignal::new(false),
            fees: StoredValue::new(config().pricing.fee_schedule()),
            tab_key: StoredValue::new(tab_key),
            tabs,
            notifier,
        }
    }

    pub fn fees(&self) -> FeeSchedule {
        self.fees.get_value()
    }

    pub fn is_edit_mode(&self) -> Signal<bool> {
        let dto = self.dto;
        Signal::derive(move || dto.with(|d| !d.is_new()))
    }

    pub fn can_approve(&self) -> Signal<bool> {
        let (dto, dirty) = (self.dto, self.dirty);
        Signal::derive(move || !dirty.get() && dto.with(OrderDto::can_approve))
    }

    pub fn load(&self, id: String) {
        let this = *self;
        this.loading.set(true);
        spawn_local(async move {
            match api::fetch_by_id(&id).await {
                Ok(order) => {
                    this.dto.set(order.into());
                    this.mark_clean();
                }
                Err(e) => this.notifier.error("Erro ao carregar o pedido", e),
            }
            this.loading.set(false);
        });
    }

    fn mark_dirty(&self) {
        if !self.dirty.get_untracked() {
            self.dirty.set(true);
            self.tabs.set_dirty(&self.tab_key.get_value(), true);
        }
    }

    fn mark_clean(&self) {
        self.dirty.set(false);
        let key = self.tab_key.get_value();
        self.tabs.set_dirty(&key, false);
        let title = self
            .dto
            .with_untracked(|d| pick_identifier(d.number.as_deref(), &d.customer));
        self.tabs.update_tab_title(&key, &title);
    }

    /// Edição qualquer do DTO com as taxas em vigor
    pub fn edit(&self, f: impl FnOnce(&mut OrderDto, &FeeSchedule)) {
        let fees = self.fees.get_value();
        self.dto.update(|d| f(d, &fees));
        self.mark_dirty();
    }

    fn edit_checked(&self, f: impl FnOnce(&mut OrderDto, &FeeSchedule) -> Result<(), PricingError>) -> bool {
        let fees = self.fees.get_value();
        let mut result = Ok(());
        self.dto.update(|d| result = f(d, &fees));
        match result {
            Ok(()) => {
                self.mark_dirty();
                true
            }
            Err(e) => {
                self.notifier.error("Não foi possível alterar o item", e);
                false
            }
        }
    }

    // ------------------------------------------------------------------
    // Itens
    // ------------------------------------------------------------------

    pub fn add_item(&self) {
        self.edit(|d, fees| {
            d.add_item(fees);
        });
    }

    pub fn duplicate_item(&self, index: usize) {
        if self.edit_checked(|d, fees| d.duplicate_item(index, fees).map(|_| ())) {
            self.calculating.update(|f| f.item_inserted(index + 1));
        }
    }

    pub fn remove_item(&self, index: usize) {
        if self.edit_checked(|d, fees| d.remove_item(index, fees).map(|_| ())) {
            self.calculating.update(|f| f.item_removed(index));
        }
    }

    pub fn update_item(&self, index: usize, edit: impl FnOnce(&mut OrderItem)) {
        self.edit_checked(|d, fees| d.update_item(index, fees, edit));
    }

    /// Pede o preço do item ao backend. Medidas inválidas param aqui.
    pub fn calculate(&self, index: usize) {
        let request = self
            .dto
            .with_untracked(|d| d.items.get(index).map(OrderItem::calculation_request));
        let request = match request {
            Some(Ok(r)) => r,
            Some(Err(e)) => {
                self.notifier.warning(format!("Item {}: {}", index + 1, e));
                return;
            }
            None => return,
        };

        let this = *self;
        let mut ticket = 0;
        this.calculating.update(|f| ticket = f.start(index));
        spawn_local(async move {
            let result = api::calcular(&request).await;
            // o item pode ter mudado de linha enquanto a requisição corria
            let current = this.calculating.with_untracked(|f| f.position(ticket));
            match (result, current) {
                (Ok(response), Some(current)) => {
                    let fresh = this
                        .dto
                        .with_untracked(|d| still_matches(d.items.get(current), &request));
                    if fresh {
                        this.edit_checked(|d, fees| d.apply_calculation(current, response, fees));
                    } else {
                        log::debug!("stale /calcular response for item {} dropped", current);
                    }
                }
                (Ok(_), None) => log::debug!("/calcular response for a removed item dropped"),
                (Err(e), _) => this
                    .notifier
                    .error(&format!("Erro ao calcular o item {}", current.unwrap_or(index) + 1), e),
            }
            this.calculating.update(|f| f.finish(ticket));
        });
    }

    pub fn calculate_pending(&self) {
        let pending = self.dto.with_untracked(OrderDto::unpriced_items);
        if pending.is_empty() {
            self.notifier.success("Todos os itens já têm preço");
            return;
        }
        for index in pending {
            self.calculate(index);
        }
    }

    // ------------------------------------------------------------------
    // Gravação
    // ------------------------------------------------------------------

    /// Bloqueado até ter cliente, itens e todos os preços calculados
    pub fn save(&self) {
        let dto = self.dto.get_untracked();
        if let Err(e) = dto.validate() {
            self.notifier.invalid(&e);
            return;
        }

        let this = *self;
        let was_new = dto.is_new();
        this.saving.set(true);
        spawn_local(async move {
            match api::save(&dto).await {
                Ok(order) => {
                    this.notifier.success(if was_new { "Pedido criado" } else { "Pedido salvo" });
                    let saved: OrderDto = order.into();
                    match saved.id.clone().filter(|_| was_new) {
                        // A aba "novo" dá lugar à aba do pedido gravado
                        Some(id) => {
                            let old_key = this.tab_key.get_value();
                            this.tabs.set_dirty(&old_key, false);
                            let title = pick_identifier(saved.number.as_deref(), &saved.customer);
                            this.tabs.close_tab(&old_key);
                            this.tabs.open_tab(&order_detail_key(Some(&id)), &title);
                        }
                        None => {
                            this.dto.set(saved);
                            this.mark_clean();
                        }
                    }
                }
                Err(e) => this.notifier.error("Erro ao salvar o pedido", e),
            }
            this.saving.set(false);
        });
    }

    pub fn approve(&self) {
        let Some(id) = self.dto.with_untracked(|d| d.id.clone()) else {
            return;
        };
        if !self.can_approve().get_untracked() {
            self.notifier
                .warning("Salve o orçamento antes de aprovar");
            return;
        }

        let this = *self;
        this.saving.set(true);
        spawn_local(async move {
            match api::approve(&id).await {
                Ok(order) => {
                    this.dto.set(order.into());
                    this.mark_clean();
                    this.notifier.success("Orçamento aprovado: agora é um pedido");
                }
                Err(e) => this.notifier.error("Erro ao aprovar o orçamento", e),
            }
            this.saving.set(false);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a006_order::aggregate::GlassType;

    fn item() -> OrderItem {
        OrderItem {
            molding_code: "MD-204".into(),
            width_cm: 30.0,
            height_cm: 40.0,
            ..Default::default()
        }
    }

    #[test]
    fn stale_calculation_is_detected() {
        let sent = item().calculation_request().unwrap();
        assert!(still_matches(Some(&item()), &sent));

        let mut resized = item();
        resized.width_cm = 50.0;
        assert!(!still_matches(Some(&resized), &sent));

        let mut other_glass = item();
        other_glass.glass = GlassType::AntiGlare;
        assert!(!still_matches(Some(&other_glass), &sent));

        assert!(!still_matches(None, &sent));
    }

    #[test]
    fn description_change_keeps_calculation_valid() {
        let sent = item().calculation_request().unwrap();
        let mut renamed = item();
        renamed.description = "Quadro da sala".into();
        assert!(still_matches(Some(&renamed), &sent));
    }

    #[test]
    fn in_flight_follows_item_when_rows_above_change() {
        let mut busy = InFlight::default();
        let first = busy.start(0);
        let third = busy.start(2);
        assert!(busy.is_busy(2));

        busy.item_removed(1);
        assert_eq!(busy.position(first), Some(0));
        assert_eq!(busy.position(third), Some(1));
        assert!(!busy.is_busy(2));
        assert!(busy.is_busy(1));

        busy.item_inserted(1);
        assert_eq!(busy.position(first), Some(0));
        assert_eq!(busy.position(third), Some(2));

        busy.finish(third);
        assert!(!busy.is_busy(2));
    }

    #[test]
    fn removed_item_loses_its_calculation() {
        let mut busy = InFlight::default();
        let gone = busy.start(1);
        let other = busy.start(3);
        busy.item_removed(1);
        assert_eq!(busy.position(gone), None);
        assert_eq!(busy.position(other), Some(2));
        assert!(!busy.is_busy(1));
    }

    #[test]
    fn installments_only_for_credit() {
        let fees = FeeSchedule::default();
        assert_eq!(installment_options(PaymentMethod::Pix, &fees), vec![1]);
        assert_eq!(installment_options(PaymentMethod::Debit, &fees), vec![1]);
        let credit = installment_options(PaymentMethod::Credit, &fees);
        assert_eq!(credit.first(), Some(&1));
        assert_eq!(credit.len() as u32, fees.max_installments());
    }
}
