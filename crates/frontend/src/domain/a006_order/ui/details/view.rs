use super::items::OrderItemsTable;
use super::totals::{OrderAdjustments, OrderTotals};
use super::view_model::OrderFormVm;
use crate::layout::global_context::use_app_context;
use crate::shared::form_utils::opt_text;
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DETAIL;
use crate::shared::toast::use_notifier;
use contracts::domain::a006_order::aggregate::{OrderDto, OrderKind, OrderStatus};
use leptos::prelude::*;
use thaw::*;

/// Título do formulário: "Novo orçamento", "Pedido 0042"...
pub fn form_title(dto: &OrderDto) -> String {
    let kind = match dto.kind {
        OrderKind::Quote => "orçamento",
        OrderKind::Order => "pedido",
    };
    match dto.number.as_deref() {
        Some(n) => {
            let mut title = kind.to_string();
            title[..1].make_ascii_uppercase();
            format!("{} {}", title, n)
        }
        None if dto.is_new() => format!("Novo {}", kind),
        None => kind.to_string(),
    }
}

/// Formulário de pedido/orçamento, aberto numa aba própria
#[component]
pub fn OrderDetails(
    id: Option<String>,
    tab_key: String,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let vm = OrderFormVm::new(use_notifier(), use_app_context(), tab_key);
    if let Some(existing) = id {
        vm.load(existing);
    }
    let is_edit = vm.is_edit_mode();
    let can_approve = vm.can_approve();
    let busy = Signal::derive(move || vm.saving.get() || vm.loading.get());
    let is_order = Signal::derive(move || vm.dto.with(|d| d.kind == OrderKind::Order));

    let close = move || {
        let confirmed = !vm.dirty.get_untracked()
            || web_sys::window()
                .and_then(|w| w.confirm_with_message("Descartar as alterações não salvas?").ok())
                .unwrap_or(false);
        if confirmed {
            on_close.run(());
        }
    };

    view! {
        <PageFrame page_id="a006_order--detail" category=PAGE_CAT_DETAIL>
            <div class="page__header">
                <h1 class="page__title">
                    {move || vm.dto.with(form_title)}
                    <Show when=move || vm.dirty.get()>
                        <span class="page__title-dirty">" •"</span>
                    </Show>
                </h1>
                <div class="page__header-right">
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| vm.save() disabled=busy>
                        "Salvar"
                    </Button>
                    <Show when=move || can_approve.get()>
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=move |_| vm.approve()
                            disabled=busy
                        >
                            "Aprovar orçamento"
                        </Button>
                    </Show>
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| close()>
                        "Fechar"
                    </Button>
                </div>
            </div>

            <div class="page__content">
                <Show when=move || vm.loading.get()>
                    <Spinner />
                </Show>

                <div class="details-grid--3col">
                    <div class="form__group" style="grid-column: span 2;">
                        <label class="form__label">"Cliente *"</label>
                        <input
                            type="text"
                            class="form__input"
                            prop:value=move || vm.dto.with(|d| d.customer.clone())
                            on:input=move |ev| {
                                let v = event_target_value(&ev);
                                vm.edit(|d, _| d.customer = v);
                            }
                        />
                    </div>
                    <div class="form__group">
                        <label class="form__label">"Telefone"</label>
                        <input
                            type="tel"
                            class="form__input"
                            prop:value=move || vm.dto.with(|d| d.customer_phone.clone().unwrap_or_default())
                            on:input=move |ev| {
                                let v = opt_text(event_target_value(&ev));
                                vm.edit(|d, _| d.customer_phone = v);
                            }
                        />
                    </div>

                    <div class="form__group">
                        <label class="form__label">"Tipo"</label>
                        <select
                            class="form__select"
                            disabled=move || is_edit.get()
                            prop:value=move || vm.dto.with(|d| d.kind.code())
                            on:change=move |ev| {
                                if let Some(k) = OrderKind::from_code(&event_target_value(&ev)) {
                                    vm.edit(|d, _| d.kind = k);
                                }
                            }
                        >
                            {OrderKind::ALL
                                .iter()
                                .map(|k| view! { <option value=k.code()>{k.label()}</option> })
                                .collect_view()}
                        </select>
                    </div>
                    <div class="form__group">
                        <label class="form__label">"Situação"</label>
                        // Orçamento só muda de situação ao ser aprovado
                        <select
                            class="form__select"
                            disabled=move || !is_order.get()
                            prop:value=move || vm.dto.with(|d| d.status.code())
                            on:change=move |ev| {
                                if let Some(s) = OrderStatus::from_code(&event_target_value(&ev)) {
                                    vm.edit(|d, _| d.status = s);
                                }
                            }
                        >
                            {OrderStatus::ALL
                                .iter()
                                .map(|s| view! { <option value=s.code()>{s.label()}</option> })
                                .collect_view()}
                        </select>
                    </div>
                    <div class="form__group">
                        <label class="form__label">"Entrega"</label>
                        <input
                            type="date"
                            class="form__input form__input--date"
                            prop:value=move || vm.dto.with(|d| d.delivery_date.clone().unwrap_or_default())
                            on:input=move |ev| {
                                let v = opt_text(event_target_value(&ev));
                                vm.edit(|d, _| d.delivery_date = v);
                            }
                        />
                    </div>
                </div>

                <div class="section__header">
                    <h2 class="section__title">"Itens"</h2>
                    <Flex gap=FlexGap::Small>
                        <Button appearance=ButtonAppearance::Secondary on_click=move |_| vm.add_item()>
                            {icon("plus")} " Adicionar item"
                        </Button>
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=move |_| vm.calculate_pending()
                            disabled=Signal::derive(move || vm.dto.with(|d| d.items.is_empty()))
                        >
                            "Calcular pendentes"
                        </Button>
                    </Flex>
                </div>
                <OrderItemsTable vm=vm />

                <div class="order-summary">
                    <div class="order-summary__form">
                        <h2 class="section__title">"Ajustes e pagamento"</h2>
                        <OrderAdjustments vm=vm />
                        <div class="form__group">
                            <label class="form__label">"Observações"</label>
                            <textarea
                                class="form__textarea"
                                rows="3"
                                prop:value=move || vm.dto.with(|d| d.notes.clone())
                                on:input=move |ev| {
                                    let v = event_target_value(&ev);
                                    vm.edit(|d, _| d.notes = v);
                                }
                            ></textarea>
                        </div>
                    </div>
                    <OrderTotals vm=vm />
                </div>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_follows_kind_and_number() {
        let mut dto = OrderDto::default();
        assert_eq!(form_title(&dto), "Novo orçamento");

        dto.kind = OrderKind::Order;
        assert_eq!(form_title(&dto), "Novo pedido");

        dto.id = Some("a1".into());
        dto.number = Some("0042".into());
        assert_eq!(form_title(&dto), "Pedido 0042");

        dto.kind = OrderKind::Quote;
        assert_eq!(form_title(&dto), "Orçamento 0042");
    }
}
