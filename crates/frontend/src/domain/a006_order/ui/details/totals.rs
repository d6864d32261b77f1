//! Ajustes, pagamento e totais do pedido

use super::view_model::{installment_options, OrderFormVm};
use crate::shared::form_utils::{amount_text, parse_amount, parse_count};
use crate::shared::number_format::{format_money, format_percent};
use contracts::domain::a006_order::pricing::OrderPricing;
use contracts::enums::PaymentMethod;
use contracts::shared::money::percent_of_value;
use leptos::prelude::*;

/// "3x de R$ 40,00"; à vista não tem legenda
pub fn installments_label(pricing: &OrderPricing) -> Option<String> {
    (pricing.installments > 1).then(|| {
        format!("{}x de {}", pricing.installments, format_money(pricing.installment_value))
    })
}

/// Linha da taxa da maquininha; `None` quando a forma não cobra taxa
pub fn fee_caption(pricing: &OrderPricing) -> Option<String> {
    (pricing.fee_rate > 0.0).then(|| {
        let who = if pricing.pass_fee_to_customer { "repassada ao cliente" } else { "absorvida pela loja" };
        format!("Taxa {} ({})", format_percent(pricing.fee_rate), who)
    })
}

/// Campo de valor que grava só ao sair (change), para não reformatar
/// enquanto o usuário digita
#[component]
fn AmountField(
    #[prop(into)] value: Signal<f64>,
    #[prop(into)] on_commit: Callback<f64>,
    #[prop(optional)] suffix: &'static str,
) -> impl IntoView {
    view! {
        <span class="amount-field">
            <input
                type="text"
                inputmode="decimal"
                class="form__input form__input--numeric"
                placeholder="0"
                prop:value=move || amount_text(value.get())
                on:change=move |ev| on_commit.run(parse_amount(&event_target_value(&ev)))
            />
            {(!suffix.is_empty()).then(|| view! { <span class="amount-field__suffix">{suffix}</span> })}
        </span>
    }
}

#[component]
pub fn OrderAdjustments(vm: OrderFormVm) -> impl IntoView {
    let pricing = Memo::new(move |_| vm.dto.with(|d| d.pricing.clone()));
    let fees = vm.fees();
    let method = Signal::derive(move || pricing.with(|p| p.payment_method));

    let down_payment_percent =
        Signal::derive(move || pricing.with(|p| percent_of_value(p.total, p.down_payment)));

    view! {
        <div class="details-grid--2col order-adjustments">
            <div class="form__group">
                <label class="form__label">"Desconto"</label>
                <div class="form__inline">
                    <AmountField
                        value=Signal::derive(move || pricing.with(|p| p.discount.percent))
                        on_commit=move |v| vm.edit(|d, f| d.set_discount_percent(v, f))
                        suffix="%"
                    />
                    <AmountField
                        value=Signal::derive(move || pricing.with(|p| p.discount.value))
                        on_commit=move |v| vm.edit(|d, f| d.set_discount_value(v, f))
                        suffix="R$"
                    />
                </div>
            </div>
            <div class="form__group">
                <label class="form__label">"Acréscimo"</label>
                <div class="form__inline">
                    <AmountField
                        value=Signal::derive(move || pricing.with(|p| p.surcharge.percent))
                        on_commit=move |v| vm.edit(|d, f| d.set_surcharge_percent(v, f))
                        suffix="%"
                    />
                    <AmountField
                        value=Signal::derive(move || pricing.with(|p| p.surcharge.value))
                        on_commit=move |v| vm.edit(|d, f| d.set_surcharge_value(v, f))
                        suffix="R$"
                    />
                </div>
            </div>

            <div class="form__group">
                <label class="form__label">"Forma de pagamento"</label>
                <div class="form__inline">
                    <select
                        class="form__select"
                        prop:value=move || method.get().code()
                        on:change=move |ev| {
                            if let Some(m) = PaymentMethod::from_code(&event_target_value(&ev)) {
                                let n = if m.allows_installments() {
                                    vm.dto.with_untracked(|d| d.pricing.installments)
                                } else {
                                    1
                                };
                                vm.edit(|d, f| d.set_payment(m, n, f));
                            }
                        }
                    >
                        {PaymentMethod::ALL
                            .iter()
                            .map(|m| view! { <option value=m.code()>{m.label()}</option> })
                            .collect_view()}
                    </select>
                    <select
                        class="form__select form__select--narrow"
                        disabled=move || !method.get().allows_installments()
                        prop:value=move || pricing.with(|p| p.installments.to_string())
                        on:change=move |ev| {
                            let n = parse_count(&event_target_value(&ev)).max(1);
                            let m = method.get_untracked();
                            vm.edit(|d, f| d.set_payment(m, n, f));
                        }
                    >
                        {move || {
                            installment_options(method.get(), &fees)
                                .into_iter()
                                .map(|n| view! { <option value=n.to_string()>{format!("{}x", n)}</option> })
                                .collect_view()
                        }}
                    </select>
                </div>
                <Show when=move || method.get().is_card()>
                    <label class="form__checkbox">
                        <input
                            type="checkbox"
                            prop:checked=move || pricing.with(|p| p.pass_fee_to_customer)
                            on:change=move |ev| {
                                let pass = event_target_checked(&ev);
                                vm.edit(|d, f| d.set_pass_fee_to_customer(pass, f));
                            }
                        />
                        " Repassar a taxa ao cliente"
                    </label>
                </Show>
            </div>

            <div class="form__group">
                <label class="form__label">"Sinal"</label>
                <div class="form__inline">
                    <AmountField
                        value=Signal::derive(move || pricing.with(|p| p.down_payment))
                        on_commit=move |v| vm.edit(|d, f| d.set_down_payment(v, f))
                        suffix="R$"
                    />
                    <AmountField
                        value=down_payment_percent
                        on_commit=move |v| vm.edit(|d, f| d.set_down_payment_percent(v, f))
                        suffix="% do total"
                    />
                </div>
            </div>
        </div>
    }
}

fn totals_line(label: &'static str, value: Signal<String>, modifier: &'static str) -> impl IntoView {
    view! {
        <div class=format!("totals__line {}", modifier)>
            <span class="totals__label">{label}</span>
            <span class="totals__value">{move || value.get()}</span>
        </div>
    }
}

#[component]
pub fn OrderTotals(vm: OrderFormVm) -> impl IntoView {
    let pricing = Memo::new(move |_| vm.dto.with(|d| d.pricing.clone()));
    let money = move |f: fn(&OrderPricing) -> f64| Signal::derive(move || pricing.with(|p| format_money(f(p))));

    view! {
        <div class="totals">
            {totals_line("Subtotal dos itens", money(|p| p.items_subtotal), "")}
            <Show when=move || pricing.with(|p| !p.discount.is_zero())>
                {totals_line("Desconto", money(|p| -p.discount.value), "totals__line--discount")}
            </Show>
            <Show when=move || pricing.with(|p| !p.surcharge.is_zero())>
                {totals_line("Acréscimo", money(|p| p.surcharge.value), "")}
            </Show>
            {move || pricing.with(fee_caption).map(|caption| view! {
                <div class="totals__line totals__line--fee">
                    <span class="totals__label">{caption}</span>
                    <span class="totals__value">{move || pricing.with(|p| format_money(p.fee_value))}</span>
                </div>
            })}
            {totals_line("Total", money(|p| p.total), "totals__line--grand")}
            {move || pricing.with(installments_label).map(|l| view! { <div class="totals__hint">{l}</div> })}
            <Show when=move || pricing.with(|p| p.fee_value > 0.0)>
                {totals_line("Líquido recebido", money(|p| p.net_received), "totals__line--muted")}
            </Show>
            <Show when=move || pricing.with(|p| p.down_payment > 0.0)>
                {totals_line("Sinal", money(|p| p.down_payment), "")}
                {totals_line("Saldo na entrega", money(|p| p.balance), "totals__line--balance")}
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn installments_label_only_when_split() {
        let mut p = OrderPricing::default();
        assert_eq!(installments_label(&p), None);
        p.installments = 3;
        p.installment_value = 40.0;
        let label = installments_label(&p).unwrap();
        assert!(label.starts_with("3x de "));
    }

    #[test]
    fn fee_caption_says_who_pays() {
        let mut p = OrderPricing::default();
        assert_eq!(fee_caption(&p), None);
        p.fee_rate = 3.49;
        assert!(fee_caption(&p).unwrap().ends_with("(absorvida pela loja)"));
        p.pass_fee_to_customer = true;
        assert!(fee_caption(&p).unwrap().contains("repassada"));
    }
}
