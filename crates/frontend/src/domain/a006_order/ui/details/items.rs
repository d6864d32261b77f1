use super::view_model::OrderFormVm;
use crate::shared::form_utils::{amount_text, parse_amount, parse_count};
use crate::shared::icons::icon;
use crate::shared::number_format::{format_amount, format_money};
use contracts::domain::a006_order::aggregate::{GlassType, OrderItem};
use contracts::domain::a006_order::calculation::PriceComponent;
use leptos::prelude::*;
use thaw::*;

/// Composição do preço para o `title` da célula
pub fn breakdown_text(parts: &[PriceComponent]) -> String {
    parts
        .iter()
        .map(|p| format!("{}: {}", p.label, format_money(p.value)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn measure(value: Option<f64>, unit: &str) -> String {
    value.map_or_else(|| "—".to_string(), |v| format!("{} {}", format_amount(v), unit))
}

#[component]
pub fn OrderItemsTable(vm: OrderFormVm) -> impl IntoView {
    let count = Memo::new(move |_| vm.dto.with(|d| d.items.len()));

    view! {
        <div class="table-container">
            <table class="table__data order-items">
                <thead class="table__head">
                    <tr>
                        <th class="table__header-cell">"#"</th>
                        <th class="table__header-cell">"Descrição"</th>
                        <th class="table__header-cell">"Moldura *"</th>
                        <th class="table__header-cell table__header-cell--numeric">"Largura (cm)"</th>
                        <th class="table__header-cell table__header-cell--numeric">"Altura (cm)"</th>
                        <th class="table__header-cell table__header-cell--numeric">"Qtd."</th>
                        <th class="table__header-cell">"Vidro"</th>
                        <th class="table__header-cell">"Fundo"</th>
                        <th class="table__header-cell">"Passe-partout"</th>
                        <th class="table__header-cell table__header-cell--numeric">"Área"</th>
                        <th class="table__header-cell table__header-cell--numeric">"Perímetro"</th>
                        <th class="table__header-cell table__header-cell--numeric">"Unitário"</th>
                        <th class="table__header-cell table__header-cell--numeric">"Total"</th>
                        <th class="table__header-cell"></th>
                    </tr>
                </thead>
                <tbody>
                    // Linhas por posição: editar um campo não recria a linha
                    <For
                        each=move || 0..count.get()
                        key=|i| *i
                        children=move |i: usize| view! { <ItemRow vm=vm index=i /> }
                    />
                </tbody>
            </table>
            <Show when=move || count.get() == 0>
                <div class="table__empty">"Nenhum item. Adicione a primeira peça."</div>
            </Show>
        </div>
    }
}

#[component]
fn ItemRow(vm: OrderFormVm, index: usize) -> impl IntoView {
    let read = move |f: fn(&OrderItem) -> String| {
        move || vm.dto.with(|d| d.items.get(index).map(f).unwrap_or_default())
    };
    let flag = move |f: fn(&OrderItem) -> bool| {
        move || vm.dto.with(|d| d.items.get(index).is_some_and(f))
    };
    let calculating = Signal::derive(move || vm.calculating.with(|f| f.is_busy(index)));
    let priced = flag(OrderItem::is_priced);

    view! {
        <tr class="table__row" class:order-items__row--unpriced=move || !priced()>
            <td class="table__cell">{index + 1}</td>
            <td class="table__cell">
                <input
                    type="text"
                    class="form__input"
                    prop:value=read(|i| i.description.clone())
                    on:change=move |ev| {
                        let v = event_target_value(&ev);
                        vm.update_item(index, |i| i.description = v);
                    }
                />
            </td>
            <td class="table__cell">
                <input
                    type="text"
                    class="form__input form__input--code"
                    placeholder="MD-000"
                    prop:value=read(|i| i.molding_code.clone())
                    on:change=move |ev| {
                        let v = event_target_value(&ev).trim().to_uppercase();
                        vm.update_item(index, |i| i.molding_code = v);
                    }
                />
            </td>
            <td class="table__cell table__cell--numeric">
                <input
                    type="text"
                    inputmode="decimal"
                    class="form__input form__input--numeric"
                    prop:value=read(|i| amount_text(i.width_cm))
                    on:change=move |ev| {
                        let v = parse_amount(&event_target_value(&ev));
                        vm.update_item(index, |i| i.width_cm = v);
                    }
                />
            </td>
            <td class="table__cell table__cell--numeric">
                <input
                    type="text"
                    inputmode="decimal"
                    class="form__input form__input--numeric"
                    prop:value=read(|i| amount_text(i.height_cm))
                    on:change=move |ev| {
                        let v = parse_amount(&event_target_value(&ev));
                        vm.update_item(index, |i| i.height_cm = v);
                    }
                />
            </td>
            <td class="table__cell table__cell--numeric">
                <input
                    type="number"
                    min="1"
                    class="form__input form__input--numeric"
                    prop:value=read(|i| i.quantity.to_string())
                    on:change=move |ev| {
                        let v = parse_count(&event_target_value(&ev));
                        vm.update_item(index, |i| i.quantity = v);
                    }
                />
            </td>
            <td class="table__cell">
                <select
                    class="form__select"
                    prop:value=read(|i| i.glass.code().to_string())
                    on:change=move |ev| {
                        if let Some(g) = GlassType::from_code(&event_target_value(&ev)) {
                            vm.update_item(index, |i| i.glass = g);
                        }
                    }
                >
                    {GlassType::ALL
                        .iter()
                        .map(|g| view! { <option value=g.code()>{g.label()}</option> })
                        .collect_view()}
                </select>
            </td>
            <td class="table__cell table__cell--checkbox">
                <input
                    type="checkbox"
                    prop:checked=flag(|i| i.backing)
                    on:change=move |ev| {
                        let v = event_target_checked(&ev);
                        vm.update_item(index, |i| i.backing = v);
                    }
                />
            </td>
            <td class="table__cell table__cell--checkbox">
                <input
                    type="checkbox"
                    prop:checked=flag(|i| i.mat)
                    on:change=move |ev| {
                        let v = event_target_checked(&ev);
                        vm.update_item(index, |i| i.mat = v);
                    }
                />
            </td>
            <td class="table__cell table__cell--numeric">{read(|i| measure(i.area_m2(), "m²"))}</td>
            <td class="table__cell table__cell--numeric">{read(|i| measure(i.perimeter_m(), "m"))}</td>
            <td
                class="table__cell table__cell--numeric"
                title=read(|i| breakdown_text(&i.breakdown))
            >
                {read(|i| i.unit_price.map(format_money).unwrap_or_else(|| "—".into()))}
            </td>
            <td class="table__cell table__cell--numeric">
                {read(|i| if i.is_priced() { format_money(i.line_total()) } else { "—".into() })}
            </td>
            <td class="table__cell table__cell--actions">
                <Flex gap=FlexGap::Small>
                    <Button
                        size=ButtonSize::Small
                        appearance=ButtonAppearance::Primary
                        disabled=calculating
                        on_click=move |_| vm.calculate(index)
                    >
                        {move || if calculating.get() { "Calculando…" } else { "Calcular" }}
                    </Button>
                    <Button
                        size=ButtonSize::Small
                        appearance=ButtonAppearance::Subtle
                        on_click=move |_| vm.duplicate_item(index)
                    >
                        {icon("copy")}
                    </Button>
                    <Button
                        size=ButtonSize::Small
                        appearance=ButtonAppearance::Subtle
                        on_click=move |_| vm.remove_item(index)
                    >
                        {icon("trash")}
                    </Button>
                </Flex>
            </td>
        </tr>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakdown_lists_each_component() {
        let parts = vec![
            PriceComponent { label: "Moldura".into(), value: 84.0 },
            PriceComponent { label: "Vidro".into(), value: 21.6 },
        ];
        let text = breakdown_text(&parts);
        assert_eq!(text.lines().count(), 2);
        assert!(text.starts_with("Moldura: "));
        assert_eq!(breakdown_text(&[]), "");
    }

    #[test]
    fn missing_measure_shows_dash() {
        assert_eq!(measure(None, "m²"), "—");
        assert!(measure(Some(0.12), "m²").ends_with(" m²"));
    }
}
