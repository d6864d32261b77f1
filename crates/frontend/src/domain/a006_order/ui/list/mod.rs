use crate::domain::a006_order::api;
use crate::enum_options;
use crate::layout::global_context::use_app_context;
use crate::layout::tabs::tab_labels::{order_detail_key, pick_identifier};
use crate::shared::components::{
    count_label, EnumSelect, PageHeader, SortableHeader, TableCheckbox, TableHeaderCheckbox,
};
use crate::shared::date_utils::format_opt_date;
use crate::shared::icons::icon;
use crate::shared::list_utils::{
    cmp_ci, cmp_f64, contains_ci, filter_list, sort_list, Searchable, SortState, Sortable,
};
use crate::shared::number_format::format_money;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::shared::toast::use_notifier;
use chrono::{DateTime, Utc};
use contracts::domain::a006_order::aggregate::{Order, OrderKind, OrderStatus};
use contracts::domain::common::AggregateId;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::cmp::Ordering;
use std::collections::HashSet;
use thaw::*;

const LIST_TAB_KEY: &str = "a006_order";

#[derive(Clone, Debug, PartialEq)]
pub struct OrderRow {
    pub id: String,
    pub number: String,
    pub customer: String,
    pub kind: OrderKind,
    pub status: OrderStatus,
    pub pieces: u32,
    pub total: f64,
    pub delivery_date: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&Order> for OrderRow {
    fn from(o: &Order) -> Self {
        Self {
            id: o.base.id.as_string(),
            number: o.number.clone(),
            customer: o.customer.clone(),
            kind: o.kind,
            status: o.status,
            pieces: o.item_count(),
            total: o.total(),
            delivery_date: o.delivery_date.clone(),
            created_at: o.base.metadata.created_at,
        }
    }
}

/// Números de pedido são sequenciais: "9" vem antes de "10".
/// Se algum lado não for numérico, compara como texto.
fn cmp_order_number(a: &str, b: &str) -> Ordering {
    match (a.trim().parse::<u64>(), b.trim().parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        _ => a.cmp(b),
    }
}

impl Sortable for OrderRow {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "number" => cmp_order_number(&self.number, &other.number),
            "customer" => cmp_ci(&self.customer, &other.customer),
            "total" => cmp_f64(self.total, other.total),
            "delivery_date" => self.delivery_date.cmp(&other.delivery_date),
            "created_at" => self.created_at.cmp(&other.created_at),
            _ => Ordering::Equal,
        }
    }
}

impl Searchable for OrderRow {
    fn matches_filter(&self, filter: &str) -> bool {
        contains_ci(&self.number, filter) || contains_ci(&self.customer, filter)
    }
}

fn visible_rows(
    items: &[Order],
    kind_filter: &str,
    status_filter: &str,
    search: &str,
    sort: &SortState,
) -> Vec<OrderRow> {
    let kind = OrderKind::from_code(kind_filter);
    let status = OrderStatus::from_code(status_filter);
    let rows: Vec<OrderRow> = items
        .iter()
        .filter(|o| !o.base.metadata.is_deleted)
        .filter(|o| kind.map_or(true, |k| o.kind == k))
        .filter(|o| status.map_or(true, |s| o.status == s))
        .map(OrderRow::from)
        .collect();
    let mut rows = filter_list(rows, search);
    sort_list(&mut rows, &sort.field, sort.ascending);
    rows
}

/// Seleção depois de uma recarga: só ids que ainda existem
fn prune_selection(selected: &mut HashSet<String>, items: &[Order]) {
    let alive: HashSet<String> = items.iter().map(|o| o.base.id.as_string()).collect();
    selected.retain(|id| alive.contains(id));
}

/// Rótulo da exclusão em lote; sem seleção o botão some
fn batch_delete_label(selected: usize) -> Option<String> {
    (selected > 0).then(|| format!(" Excluir ({})", selected))
}

pub fn status_color(status: OrderStatus) -> BadgeColor {
    match status {
        OrderStatus::Open => BadgeColor::Informative,
        OrderStatus::Approved => BadgeColor::Brand,
        OrderStatus::InProduction => BadgeColor::Warning,
        OrderStatus::Ready => BadgeColor::Success,
        OrderStatus::Delivered => BadgeColor::Subtle,
        OrderStatus::Cancelled => BadgeColor::Danger,
    }
}

#[component]
pub fn OrderList() -> impl IntoView {
    let notifier = use_notifier();
    let tabs = use_app_context();
    let items = RwSignal::new(Vec::<Order>::new());
    let loading = RwSignal::new(false);
    let deleting = RwSignal::new(false);
    let sort = RwSignal::new(SortState::new("created_at", false));
    let kind_filter = RwSignal::new(String::new());
    let status_filter = RwSignal::new(String::new());
    let search = RwSignal::new(String::new());
    let selected = RwSignal::new(HashSet::<String>::new());

    let fetch = move || {
        loading.set(true);
        spawn_local(async move {
            match api::fetch_all().await {
                Ok(v) => {
                    selected.update(|s| prune_selection(s, &v));
                    items.set(v);
                }
                Err(e) => notifier.error("Erro ao carregar pedidos", e),
            }
            loading.set(false);
        });
    };

    let rows = Memo::new(move |_| {
        let sort = sort.get();
        let kind = kind_filter.get();
        let status = status_filter.get();
        let search = search.get();
        items.with(|v| visible_rows(v, &kind, &status, &search, &sort))
    });
    let visible_ids = Signal::derive(move || rows.with(|r| r.iter().map(|row| row.id.clone()).collect()));
    let delete_label = Memo::new(move |_| selected.with(|s| batch_delete_label(s.len())));

    let open_order = move |id: Option<String>, title: String| {
        tabs.open_tab(&order_detail_key(id.as_deref()), &title);
    };

    let delete_selected = move || {
        let ids: Vec<String> = selected.get_untracked().into_iter().collect();
        if ids.is_empty() {
            return;
        }
        let question = format!("Excluir {}? Não dá para desfazer.", count_label(ids.len(), "registro", "registros"));
        let confirmed = web_sys::window()
            .and_then(|w| w.confirm_with_message(&question).ok())
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        deleting.set(true);
        spawn_local(async move {
            let outcome = api::delete_many(ids).await;
            let summary = outcome.summary("excluído(s)");
            if outcome.all_ok() {
                notifier.success(summary);
            } else {
                notifier.warning(summary);
            }
            selected.update(|s| {
                for id in &outcome.succeeded {
                    s.remove(id);
                }
            });
            deleting.set(false);
            fetch();
        });
    };

    // Recarrega quando a aba volta a ficar ativa (um formulário pode ter salvo)
    Effect::new(move |was_active: Option<bool>| {
        let active = tabs.active.with(|a| a.as_deref() == Some(LIST_TAB_KEY));
        if active && was_active == Some(false) {
            fetch();
        }
        active
    });

    fetch();

    view! {
        <PageFrame page_id="a006_order--list" category=PAGE_CAT_LIST>
            <PageHeader
                title="Pedidos e orçamentos"
                subtitle=Signal::derive(move || count_label(rows.with(Vec::len), "registro", "registros"))
            >
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| open_order(None, "Novo pedido".to_string())
                >
                    {icon("plus")} " Novo"
                </Button>
                <Show when=move || { delete_label.with(Option::is_some) }>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| delete_selected()
                        disabled=Signal::derive(move || deleting.get())
                    >
                        {icon("trash")}
                        {move || delete_label.get().unwrap_or_default()}
                    </Button>
                </Show>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| fetch()>
                    {icon("refresh")} " Atualizar"
                </Button>
            </PageHeader>

            <div class="page__content">
                <Flex gap=FlexGap::Small class="filter-bar">
                    <Input value=search placeholder="Número ou cliente" />
                    <EnumSelect options=enum_options!(OrderKind) value=kind_filter allow_empty=true />
                    <EnumSelect options=enum_options!(OrderStatus) value=status_filter allow_empty=true />
                </Flex>

                <Show when=move || loading.get()>
                    <Spinner />
                </Show>

                <div class="table-container">
                    <table class="table__data table--striped">
                        <thead class="table__head">
                            <tr>
                                <TableHeaderCheckbox visible_ids=visible_ids selected=selected />
                                <SortableHeader label="Número" field="number" sort=sort />
                                <SortableHeader label="Cliente" field="customer" sort=sort />
                                <th class="table__header-cell">"Tipo"</th>
                                <th class="table__header-cell">"Situação"</th>
                                <th class="table__header-cell table__header-cell--numeric">"Peças"</th>
                                <SortableHeader label="Total" field="total" sort=sort numeric=true />
                                <SortableHeader label="Entrega" field="delivery_date" sort=sort />
                            </tr>
                        </thead>
                        <tbody>
                            <For
                                each=move || rows.get()
                                key=|row| (row.id.clone(), row.status, row.total.to_bits(), row.customer.clone())
                                children=move |row: OrderRow| {
                                    let id = row.id.clone();
                                    let check_id = row.id.clone();
                                    let toggle_id = row.id.clone();
                                    let title = pick_identifier(Some(&row.number), &row.customer);
                                    view! {
                                        <tr
                                            class="table__row"
                                            on:click=move |_| open_order(Some(id.clone()), title.clone())
                                        >
                                            <TableCheckbox
                                                checked=Signal::derive(move || selected.with(|s| s.contains(&check_id)))
                                                on_change=Callback::new(move |on: bool| {
                                                    let id = toggle_id.clone();
                                                    selected.update(|s| {
                                                        if on {
                                                            s.insert(id);
                                                        } else {
                                                            s.remove(&id);
                                                        }
                                                    });
                                                })
                                            />
                                            <td class="table__cell">{row.number}</td>
                                            <td class="table__cell">{row.customer}</td>
                                            <td class="table__cell">{row.kind.label()}</td>
                                            <td class="table__cell">
                                                <Badge appearance=BadgeAppearance::Tint color=status_color(row.status)>
                                                    {row.status.label()}
                                                </Badge>
                                            </td>
                                            <td class="table__cell table__cell--numeric">{row.pieces}</td>
                                            <td class="table__cell table__cell--numeric">{format_money(row.total)}</td>
                                            <td class="table__cell">{format_opt_date(row.delivery_date.as_deref())}</td>
                                        </tr>
                                    }
                                }
                            />
                        </tbody>
                    </table>
                    <Show when=move || !loading.get() && rows.with(|r| r.is_empty())>
                        <div class="table__empty">"Nenhum pedido encontrado."</div>
                    </Show>
                </div>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a006_order::aggregate::{OrderId, OrderItem};
    use contracts::domain::a006_order::pricing::OrderPricing;
    use contracts::domain::common::BaseAggregate;

    fn order(number: &str, customer: &str, kind: OrderKind, status: OrderStatus, total: f64) -> Order {
        let mut base = BaseAggregate::new(OrderId::new_v4(), String::new(), String::new());
        base.metadata.created_at = format!("2024-05-{:0>2}T12:00:00Z", number).parse().unwrap();
        Order {
            base,
            number: number.into(),
            customer: customer.into(),
            customer_phone: None,
            kind,
            status,
            items: vec![OrderItem { quantity: 2, ..Default::default() }],
            pricing: OrderPricing { total, ..Default::default() },
            delivery_date: None,
            notes: String::new(),
        }
    }

    fn sample() -> Vec<Order> {
        vec![
            order("10", "Galeria Sol", OrderKind::Order, OrderStatus::InProduction, 980.0),
            order("11", "Ana Lima", OrderKind::Quote, OrderStatus::Open, 150.0),
            order("12", "Bruno Dias", OrderKind::Quote, OrderStatus::Cancelled, 60.0),
        ]
    }

    #[test]
    fn newest_first_by_default() {
        let rows = visible_rows(&sample(), "", "", "", &SortState::new("created_at", false));
        let numbers: Vec<_> = rows.iter().map(|r| r.number.as_str()).collect();
        assert_eq!(numbers, vec!["12", "11", "10"]);
        assert_eq!(rows[2].pieces, 2);
    }

    #[test]
    fn order_numbers_sort_numerically() {
        let mut items = sample();
        items.push(order("9", "Carla Reis", OrderKind::Order, OrderStatus::Ready, 75.0));
        let rows = visible_rows(&items, "", "", "", &SortState::new("number", true));
        let numbers: Vec<_> = rows.iter().map(|r| r.number.as_str()).collect();
        assert_eq!(numbers, vec!["9", "10", "11", "12"]);

        assert_eq!(cmp_order_number("0042", "42"), Ordering::Less);
        assert_eq!(cmp_order_number("A-1", "10"), Ordering::Greater);
    }

    #[test]
    fn filters_by_kind_status_and_text() {
        let items = sample();
        let sort = SortState::new("number", true);
        assert_eq!(visible_rows(&items, "quote", "", "", &sort).len(), 2);
        assert_eq!(visible_rows(&items, "quote", "open", "", &sort).len(), 1);
        let found = visible_rows(&items, "", "", "galeria", &sort);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].customer, "Galeria Sol");
    }

    #[test]
    fn batch_delete_shows_only_with_selection() {
        assert_eq!(batch_delete_label(0), None);
        assert_eq!(batch_delete_label(3).as_deref(), Some(" Excluir (3)"));
    }

    #[test]
    fn selection_drops_ids_that_disappeared() {
        let items = sample();
        let kept = items[0].base.id.as_string();
        let mut selected: HashSet<String> = [kept.clone(), "gone".to_string()].into_iter().collect();
        prune_selection(&mut selected, &items);
        assert_eq!(selected, [kept].into_iter().collect());
    }
}
