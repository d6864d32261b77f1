pub mod state;
mod status_dialog;

use self::state::create_state;
use self::status_dialog::StatusChangeDialog;
use crate::domain::a002_product_return::api;
use crate::domain::a002_product_return::ui::details::ProductReturnDetails;
use crate::enum_options;
use crate::shared::components::{EnumSelect, PageHeader, SortableHeader};
use crate::shared::date_utils::format_date;
use crate::shared::icons::icon;
use crate::shared::list_utils::{
    cmp_ci, cmp_f64, contains_ci, filter_list, sort_list, Searchable, SortState, Sortable,
};
use crate::shared::modal_stack::{use_modal_stack, ModalSize};
use crate::shared::number_format::format_money;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::shared::toast::use_notifier;
use contracts::domain::a002_product_return::aggregate::{ProductReturn, ReturnStatus};
use contracts::domain::common::AggregateId;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::cmp::Ordering;
use thaw::*;

#[derive(Clone, Debug, PartialEq)]
pub struct ProductReturnRow {
    pub id: String,
    pub code: String,
    pub order_number: String,
    pub customer: String,
    pub reason: String,
    pub status: ReturnStatus,
    pub amount: f64,
    pub request_date: String,
}

impl From<&ProductReturn> for ProductReturnRow {
    fn from(r: &ProductReturn) -> Self {
        Self {
            id: r.base.id.as_string(),
            code: r.base.code.clone(),
            order_number: r.order_number.clone(),
            customer: r.customer.clone(),
            reason: r.reason.label().to_string(),
            status: r.status,
            amount: r.amount,
            request_date: r.request_date.clone(),
        }
    }
}

impl Sortable for ProductReturnRow {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "request_date" => self.request_date.cmp(&other.request_date),
            "order_number" => cmp_ci(&self.order_number, &other.order_number),
            "customer" => cmp_ci(&self.customer, &other.customer),
            "amount" => cmp_f64(self.amount, other.amount),
            "status" => self.status.label().cmp(other.status.label()),
            _ => Ordering::Equal,
        }
    }
}

impl Searchable for ProductReturnRow {
    fn matches_filter(&self, filter: &str) -> bool {
        contains_ci(&self.order_number, filter)
            || contains_ci(&self.customer, filter)
            || contains_ci(&self.code, filter)
    }
}

fn visible_rows(
    items: &[ProductReturn],
    status_filter: &str,
    only_open: bool,
    search: &str,
    sort: &SortState,
) -> Vec<ProductReturnRow> {
    let wanted = ReturnStatus::from_code(status_filter);
    let rows: Vec<ProductReturnRow> = items
        .iter()
        .filter(|r| !r.base.metadata.is_deleted)
        .filter(|r| wanted.map_or(true, |s| r.status == s))
        .filter(|r| !only_open || !r.status.is_final())
        .map(ProductReturnRow::from)
        .collect();
    let mut rows = filter_list(rows, search);
    sort_list(&mut rows, &sort.field, sort.ascending);
    rows
}

/// Texto do botão que leva ao status `next`
pub fn action_label(next: ReturnStatus) -> &'static str {
    match next {
        ReturnStatus::Requested => "Reabrir",
        ReturnStatus::Received => "Receber",
        ReturnStatus::Refunded => "Reembolsar",
        ReturnStatus::Rejected => "Recusar",
    }
}

pub fn status_color(status: ReturnStatus) -> BadgeColor {
    match status {
        ReturnStatus::Requested => BadgeColor::Warning,
        ReturnStatus::Received => BadgeColor::Informative,
        ReturnStatus::Refunded => BadgeColor::Success,
        ReturnStatus::Rejected => BadgeColor::Danger,
    }
}

#[component]
pub fn ProductReturnList() -> impl IntoView {
    let modal_stack = use_modal_stack();
    let notifier = use_notifier();
    let state = create_state();
    let items = RwSignal::new(Vec::<ProductReturn>::new());
    let loading = RwSignal::new(false);

    let fetch = move || {
        loading.set(true);
        spawn_local(async move {
            match api::fetch_all().await {
                Ok(v) => items.set(v),
                Err(e) => notifier.error("Erro ao carregar devoluções", e),
            }
            loading.set(false);
        });
    };

    let rows = Memo::new(move |_| {
        let sort = state.sort.get();
        let status = state.status_filter.get();
        let only_open = state.only_open.get();
        let search = state.search.get();
        items.with(|v| visible_rows(v, &status, only_open, &search, &sort))
    });

    let open_details = move |id: Option<String>| {
        modal_stack.push(ModalSize::Medium, move |handle| {
            view! {
                <ProductReturnDetails
                    id=id.clone()
                    on_saved=move |_| {
                        handle.close();
                        fetch();
                    }
                    on_cancel=move |_| handle.close()
                />
            }
            .into_any()
        });
    };

    let open_transition = move |row: ProductReturnRow, next: ReturnStatus| {
        modal_stack.push(ModalSize::Small, move |handle| {
            view! {
                <StatusChangeDialog
                    id=row.id.clone()
                    customer=row.customer.clone()
                    current=row.status
                    next=next
                    on_done=move |_| {
                        handle.close();
                        fetch();
                    }
                    on_cancel=move |_| handle.close()
                />
            }
            .into_any()
        });
    };

    fetch();

    view! {
        <PageFrame page_id="a002_product_return--list" category=PAGE_CAT_LIST>
            <PageHeader title="Devoluções">
                <Button appearance=ButtonAppearance::Primary on_click=move |_| open_details(None)>
                    {icon("plus")} " Nova devolução"
                </Button>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| fetch()>
                    {icon("refresh")} " Atualizar"
                </Button>
            </PageHeader>

            <div class="page__content">
                <Flex gap=FlexGap::Small class="filter-bar">
                    <Input value=state.search placeholder="Buscar pedido ou cliente" />
                    <EnumSelect
                        options=enum_options!(ReturnStatus)
                        value=state.status_filter
                        allow_empty=true
                    />
                    <Checkbox checked=state.only_open label="Só em aberto" />
                </Flex>

                <Show when=move || loading.get()>
                    <Spinner />
                </Show>

                <div class="table-container">
                    <table class="table__data table--striped">
                        <thead class="table__head">
                            <tr>
                                <SortableHeader label="Solicitação" field="request_date" sort=state.sort />
                                <SortableHeader label="Pedido" field="order_number" sort=state.sort />
                                <SortableHeader label="Cliente" field="customer" sort=state.sort />
                                <th class="table__header-cell">"Motivo"</th>
                                <SortableHeader label="Valor" field="amount" sort=state.sort numeric=true />
                                <SortableHeader label="Status" field="status" sort=state.sort />
                                <th class="table__header-cell">"Ações"</th>
                            </tr>
                        </thead>
                        <tbody>
                            <For
                                each=move || rows.get()
                                key=|row| (row.id.clone(), row.status)
                                children=move |row: ProductReturnRow| {
                                    let id_click = row.id.clone();
                                    let actions = row
                                        .status
                                        .allowed_transitions()
                                        .iter()
                                        .map(|next| {
                                            let next = *next;
                                            let row = row.clone();
                                            view! {
                                                <Button
                                                    size=ButtonSize::Small
                                                    appearance=ButtonAppearance::Subtle
                                                    on_click=move |_| open_transition(row.clone(), next)
                                                >
                                                    {action_label(next)}
                                                </Button>
                                            }
                                        })
                                        .collect_view();
                                    view! {
                                        <tr class="table__row" on:click=move |_| open_details(Some(id_click.clone()))>
                                            <td class="table__cell">{format_date(&row.request_date)}</td>
                                            <td class="table__cell">{row.order_number}</td>
                                            <td class="table__cell">{row.customer}</td>
                                            <td class="table__cell">{row.reason}</td>
                                            <td class="table__cell table__cell--numeric">{format_money(row.amount)}</td>
                                            <td class="table__cell">
                                                <Badge appearance=BadgeAppearance::Tint color=status_color(row.status)>
                                                    {row.status.label()}
                                                </Badge>
                                            </td>
                                            <td class="table__cell" on:click=|e| e.stop_propagation()>
                                                {actions}
                                            </td>
                                        </tr>
                                    }
                                }
                            />
                        </tbody>
                    </table>
                    <Show when=move || !loading.get() && rows.with(|r| r.is_empty())>
                        <div class="table__empty">"Nenhuma devolução encontrada."</div>
                    </Show>
                </div>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a002_product_return::aggregate::{ProductReturnId, ReturnReason};
    use contracts::domain::common::BaseAggregate;

    fn ret(order: &str, status: ReturnStatus, date: &str) -> ProductReturn {
        ProductReturn {
            base: BaseAggregate::new(ProductReturnId::new_v4(), String::new(), String::new()),
            order_number: order.into(),
            customer: "Carla Mendes".into(),
            reason: ReturnReason::Damaged,
            status,
            amount: 80.0,
            request_date: date.into(),
            resolution_notes: None,
        }
    }

    #[test]
    fn only_open_hides_final_statuses() {
        let items = vec![
            ret("PED-1", ReturnStatus::Requested, "2024-04-01"),
            ret("PED-2", ReturnStatus::Refunded, "2024-04-02"),
            ret("PED-3", ReturnStatus::Received, "2024-04-03"),
        ];
        let sort = SortState::new("request_date", false);
        let open = visible_rows(&items, "", true, "", &sort);
        let numbers: Vec<_> = open.iter().map(|r| r.order_number.as_str()).collect();
        assert_eq!(numbers, vec!["PED-3", "PED-1"]);

        let all = visible_rows(&items, "", false, "", &sort);
        assert_eq!(all.len(), 3);

        let refunded = visible_rows(&items, "refunded", false, "", &sort);
        assert_eq!(refunded.len(), 1);
        assert_eq!(refunded[0].order_number, "PED-2");
    }

    #[test]
    fn every_transition_has_a_button_label() {
        for status in ReturnStatus::ALL {
            for next in status.allowed_transitions() {
                assert!(!action_label(*next).is_empty());
            }
        }
        assert_eq!(action_label(ReturnStatus::Rejected), "Recusar");
    }
}
