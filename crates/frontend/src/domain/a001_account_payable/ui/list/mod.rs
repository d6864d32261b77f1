pub mod state;

use self::state::create_state;
use crate::domain::a001_account_payable::api;
use crate::domain::a001_account_payable::ui::details::AccountPayableDetails;
use crate::enum_options;
use crate::shared::components::{
    count_label, CardTone, EnumSelect, PageHeader, SortableHeader, StatCard,
};
use crate::shared::date_utils::{due_label, format_opt_date, today, today_iso};
use crate::shared::icons::icon;
use crate::shared::list_utils::{
    cmp_ci, cmp_f64, contains_ci, filter_list, sort_list, Searchable, SortState, Sortable,
};
use crate::shared::modal_stack::{use_modal_stack, ModalSize};
use crate::shared::number_format::format_money;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::shared::toast::use_notifier;
use chrono::NaiveDate;
use contracts::domain::a001_account_payable::aggregate::{
    AccountPayable, PayRequest, PayableStatus, PayablesSummary,
};
use contracts::domain::common::AggregateId;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::cmp::Ordering;
use thaw::*;

#[derive(Clone, Debug, PartialEq)]
pub struct AccountPayableRow {
    pub id: String,
    pub supplier: String,
    pub category: String,
    pub document_no: String,
    pub installment: String,
    pub amount: f64,
    pub due_date: String,
    pub due: Option<NaiveDate>,
    /// Status já considerando o vencimento
    pub status: PayableStatus,
    pub due_hint: String,
}

impl AccountPayableRow {
    fn from_item(item: &AccountPayable, today: NaiveDate) -> Self {
        let status = item.effective_status(today);
        let due = item.due();
        let due_hint = match (status, due) {
            (PayableStatus::Pending | PayableStatus::Overdue, Some(d)) => due_label(d, today),
            _ => String::new(),
        };
        Self {
            id: item.base.id.as_string(),
            supplier: item.supplier.clone(),
            category: item.category.clone(),
            document_no: item.document_no.clone(),
            installment: item.installment_label(),
            amount: item.amount,
            due_date: item.due_date.clone(),
            due,
            status,
            due_hint,
        }
    }

    fn is_open(&self) -> bool {
        matches!(self.status, PayableStatus::Pending | PayableStatus::Overdue)
    }
}

impl Sortable for AccountPayableRow {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "due_date" => self.due.cmp(&other.due),
            "supplier" => cmp_ci(&self.supplier, &other.supplier),
            "category" => cmp_ci(&self.category, &other.category),
            "amount" => cmp_f64(self.amount, other.amount),
            "status" => self.status.label().cmp(other.status.label()),
            _ => Ordering::Equal,
        }
    }
}

impl Searchable for AccountPayableRow {
    fn matches_filter(&self, filter: &str) -> bool {
        contains_ci(&self.supplier, filter)
            || contains_ci(&self.category, filter)
            || contains_ci(&self.document_no, filter)
    }
}

/// Linhas visíveis: filtro de status, busca e ordenação
fn visible_rows(
    items: &[AccountPayable],
    today: NaiveDate,
    status_filter: &str,
    search: &str,
    sort: &SortState,
) -> Vec<AccountPayableRow> {
    let rows: Vec<AccountPayableRow> = items
        .iter()
        .filter(|i| !i.base.metadata.is_deleted)
        .map(|i| AccountPayableRow::from_item(i, today))
        .filter(|r| match PayableStatus::from_code(status_filter) {
            Some(wanted) => r.status == wanted,
            None => r.status != PayableStatus::Cancelled,
        })
        .collect();
    let mut rows = filter_list(rows, search);
    sort_list(&mut rows, &sort.field, sort.ascending);
    rows
}

fn status_color(status: PayableStatus) -> BadgeColor {
    match status {
        PayableStatus::Pending => BadgeColor::Informative,
        PayableStatus::Overdue => BadgeColor::Danger,
        PayableStatus::Paid => BadgeColor::Success,
        PayableStatus::Cancelled => BadgeColor::Subtle,
    }
}

#[component]
pub fn AccountPayableList() -> impl IntoView {
    let modal_stack = use_modal_stack();
    let notifier = use_notifier();
    let state = create_state();
    let items = RwSignal::new(Vec::<AccountPayable>::new());
    let loading = RwSignal::new(false);

    let fetch = move || {
        loading.set(true);
        spawn_local(async move {
            match api::fetch_all().await {
                Ok(v) => items.set(v),
                Err(e) => notifier.error("Erro ao carregar contas a pagar", e),
            }
            loading.set(false);
        });
    };

    let summary = Memo::new(move |_| items.with(|v| PayablesSummary::from_items(v, today())));

    let rows = Memo::new(move |_| {
        let sort = state.sort.get();
        let status = state.status_filter.get();
        let search = state.search.get();
        items.with(|v| visible_rows(v, today(), &status, &search, &sort))
    });

    let open_details = move |id: Option<String>| {
        modal_stack.push(ModalSize::Medium, move |handle| {
            view! {
                <AccountPayableDetails
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

    let mark_paid = move |id: String, supplier: String| {
        let confirmed = web_sys::window()
            .and_then(|w| {
                w.confirm_with_message(&format!("Marcar a conta de {} como paga hoje?", supplier))
                    .ok()
            })
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        let request = PayRequest {
            paid_at: today_iso(),
            payment_method: None,
        };
        spawn_local(async move {
            match api::mark_paid(&id, &request).await {
                Ok(()) => {
                    notifier.success("Conta marcada como paga");
                    fetch();
                }
                Err(e) => notifier.error("Erro ao registrar pagamento", e),
            }
        });
    };

    fetch();

    view! {
        <PageFrame page_id="a001_account_payable--list" category=PAGE_CAT_LIST>
            <PageHeader title="Contas a pagar">
                <Button appearance=ButtonAppearance::Primary on_click=move |_| open_details(None)>
                    {icon("plus")} " Nova conta"
                </Button>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| fetch()>
                    {icon("refresh")} " Atualizar"
                </Button>
            </PageHeader>

            <div class="page__content">
                <div class="stat-cards">
                    <StatCard
                        label="Vencidas"
                        icon_name="payables"
                        amount=Signal::derive(move || summary.get().overdue_total)
                        subtitle=Signal::derive(move || count_label(summary.get().overdue_count, "conta", "contas"))
                        tone=CardTone::Error
                    />
                    <StatCard
                        label="Vencem em 7 dias"
                        icon_name="payables"
                        amount=Signal::derive(move || summary.get().due_soon_total)
                        subtitle=Signal::derive(move || count_label(summary.get().due_soon_count, "conta", "contas"))
                        tone=CardTone::Warning
                    />
                    <StatCard
                        label="A vencer"
                        icon_name="payables"
                        amount=Signal::derive(move || summary.get().pending_total)
                        subtitle=Signal::derive(move || count_label(summary.get().pending_count, "conta", "contas"))
                        tone=CardTone::Neutral
                    />
                    <StatCard
                        label="Pagas no mês"
                        icon_name="payables"
                        amount=Signal::derive(move || summary.get().paid_this_month_total)
                        subtitle=Signal::derive(move || count_label(summary.get().paid_this_month_count, "conta", "contas"))
                        tone=CardTone::Success
                    />
                </div>

                <Flex gap=FlexGap::Small class="filter-bar">
                    <Input value=state.search placeholder="Buscar fornecedor, categoria, documento" />
                    <EnumSelect
                        options=enum_options!(PayableStatus)
                        value=state.status_filter
                        allow_empty=true
                    />
                </Flex>

                <Show when=move || loading.get()>
                    <Spinner />
                </Show>

                <div class="table-container">
                    <table class="table__data table--striped">
                        <thead class="table__head">
                            <tr>
                                <SortableHeader label="Vencimento" field="due_date" sort=state.sort />
                                <SortableHeader label="Fornecedor" field="supplier" sort=state.sort />
                                <SortableHeader label="Categoria" field="category" sort=state.sort />
                                <th class="table__header-cell">"Documento"</th>
                                <th class="table__header-cell">"Parcela"</th>
                                <SortableHeader label="Valor" field="amount" sort=state.sort numeric=true />
                                <SortableHeader label="Status" field="status" sort=state.sort />
                                <th class="table__header-cell"></th>
                            </tr>
                        </thead>
                        <tbody>
                            <For
                                each=move || rows.get()
                                key=|row| (row.id.clone(), row.status, row.amount.to_bits())
                                children=move |row: AccountPayableRow| {
                                    let id_click = row.id.clone();
                                    let id_pay = row.id.clone();
                                    let supplier = row.supplier.clone();
                                    let is_open = row.is_open();
                                    view! {
                                        <tr class="table__row" on:click=move |_| open_details(Some(id_click.clone()))>
                                            <td class="table__cell">
                                                {format_opt_date(Some(row.due_date.as_str()))}
                                                <div class="table__cell-hint">{row.due_hint}</div>
                                            </td>
                                            <td class="table__cell">{row.supplier}</td>
                                            <td class="table__cell">{row.category}</td>
                                            <td class="table__cell">{row.document_no}</td>
                                            <td class="table__cell">{row.installment}</td>
                                            <td class="table__cell table__cell--numeric">{format_money(row.amount)}</td>
                                            <td class="table__cell">
                                                <Badge appearance=BadgeAppearance::Tint color=status_color(row.status)>
                                                    {row.status.label()}
                                                </Badge>
                                            </td>
                                            <td class="table__cell" on:click=|e| e.stop_propagation()>
                                                {is_open.then(|| view! {
                                                    <Button
                                                        size=ButtonSize::Small
                                                        appearance=ButtonAppearance::Subtle
                                                        on_click=move |_| mark_paid(id_pay.clone(), supplier.clone())
                                                    >
                                                        "Pagar"
                                                    </Button>
                                                })}
                                            </td>
                                        </tr>
                                    }
                                }
                            />
                        </tbody>
                    </table>
                    <Show when=move || !loading.get() && rows.with(|r| r.is_empty())>
                        <div class="table__empty">"Nenhuma conta encontrada."</div>
                    </Show>
                </div>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_account_payable::aggregate::AccountPayableId;
    use contracts::domain::common::BaseAggregate;

    fn payable(supplier: &str, amount: f64, due: &str, status: PayableStatus) -> AccountPayable {
        AccountPayable {
            base: BaseAggregate::new(AccountPayableId::new_v4(), String::new(), String::new()),
            supplier: supplier.into(),
            category: "Matéria-prima".into(),
            document_no: String::new(),
            amount,
            due_date: due.into(),
            paid_at: None,
            status,
            payment_method: None,
            installment_no: 1,
            installment_total: 1,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 10).unwrap()
    }

    #[test]
    fn overdue_rows_get_a_hint_and_cancelled_are_hidden() {
        let items = vec![
            payable("Vidraçaria Sol", 300.0, "2024-05-08", PayableStatus::Pending),
            payable("Madeireira Sul", 120.0, "2024-05-12", PayableStatus::Pending),
            payable("Aluguel", 2000.0, "2024-05-01", PayableStatus::Cancelled),
        ];
        let rows = visible_rows(&items, today(), "", "", &SortState::new("due_date", true));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].status, PayableStatus::Overdue);
        assert_eq!(rows[0].due_hint, "venceu há 2 dias");
        assert_eq!(rows[1].due_hint, "vence em 2 dias");
    }

    #[test]
    fn filters_by_effective_status_and_search() {
        let items = vec![
            payable("Vidraçaria Sol", 300.0, "2024-05-08", PayableStatus::Pending),
            payable("Madeireira Sul", 120.0, "2024-05-12", PayableStatus::Pending),
        ];
        let sort = SortState::new("amount", false);
        let overdue = visible_rows(&items, today(), "overdue", "", &sort);
        assert_eq!(overdue.len(), 1);
        assert_eq!(overdue[0].supplier, "Vidraçaria Sol");

        let found = visible_rows(&items, today(), "", "madeir", &sort);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].amount, 120.0);
    }
}
