use crate::domain::a005_membership::api;
use crate::domain::a005_membership::ui::details::MembershipDetails;
use crate::enum_options;
use crate::layout::global_context::use_app_context;
use crate::layout::tabs::tab_labels::MEMBERSHIP_REPORT_KEY;
use crate::layout::tabs::tab_label_for_key;
use crate::shared::components::{EnumSelect, PageHeader, SortableHeader};
use crate::shared::date_utils::{format_date, format_opt_date, today};
use crate::shared::icons::icon;
use crate::shared::list_utils::{
    cmp_ci, cmp_f64, contains_ci, filter_list, sort_list, Searchable, SortState, Sortable,
};
use crate::shared::modal_stack::{use_modal_stack, ModalSize};
use crate::shared::number_format::format_money;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::shared::toast::use_notifier;
use contracts::domain::a005_membership::aggregate::{Membership, MembershipPlan, MembershipStatus};
use chrono::NaiveDate;
use contracts::domain::common::AggregateId;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::cmp::Ordering;
use thaw::*;

#[derive(Clone, Debug, PartialEq)]
pub struct MembershipRow {
    pub id: String,
    pub member_name: String,
    pub contact: String,
    pub plan: MembershipPlan,
    pub fee: f64,
    pub monthly: f64,
    pub start_date: String,
    pub renewal: Option<String>,
    pub status: MembershipStatus,
}

impl MembershipRow {
    /// Linha da lista; a renovação mostrada é a próxima a partir de `today`
    fn from_member(m: &Membership, today: NaiveDate) -> Self {
        let contact = m
            .email
            .clone()
            .or_else(|| m.phone.clone())
            .unwrap_or_default();
        Self {
            id: m.base.id.as_string(),
            member_name: m.member_name.clone(),
            contact,
            plan: m.plan,
            fee: m.fee,
            monthly: m.monthly_equivalent(),
            start_date: m.start_date.clone(),
            renewal: m.next_renewal(today).map(|d| d.format("%Y-%m-%d").to_string()),
            status: m.status,
        }
    }
}

impl Sortable for MembershipRow {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "member_name" => cmp_ci(&self.member_name, &other.member_name),
            "plan" => self.plan.months().cmp(&other.plan.months()),
            "monthly" => cmp_f64(self.monthly, other.monthly),
            "start_date" => self.start_date.cmp(&other.start_date),
            "renewal" => self.renewal.cmp(&other.renewal),
            _ => Ordering::Equal,
        }
    }
}

impl Searchable for MembershipRow {
    fn matches_filter(&self, filter: &str) -> bool {
        contains_ci(&self.member_name, filter) || contains_ci(&self.contact, filter)
    }
}

fn visible_rows(
    items: &[Membership],
    status_filter: &str,
    search: &str,
    sort: &SortState,
    today: NaiveDate,
) -> Vec<MembershipRow> {
    let wanted = MembershipStatus::from_code(status_filter);
    let rows: Vec<MembershipRow> = items
        .iter()
        .filter(|m| !m.base.metadata.is_deleted)
        .filter(|m| wanted.map_or(true, |s| m.status == s))
        .map(|m| MembershipRow::from_member(m, today))
        .collect();
    let mut rows = filter_list(rows, search);
    sort_list(&mut rows, &sort.field, sort.ascending);
    rows
}

pub fn status_color(status: MembershipStatus) -> BadgeColor {
    match status {
        MembershipStatus::Active => BadgeColor::Success,
        MembershipStatus::Suspended => BadgeColor::Warning,
        MembershipStatus::Cancelled => BadgeColor::Subtle,
    }
}

#[component]
pub fn MembershipList() -> impl IntoView {
    let modal_stack = use_modal_stack();
    let notifier = use_notifier();
    let tabs = use_app_context();
    let items = RwSignal::new(Vec::<Membership>::new());
    let loading = RwSignal::new(false);
    let sort = RwSignal::new(SortState::new("member_name", true));
    let status_filter = RwSignal::new(MembershipStatus::Active.code().to_string());
    let search = RwSignal::new(String::new());

    let fetch = move || {
        loading.set(true);
        spawn_local(async move {
            match api::fetch_all().await {
                Ok(v) => items.set(v),
                Err(e) => notifier.error("Erro ao carregar associados", e),
            }
            loading.set(false);
        });
    };

    let rows = Memo::new(move |_| {
        let sort = sort.get();
        let status = status_filter.get();
        let search = search.get();
        items.with(|v| visible_rows(v, &status, &search, &sort, today()))
    });

    let open_details = move |id: Option<String>| {
        modal_stack.push(ModalSize::Medium, move |handle| {
            view! {
                <MembershipDetails
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

    fetch();

    view! {
        <PageFrame page_id="a005_membership--list" category=PAGE_CAT_LIST>
            <PageHeader title="Associados">
                <Button appearance=ButtonAppearance::Primary on_click=move |_| open_details(None)>
                    {icon("plus")} " Novo associado"
                </Button>
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| {
                        tabs.open_tab(MEMBERSHIP_REPORT_KEY, &tab_label_for_key(MEMBERSHIP_REPORT_KEY))
                    }
                >
                    {icon("report")} " Relatório"
                </Button>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| fetch()>
                    {icon("refresh")} " Atualizar"
                </Button>
            </PageHeader>

            <div class="page__content">
                <Flex gap=FlexGap::Small class="filter-bar">
                    <Input value=search placeholder="Nome, e-mail ou telefone" />
                    <EnumSelect
                        options=enum_options!(MembershipStatus)
                        value=status_filter
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
                                <SortableHeader label="Nome" field="member_name" sort=sort />
                                <th class="table__header-cell">"Contato"</th>
                                <SortableHeader label="Plano" field="plan" sort=sort />
                                <th class="table__header-cell table__header-cell--numeric">"Valor"</th>
                                <SortableHeader label="Por mês" field="monthly" sort=sort numeric=true />
                                <SortableHeader label="Início" field="start_date" sort=sort />
                                <SortableHeader label="Renovação" field="renewal" sort=sort />
                                <th class="table__header-cell">"Situação"</th>
                            </tr>
                        </thead>
                        <tbody>
                            <For
                                each=move || rows.get()
                                key=|row| (row.id.clone(), row.status, row.fee.to_bits(), row.plan)
                                children=move |row: MembershipRow| {
                                    let id = row.id.clone();
                                    view! {
                                        <tr class="table__row" on:click=move |_| open_details(Some(id.clone()))>
                                            <td class="table__cell">{row.member_name}</td>
                                            <td class="table__cell">{row.contact}</td>
                                            <td class="table__cell">{row.plan.label()}</td>
                                            <td class="table__cell table__cell--numeric">{format_money(row.fee)}</td>
                                            <td class="table__cell table__cell--numeric">{format_money(row.monthly)}</td>
                                            <td class="table__cell">{format_date(&row.start_date)}</td>
                                            <td class="table__cell">{format_opt_date(row.renewal.as_deref())}</td>
                                            <td class="table__cell">
                                                <Badge appearance=BadgeAppearance::Tint color=status_color(row.status)>
                                                    {row.status.label()}
                                                </Badge>
                                            </td>
                                        </tr>
                                    }
                                }
                            />
                        </tbody>
                    </table>
                    <Show when=move || !loading.get() && rows.with(|r| r.is_empty())>
                        <div class="table__empty">"Nenhum associado encontrado."</div>
                    </Show>
                </div>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a005_membership::aggregate::MembershipId;
    use contracts::domain::common::BaseAggregate;

    fn member(name: &str, plan: MembershipPlan, fee: f64, status: MembershipStatus) -> Membership {
        Membership {
            base: BaseAggregate::new(MembershipId::new_v4(), String::new(), String::new()),
            member_name: name.into(),
            email: None,
            phone: Some("(11) 98888-0000".into()),
            plan,
            fee,
            start_date: "2024-01-31".into(),
            status,
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn row_shows_monthly_value_and_renewal() {
        let m = member("Joana Prado", MembershipPlan::Quarterly, 120.0, MembershipStatus::Active);
        let row = MembershipRow::from_member(&m, day(2024, 2, 10));
        assert_eq!(row.monthly, 40.0);
        assert_eq!(row.renewal.as_deref(), Some("2024-04-30"));
        assert_eq!(row.contact, "(11) 98888-0000");
    }

    #[test]
    fn renewal_column_moves_past_old_cycles() {
        let m = member("Joana Prado", MembershipPlan::Quarterly, 120.0, MembershipStatus::Active);
        let row = MembershipRow::from_member(&m, day(2025, 8, 1));
        assert_eq!(row.renewal.as_deref(), Some("2025-10-31"));
    }

    #[test]
    fn default_filter_shows_only_active_sorted_by_name() {
        let items = vec![
            member("Zeca", MembershipPlan::Monthly, 50.0, MembershipStatus::Active),
            member("Ana", MembershipPlan::Annual, 480.0, MembershipStatus::Active),
            member("Bia", MembershipPlan::Monthly, 50.0, MembershipStatus::Cancelled),
        ];
        let rows = visible_rows(&items, "active", "", &SortState::new("member_name", true), day(2024, 3, 1));
        let names: Vec<_> = rows.iter().map(|r| r.member_name.as_str()).collect();
        assert_eq!(names, vec!["Ana", "Zeca"]);

        let by_monthly = visible_rows(&items, "", "", &SortState::new("monthly", false), day(2024, 3, 1));
        assert_eq!(by_monthly[0].member_name, "Zeca");
    }
}
