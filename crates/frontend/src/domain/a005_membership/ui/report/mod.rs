use crate::domain::a005_membership::api;
use crate::shared::components::{count_label, CardTone, PageHeader, StatCard};
use crate::shared::date_utils::{format_date, today};
use crate::shared::icons::icon;
use crate::shared::number_format::{format_money, format_percent};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_REPORT;
use crate::shared::toast::use_notifier;
use chrono::NaiveDate;
use contracts::domain::a005_membership::aggregate::{Membership, MembershipStatus};
use contracts::domain::a005_membership::report::MembershipReport;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Janela da lista de renovações
const RENEWAL_WINDOW_DAYS: i64 = 30;

#[derive(Clone, Debug, PartialEq)]
pub struct UpcomingRenewal {
    pub member_name: String,
    pub date: NaiveDate,
    pub fee: f64,
}

/// Ativos que renovam nos próximos `days` dias, por data
fn upcoming_renewals(members: &[Membership], today: NaiveDate, days: i64) -> Vec<UpcomingRenewal> {
    let mut list: Vec<UpcomingRenewal> = members
        .iter()
        .filter(|m| !m.base.metadata.is_deleted && m.status == MembershipStatus::Active)
        .filter_map(|m| {
            let date = m.next_renewal(today)?;
            ((date - today).num_days() <= days).then(|| UpcomingRenewal {
                member_name: m.member_name.clone(),
                date,
                fee: m.fee,
            })
        })
        .collect();
    list.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.member_name.cmp(&b.member_name)));
    list
}

/// Participação de um plano na receita mensal, em %
fn revenue_share(part: f64, total: f64) -> f64 {
    if total > 0.0 {
        part / total * 100.0
    } else {
        0.0
    }
}

#[component]
pub fn MembershipReportPage() -> impl IntoView {
    let notifier = use_notifier();
    let members = RwSignal::new(Vec::<Membership>::new());
    let loading = RwSignal::new(false);

    let fetch = move || {
        loading.set(true);
        spawn_local(async move {
            match api::fetch_all().await {
                Ok(v) => members.set(v),
                Err(e) => notifier.error("Erro ao carregar o relatório de associados", e),
            }
            loading.set(false);
        });
    };

    let report = Memo::new(move |_| members.with(|m| MembershipReport::from_members(m)));
    let renewals = Memo::new(move |_| {
        members.with(|m| upcoming_renewals(m, today(), RENEWAL_WINDOW_DAYS))
    });

    fetch();

    view! {
        <PageFrame page_id="a005_membership--report" category=PAGE_CAT_REPORT>
            <PageHeader
                title="Relatório de associados"
                subtitle=Signal::derive(move || count_label(report.with(|r| r.total()), "associado", "associados"))
            >
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| fetch()>
                    {icon("refresh")} " Atualizar"
                </Button>
            </PageHeader>

            <div class="page__content">
                <Show when=move || loading.get()>
                    <Spinner />
                </Show>

                <div class="stat-cards">
                    <StatCard
                        label="Receita mensal recorrente"
                        icon_name="members"
                        amount=Signal::derive(move || report.get().monthly_recurring_revenue)
                        subtitle=Signal::derive(move || count_label(report.get().active_count, "ativo", "ativos"))
                        tone=CardTone::Success
                    />
                    <StatCard
                        label="Ticket médio mensal"
                        icon_name="members"
                        amount=Signal::derive(move || report.get().average_monthly_fee)
                        subtitle=Signal::derive(|| "por associado ativo".to_string())
                        tone=CardTone::Neutral
                    />
                    <Card class="stat-card">
                        <div class="stat-card__label">"Situação"</div>
                        <Flex gap=FlexGap::Small>
                            <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Success>
                                {move || format!("{} ativos", report.get().active_count)}
                            </Badge>
                            <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Warning>
                                {move || format!("{} suspensos", report.get().suspended_count)}
                            </Badge>
                            <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Subtle>
                                {move || format!("{} cancelados", report.get().cancelled_count)}
                            </Badge>
                        </Flex>
                    </Card>
                </div>

                <h2 class="section__title">"Por plano"</h2>
                <table class="table__data table--striped">
                    <thead class="table__head">
                        <tr>
                            <th class="table__header-cell">"Plano"</th>
                            <th class="table__header-cell table__header-cell--numeric">"Ativos"</th>
                            <th class="table__header-cell table__header-cell--numeric">"Receita mensal"</th>
                            <th class="table__header-cell table__header-cell--numeric">"Participação"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            let r = report.get();
                            let mrr = r.monthly_recurring_revenue;
                            r.by_plan
                                .into_iter()
                                .map(|row| view! {
                                    <tr class="table__row">
                                        <td class="table__cell">{row.plan.label()}</td>
                                        <td class="table__cell table__cell--numeric">{row.active_count}</td>
                                        <td class="table__cell table__cell--numeric">{format_money(row.monthly_revenue)}</td>
                                        <td class="table__cell table__cell--numeric">
                                            {format_percent(revenue_share(row.monthly_revenue, mrr))}
                                        </td>
                                    </tr>
                                })
                                .collect_view()
                        }}
                    </tbody>
                </table>

                <h2 class="section__title">{format!("Renovações nos próximos {} dias", RENEWAL_WINDOW_DAYS)}</h2>
                <Show
                    when=move || renewals.with(|r| !r.is_empty())
                    fallback=|| view! { <div class="table__empty">"Nenhuma renovação no período."</div> }
                >
                    <table class="table__data table--striped">
                        <tbody>
                            {move || {
                                renewals
                                    .get()
                                    .into_iter()
                                    .map(|r| view! {
                                        <tr class="table__row">
                                            <td class="table__cell">{format_date(&r.date.format("%Y-%m-%d").to_string())}</td>
                                            <td class="table__cell">{r.member_name}</td>
                                            <td class="table__cell table__cell--numeric">{format_money(r.fee)}</td>
                                        </tr>
                                    })
                                    .collect_view()
                            }}
                        </tbody>
                    </table>
                </Show>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a005_membership::aggregate::{MembershipId, MembershipPlan};
    use contracts::domain::common::BaseAggregate;

    fn member(name: &str, plan: MembershipPlan, start: &str, status: MembershipStatus) -> Membership {
        Membership {
            base: BaseAggregate::new(MembershipId::new_v4(), String::new(), String::new()),
            member_name: name.into(),
            email: None,
            phone: None,
            plan,
            fee: 60.0,
            start_date: start.into(),
            status,
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn old_members_show_their_next_cycle() {
        let members = vec![
            member("Rui", MembershipPlan::Annual, "2021-06-01", MembershipStatus::Active),
            member("Ana", MembershipPlan::Monthly, "2023-01-15", MembershipStatus::Active),
        ];
        let list = upcoming_renewals(&members, day(2024, 5, 10), 30);
        let dates: Vec<_> = list.iter().map(|r| (r.member_name.as_str(), r.date)).collect();
        assert_eq!(dates, vec![("Ana", day(2024, 5, 15)), ("Rui", day(2024, 6, 1))]);
    }

    #[test]
    fn renewals_list_only_active_members_in_window() {
        let members = vec![
            member("Carlos", MembershipPlan::Monthly, "2024-04-20", MembershipStatus::Active),
            member("Ana", MembershipPlan::Monthly, "2024-04-12", MembershipStatus::Active),
            member("Duda", MembershipPlan::Quarterly, "2024-04-01", MembershipStatus::Active),
            member("Bia", MembershipPlan::Monthly, "2024-04-11", MembershipStatus::Suspended),
        ];
        let list = upcoming_renewals(&members, day(2024, 5, 10), 30);
        let names: Vec<_> = list.iter().map(|r| r.member_name.as_str()).collect();
        assert_eq!(names, vec!["Ana", "Carlos"]);
    }

    #[test]
    fn share_handles_empty_revenue() {
        assert_eq!(revenue_share(50.0, 200.0), 25.0);
        assert_eq!(revenue_share(0.0, 0.0), 0.0);
    }
}
