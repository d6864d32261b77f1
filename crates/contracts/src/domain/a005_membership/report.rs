//! Relatório do clube de associados

use super::aggregate::{Membership, MembershipPlan, MembershipStatus};
use crate::shared::money::round2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanBreakdown {
    pub plan: MembershipPlan,
    /// Só associados ativos
    pub active_count: usize,
    pub monthly_revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MembershipReport {
    pub active_count: usize,
    pub suspended_count: usize,
    pub cancelled_count: usize,
    /// Receita recorrente mensal dos ativos
    pub monthly_recurring_revenue: f64,
    /// Ticket médio mensal dos ativos
    pub average_monthly_fee: f64,
    pub by_plan: Vec<PlanBreakdown>,
}

impl MembershipReport {
    pub fn from_members(members: &[Membership]) -> Self {
        let alive = members.iter().filter(|m| !m.base.metadata.is_deleted);
        let mut active_count = 0;
        let mut suspended_count = 0;
        let mut cancelled_count = 0;
        let mut mrr = 0.0;
        let mut by_plan: Vec<PlanBreakdown> = MembershipPlan::ALL
            .iter()
            .map(|p| PlanBreakdown {
                plan: *p,
                active_count: 0,
                monthly_revenue: 0.0,
            })
            .collect();

        for m in alive {
            match m.status {
                MembershipStatus::Active => {
                    active_count += 1;
                    let monthly = m.monthly_equivalent();
                    mrr += monthly;
                    if let Some(row) = by_plan.iter_mut().find(|r| r.plan == m.plan) {
                        row.active_count += 1;
                        row.monthly_revenue += monthly;
                    }
                }
                MembershipStatus::Suspended => suspended_count += 1,
                MembershipStatus::Cancelled => cancelled_count += 1,
            }
        }

        for row in by_plan.iter_mut() {
            row.monthly_revenue = round2(row.monthly_revenue);
        }

        let average_monthly_fee = if active_count > 0 {
            round2(mrr / active_count as f64)
        } else {
            0.0
        };

        Self {
            active_count,
            suspended_count,
            cancelled_count,
            monthly_recurring_revenue: round2(mrr),
            average_monthly_fee,
            by_plan,
        }
    }

    pub fn total(&self) -> usize {
        self.active_count + self.suspended_count + self.cancelled_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a005_membership::aggregate::MembershipId;
    use crate::domain::common::BaseAggregate;

    fn member(plan: MembershipPlan, fee: f64, status: MembershipStatus) -> Membership {
        Membership {
            base: BaseAggregate::new(MembershipId::new_v4(), String::new(), String::new()),
            member_name: "X".into(),
            email: None,
            phone: None,
            plan,
            fee,
            start_date: "2024-01-01".into(),
            status,
        }
    }

    #[test]
    fn only_active_members_count_for_revenue() {
        let report = MembershipReport::from_members(&[
            member(MembershipPlan::Monthly, 50.0, MembershipStatus::Active),
            member(MembershipPlan::Quarterly, 150.0, MembershipStatus::Active),
            member(MembershipPlan::Annual, 600.0, MembershipStatus::Suspended),
            member(MembershipPlan::Monthly, 50.0, MembershipStatus::Cancelled),
        ]);
        assert_eq!(report.active_count, 2);
        assert_eq!(report.suspended_count, 1);
        assert_eq!(report.cancelled_count, 1);
        assert_eq!(report.total(), 4);
        assert_eq!(report.monthly_recurring_revenue, 100.0);
        assert_eq!(report.average_monthly_fee, 50.0);

        let quarterly = report
            .by_plan
            .iter()
            .find(|r| r.plan == MembershipPlan::Quarterly)
            .unwrap();
        assert_eq!(quarterly.active_count, 1);
        assert_eq!(quarterly.monthly_revenue, 50.0);
    }

    #[test]
    fn empty_report() {
        let report = MembershipReport::from_members(&[]);
        assert_eq!(report.total(), 0);
        assert_eq!(report.average_monthly_fee, 0.0);
        assert_eq!(report.by_plan.len(), 3);
    }
}
