use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate};
use crate::shared::money::round2;
use crate::shared::validation::{
    parse_date, require_date, require_positive, require_text, ValidationError,
    ValidationResult,
};
use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

crate::uuid_aggregate_id!(MembershipId);

crate::labeled_enum! {
    /// Periodicidade de cobrança do clube de associados
    MembershipPlan, "membership_plan" {
        Monthly => "monthly",
        Quarterly => "quarterly",
        Annual => "annual",
    }
}

impl MembershipPlan {
    pub fn months(&self) -> u32 {
        match self {
            MembershipPlan::Monthly => 1,
            MembershipPlan::Quarterly => 3,
            MembershipPlan::Annual => 12,
        }
    }
}

crate::labeled_enum! {
    MembershipStatus, "membership_status" {
        Active => "active",
        Suspended => "suspended",
        Cancelled => "cancelled",
    }
}

/// Associado (agregado a005)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Membership {
    #[serde(flatten)]
    pub base: BaseAggregate<MembershipId>,

    pub member_name: String,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub phone: Option<String>,

    pub plan: MembershipPlan,

    /// Valor cobrado por período do plano
    pub fee: f64,

    /// Início da associação (YYYY-MM-DD)
    pub start_date: String,

    pub status: MembershipStatus,
}

impl Membership {
    /// Valor equivalente por mês (base do MRR)
    pub fn monthly_equivalent(&self) -> f64 {
        round2(self.fee / self.plan.months() as f64)
    }

    /// Fim do primeiro período; 31/01 + 1 mês cai em 29/02 ou 28/02
    pub fn renewal_date(&self) -> Option<NaiveDate> {
        parse_date(&self.start_date)?.checked_add_months(Months::new(self.plan.months()))
    }

    /// Próxima cobrança a partir de `today` (inclusive). Cada ciclo é
    /// contado desde o início, então 31/01 mensal segue 29/02, 31/03...
    pub fn next_renewal(&self, today: NaiveDate) -> Option<NaiveDate> {
        let start = parse_date(&self.start_date)?;
        let step = self.plan.months();
        let elapsed = (today.year() - start.year()) * 12 + today.month() as i32 - start.month() as i32;
        let mut cycles = (elapsed.max(0) as u32 / step).max(1);
        loop {
            let date = start.checked_add_months(Months::new(step * cycles))?;
            if date >= today {
                return Some(date);
            }
            cycles += 1;
        }
    }
}

impl AggregateRoot for Membership {
    type Id = MembershipId;

    fn base(&self) -> &BaseAggregate<Self::Id> {
        &self.base
    }

    fn aggregate_index() -> &'static str {
        "a005"
    }

    fn collection_name() -> &'static str {
        "membership"
    }

    fn element_name() -> &'static str {
        "Associado"
    }

    fn list_name() -> &'static str {
        "Associados"
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MembershipDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub member_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub plan: MembershipPlan,
    pub fee: f64,
    pub start_date: String,
    pub status: MembershipStatus,
    pub comment: Option<String>,
}

impl Default for MembershipDto {
    fn default() -> Self {
        Self {
            id: None,
            code: None,
            member_name: String::new(),
            email: None,
            phone: None,
            plan: MembershipPlan::Monthly,
            fee: 0.0,
            start_date: String::new(),
            status: MembershipStatus::Active,
            comment: None,
        }
    }
}

impl From<Membership> for MembershipDto {
    fn from(m: Membership) -> Self {
        Self {
            id: Some(m.base.id.as_string()),
            code: Some(m.base.code),
            member_name: m.member_name,
            email: m.email,
            phone: m.phone,
            plan: m.plan,
            fee: m.fee,
            start_date: m.start_date,
            status: m.status,
            comment: m.base.comment,
        }
    }
}

impl MembershipDto {
    pub fn validate(&self) -> ValidationResult {
        require_text(&self.member_name, "member_name", "Nome do associado")?;
        require_date(&self.start_date, "start_date", "Data de início")?;
        require_positive(self.fee, "fee", "Mensalidade")?;
        if let Some(email) = self.email.as_deref().filter(|e| !e.trim().is_empty()) {
            if !email.contains('@') {
                return Err(ValidationError::new("email", "E-mail inválido"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(plan: MembershipPlan, fee: f64, start: &str) -> Membership {
        Membership {
            base: BaseAggregate::new(MembershipId::new_v4(), String::new(), String::new()),
            member_name: "Clube".into(),
            email: None,
            phone: None,
            plan,
            fee,
            start_date: start.into(),
            status: MembershipStatus::Active,
        }
    }

    #[test]
    fn monthly_equivalent_spreads_the_fee() {
        assert_eq!(member(MembershipPlan::Monthly, 49.9, "2024-01-01").monthly_equivalent(), 49.9);
        assert_eq!(member(MembershipPlan::Quarterly, 120.0, "2024-01-01").monthly_equivalent(), 40.0);
        assert_eq!(member(MembershipPlan::Annual, 500.0, "2024-01-01").monthly_equivalent(), 41.67);
    }

    #[test]
    fn renewal_clamps_month_end() {
        let m = member(MembershipPlan::Monthly, 10.0, "2024-01-31");
        assert_eq!(m.renewal_date(), NaiveDate::from_ymd_opt(2024, 2, 29));
        let m = member(MembershipPlan::Annual, 10.0, "2024-02-29");
        assert_eq!(m.renewal_date(), NaiveDate::from_ymd_opt(2025, 2, 28));
    }

    #[test]
    fn next_renewal_skips_past_cycles() {
        let day = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();

        let monthly = member(MembershipPlan::Monthly, 10.0, "2024-01-15");
        assert_eq!(monthly.next_renewal(day(2024, 5, 10)), Some(day(2024, 5, 15)));
        assert_eq!(monthly.next_renewal(day(2024, 5, 15)), Some(day(2024, 5, 15)));
        assert_eq!(monthly.next_renewal(day(2024, 5, 16)), Some(day(2024, 6, 15)));

        let annual = member(MembershipPlan::Annual, 10.0, "2022-06-01");
        assert_eq!(annual.next_renewal(day(2024, 5, 10)), Some(day(2024, 6, 1)));

        // ciclos contados do início: o dia 31 não encolhe para 29
        let month_end = member(MembershipPlan::Monthly, 10.0, "2024-01-31");
        assert_eq!(month_end.next_renewal(day(2024, 3, 1)), Some(day(2024, 3, 31)));

        let future = member(MembershipPlan::Quarterly, 10.0, "2024-09-01");
        assert_eq!(future.next_renewal(day(2024, 5, 10)), Some(day(2024, 12, 1)));

        assert_eq!(member(MembershipPlan::Monthly, 10.0, "").next_renewal(day(2024, 5, 10)), None);
    }

    #[test]
    fn email_is_optional_but_checked() {
        let mut dto = MembershipDto {
            member_name: "João".into(),
            start_date: "2024-01-10".into(),
            fee: 30.0,
            ..Default::default()
        };
        assert!(dto.validate().is_ok());
        dto.email = Some("joao.exemplo.com".into());
        assert_eq!(dto.validate().unwrap_err().field, "email");
        dto.email = Some("joao@exemplo.com".into());
        assert!(dto.validate().is_ok());
    }
}
