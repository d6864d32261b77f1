use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate};
use crate::enums::PaymentMethod;
use crate::shared::money::round2;
use crate::shared::validation::{
    optional_date, require_date, require_positive, require_text, ValidationError,
    ValidationResult,
};
use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

crate::uuid_aggregate_id!(AccountPayableId);

crate::labeled_enum! {
    /// Situação da conta a pagar
    PayableStatus, "payable_status" {
        Pending => "pending",
        Overdue => "overdue",
        Paid => "paid",
        Cancelled => "cancelled",
    }
}

/// Janela de "vence em breve" do resumo
pub const DUE_SOON_DAYS: i64 = 7;

fn one() -> u32 {
    1
}

/// Conta a pagar (agregado a001)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountPayable {
    #[serde(flatten)]
    pub base: BaseAggregate<AccountPayableId>,

    /// Fornecedor / favorecido
    pub supplier: String,

    /// Categoria de despesa (ex.: "Matéria-prima", "Aluguel")
    #[serde(default)]
    pub category: String,

    /// Número da nota / boleto
    #[serde(default)]
    pub document_no: String,

    pub amount: f64,

    /// Vencimento (YYYY-MM-DD)
    pub due_date: String,

    /// Data do pagamento (YYYY-MM-DD)
    #[serde(default)]
    pub paid_at: Option<String>,

    pub status: PayableStatus,

    #[serde(default)]
    pub payment_method: Option<PaymentMethod>,

    #[serde(default = "one")]
    pub installment_no: u32,

    #[serde(default = "one")]
    pub installment_total: u32,
}

impl AccountPayable {
    /// Pendente com vencimento anterior a `today` é tratada como vencida,
    /// mesmo que o backend ainda não tenha atualizado o status.
    pub fn effective_status(&self, today: NaiveDate) -> PayableStatus {
        match self.status {
            PayableStatus::Pending => match self.due() {
                Some(due) if due < today => PayableStatus::Overdue,
                _ => PayableStatus::Pending,
            },
            other => other,
        }
    }

    pub fn due(&self) -> Option<NaiveDate> {
        crate::shared::validation::parse_date(&self.due_date)
    }

    pub fn is_open(&self) -> bool {
        matches!(self.status, PayableStatus::Pending | PayableStatus::Overdue)
    }

    /// "2/6" para parcelados, vazio para parcela única
    pub fn installment_label(&self) -> String {
        if self.installment_total > 1 {
            format!("{}/{}", self.installment_no, self.installment_total)
        } else {
            String::new()
        }
    }
}

impl AggregateRoot for AccountPayable {
    type Id = AccountPayableId;

    fn base(&self) -> &BaseAggregate<Self::Id> {
        &self.base
    }

    fn aggregate_index() -> &'static str {
        "a001"
    }

    fn collection_name() -> &'static str {
        "account_payable"
    }

    fn element_name() -> &'static str {
        "Conta a pagar"
    }

    fn list_name() -> &'static str {
        "Contas a pagar"
    }
}

/// DTO do formulário (POST sem id, PUT com id)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountPayableDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: String,
    pub supplier: String,
    pub category: String,
    pub document_no: String,
    pub amount: f64,
    pub due_date: String,
    pub paid_at: Option<String>,
    pub status: PayableStatus,
    pub payment_method: Option<PaymentMethod>,
    pub installment_no: u32,
    pub installment_total: u32,
    pub comment: Option<String>,
}

impl Default for AccountPayableDto {
    fn default() -> Self {
        Self {
            id: None,
            code: None,
            description: String::new(),
            supplier: String::new(),
            category: String::new(),
            document_no: String::new(),
            amount: 0.0,
            due_date: String::new(),
            paid_at: None,
            status: PayableStatus::Pending,
            payment_method: None,
            installment_no: 1,
            installment_total: 1,
            comment: None,
        }
    }
}

impl From<AccountPayable> for AccountPayableDto {
    fn from(a: AccountPayable) -> Self {
        Self {
            id: Some(a.base.id.as_string()),
            code: Some(a.base.code),
            description: a.base.description,
            supplier: a.supplier,
            category: a.category,
            document_no: a.document_no,
            amount: a.amount,
            due_date: a.due_date,
            paid_at: a.paid_at,
            status: a.status,
            payment_method: a.payment_method,
            installment_no: a.installment_no,
            installment_total: a.installment_total,
            comment: a.base.comment,
        }
    }
}

impl AccountPayableDto {
    pub fn validate(&self) -> ValidationResult {
        require_text(&self.supplier, "supplier", "Fornecedor")?;
        require_positive(self.amount, "amount", "Valor")?;
        require_date(&self.due_date, "due_date", "Vencimento")?;
        optional_date(self.paid_at.as_deref(), "paid_at", "Data de pagamento")?;
        if self.installment_total == 0 || self.installment_no == 0 {
            return Err(ValidationError::new(
                "installment_no",
                "Parcela deve ser maior que zero",
            ));
        }
        if self.installment_no > self.installment_total {
            return Err(ValidationError::new(
                "installment_no",
                format!(
                    "Parcela {} maior que o total de {} parcelas",
                    self.installment_no, self.installment_total
                ),
            ));
        }
        if self.status == PayableStatus::Paid
            && self.paid_at.as_deref().map_or(true, |d| d.trim().is_empty())
        {
            return Err(ValidationError::new(
                "paid_at",
                "Informe a data de pagamento da conta paga",
            ));
        }
        Ok(())
    }
}

/// Corpo de `POST /api/account_payable/{id}/pay`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayRequest {
    pub paid_at: String,
    pub payment_method: Option<PaymentMethod>,
}

/// Cartões de resumo no topo da lista
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PayablesSummary {
    pub pending_total: f64,
    pub pending_count: usize,
    pub overdue_total: f64,
    pub overdue_count: usize,
    /// Pendentes que vencem entre hoje e hoje + DUE_SOON_DAYS
    pub due_soon_total: f64,
    pub due_soon_count: usize,
    pub paid_this_month_total: f64,
    pub paid_this_month_count: usize,
}

impl PayablesSummary {
    pub fn from_items(items: &[AccountPayable], today: NaiveDate) -> Self {
        let soon_limit = today + Duration::days(DUE_SOON_DAYS);
        let mut s = Self::default();

        for item in items.iter().filter(|i| !i.base.metadata.is_deleted) {
            match item.effective_status(today) {
                PayableStatus::Pending => {
                    s.pending_total += item.amount;
                    s.pending_count += 1;
                    if item.due().map_or(false, |d| d <= soon_limit) {
                        s.due_soon_total += item.amount;
                        s.due_soon_count += 1;
                    }
                }
                PayableStatus::Overdue => {
                    s.overdue_total += item.amount;
                    s.overdue_count += 1;
                }
                PayableStatus::Paid => {
                    let paid = item
                        .paid_at
                        .as_deref()
                        .and_then(crate::shared::validation::parse_date);
                    if let Some(p) = paid {
                        if p.year() == today.year() && p.month() == today.month() {
                            s.paid_this_month_total += item.amount;
                            s.paid_this_month_count += 1;
                        }
                    }
                }
                PayableStatus::Cancelled => {}
            }
        }

        s.pending_total = round2(s.pending_total);
        s.overdue_total = round2(s.overdue_total);
        s.due_soon_total = round2(s.due_soon_total);
        s.paid_this_month_total = round2(s.paid_this_month_total);
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bill(amount: f64, due: &str, status: PayableStatus, paid_at: Option<&str>) -> AccountPayable {
        AccountPayable {
            base: BaseAggregate::new(AccountPayableId::new_v4(), String::new(), String::new()),
            supplier: "Molduras Paulista".into(),
            category: "Matéria-prima".into(),
            document_no: String::new(),
            amount,
            due_date: due.into(),
            paid_at: paid_at.map(String::from),
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
    fn pending_past_due_is_overdue() {
        let b = bill(100.0, "2024-05-09", PayableStatus::Pending, None);
        assert_eq!(b.effective_status(today()), PayableStatus::Overdue);
        let b = bill(100.0, "2024-05-10", PayableStatus::Pending, None);
        assert_eq!(b.effective_status(today()), PayableStatus::Pending);
        let b = bill(100.0, "2024-01-01", PayableStatus::Paid, Some("2024-01-01"));
        assert_eq!(b.effective_status(today()), PayableStatus::Paid);
    }

    #[test]
    fn summary_buckets() {
        let items = vec![
            bill(100.0, "2024-05-01", PayableStatus::Pending, None),
            bill(50.5, "2024-05-12", PayableStatus::Pending, None),
            bill(70.0, "2024-06-30", PayableStatus::Pending, None),
            bill(30.0, "2024-05-02", PayableStatus::Paid, Some("2024-05-03")),
            bill(45.0, "2024-04-02", PayableStatus::Paid, Some("2024-04-03")),
            bill(999.0, "2024-05-01", PayableStatus::Cancelled, None),
        ];
        let s = PayablesSummary::from_items(&items, today());
        assert_eq!(s.overdue_count, 1);
        assert_eq!(s.overdue_total, 100.0);
        assert_eq!(s.pending_count, 2);
        assert_eq!(s.pending_total, 120.5);
        assert_eq!(s.due_soon_count, 1);
        assert_eq!(s.due_soon_total, 50.5);
        assert_eq!(s.paid_this_month_count, 1);
        assert_eq!(s.paid_this_month_total, 30.0);
    }

    #[test]
    fn validation_stops_at_first_missing_field() {
        let dto = AccountPayableDto::default();
        assert_eq!(dto.validate().unwrap_err().field, "supplier");

        let dto = AccountPayableDto {
            supplier: "Vidros ABC".into(),
            amount: 320.0,
            ..Default::default()
        };
        assert_eq!(dto.validate().unwrap_err().field, "due_date");

        let dto = AccountPayableDto {
            supplier: "Vidros ABC".into(),
            amount: 320.0,
            due_date: "2024-05-20".into(),
            installment_no: 3,
            installment_total: 2,
            ..Default::default()
        };
        assert_eq!(dto.validate().unwrap_err().field, "installment_no");
    }

    #[test]
    fn paid_requires_payment_date() {
        let mut dto = AccountPayableDto {
            supplier: "Vidros ABC".into(),
            amount: 320.0,
            due_date: "2024-05-20".into(),
            status: PayableStatus::Paid,
            ..Default::default()
        };
        assert_eq!(dto.validate().unwrap_err().field, "paid_at");
        dto.paid_at = Some("2024-05-19".into());
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn installment_label_only_for_split_bills() {
        let mut b = bill(10.0, "2024-05-01", PayableStatus::Pending, None);
        assert_eq!(b.installment_label(), "");
        b.installment_no = 2;
        b.installment_total = 6;
        assert_eq!(b.installment_label(), "2/6");
    }
}
