use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate};
use crate::shared::validation::{
    require_date, require_non_negative, require_text, ValidationError, ValidationResult,
};
use serde::{Deserialize, Serialize};

crate::uuid_aggregate_id!(ProductReturnId);

crate::labeled_enum! {
    /// Motivo da devolução
    ReturnReason, "return_reason" {
        Defect => "defect",
        Damaged => "damaged",
        WrongItem => "wrong_item",
        Regret => "regret",
        Other => "other",
    }
}

crate::labeled_enum! {
    /// Situação da devolução
    ReturnStatus, "return_status" {
        Requested => "requested",
        Received => "received",
        Refunded => "refunded",
        Rejected => "rejected",
    }
}

impl ReturnStatus {
    /// Próximos status permitidos a partir deste
    pub fn allowed_transitions(&self) -> &'static [ReturnStatus] {
        match self {
            ReturnStatus::Requested => &[ReturnStatus::Received, ReturnStatus::Rejected],
            ReturnStatus::Received => &[ReturnStatus::Refunded, ReturnStatus::Rejected],
            ReturnStatus::Refunded | ReturnStatus::Rejected => &[],
        }
    }

    pub fn can_transition_to(&self, next: ReturnStatus) -> bool {
        self.allowed_transitions().contains(&next)
    }

    pub fn is_final(&self) -> bool {
        self.allowed_transitions().is_empty()
    }
}

/// Devolução de produto (agregado a002)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductReturn {
    #[serde(flatten)]
    pub base: BaseAggregate<ProductReturnId>,

    /// Número do pedido de origem
    pub order_number: String,

    pub customer: String,

    pub reason: ReturnReason,

    pub status: ReturnStatus,

    /// Valor a devolver ao cliente
    #[serde(default)]
    pub amount: f64,

    /// Data da solicitação (YYYY-MM-DD)
    pub request_date: String,

    #[serde(default)]
    pub resolution_notes: Option<String>,
}

impl AggregateRoot for ProductReturn {
    type Id = ProductReturnId;

    fn base(&self) -> &BaseAggregate<Self::Id> {
        &self.base
    }

    fn aggregate_index() -> &'static str {
        "a002"
    }

    fn collection_name() -> &'static str {
        "product_return"
    }

    fn element_name() -> &'static str {
        "Devolução"
    }

    fn list_name() -> &'static str {
        "Devoluções"
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductReturnDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: String,
    pub order_number: String,
    pub customer: String,
    pub reason: ReturnReason,
    pub status: ReturnStatus,
    pub amount: f64,
    pub request_date: String,
    pub resolution_notes: Option<String>,
    pub comment: Option<String>,
}

impl Default for ProductReturnDto {
    fn default() -> Self {
        Self {
            id: None,
            code: None,
            description: String::new(),
            order_number: String::new(),
            customer: String::new(),
            reason: ReturnReason::Defect,
            status: ReturnStatus::Requested,
            amount: 0.0,
            request_date: String::new(),
            resolution_notes: None,
            comment: None,
        }
    }
}

impl From<ProductReturn> for ProductReturnDto {
    fn from(r: ProductReturn) -> Self {
        Self {
            id: Some(r.base.id.as_string()),
            code: Some(r.base.code),
            description: r.base.description,
            order_number: r.order_number,
            customer: r.customer,
            reason: r.reason,
            status: r.status,
            amount: r.amount,
            request_date: r.request_date,
            resolution_notes: r.resolution_notes,
            comment: r.base.comment,
        }
    }
}

impl ProductReturnDto {
    pub fn validate(&self) -> ValidationResult {
        require_text(&self.order_number, "order_number", "Número do pedido")?;
        require_text(&self.customer, "customer", "Cliente")?;
        require_date(&self.request_date, "request_date", "Data da solicitação")?;
        require_non_negative(self.amount, "amount", "Valor")?;
        if self.reason == ReturnReason::Other
            && self.description.trim().is_empty()
        {
            return Err(ValidationError::new(
                "description",
                "Descreva o motivo da devolução",
            ));
        }
        Ok(())
    }
}

/// Corpo de `POST /api/product_return/{id}/status`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeReturnStatusRequest {
    pub status: ReturnStatus,
    pub resolution_notes: Option<String>,
}

impl ChangeReturnStatusRequest {
    /// Monta a requisição só se a transição for permitida
    pub fn for_transition(
        current: ReturnStatus,
        next: ReturnStatus,
        resolution_notes: Option<String>,
    ) -> Result<Self, ValidationError> {
        if !current.can_transition_to(next) {
            return Err(ValidationError::new(
                "status",
                format!(
                    "Não é possível passar de \"{}\" para \"{}\"",
                    current.label(),
                    next.label()
                ),
            ));
        }
        if next == ReturnStatus::Rejected
            && resolution_notes.as_deref().map_or(true, |n| n.trim().is_empty())
        {
            return Err(ValidationError::new(
                "resolution_notes",
                "Informe o motivo da recusa",
            ));
        }
        Ok(Self {
            status: next,
            resolution_notes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transitions_follow_the_return_flow() {
        assert!(ReturnStatus::Requested.can_transition_to(ReturnStatus::Received));
        assert!(ReturnStatus::Requested.can_transition_to(ReturnStatus::Rejected));
        assert!(!ReturnStatus::Requested.can_transition_to(ReturnStatus::Refunded));
        assert!(ReturnStatus::Received.can_transition_to(ReturnStatus::Refunded));
        assert!(ReturnStatus::Refunded.is_final());
        assert!(ReturnStatus::Rejected.is_final());
    }

    #[test]
    fn invalid_transition_is_rejected_before_request() {
        let err = ChangeReturnStatusRequest::for_transition(
            ReturnStatus::Refunded,
            ReturnStatus::Received,
            None,
        )
        .unwrap_err();
        assert_eq!(err.field, "status");
        assert!(err.message.contains("Reembolsada"));
    }

    #[test]
    fn rejection_needs_a_reason() {
        let err = ChangeReturnStatusRequest::for_transition(
            ReturnStatus::Requested,
            ReturnStatus::Rejected,
            Some("  ".into()),
        )
        .unwrap_err();
        assert_eq!(err.field, "resolution_notes");

        let ok = ChangeReturnStatusRequest::for_transition(
            ReturnStatus::Requested,
            ReturnStatus::Rejected,
            Some("Fora do prazo de 7 dias".into()),
        )
        .unwrap();
        assert_eq!(ok.status, ReturnStatus::Rejected);
    }

    #[test]
    fn required_fields() {
        let mut dto = ProductReturnDto::default();
        assert_eq!(dto.validate().unwrap_err().field, "order_number");
        dto.order_number = "PED-0042".into();
        dto.customer = "Ana Souza".into();
        dto.request_date = "2024-04-01".into();
        assert!(dto.validate().is_ok());
        dto.reason = ReturnReason::Other;
        assert_eq!(dto.validate().unwrap_err().field, "description");
    }
}
