//! Validação de campos obrigatórios dos formulários
//!
//! Todos os `validate()` dos DTOs param no primeiro problema encontrado: a
//! mensagem vira um toast e o envio ao backend não acontece.

use chrono::NaiveDate;
use thiserror::Error;

/// Problema de preenchimento de um campo do formulário
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Nome do campo no DTO (para destacar o input)
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

pub type ValidationResult = Result<(), ValidationError>;

/// Campo de texto obrigatório
pub fn require_text(value: &str, field: &'static str, label: &str) -> ValidationResult {
    if value.trim().is_empty() {
        return Err(ValidationError::new(
            field,
            format!("{} é obrigatório", label),
        ));
    }
    Ok(())
}

/// Valor numérico estritamente positivo
pub fn require_positive(value: f64, field: &'static str, label: &str) -> ValidationResult {
    if !value.is_finite() || value <= 0.0 {
        return Err(ValidationError::new(
            field,
            format!("{} deve ser maior que zero", label),
        ));
    }
    Ok(())
}

pub fn require_non_negative(value: f64, field: &'static str, label: &str) -> ValidationResult {
    if !value.is_finite() || value < 0.0 {
        return Err(ValidationError::new(
            field,
            format!("{} não pode ser negativo", label),
        ));
    }
    Ok(())
}

/// Data obrigatória no formato do input HTML (YYYY-MM-DD)
pub fn require_date(value: &str, field: &'static str, label: &str) -> ValidationResult {
    require_text(value, field, label)?;
    parse_date(value).map(|_| ()).ok_or_else(|| {
        ValidationError::new(field, format!("{} não é uma data válida", label))
    })
}

/// Data opcional: vazio é aceito, preenchido precisa ser válido
pub fn optional_date(value: Option<&str>, field: &'static str, label: &str) -> ValidationResult {
    match value {
        Some(v) if !v.trim().is_empty() => require_date(v, field, label),
        _ => Ok(()),
    }
}

/// Lê "YYYY-MM-DD", aceitando também um timestamp ISO completo
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let date_part = value.trim().split('T').next().unwrap_or_default();
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_is_rejected_with_label() {
        let err = require_text("  ", "supplier", "Fornecedor").unwrap_err();
        assert_eq!(err.field, "supplier");
        assert_eq!(err.to_string(), "Fornecedor é obrigatório");
        assert!(require_text("Vidraçaria Sul", "supplier", "Fornecedor").is_ok());
    }

    #[test]
    fn numbers() {
        assert!(require_positive(0.0, "amount", "Valor").is_err());
        assert!(require_positive(f64::NAN, "amount", "Valor").is_err());
        assert!(require_positive(0.01, "amount", "Valor").is_ok());
        assert!(require_non_negative(0.0, "amount", "Valor").is_ok());
        assert!(require_non_negative(-1.0, "amount", "Valor").is_err());
    }

    #[test]
    fn dates() {
        assert!(require_date("2024-02-29", "due_date", "Vencimento").is_ok());
        assert!(require_date("2023-02-29", "due_date", "Vencimento").is_err());
        assert_eq!(
            require_date("", "due_date", "Vencimento").unwrap_err().message,
            "Vencimento é obrigatório"
        );
        assert!(optional_date(None, "paid_at", "Pagamento").is_ok());
        assert!(optional_date(Some(""), "paid_at", "Pagamento").is_ok());
        assert!(optional_date(Some("31/12/2024"), "paid_at", "Pagamento").is_err());
        assert_eq!(
            parse_date("2024-03-15T14:02:26Z"),
            NaiveDate::from_ymd_opt(2024, 3, 15)
        );
    }
}
