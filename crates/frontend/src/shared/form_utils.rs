//! Conversões entre os campos de texto dos formulários e os DTOs

use super::number_format::format_amount;
use contracts::shared::money::parse_decimal;

/// Texto vazio (ou só espaços) vira `None`
pub fn opt_text(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value.trim().to_string())
    }
}

/// Valor do DTO para o campo: zero fica vazio para o usuário digitar
pub fn amount_text(value: f64) -> String {
    if value == 0.0 {
        String::new()
    } else {
        format_amount(value)
    }
}

/// Campo numérico digitado; ilegível vira 0 e a validação do DTO acusa
pub fn parse_amount(value: &str) -> f64 {
    parse_decimal(value).unwrap_or(0.0)
}

/// Inteiro não negativo ("3", " 12 "); ilegível vira 0
pub fn parse_count(value: &str) -> u32 {
    value.trim().parse::<u32>().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_text() {
        assert_eq!(opt_text("  ".into()), None);
        assert_eq!(opt_text(" Ana ".into()), Some("Ana".to_string()));
    }

    #[test]
    fn amounts_round_trip_through_the_field() {
        assert_eq!(amount_text(0.0), "");
        assert_eq!(amount_text(1234.5), "1.234,50");
        assert_eq!(parse_amount(&amount_text(1234.5)), 1234.5);
        assert_eq!(parse_amount("abc"), 0.0);
    }

    #[test]
    fn counts() {
        assert_eq!(parse_count(" 12 "), 12);
        assert_eq!(parse_count("-1"), 0);
        assert_eq!(parse_count(""), 0);
    }
}
