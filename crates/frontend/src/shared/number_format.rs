//! Formatação de números no padrão brasileiro (1.234,56)

/// Formata com separador de milhar "." e vírgula decimal
///
/// # Exemplos
///
/// ```
/// # use frontend::shared::number_format::format_number_with_decimals;
/// assert_eq!(format_number_with_decimals(1234.567, 2), "1.234,57");
/// ```
pub fn format_number_with_decimals(value: f64, decimals: u8) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    let formatted = match decimals {
        0 => format!("{:.0}", value),
        1 => format!("{:.1}", value),
        2 => format!("{:.2}", value),
        3 => format!("{:.3}", value),
        _ => format!("{:.2}", value),
    };

    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted.as_str()),
    };
    let (integer_part, decimal_part) = match unsigned.split_once('.') {
        Some((i, d)) => (i, Some(d)),
        None => (unsigned, None),
    };

    let mut grouped = String::new();
    for (i, c) in integer_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    let grouped: String = grouped.chars().rev().collect();

    // "-0,00" vira "0,00"
    let is_zero = unsigned.chars().all(|c| c == '0' || c == '.');
    let sign = if is_zero { "" } else { sign };

    match decimal_part {
        Some(d) => format!("{sign}{grouped},{d}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Valor em reais: "R$ 1.234,56"
pub fn format_money(value: f64) -> String {
    format!("R$ {}", format_number_with_decimals(value, 2))
}

/// Valor sem símbolo, para campos de formulário: "1.234,56"
pub fn format_amount(value: f64) -> String {
    format_number_with_decimals(value, 2)
}

/// Percentual: "12,5%" (sem zeros à direita)
pub fn format_percent(value: f64) -> String {
    let text = format_number_with_decimals(value, 2);
    let trimmed = if text.contains(',') {
        text.trim_end_matches('0').trim_end_matches(',')
    } else {
        text.as_str()
    };
    format!("{trimmed}%")
}

pub fn format_number_int(value: f64) -> String {
    format_number_with_decimals(value, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(1234.56), "R$ 1.234,56");
        assert_eq!(format_money(1234567.89), "R$ 1.234.567,89");
        assert_eq!(format_money(0.0), "R$ 0,00");
        assert_eq!(format_money(-1234.56), "R$ -1.234,56");
        assert_eq!(format_money(-0.001), "R$ 0,00");
    }

    #[test]
    fn test_format_number_with_decimals() {
        assert_eq!(format_number_with_decimals(1234.567, 0), "1.235");
        assert_eq!(format_number_with_decimals(1234.567, 1), "1.234,6");
        assert_eq!(format_number_with_decimals(1234.567, 2), "1.234,57");
        assert_eq!(format_number_with_decimals(1234.567, 3), "1.234,567");
        assert_eq!(format_number_with_decimals(f64::NAN, 2), "0,00");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(12.5), "12,5%");
        assert_eq!(format_percent(10.0), "10%");
        assert_eq!(format_percent(5.99), "5,99%");
    }

    #[test]
    fn test_format_number_int() {
        assert_eq!(format_number_int(1234567.0), "1.234.567");
        assert_eq!(format_number_int(-1234.0), "-1.234");
    }
}
