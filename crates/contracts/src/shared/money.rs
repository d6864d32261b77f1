//! Arredondamento e leitura de valores monetários (R$)

/// Arredonda para centavos
pub fn round2(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let rounded = (value * 100.0).round() / 100.0;
    // evita "-0.00" na tela
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Valor correspondente a `percent` % de `base`
pub fn value_of_percent(base: f64, percent: f64) -> f64 {
    round2(base * percent / 100.0)
}

/// Percentual que `value` representa de `base`; 0 quando a base é zero
pub fn percent_of_value(base: f64, value: f64) -> f64 {
    if base.abs() < f64::EPSILON {
        return 0.0;
    }
    round2(value / base * 100.0)
}

/// Lê um número digitado no formulário.
///
/// Aceita "1234.56", "1234,56" e "1.234,56". Vazio é `None`.
pub fn parse_decimal(input: &str) -> Option<f64> {
    let cleaned: String = input
        .trim()
        .trim_start_matches("R$")
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    let normalized = if cleaned.contains(',') {
        cleaned.replace('.', "").replace(',', ".")
    } else {
        cleaned
    };
    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_cents() {
        assert_eq!(round2(10.005_1), 10.01);
        assert_eq!(round2(2.344), 2.34);
        assert_eq!(round2(-0.001), 0.0);
        assert_eq!(round2(f64::INFINITY), 0.0);
    }

    #[test]
    fn percent_conversions() {
        assert_eq!(value_of_percent(250.0, 10.0), 25.0);
        assert_eq!(percent_of_value(250.0, 25.0), 10.0);
        assert_eq!(percent_of_value(0.0, 25.0), 0.0);
    }

    #[test]
    fn parses_brazilian_and_plain_input() {
        assert_eq!(parse_decimal("1234.56"), Some(1234.56));
        assert_eq!(parse_decimal("1234,56"), Some(1234.56));
        assert_eq!(parse_decimal("1.234,56"), Some(1234.56));
        assert_eq!(parse_decimal("R$ 89,90"), Some(89.9));
        assert_eq!(parse_decimal("  "), None);
        assert_eq!(parse_decimal("abc"), None);
    }
}
