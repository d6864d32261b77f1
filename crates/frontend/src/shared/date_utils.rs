/// Formatação de datas e horas
///
/// Datas trafegam como ISO ("2024-03-15") e aparecem como DD/MM/AAAA.
use chrono::NaiveDate;

/// Data e hora ISO para DD/MM/AAAA HH:MM
/// Exemplo: "2024-03-15T14:02:26.123Z" -> "15/03/2024 14:02"
pub fn format_datetime(datetime_str: &str) -> String {
    if let Some((date_part, time_part)) = datetime_str.split_once('T') {
        if let Some((year, rest)) = date_part.split_once('-') {
            if let Some((month, day)) = rest.split_once('-') {
                let time: String = time_part.chars().take(5).collect();
                return format!("{}/{}/{} {}", day, month, year, time);
            }
        }
    }
    datetime_str.to_string()
}

/// Data ISO para DD/MM/AAAA
/// Exemplo: "2024-03-15" ou "2024-03-15T14:02:26Z" -> "15/03/2024"
pub fn format_date(date_str: &str) -> String {
    let date_part = date_str.split('T').next().unwrap_or(date_str);
    if let Some((year, rest)) = date_part.split_once('-') {
        if let Some((month, day)) = rest.split_once('-') {
            return format!("{}/{}/{}", day, month, year);
        }
    }
    date_str.to_string()
}

pub fn format_opt_date(date_str: Option<&str>) -> String {
    match date_str {
        Some(d) if !d.trim().is_empty() => format_date(d),
        _ => "—".to_string(),
    }
}

/// Data de hoje no fuso local do navegador
pub fn today() -> NaiveDate {
    let now = js_sys::Date::new_0();
    NaiveDate::from_ymd_opt(
        now.get_full_year() as i32,
        now.get_month() + 1,
        now.get_date(),
    )
    .unwrap_or_default()
}

pub fn today_iso() -> String {
    today().format("%Y-%m-%d").to_string()
}

/// "vence hoje", "vence em 3 dias", "venceu há 2 dias"
pub fn due_label(due: NaiveDate, today: NaiveDate) -> String {
    let days = (due - today).num_days();
    match days {
        0 => "vence hoje".to_string(),
        1 => "vence amanhã".to_string(),
        d if d > 1 => format!("vence em {} dias", d),
        -1 => "venceu ontem".to_string(),
        d => format!("venceu há {} dias", -d),
    }
}

/// Prazo de entrega: "entrega hoje", "entrega em 3 dias", "atrasada 2 dias"
pub fn deadline_label(deadline: NaiveDate, today: NaiveDate) -> String {
    match (deadline - today).num_days() {
        0 => "entrega hoje".to_string(),
        1 => "entrega amanhã".to_string(),
        d if d > 1 => format!("entrega em {} dias", d),
        -1 => "atrasada 1 dia".to_string(),
        d => format!("atrasada {} dias", -d),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_datetime() {
        assert_eq!(
            format_datetime("2024-03-15T14:02:26.123Z"),
            "15/03/2024 14:02"
        );
        assert_eq!(format_datetime("2024-12-31T23:59:59Z"), "31/12/2024 23:59");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-03-15"), "15/03/2024");
        assert_eq!(format_date("2024-03-15T14:02:26.123Z"), "15/03/2024");
        assert_eq!(format_opt_date(None), "—");
        assert_eq!(format_opt_date(Some("")), "—");
    }

    #[test]
    fn test_invalid_format() {
        assert_eq!(format_datetime("invalid"), "invalid");
        assert_eq!(format_date("invalid"), "invalid");
    }

    #[test]
    fn test_due_label() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        let day = |d| NaiveDate::from_ymd_opt(2024, 5, d).unwrap();
        assert_eq!(due_label(day(10), today), "vence hoje");
        assert_eq!(due_label(day(11), today), "vence amanhã");
        assert_eq!(due_label(day(15), today), "vence em 5 dias");
        assert_eq!(due_label(day(9), today), "venceu ontem");
        assert_eq!(due_label(day(1), today), "venceu há 9 dias");
    }

    #[test]
    fn test_deadline_label() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        let day = |d| NaiveDate::from_ymd_opt(2024, 5, d).unwrap();
        assert_eq!(deadline_label(day(10), today), "entrega hoje");
        assert_eq!(deadline_label(day(13), today), "entrega em 3 dias");
        assert_eq!(deadline_label(day(9), today), "atrasada 1 dia");
        assert_eq!(deadline_label(day(7), today), "atrasada 3 dias");
    }
}
