use crate::shared::icons::icon;
use crate::shared::number_format::format_money;
use leptos::prelude::*;

/// Cor do cartão de resumo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardTone {
    Neutral,
    Success,
    Warning,
    Error,
}

impl CardTone {
    fn class(&self) -> &'static str {
        match self {
            CardTone::Neutral => "stat-card",
            CardTone::Success => "stat-card stat-card--success",
            CardTone::Warning => "stat-card stat-card--warning",
            CardTone::Error => "stat-card stat-card--error",
        }
    }
}

/// "3 contas", "1 conta"
pub fn count_label(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("1 {singular}")
    } else {
        format!("{count} {plural}")
    }
}

/// Cartão de resumo com valor em reais e contagem
#[component]
pub fn StatCard(
    #[prop(into)] label: String,
    icon_name: &'static str,
    #[prop(into)] amount: Signal<f64>,
    #[prop(into)] subtitle: Signal<String>,
    tone: CardTone,
) -> impl IntoView {
    view! {
        <div class=tone.class()>
            <div class="stat-card__header">
                <span class="stat-card__icon">{icon(icon_name)}</span>
                <span class="stat-card__label">{label}</span>
            </div>
            <div class="stat-card__value">{move || format_money(amount.get())}</div>
            <div class="stat-card__subtitle">{move || subtitle.get()}</div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pluralizes_counts() {
        assert_eq!(count_label(0, "conta", "contas"), "0 contas");
        assert_eq!(count_label(1, "conta", "contas"), "1 conta");
        assert_eq!(count_label(4, "associado", "associados"), "4 associados");
    }
}
