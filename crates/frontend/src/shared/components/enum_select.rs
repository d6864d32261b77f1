use leptos::prelude::*;
use thaw::*;

/// `(código, rótulo)` de um enum com `ALL`, `code()` e `label()`
#[macro_export]
macro_rules! enum_options {
    ($enum:ty) => {
        <$enum>::ALL
            .iter()
            .map(|v| (v.code(), v.label()))
            .collect::<Vec<(&'static str, &'static str)>>()
    };
}

/// Select sobre os códigos de um enum do backend
#[component]
pub fn EnumSelect(
    options: Vec<(&'static str, &'static str)>,
    value: RwSignal<String>,
    /// Primeira opção vazia ("—") para campos opcionais
    #[prop(optional)]
    allow_empty: bool,
) -> impl IntoView {
    view! {
        <Select value=value>
            {allow_empty.then(|| view! { <option value="">"—"</option> })}
            {options
                .into_iter()
                .map(|(code, label)| view! { <option value=code>{label}</option> })
                .collect_view()}
        </Select>
    }
}
