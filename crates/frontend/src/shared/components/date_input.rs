use leptos::prelude::*;

/// Campo de data nativo; o valor é sempre `YYYY-MM-DD` e o navegador mostra
/// no formato local (DD/MM/AAAA em pt-BR)
#[component]
pub fn DateInput(value: RwSignal<String>, #[prop(optional)] min: &'static str) -> impl IntoView {
    view! {
        <input
            type="date"
            class="form__input form__input--date"
            min=(!min.is_empty()).then_some(min)
            prop:value=move || value.get()
            on:input=move |ev| value.set(event_target_value(&ev))
        />
    }
}
