use leptos::prelude::*;

/// Cabeçalho das páginas de lista: título, subtítulo opcional e ações
#[component]
pub fn PageHeader(
    #[prop(into)] title: String,
    #[prop(optional, into)] subtitle: MaybeProp<String>,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="page__header">
            <div class="page__header-text">
                <h1 class="page__title">{title}</h1>
                {move || subtitle.get().map(|s| view! { <div class="page__subtitle">{s}</div> })}
            </div>
            <div class="page__actions">{children()}</div>
        </div>
    }
}
