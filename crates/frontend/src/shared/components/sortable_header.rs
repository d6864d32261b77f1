use crate::shared::list_utils::{get_sort_class, get_sort_indicator, SortState};
use leptos::prelude::*;

/// `<th>` que ordena a lista pelo campo ao ser clicado
#[component]
pub fn SortableHeader(
    label: &'static str,
    field: &'static str,
    sort: RwSignal<SortState>,
    /// Colunas de valor alinhadas à direita
    #[prop(optional)]
    numeric: bool,
) -> impl IntoView {
    view! {
        <th
            class="table__header-cell table__header-cell--sortable"
            class:table__header-cell--numeric=numeric
            on:click=move |_| sort.update(|s| s.toggle(field))
        >
            {label}
            <span class=move || sort.with(|s| get_sort_class(&s.field, field))>
                {move || sort.with(|s| get_sort_indicator(&s.field, field, s.ascending))}
            </span>
        </th>
    }
}
