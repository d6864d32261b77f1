use leptos::prelude::*;
use std::collections::HashSet;

/// Célula `<td>` com checkbox de seleção da linha.
///
/// O clique não propaga para a linha (que abre o formulário).
#[component]
pub fn TableCheckbox(checked: Signal<bool>, on_change: Callback<bool>) -> impl IntoView {
    view! {
        <td class="table__cell table__cell--checkbox" on:click=|e| e.stop_propagation()>
            <input
                type="checkbox"
                class="table__checkbox"
                prop:checked=checked
                on:change=move |ev| on_change.run(event_target_checked(&ev))
            />
        </td>
    }
}

/// Estado do checkbox "selecionar todos" do cabeçalho
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectAllState {
    None,
    Some,
    All,
}

pub fn select_all_state(visible_ids: &[String], selected: &HashSet<String>) -> SelectAllState {
    let count = visible_ids.iter().filter(|id| selected.contains(*id)).count();
    match count {
        0 => SelectAllState::None,
        n if n == visible_ids.len() => SelectAllState::All,
        _ => SelectAllState::Some,
    }
}

/// `<th>` com checkbox que marca/desmarca todas as linhas visíveis
#[component]
pub fn TableHeaderCheckbox(
    #[prop(into)] visible_ids: Signal<Vec<String>>,
    selected: RwSignal<HashSet<String>>,
) -> impl IntoView {
    let state = Memo::new(move |_| {
        let ids = visible_ids.get();
        selected.with(|sel| select_all_state(&ids, sel))
    });

    let on_change = move |ev: leptos::ev::Event| {
        let check_all = event_target_checked(&ev);
        let ids = visible_ids.get_untracked();
        selected.update(|sel| {
            for id in ids {
                if check_all {
                    sel.insert(id);
                } else {
                    sel.remove(&id);
                }
            }
        });
    };

    view! {
        <th class="table__header-cell table__header-cell--checkbox">
            <input
                type="checkbox"
                class="table__checkbox"
                prop:checked=move || state.get() == SelectAllState::All
                prop:indeterminate=move || state.get() == SelectAllState::Some
                on:change=on_change
            />
        </th>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn header_state_follows_selection() {
        let visible = ids(&["a", "b"]);
        let mut sel = HashSet::new();
        assert_eq!(select_all_state(&visible, &sel), SelectAllState::None);
        sel.insert("a".to_string());
        assert_eq!(select_all_state(&visible, &sel), SelectAllState::Some);
        sel.insert("b".to_string());
        sel.insert("zz".to_string());
        assert_eq!(select_all_state(&visible, &sel), SelectAllState::All);
        assert_eq!(select_all_state(&[], &sel), SelectAllState::None);
    }
}
