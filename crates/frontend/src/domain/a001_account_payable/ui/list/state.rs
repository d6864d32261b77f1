use crate::shared::list_utils::SortState;
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub struct AccountPayableListState {
    pub sort: RwSignal<SortState>,
    /// Código do status efetivo; vazio mostra todos menos os cancelados
    pub status_filter: RwSignal<String>,
    pub search: RwSignal<String>,
}

pub fn create_state() -> AccountPayableListState {
    AccountPayableListState {
        sort: RwSignal::new(SortState::new("due_date", true)),
        status_filter: RwSignal::new(String::new()),
        search: RwSignal::new(String::new()),
    }
}
