use crate::shared::list_utils::SortState;
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub struct ProductReturnListState {
    pub sort: RwSignal<SortState>,
    pub status_filter: RwSignal<String>,
    pub search: RwSignal<String>,
    /// Esconde reembolsadas e recusadas
    pub only_open: RwSignal<bool>,
}

pub fn create_state() -> ProductReturnListState {
    ProductReturnListState {
        sort: RwSignal::new(SortState::new("request_date", false)),
        status_filter: RwSignal::new(String::new()),
        search: RwSignal::new(String::new()),
        only_open: RwSignal::new(true),
    }
}
