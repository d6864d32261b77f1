use crate::layout::tabs::tab_labels::tab_label_for_key;
use leptos::prelude::*;
use std::collections::HashMap;
use web_sys::window;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub key: String,
    pub title: String,
    /// Formulário com alterações não salvas
    pub dirty: bool,
}

impl Tab {
    pub fn new(key: &str, title: &str) -> Self {
        Self {
            key: key.to_string(),
            title: title.to_string(),
            dirty: false,
        }
    }
}

/// Abas abertas e a aba ativa; o estado de navegação do app inteiro
#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub opened: RwSignal<Vec<Tab>>,
    pub active: RwSignal<Option<String>>,
    pub left_open: RwSignal<bool>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            opened: RwSignal::new(vec![]),
            active: RwSignal::new(None),
            left_open: RwSignal::new(true),
        }
    }

    /// Restaura a aba de `?active=` e mantém a URL em dia com a aba ativa
    pub fn init_router_integration(&self) {
        let search = current_search();
        if let Some(key) = active_from_query(&search) {
            self.open_tab(&key, &tab_label_for_key(&key));
        }

        let this = *self;
        Effect::new(move |_| {
            let Some(key) = this.active.get() else {
                return;
            };
            let new_url = query_for_active(&key);
            if current_search() == new_url {
                return;
            }
            let replaced = window()
                .and_then(|w| w.history().ok())
                .map(|h| h.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&new_url)));
            if !matches!(replaced, Some(Ok(()))) {
                log::warn!("could not update URL to {}", new_url);
            }
        });
    }

    pub fn open_tab(&self, key: &str, title: &str) {
        log::debug!("open_tab: key='{}', title='{}'", key, title);
        self.opened.update(|tabs| {
            open_into(tabs, key, title);
        });
        self.activate_tab(key);
    }

    pub fn activate_tab(&self, key: &str) {
        self.active.set(Some(key.to_string()));
    }

    pub fn update_tab_title(&self, key: &str, title: &str) {
        self.opened.update(|tabs| {
            if let Some(tab) = tabs.iter_mut().find(|t| t.key == key) {
                tab.title = title.to_string();
            }
        });
    }

    pub fn set_dirty(&self, key: &str, dirty: bool) {
        self.opened.update(|tabs| {
            if let Some(tab) = tabs.iter_mut().find(|t| t.key == key) {
                tab.dirty = dirty;
            }
        });
    }

    pub fn close_tab(&self, key: &str) {
        log::debug!("close_tab: key='{}'", key);
        let active = self.active.get_untracked();
        let mut next = active.clone();
        self.opened.update(|tabs| {
            next = close_in(tabs, key, active.as_deref());
        });
        if next != active {
            self.active.set(next);
        }
    }

    pub fn toggle_left(&self) {
        self.left_open.update(|v| *v = !*v);
    }
}

pub fn use_app_context() -> AppGlobalContext {
    expect_context::<AppGlobalContext>()
}

fn current_search() -> String {
    window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default()
}

/// Abre a aba se ainda não existe; devolve true quando abriu
fn open_into(tabs: &mut Vec<Tab>, key: &str, title: &str) -> bool {
    if tabs.iter().any(|t| t.key == key) {
        return false;
    }
    tabs.push(Tab::new(key, title));
    true
}

/// Fecha a aba e devolve a nova aba ativa. Fechando a ativa, ativa a vizinha
/// da direita (ou a da esquerda, se era a última).
fn close_in(tabs: &mut Vec<Tab>, key: &str, active: Option<&str>) -> Option<String> {
    let Some(pos) = tabs.iter().position(|t| t.key == key) else {
        return active.map(str::to_string);
    };
    tabs.remove(pos);
    if active != Some(key) {
        return active.map(str::to_string);
    }
    tabs.get(pos)
        .or_else(|| tabs.last())
        .map(|t| t.key.clone())
}

fn active_from_query(search: &str) -> Option<String> {
    let params: HashMap<String, String> =
        serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default();
    params.get("active").filter(|k| !k.is_empty()).cloned()
}

fn query_for_active(key: &str) -> String {
    let params = HashMap::from([("active".to_string(), key.to_string())]);
    format!("?{}", serde_qs::to_string(&params).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tabs(keys: &[&str]) -> Vec<Tab> {
        keys.iter().map(|k| Tab::new(k, k)).collect()
    }

    #[test]
    fn open_is_idempotent() {
        let mut t = tabs(&["a006_order"]);
        assert!(!open_into(&mut t, "a006_order", "Pedidos"));
        assert!(open_into(&mut t, "a001_account_payable", "Contas"));
        assert_eq!(t.len(), 2);
    }

    #[test]
    fn closing_active_tab_activates_neighbour() {
        let mut t = tabs(&["a", "b", "c"]);
        assert_eq!(close_in(&mut t, "b", Some("b")), Some("c".to_string()));
        assert_eq!(close_in(&mut t, "c", Some("c")), Some("a".to_string()));
        assert_eq!(close_in(&mut t, "a", Some("a")), None);
    }

    #[test]
    fn closing_other_tab_keeps_active() {
        let mut t = tabs(&["a", "b"]);
        assert_eq!(close_in(&mut t, "a", Some("b")), Some("b".to_string()));
        assert_eq!(close_in(&mut t, "zz", Some("b")), Some("b".to_string()));
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn active_key_survives_the_query_string() {
        let query = query_for_active("a006_order_detail_new");
        assert_eq!(query, "?active=a006_order_detail_new");
        assert_eq!(
            active_from_query(&query),
            Some("a006_order_detail_new".to_string())
        );
        assert_eq!(active_from_query(""), None);
        assert_eq!(active_from_query("?active="), None);
    }
}
