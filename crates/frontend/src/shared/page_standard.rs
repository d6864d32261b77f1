//! Categorias de página.
//!
//! Toda página dentro de uma aba declara `id` no formato
//! `{agregado}--{categoria}` (ex.: `"a006_order--list"`) e
//! `data-page-category` com uma das constantes abaixo. Copiando o id do
//! inspetor do navegador chega-se direto ao diretório `domain/a006_order/`.

/// Lista de registros
pub const PAGE_CAT_LIST: &str = "list";

/// Formulário de um registro
pub const PAGE_CAT_DETAIL: &str = "detail";

/// Quadro (kanban / etapas)
pub const PAGE_CAT_BOARD: &str = "board";

/// Relatório somente leitura
pub const PAGE_CAT_REPORT: &str = "report";

pub const ALL_CATEGORIES: &[&str] = &[
    PAGE_CAT_LIST,
    PAGE_CAT_DETAIL,
    PAGE_CAT_BOARD,
    PAGE_CAT_REPORT,
];

/// `{agregado}--{categoria}` com a categoria conhecida
pub fn is_valid_page_id(id: &str) -> bool {
    match id.split_once("--") {
        Some((entity, category)) => !entity.is_empty() && ALL_CATEGORIES.contains(&category),
        None => false,
    }
}

pub fn page_class(category: &str) -> &'static str {
    match category {
        PAGE_CAT_DETAIL => "page page--detail",
        PAGE_CAT_BOARD => "page page--board",
        PAGE_CAT_REPORT => "page page--report",
        _ => "page",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_ids() {
        assert!(is_valid_page_id("a006_order--list"));
        assert!(is_valid_page_id("a004_marketing_task--board"));
        assert!(!is_valid_page_id("a006_order"));
        assert!(!is_valid_page_id("--list"));
        assert!(!is_valid_page_id("a006_order--dashboard"));
    }

    #[test]
    fn classes_by_category() {
        assert_eq!(page_class(PAGE_CAT_LIST), "page");
        assert_eq!(page_class(PAGE_CAT_BOARD), "page page--board");
    }
}
