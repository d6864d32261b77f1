//! Abas: conteúdo (`page`), chave → página (`registry`) e títulos (`tab_labels`)

pub mod page;
pub mod registry;
pub mod tab_labels;

pub use page::TabPage;
pub use tab_labels::tab_label_for_key;
