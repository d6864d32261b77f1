pub mod date_input;
pub mod enum_select;
pub mod page_header;
pub mod sortable_header;
pub mod stat_card;
pub mod table_checkbox;

pub use date_input::DateInput;
pub use enum_select::EnumSelect;
pub use page_header::PageHeader;
pub use sortable_header::SortableHeader;
pub use stat_card::{count_label, CardTone, StatCard};
pub use table_checkbox::{TableCheckbox, TableHeaderCheckbox};
