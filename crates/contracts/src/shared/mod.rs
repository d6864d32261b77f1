pub mod i18n;
pub mod money;
pub mod validation;
