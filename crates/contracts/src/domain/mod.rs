pub mod common;

pub mod a001_account_payable;
pub mod a002_product_return;
pub mod a003_production_item;
pub mod a004_marketing_task;
pub mod a005_membership;
pub mod a006_order;
