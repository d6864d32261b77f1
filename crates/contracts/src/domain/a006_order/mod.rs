pub mod aggregate;
pub mod calculation;
pub mod pricing;
