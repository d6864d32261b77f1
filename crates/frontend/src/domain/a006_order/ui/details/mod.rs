mod items;
mod totals;
mod view;
mod view_model;

pub use view::OrderDetails;
