pub mod actions;
pub mod turn_order;
