//! One module per screen. Each renders into the content area laid out by
//! [`super::ui::render`].

pub mod edit_order;
pub mod order_detail;
pub mod orders;
