//! Domain models for the storefront.

pub mod order;
pub mod session;
pub mod user;

pub use order::{LineItem, Order, ShippingContact, StatusSummary};
pub use user::Identity;
