//! Business logic services for storefront.
//!
//! # Services
//!
//! - `auth` - Identity provider and registration checks
//! - `ids` - Creation-time ID allocation
//! - `session` - The session store: signed-in identity and order list

pub mod auth;
pub mod ids;
pub mod session;
