//! Model Store Storefront library.
//!
//! Holds the state behind the storefront screens: the signed-in identity,
//! the order list, the catalog and the cart. Screens call into
//! [`SessionStore`](services::session::SessionStore); every mutation is
//! mirrored into a [`SideStore`](db::SideStore) so the session and orders
//! survive a restart.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;

pub use services::session::{AccessDenied, SessionStore, StoreOptions};
