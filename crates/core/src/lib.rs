//! Model Store Core - Shared types library.
//!
//! This crate provides common types used across all Model Store components:
//! - `storefront` - Session store, catalog, cart and side-store backends
//! - `cli` - Operator tool for inspecting and driving a persisted store
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no clocks, no storage.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, roles and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
