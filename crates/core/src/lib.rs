//! Rocket Cart Core - Shared types library.
//!
//! This crate provides the types shared by every Rocket Cart component:
//! - `rocket-cart` - Cart store, storage backends and stock oracle client
//! - `oracle-server` - Fake stock/catalog API used during development
//! - `cli` - Command-line driver for the cart store
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access,
//! no HTTP clients. Every cart mutation helper here is pure; persistence and
//! stock validation live in the `rocket-cart` crate.
//!
//! # Modules
//!
//! - [`types`] - Product IDs, catalog entries, stock records and the cart itself

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
