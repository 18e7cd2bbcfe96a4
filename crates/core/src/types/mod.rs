//! Core types for Rocket Cart.

pub mod cart;
pub mod id;
pub mod product;

pub use cart::{Cart, CartLine, InvalidCart};
pub use id::*;
pub use product::{CatalogEntry, StockInfo};
