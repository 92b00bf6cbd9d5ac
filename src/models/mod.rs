//! Database models and DTOs for the marketplace collections.

pub mod ad;
pub mod engineer;
pub mod filter;
pub mod pagination;
pub mod product;
pub mod shop;
pub mod user;
