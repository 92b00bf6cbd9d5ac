//! Business logic services.

pub mod auth;
pub mod counts;
pub mod dashboard;
pub mod listing;
pub mod metrics;
