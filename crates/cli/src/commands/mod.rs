//! CLI command implementations.

pub mod order;
pub mod register;
pub mod restaurants;
