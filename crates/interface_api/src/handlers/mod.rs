//! Route handlers

pub mod ai;
pub mod claims;
pub mod health;
