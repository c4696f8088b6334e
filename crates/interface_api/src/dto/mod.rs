//! Request and response bodies

pub mod ai;
pub mod claims;

pub use ai::*;
pub use claims::*;
