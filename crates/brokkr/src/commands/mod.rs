//! Command implementations

pub mod new;
pub mod templates;
