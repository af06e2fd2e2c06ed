//! Application command handlers, one module per feature.

pub mod registration;
