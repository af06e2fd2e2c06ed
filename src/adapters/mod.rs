//! Adapters - infrastructure implementations of the ports.

pub mod clock;
pub mod http;
pub mod postgres;
pub mod security;
