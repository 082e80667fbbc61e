//! # Ports Module
//!
//! Hexagonal architecture ports (outbound node transport).

pub mod outbound;

pub use outbound::*;
