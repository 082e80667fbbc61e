//! # Adapters Module
//!
//! HTTP implementation of the node transport port.

pub mod http;

pub use http::HttpNodeRpc;
