//! # NW-02 Node RPC
//!
//! Request bodies, reply parsing and the transport port for the ledger node.
//!
//! **Subsystem ID:** 2  
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Protocol
//!
//! | Action | Fields | Reply |
//! |--------|--------|-------|
//! | `account_info` | `account`, `representative` | `frontier`, `balance`, `representative` |
//! | `account_balance` | `account` | `balance`, `pending` |
//! | `pending` | `account`, `count?`, `threshold?` | `blocks` |
//! | `work_generate` | `hash`, `difficulty?`, `use_peers?` | `work` |
//! | `process` | `json_block`, `subtype`, `block` | `hash` |
//!
//! Any reply carrying an `"error"` field is a node-side failure.
//!
//! ## Module Structure
//!
//! ```text
//! nw-02-node-rpc/
//! ├── domain/          # RpcRequest, reply types, NodeConnection, errors
//! ├── builder.rs       # RequestBuilder (pure, signs blocks locally)
//! ├── ports/           # NodeRpc, MockNodeRpc
//! └── adapters/        # HttpNodeRpc (reqwest)
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod builder;
pub mod domain;
pub mod ports;

// Re-exports
pub use adapters::HttpNodeRpc;
pub use builder::{CreatedBlock, RequestBuilder};
pub use domain::{
    AccountBalanceReply, AccountInfoReply, BasicAuth, ConfigError, Endpoint, NodeConnection,
    PendingBlock, PendingReply, ProcessReply, ReplyError, RequestError, RpcRequest,
    TransportError, WorkReply, ACCOUNT_NOT_FOUND,
};
pub use ports::{MockNodeRpc, NodeRpc};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
