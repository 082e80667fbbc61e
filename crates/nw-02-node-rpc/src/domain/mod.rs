//! # Domain Module
//!
//! Request bodies, reply parsing and errors for the node RPC.

pub mod config;
pub mod errors;
pub mod replies;
pub mod requests;

pub use config::{BasicAuth, NodeConnection};
pub use errors::{ConfigError, ReplyError, RequestError, TransportError};
pub use replies::{
    check_reply, node_error, AccountBalanceReply, AccountInfoReply, PendingBlock, PendingReply,
    ProcessReply, WorkReply, ACCOUNT_NOT_FOUND,
};
pub use requests::{Endpoint, RpcRequest};
