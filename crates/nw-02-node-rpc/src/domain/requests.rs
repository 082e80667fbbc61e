//! # Node RPC Requests
//!
//! Every request is a JSON object `{"action": <name>, ...fields}`. Optional
//! fields are omitted rather than sent empty; flags use the node's `"true"`
//! string convention except `json_block`, which is a boolean.

use nw_01_accounts::{BlockSubtype, StateBlock};
use serde::{Serialize, Serializer};

/// Where a request should be sent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Ledger node RPC.
    Node,
    /// Work server (falls back to the node when none is configured).
    Work,
}

/// A node RPC request body.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum RpcRequest {
    /// Frontier, balance and representative of an account.
    AccountInfo {
        /// Account address.
        account: String,
        /// Ask the node to include the representative.
        #[serde(serialize_with = "flag", skip_serializing_if = "is_false")]
        representative: bool,
    },

    /// Confirmed and pending balance.
    AccountBalance {
        /// Account address.
        account: String,
    },

    /// Receivable send blocks for an account.
    Pending {
        /// Account address.
        account: String,
        /// Maximum number of blocks, as a decimal string.
        #[serde(skip_serializing_if = "Option::is_none")]
        count: Option<String>,
        /// Minimum amount in raw, as a decimal string.
        #[serde(skip_serializing_if = "Option::is_none")]
        threshold: Option<String>,
    },

    /// Publish a signed block.
    Process {
        /// Always `true`: the block is sent as a JSON object.
        json_block: bool,
        /// How the node should interpret the block.
        subtype: BlockSubtype,
        /// The block, with work attached.
        block: StateBlock,
    },

    /// Proof-of-work for a root hash.
    WorkGenerate {
        /// Root: previous block hash, or the account key for `open`.
        hash: String,
        /// Difficulty threshold, 16 hex digits.
        #[serde(skip_serializing_if = "Option::is_none")]
        difficulty: Option<String>,
        /// Let the node distribute work to its peers.
        #[serde(serialize_with = "flag", skip_serializing_if = "is_false")]
        use_peers: bool,
    },
}

impl RpcRequest {
    /// The `action` value.
    pub fn action(&self) -> &'static str {
        match self {
            RpcRequest::AccountInfo { .. } => "account_info",
            RpcRequest::AccountBalance { .. } => "account_balance",
            RpcRequest::Pending { .. } => "pending",
            RpcRequest::Process { .. } => "process",
            RpcRequest::WorkGenerate { .. } => "work_generate",
        }
    }

    /// Work requests may go to a dedicated work server.
    pub fn endpoint(&self) -> Endpoint {
        match self {
            RpcRequest::WorkGenerate { .. } => Endpoint::Work,
            _ => Endpoint::Node,
        }
    }

    /// JSON body.
    pub fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

fn flag<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(if *value { "true" } else { "false" })
}

fn is_false(value: &bool) -> bool {
    !*value
}
