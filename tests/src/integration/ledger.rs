//! In-memory node.
//!
//! Answers `account_info`, `work_generate` and `process` the way a real node
//! would for well-formed blocks: signatures are checked, `previous` must be
//! the current frontier, and a receive must match an unreceived send. Every
//! accepted block produces a confirmation frame for the push channel.

use nw_01_accounts::{encode_address, BlockSubtype, Link, StateBlock};
use nw_02_node_rpc::{MockNodeRpc, RpcRequest, TransportError, ACCOUNT_NOT_FOUND};
use parking_lot::Mutex;
use serde_json::{json, Value};
use shared_types::{Amount, BlockHash};
use std::collections::HashMap;
use std::sync::Arc;

/// Chain head of one account.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChainHead {
    /// Latest block.
    pub frontier: BlockHash,
    /// Balance after the latest block.
    pub balance: Amount,
    /// Representative address.
    pub representative: String,
}

#[derive(Debug, Default)]
struct LedgerState {
    chains: HashMap<String, ChainHead>,
    receivable: HashMap<BlockHash, (String, Amount)>,
    confirmations: Vec<Value>,
}

/// Shared ledger behind a [`MockNodeRpc`].
#[derive(Debug, Default)]
pub struct SimulatedLedger {
    state: Mutex<LedgerState>,
}

impl SimulatedLedger {
    /// Empty ledger.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Create an account chain out of band.
    pub fn fund(&self, address: &str, frontier: BlockHash, balance: Amount, representative: &str) {
        self.state.lock().chains.insert(
            address.to_string(),
            ChainHead {
                frontier,
                balance,
                representative: representative.to_string(),
            },
        );
    }

    /// Chain head of `address`, if opened.
    pub fn head(&self, address: &str) -> Option<ChainHead> {
        self.state.lock().chains.get(address).cloned()
    }

    /// Sends not yet received.
    pub fn receivable_count(&self) -> usize {
        self.state.lock().receivable.len()
    }

    /// Take the confirmation frames produced so far.
    pub fn drain_confirmations(&self) -> Vec<String> {
        std::mem::take(&mut self.state.lock().confirmations)
            .into_iter()
            .map(|frame| frame.to_string())
            .collect()
    }

    /// RPC transport backed by this ledger.
    pub fn node(self: &Arc<Self>) -> MockNodeRpc {
        let ledger = Arc::clone(self);
        MockNodeRpc::with_handler(move |request| ledger.handle(request))
    }

    fn handle(&self, request: &RpcRequest) -> Result<Value, TransportError> {
        match request {
            RpcRequest::AccountInfo { account, .. } => Ok(self.account_info(account)),
            RpcRequest::WorkGenerate { hash, .. } => {
                Ok(json!({ "work": "0000000000000001", "hash": hash }))
            }
            RpcRequest::Process { block, .. } => Ok(self.process(block)),
            other => Ok(json!({ "error": format!("unsupported action {}", other.action()) })),
        }
    }

    fn account_info(&self, address: &str) -> Value {
        match self.state.lock().chains.get(address) {
            Some(head) => json!({
                "frontier": head.frontier.encode_hex(),
                "balance": head.balance.to_raw_string(),
                "representative": head.representative,
            }),
            None => json!({ "error": ACCOUNT_NOT_FOUND }),
        }
    }

    fn process(&self, block: &StateBlock) -> Value {
        if block.work.is_none() {
            return json!({ "error": "Block work is missing" });
        }
        if block.verify().is_err() {
            return json!({ "error": "Bad signature" });
        }

        let mut state = self.state.lock();
        let address = encode_address(&block.account);
        let previous = state.chains.get(&address).cloned();

        let expected_previous = previous
            .as_ref()
            .map(|head| head.frontier)
            .unwrap_or_else(BlockHash::zero);
        if block.previous != expected_previous {
            return json!({ "error": "Fork" });
        }
        let prior_balance = previous
            .as_ref()
            .map(|head| head.balance)
            .unwrap_or_default();

        let (amount, link_as_account) = match (&block.subtype, &block.link) {
            (BlockSubtype::Send, Link::Destination(destination)) => {
                let Ok(amount) = prior_balance.checked_sub(&block.balance) else {
                    return json!({ "error": "Balance increased on send" });
                };
                let destination = encode_address(destination);
                state
                    .receivable
                    .insert(block.hash(), (destination.clone(), amount));
                (amount, destination)
            }
            (BlockSubtype::Open | BlockSubtype::Receive, Link::SourceBlock(source)) => {
                let Some((destination, amount)) = state.receivable.get(source).cloned() else {
                    return json!({ "error": "Unreceivable" });
                };
                if destination != address
                    || prior_balance.checked_add(&amount).ok() != Some(block.balance)
                {
                    return json!({ "error": "Balance mismatch" });
                }
                state.receivable.remove(source);
                (amount, encode_address(source))
            }
            (BlockSubtype::Change, Link::None) if block.balance == prior_balance => {
                (Amount::default(), encode_address(&BlockHash::zero()))
            }
            _ => return json!({ "error": "Invalid block" }),
        };

        let hash = block.hash();
        state.chains.insert(
            address.clone(),
            ChainHead {
                frontier: hash,
                balance: block.balance,
                representative: encode_address(&block.representative),
            },
        );
        state.confirmations.push(json!({
            "topic": "confirmation",
            "message": {
                "account": address,
                "amount": amount.to_raw_string(),
                "hash": hash.encode_hex(),
                "confirmation_type": "active_quorum",
                "block": {
                    "type": "state",
                    "subtype": block.subtype.as_str(),
                    "link_as_account": link_as_account,
                }
            }
        }));

        json!({ "hash": hash.encode_hex() })
    }
}
