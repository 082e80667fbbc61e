//! # Request Builder
//!
//! Pure construction of request bodies for one acting account. Nothing here
//! touches the network; `block_create` signs locally so the private key never
//! leaves the process.

use crate::domain::{RequestError, RpcRequest};
use nw_01_accounts::{decode_address, Account, BlockSubtype, Link, StateBlock, Work};
use serde::Serialize;
use shared_types::{Amount, BlockHash, Uint256};

/// A locally signed block and its hash.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CreatedBlock {
    /// Block, with work if it was supplied.
    pub block: StateBlock,
    /// Block hash.
    pub hash: BlockHash,
}

/// Builds requests on behalf of one account.
#[derive(Clone, Copy, Debug)]
pub struct RequestBuilder<'a> {
    account: &'a Account,
}

impl<'a> RequestBuilder<'a> {
    /// Builder for `account`.
    pub fn new(account: &'a Account) -> Self {
        Self { account }
    }

    /// The acting account.
    pub fn account(&self) -> &'a Account {
        self.account
    }

    /// `account_info`, including the representative.
    pub fn account_info(&self) -> RpcRequest {
        RpcRequest::AccountInfo {
            account: self.account.address().to_string(),
            representative: true,
        }
    }

    /// `account_balance`.
    pub fn account_balance(&self) -> RpcRequest {
        RpcRequest::AccountBalance {
            account: self.account.address().to_string(),
        }
    }

    /// `pending`. A zero count means no limit; the threshold is a raw amount.
    pub fn pending(&self, count: u32, threshold: Option<&str>) -> Result<RpcRequest, RequestError> {
        let threshold = threshold
            .map(|raw| Amount::from_raw_str(raw).map(|amount| amount.to_raw_string()))
            .transpose()?;
        Ok(RpcRequest::Pending {
            account: self.account.address().to_string(),
            count: (count > 0).then(|| count.to_string()),
            threshold,
        })
    }

    /// `process` for a block with work attached.
    pub fn process(&self, block: StateBlock) -> RpcRequest {
        RpcRequest::Process {
            json_block: true,
            subtype: block.subtype,
            block,
        }
    }

    /// `work_generate` for a root hash.
    pub fn work_generate(
        &self,
        root: &Uint256,
        difficulty: Option<&str>,
        use_peers: bool,
    ) -> RpcRequest {
        RpcRequest::WorkGenerate {
            hash: root.encode_hex(),
            difficulty: difficulty.map(str::to_string),
            use_peers,
        }
    }

    /// Build and sign a block locally. `representative` is an address.
    pub fn block_create(
        &self,
        subtype: BlockSubtype,
        previous: BlockHash,
        representative: &str,
        balance: Amount,
        link: Link,
        work: Option<Work>,
    ) -> Result<CreatedBlock, RequestError> {
        let representative = decode_address(representative)?;
        let mut block =
            self.account
                .create_block(subtype, previous, representative, balance, link)?;
        block.work = work;
        let hash = block.hash();
        Ok(CreatedBlock { block, hash })
    }
}
