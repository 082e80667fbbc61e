//! # State Blocks
//!
//! A state block carries the full account state after one transition. The
//! subtype is not part of the hash; it only tells the node how to interpret
//! the link and balance change.
//!
//! ## Link Contract
//!
//! | Subtype | Link |
//! |---------|------|
//! | `send` | destination public key |
//! | `open`, `receive` | hash of the source send block (non-zero) |
//! | `change` | zero |

use super::errors::AccountError;
use crate::algorithms::{encode_address, state_block_hash};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use shared_types::{Amount, BlockHash, PublicKey, Signature, Uint256};
use std::fmt;

/// Block type string on the wire.
pub const STATE_BLOCK_TYPE_NAME: &str = "state";

/// Kind of state transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockSubtype {
    /// First block of an account (previous is zero).
    Open,
    /// Balance decreases; link is the destination.
    Send,
    /// Balance increases; link is the source block.
    Receive,
    /// Representative change only.
    Change,
}

impl BlockSubtype {
    /// Wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockSubtype::Open => "open",
            BlockSubtype::Send => "send",
            BlockSubtype::Receive => "receive",
            BlockSubtype::Change => "change",
        }
    }

    /// `Open` when receiving into an account with no previous block.
    pub fn for_receive(previous: &BlockHash) -> Self {
        if previous.is_zero() {
            BlockSubtype::Open
        } else {
            BlockSubtype::Receive
        }
    }
}

impl fmt::Display for BlockSubtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The 32-byte link field, typed by what it refers to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Link {
    /// Zero link (`change` blocks).
    #[default]
    None,
    /// Destination account of a send.
    Destination(PublicKey),
    /// Send block being received.
    SourceBlock(BlockHash),
}

impl Link {
    /// The 32 bytes that enter the block hash.
    pub fn as_uint(&self) -> Uint256 {
        match self {
            Link::None => Uint256::zero(),
            Link::Destination(key) => *key,
            Link::SourceBlock(hash) => *hash,
        }
    }

    /// Check the link against the subtype it is used with.
    pub fn validate_for(&self, subtype: BlockSubtype) -> Result<(), AccountError> {
        let invalid = |reason: &str| {
            Err(AccountError::InvalidLink {
                subtype,
                reason: reason.to_string(),
            })
        };
        match (subtype, self) {
            (BlockSubtype::Send, Link::Destination(_)) => Ok(()),
            (BlockSubtype::Send, _) => invalid("send link must be a destination account"),
            (BlockSubtype::Open | BlockSubtype::Receive, Link::SourceBlock(hash)) => {
                if hash.is_zero() {
                    invalid("source block hash is zero")
                } else {
                    Ok(())
                }
            }
            (BlockSubtype::Open | BlockSubtype::Receive, _) => {
                invalid("link must be a source block hash")
            }
            (BlockSubtype::Change, Link::None) => Ok(()),
            (BlockSubtype::Change, _) => invalid("change link must be zero"),
        }
    }
}

/// Proof-of-work nonce, 16 hex digits on the wire.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Work(pub u64);

impl Work {
    /// Parse up to 16 hex digits.
    pub fn decode_hex(text: &str) -> Result<Self, AccountError> {
        if text.is_empty() || text.len() > 16 || !text.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(AccountError::InvalidEncoding(format!(
                "work must be 1-16 hex digits, got {:?}",
                text
            )));
        }
        u64::from_str_radix(text, 16)
            .map(Work)
            .map_err(|e| AccountError::InvalidEncoding(format!("work {text:?}: {e}")))
    }

    /// Lowercase, zero-padded 16 hex digits.
    pub fn encode_hex(&self) -> String {
        format!("{:016x}", self.0)
    }
}

impl fmt::Display for Work {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode_hex())
    }
}

/// A signed state block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateBlock {
    /// How the node should interpret the transition.
    pub subtype: BlockSubtype,
    /// Owning account.
    pub account: PublicKey,
    /// Frontier before this block (zero for `open`).
    pub previous: BlockHash,
    /// Delegated representative.
    pub representative: PublicKey,
    /// Balance after this block.
    pub balance: Amount,
    /// Destination or source, see [`Link`].
    pub link: Link,
    /// Signature over [`StateBlock::hash`].
    pub signature: Signature,
    /// Attached after work generation.
    pub work: Option<Work>,
}

impl StateBlock {
    /// Block hash (independent of signature and work).
    pub fn hash(&self) -> BlockHash {
        state_block_hash(
            &self.account,
            &self.previous,
            &self.representative,
            &self.balance,
            &self.link.as_uint(),
        )
    }

    /// Root used for work generation: previous, or the account for `open`.
    pub fn work_root(&self) -> Uint256 {
        if self.previous.is_zero() {
            self.account
        } else {
            self.previous
        }
    }

    /// Check the signature against the account key.
    pub fn verify(&self) -> Result<(), AccountError> {
        shared_crypto::verify(&self.account, self.hash().as_bytes(), &self.signature)?;
        Ok(())
    }

    /// Copy with work attached.
    pub fn with_work(mut self, work: Work) -> Self {
        self.work = Some(work);
        self
    }
}

impl Serialize for StateBlock {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let is_send = matches!(self.link, Link::Destination(_));
        let len = 7 + usize::from(is_send) + usize::from(self.work.is_some());
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry("type", STATE_BLOCK_TYPE_NAME)?;
        map.serialize_entry("account", &encode_address(&self.account))?;
        map.serialize_entry("previous", &self.previous.encode_hex())?;
        map.serialize_entry("representative", &encode_address(&self.representative))?;
        map.serialize_entry("balance", &self.balance.to_raw_string())?;
        map.serialize_entry("link", &self.link.as_uint().encode_hex())?;
        if let Link::Destination(key) = &self.link {
            map.serialize_entry("link_as_account", &encode_address(key))?;
        }
        map.serialize_entry("signature", &self.signature.encode_hex())?;
        if let Some(work) = &self.work {
            map.serialize_entry("work", &work.encode_hex())?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subtype_wire_names() {
        assert_eq!(BlockSubtype::Open.as_str(), "open");
        assert_eq!(BlockSubtype::Change.to_string(), "change");
        assert_eq!(
            serde_json::to_string(&BlockSubtype::Receive).unwrap(),
            "\"receive\""
        );
        let parsed: BlockSubtype = serde_json::from_str("\"send\"").unwrap();
        assert_eq!(parsed, BlockSubtype::Send);
    }

    #[test]
    fn test_subtype_for_receive() {
        assert_eq!(BlockSubtype::for_receive(&BlockHash::zero()), BlockSubtype::Open);
        assert_eq!(
            BlockSubtype::for_receive(&BlockHash::from(7u64)),
            BlockSubtype::Receive
        );
    }

    #[test]
    fn test_link_validation() {
        let key = PublicKey::from(1u64);
        let hash = BlockHash::from(2u64);

        assert!(Link::Destination(key).validate_for(BlockSubtype::Send).is_ok());
        assert!(Link::SourceBlock(hash).validate_for(BlockSubtype::Send).is_err());

        assert!(Link::SourceBlock(hash).validate_for(BlockSubtype::Receive).is_ok());
        assert!(Link::SourceBlock(hash).validate_for(BlockSubtype::Open).is_ok());
        assert!(Link::SourceBlock(BlockHash::zero())
            .validate_for(BlockSubtype::Open)
            .is_err());
        assert!(Link::Destination(key).validate_for(BlockSubtype::Receive).is_err());

        assert!(Link::None.validate_for(BlockSubtype::Change).is_ok());
        assert!(matches!(
            Link::Destination(key).validate_for(BlockSubtype::Change),
            Err(AccountError::InvalidLink { subtype: BlockSubtype::Change, .. })
        ));
    }

    #[test]
    fn test_work_codec() {
        let work = Work::decode_hex("2bf29ef00786a6bc").unwrap();
        assert_eq!(work.0, 0x2bf2_9ef0_0786_a6bc);
        assert_eq!(work.encode_hex(), "2bf29ef00786a6bc");
        assert_eq!(Work(1).to_string(), "0000000000000001");
        assert_eq!(Work::decode_hex("FF").unwrap(), Work(255));
        assert!(Work::decode_hex("").is_err());
        assert!(Work::decode_hex("00000000000000001").is_err());
        assert!(Work::decode_hex("xyz").is_err());
    }

    #[test]
    fn test_work_root() {
        let mut block = StateBlock {
            subtype: BlockSubtype::Open,
            account: PublicKey::from(5u64),
            previous: BlockHash::zero(),
            representative: PublicKey::from(6u64),
            balance: Amount::from_raw(1),
            link: Link::SourceBlock(BlockHash::from(9u64)),
            signature: Signature::zero(),
            work: None,
        };
        assert_eq!(block.work_root(), PublicKey::from(5u64));
        block.previous = BlockHash::from(8u64);
        assert_eq!(block.work_root(), BlockHash::from(8u64));
    }
}
