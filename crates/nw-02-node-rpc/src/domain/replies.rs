//! # Node RPC Replies
//!
//! Replies are JSON objects. An `"error"` field means the node rejected the
//! request; its absence means success. `"Account not found"` is the one
//! error that callers treat as data (the account has no blocks yet).

use super::errors::ReplyError;
use nw_01_accounts::{decode_address, Work};
use serde_json::{Map, Value};
use shared_types::{Amount, BlockHash, PublicKey};

/// Error text for an account with no blocks.
pub const ACCOUNT_NOT_FOUND: &str = "Account not found";

/// The node's error message, if any.
pub fn node_error(reply: &Value) -> Option<String> {
    match reply.get("error")? {
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

/// Reject error replies and non-object replies.
pub fn check_reply(reply: &Value) -> Result<&Map<String, Value>, ReplyError> {
    if let Some(error) = node_error(reply) {
        return Err(ReplyError::Node(error));
    }
    reply
        .as_object()
        .ok_or_else(|| ReplyError::Malformed(format!("expected a JSON object, got {reply}")))
}

fn field<'a>(object: &'a Map<String, Value>, name: &'static str) -> Result<&'a str, ReplyError> {
    match object.get(name) {
        None | Some(Value::Null) => Err(ReplyError::MissingField(name)),
        Some(Value::String(text)) if text.is_empty() => Err(ReplyError::MissingField(name)),
        Some(Value::String(text)) => Ok(text),
        Some(other) => Err(ReplyError::Malformed(format!(
            "{name} should be a string, got {other}"
        ))),
    }
}

fn parse_hash(object: &Map<String, Value>, name: &'static str) -> Result<BlockHash, ReplyError> {
    let text = field(object, name)?;
    if text.len() != 64 {
        return Err(ReplyError::Malformed(format!(
            "{name} must be 64 hex digits, got {}",
            text.len()
        )));
    }
    BlockHash::decode_hex(text).map_err(|e| ReplyError::Malformed(format!("{name}: {e}")))
}

fn parse_amount(object: &Map<String, Value>, name: &'static str) -> Result<Amount, ReplyError> {
    Amount::from_raw_str(field(object, name)?)
        .map_err(|e| ReplyError::Malformed(format!("{name}: {e}")))
}

fn parse_account(object: &Map<String, Value>, name: &'static str) -> Result<PublicKey, ReplyError> {
    decode_address(field(object, name)?).map_err(|e| ReplyError::Malformed(format!("{name}: {e}")))
}

/// `account_info` reply.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccountInfoReply {
    /// Head block of the account chain.
    pub frontier: BlockHash,
    /// Confirmed balance.
    pub balance: Amount,
    /// Current representative.
    pub representative: PublicKey,
}

impl AccountInfoReply {
    /// Parse a reply for an account that must exist.
    pub fn parse(reply: &Value) -> Result<Self, ReplyError> {
        let object = check_reply(reply)?;
        Ok(Self {
            frontier: parse_hash(object, "frontier")?,
            balance: parse_amount(object, "balance")?,
            representative: parse_account(object, "representative")?,
        })
    }

    /// Parse a reply where "Account not found" is a valid answer.
    pub fn parse_optional(reply: &Value) -> Result<Option<Self>, ReplyError> {
        match node_error(reply) {
            Some(error) if error == ACCOUNT_NOT_FOUND => Ok(None),
            _ => Self::parse(reply).map(Some),
        }
    }
}

/// `account_balance` reply.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccountBalanceReply {
    /// Confirmed balance.
    pub balance: Amount,
    /// Sum of receivable sends.
    pub pending: Amount,
}

impl AccountBalanceReply {
    /// Parse. Newer nodes name the second field `receivable`.
    pub fn parse(reply: &Value) -> Result<Self, ReplyError> {
        let object = check_reply(reply)?;
        let pending = match object.get("pending") {
            Some(_) => parse_amount(object, "pending")?,
            None => parse_amount(object, "receivable")?,
        };
        Ok(Self {
            balance: parse_amount(object, "balance")?,
            pending,
        })
    }
}

/// One receivable send.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingBlock {
    /// Hash of the send block.
    pub hash: BlockHash,
    /// Amount, present when the request carried a threshold.
    pub amount: Option<Amount>,
}

/// `pending` reply.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PendingReply {
    /// Receivable sends in node order.
    pub blocks: Vec<PendingBlock>,
}

impl PendingReply {
    /// Parse. `blocks` is a list of hashes, or a hash to amount map when a
    /// threshold was given. An empty string means no blocks.
    pub fn parse(reply: &Value) -> Result<Self, ReplyError> {
        let object = check_reply(reply)?;
        let blocks = match object.get("blocks") {
            None => return Err(ReplyError::MissingField("blocks")),
            Some(Value::String(text)) if text.is_empty() => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| {
                    let text = item.as_str().ok_or_else(|| {
                        ReplyError::Malformed(format!("block hash should be a string, got {item}"))
                    })?;
                    let hash = BlockHash::decode_hex(text)
                        .map_err(|e| ReplyError::Malformed(format!("blocks: {e}")))?;
                    Ok(PendingBlock { hash, amount: None })
                })
                .collect::<Result<Vec<_>, ReplyError>>()?,
            Some(Value::Object(entries)) => entries
                .iter()
                .map(|(hash, amount)| {
                    let hash = BlockHash::decode_hex(hash)
                        .map_err(|e| ReplyError::Malformed(format!("blocks: {e}")))?;
                    let amount = amount
                        .as_str()
                        .ok_or_else(|| {
                            ReplyError::Malformed(format!("amount should be a string, got {amount}"))
                        })
                        .and_then(|raw| {
                            Amount::from_raw_str(raw)
                                .map_err(|e| ReplyError::Malformed(format!("blocks: {e}")))
                        })?;
                    Ok(PendingBlock {
                        hash,
                        amount: Some(amount),
                    })
                })
                .collect::<Result<Vec<_>, ReplyError>>()?,
            Some(other) => {
                return Err(ReplyError::Malformed(format!(
                    "blocks should be a list or map, got {other}"
                )))
            }
        };
        Ok(Self { blocks })
    }
}

/// `work_generate` reply.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkReply {
    /// Work nonce.
    pub work: Work,
    /// Root the work was generated for, when echoed.
    pub hash: Option<BlockHash>,
}

impl WorkReply {
    /// Parse.
    pub fn parse(reply: &Value) -> Result<Self, ReplyError> {
        let object = check_reply(reply)?;
        let work = Work::decode_hex(field(object, "work")?)
            .map_err(|e| ReplyError::Malformed(format!("work: {e}")))?;
        let hash = match object.get("hash") {
            Some(_) => Some(parse_hash(object, "hash")?),
            None => None,
        };
        Ok(Self { work, hash })
    }
}

/// `process` reply.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProcessReply {
    /// Hash of the published block.
    pub hash: BlockHash,
}

impl ProcessReply {
    /// Parse.
    pub fn parse(reply: &Value) -> Result<Self, ReplyError> {
        let object = check_reply(reply)?;
        Ok(Self {
            hash: parse_hash(object, "hash")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const HASH: &str = "41348E7D98592CD59D7740F0DDCA45970D3AD8C297FAEE8444C028A65E01DA0B";
    const ADDR: &str = "nano_3i1aq1cchnmbn9x5rsbap8b15akfh7wj7pwskuzi7ahz8oq6cobd99d4r3b7";

    #[test]
    fn test_node_error() {
        assert_eq!(
            node_error(&json!({"error": "Bad account number"})),
            Some("Bad account number".to_string())
        );
        assert_eq!(node_error(&json!({"hash": HASH})), None);
        assert!(matches!(
            check_reply(&json!({"error": "Bad"})),
            Err(ReplyError::Node(_))
        ));
        assert!(matches!(
            check_reply(&json!([1, 2])),
            Err(ReplyError::Malformed(_))
        ));
    }

    #[test]
    fn test_account_info() {
        let reply = json!({
            "frontier": HASH,
            "balance": "1000",
            "representative": ADDR,
            "block_count": "3"
        });
        let info = AccountInfoReply::parse(&reply).unwrap();
        assert_eq!(info.frontier.encode_hex(), HASH);
        assert_eq!(info.balance, Amount::from_raw(1000));
        assert_eq!(
            info.representative,
            decode_address(ADDR).unwrap()
        );
    }

    #[test]
    fn test_account_info_missing_and_malformed() {
        let reply = json!({"frontier": HASH, "balance": "1000"});
        assert_eq!(
            AccountInfoReply::parse(&reply),
            Err(ReplyError::MissingField("representative"))
        );

        let reply = json!({"frontier": "zz", "balance": "1000", "representative": ADDR});
        assert!(matches!(
            AccountInfoReply::parse(&reply),
            Err(ReplyError::Malformed(_))
        ));

        let reply = json!({"frontier": HASH, "balance": "-1", "representative": ADDR});
        assert!(matches!(
            AccountInfoReply::parse(&reply),
            Err(ReplyError::Malformed(_))
        ));
    }

    #[test]
    fn test_account_info_not_found() {
        let reply = json!({"error": ACCOUNT_NOT_FOUND});
        assert_eq!(AccountInfoReply::parse_optional(&reply), Ok(None));
        assert_eq!(
            AccountInfoReply::parse(&reply),
            Err(ReplyError::Node(ACCOUNT_NOT_FOUND.to_string()))
        );

        let other = json!({"error": "Bad account number"});
        assert!(matches!(
            AccountInfoReply::parse_optional(&other),
            Err(ReplyError::Node(_))
        ));
    }

    #[test]
    fn test_account_balance() {
        let reply = json!({"balance": "10", "pending": "5"});
        let parsed = AccountBalanceReply::parse(&reply).unwrap();
        assert_eq!(parsed.pending, Amount::from_raw(5));

        let reply = json!({"balance": "10", "receivable": "7"});
        assert_eq!(
            AccountBalanceReply::parse(&reply).unwrap().pending,
            Amount::from_raw(7)
        );
    }

    #[test]
    fn test_pending_shapes() {
        let list = json!({"blocks": [HASH]});
        let parsed = PendingReply::parse(&list).unwrap();
        assert_eq!(parsed.blocks.len(), 1);
        assert_eq!(parsed.blocks[0].amount, None);

        let map = json!({"blocks": {HASH: "6000"}});
        let parsed = PendingReply::parse(&map).unwrap();
        assert_eq!(parsed.blocks[0].amount, Some(Amount::from_raw(6000)));

        let empty = json!({"blocks": ""});
        assert!(PendingReply::parse(&empty).unwrap().blocks.is_empty());

        assert_eq!(
            PendingReply::parse(&json!({})),
            Err(ReplyError::MissingField("blocks"))
        );
    }

    #[test]
    fn test_pending_map_keeps_node_order() {
        const LATER: &str = "F0F1F2F3F4F5F6F7F8F9FAFBFCFDFEFF000102030405060708090A0B0C0D0E0F";
        let text = format!(r#"{{"blocks": {{"{LATER}": "1", "{HASH}": "2"}}}}"#);
        let reply: Value = serde_json::from_str(&text).unwrap();
        let parsed = PendingReply::parse(&reply).unwrap();
        let hashes: Vec<String> = parsed.blocks.iter().map(|b| b.hash.encode_hex()).collect();
        assert_eq!(hashes, vec![LATER.to_string(), HASH.to_string()]);
    }

    #[test]
    fn test_work_reply() {
        let reply = json!({"work": "2bf29ef00786a6bc", "difficulty": "ffffffd21c3933f4", "hash": HASH});
        let parsed = WorkReply::parse(&reply).unwrap();
        assert_eq!(parsed.work, Work(0x2bf29ef00786a6bc));
        assert_eq!(parsed.hash.unwrap().encode_hex(), HASH);

        assert_eq!(
            WorkReply::parse(&json!({"hash": HASH})),
            Err(ReplyError::MissingField("work"))
        );
    }

    #[test]
    fn test_process_reply() {
        let parsed = ProcessReply::parse(&json!({"hash": HASH})).unwrap();
        assert_eq!(parsed.hash.encode_hex(), HASH);
        assert!(matches!(
            ProcessReply::parse(&json!({"error": "Fork"})),
            Err(ReplyError::Node(_))
        ));
    }
}
