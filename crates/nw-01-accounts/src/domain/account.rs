//! # Account
//!
//! An account is a public key with an address, optionally backed by the
//! seed and private key it was derived from. Accounts decoded from an
//! address carry no secret material and cannot sign.

use super::block::{BlockSubtype, Link, StateBlock};
use super::errors::AccountError;
use crate::algorithms::{decode_address, encode_address, state_block_hash};
use shared_crypto::{derive_public_key, deterministic_key, generate_seed, Ed25519KeyPair};
use shared_types::{Amount, BlockHash, PublicKey, RawKey, Signature};
use tracing::debug;

/// A wallet account.
#[derive(Clone, Debug, Default)]
pub struct Account {
    seed: Option<RawKey>,
    private_key: Option<RawKey>,
    public_key: PublicKey,
    address: Option<String>,
    index: u32,
}

impl Account {
    /// Empty account with no key and no address.
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive the account at `index` from `seed`.
    pub fn from_seed(seed: RawKey, index: u32) -> Self {
        let private_key = deterministic_key(&seed, index);
        let public_key = derive_public_key(&private_key);
        Self {
            seed: Some(seed),
            private_key: Some(private_key),
            public_key,
            address: Some(encode_address(&public_key)),
            index,
        }
    }

    /// Derive from a seed given as exactly 64 hex digits.
    pub fn from_seed_hex(seed_hex: &str, index: u32) -> Result<Self, AccountError> {
        Ok(Self::from_seed(RawKey::decode_hex(seed_hex)?, index))
    }

    /// Fresh random seed, index 0.
    pub fn generate() -> Result<Self, AccountError> {
        Ok(Self::from_seed(generate_seed()?, 0))
    }

    /// Watch-only account from an address. The checksum is verified.
    pub fn from_address(address: &str) -> Result<Self, AccountError> {
        let mut account = Self::new();
        account.set_address(address)?;
        Ok(account)
    }

    /// Watch-only account from a public key.
    pub fn from_public_key(public_key: PublicKey) -> Self {
        Self {
            public_key,
            address: Some(encode_address(&public_key)),
            ..Self::default()
        }
    }

    /// Populate from an address. A no-op once an address is set.
    pub fn set_address(&mut self, address: &str) -> Result<(), AccountError> {
        if self.address.is_some() {
            return Ok(());
        }
        self.public_key = decode_address(address)?;
        self.address = Some(encode_address(&self.public_key));
        Ok(())
    }

    /// `nano_` address, or empty if not yet populated.
    pub fn address(&self) -> &str {
        self.address.as_deref().unwrap_or_default()
    }

    /// Public key.
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// Derivation index.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// True when the account can sign.
    pub fn has_private_key(&self) -> bool {
        self.private_key.is_some()
    }

    /// Seed hex, empty if absent.
    pub fn seed_hex(&self) -> String {
        self.seed.as_ref().map(RawKey::encode_hex).unwrap_or_default()
    }

    /// Private key hex, empty if absent.
    pub fn private_key_hex(&self) -> String {
        self.private_key
            .as_ref()
            .map(RawKey::encode_hex)
            .unwrap_or_default()
    }

    /// Public key hex, empty if the account is not populated.
    pub fn public_key_hex(&self) -> String {
        if self.address.is_some() {
            self.public_key.encode_hex()
        } else {
            String::new()
        }
    }

    /// Hash of a state block owned by this account.
    pub fn block_hash(
        &self,
        previous: &BlockHash,
        representative: &PublicKey,
        balance: &Amount,
        link: &Link,
    ) -> BlockHash {
        state_block_hash(
            &self.public_key,
            previous,
            representative,
            balance,
            &link.as_uint(),
        )
    }

    /// Sign a block hash.
    pub fn sign(&self, hash: &BlockHash) -> Result<Signature, AccountError> {
        let private_key = self.private_key.as_ref().ok_or(AccountError::NoPrivateKey)?;
        Ok(Ed25519KeyPair::from_private_key(private_key).sign(hash.as_bytes()))
    }

    /// Verify a signature made by this account.
    pub fn verify(&self, hash: &BlockHash, signature: &Signature) -> Result<(), AccountError> {
        shared_crypto::verify(&self.public_key, hash.as_bytes(), signature)?;
        Ok(())
    }

    /// Build and sign a state block. Work is attached later.
    pub fn create_block(
        &self,
        subtype: BlockSubtype,
        previous: BlockHash,
        representative: PublicKey,
        balance: Amount,
        link: Link,
    ) -> Result<StateBlock, AccountError> {
        if !self.has_private_key() {
            return Err(AccountError::NoPrivateKey);
        }
        link.validate_for(subtype)?;
        if subtype == BlockSubtype::Open && !previous.is_zero() {
            return Err(AccountError::InvalidEncoding(
                "open block must have a zero previous hash".into(),
            ));
        }

        let hash = self.block_hash(&previous, &representative, &balance, &link);
        let signature = self.sign(&hash)?;
        debug!(
            account = %self.address(),
            subtype = %subtype,
            hash = %hash,
            "Signed state block"
        );

        Ok(StateBlock {
            subtype,
            account: self.public_key,
            previous,
            representative,
            balance,
            link,
            signature,
            work: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::MNANO_RATIO;

    const ZERO_SEED: &str = "0000000000000000000000000000000000000000000000000000000000000000";
    const ONE_SEED: &str = "0000000000000000000000000000000000000000000000000000000000000001";
    const PRIV_0: &str = "9F0E444C69F77A49BD0BE89DB92C38FE713E0963165CCA12FAF5712D7657120F";
    const PUB_0: &str = "C008B814A7D269A1FA3C6528B19201A24D797912DB9996FF02A1FF356E45552B";
    const ADDR_0: &str = "nano_3i1aq1cchnmbn9x5rsbap8b15akfh7wj7pwskuzi7ahz8oq6cobd99d4r3b7";
    const ADDR_1: &str = "nano_3rrf6cus8pye6o1kzi5n6wwjof8bjb7ff4xcgesi3njxid6x64pms6onw1f9";

    #[test]
    fn test_zero_seed_index_zero() {
        let account = Account::from_seed_hex(ZERO_SEED, 0).unwrap();
        assert_eq!(account.private_key_hex(), PRIV_0);
        assert_eq!(account.public_key_hex(), PUB_0);
        assert_eq!(account.address(), ADDR_0);
        assert_eq!(account.seed_hex(), ZERO_SEED);
        assert_eq!(account.index(), 0);
        assert!(account.has_private_key());
    }

    #[test]
    fn test_zero_seed_index_one() {
        let account = Account::from_seed_hex(ZERO_SEED, 1).unwrap();
        assert_eq!(
            account.private_key_hex(),
            "B73B723BF7BD042B66AD3332718BA98DE7312F95ED3D05A130C9204552A7AFFF"
        );
        assert_eq!(account.address(), ADDR_1);
    }

    #[test]
    fn test_seed_one() {
        let account = Account::from_seed_hex(ONE_SEED, 0).unwrap();
        assert_eq!(
            account.public_key_hex(),
            "66327FFECDBF7616CED4ACED29647B6F8D4A10BF4DB1A45C9D4E1B53EF7A4EAB"
        );
        assert_eq!(
            account.address(),
            "nano_1sjkhzzeuhup4u9fbd9f77k9puwfbaadymfjnjgbtmiuchqqnmodbwrsnhn9"
        );
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let a = Account::from_seed_hex(ONE_SEED, 42).unwrap();
        let b = Account::from_seed_hex(ONE_SEED, 42).unwrap();
        assert_eq!(a.private_key_hex(), b.private_key_hex());
        assert_eq!(a.address(), b.address());
    }

    #[test]
    fn test_seed_hex_must_be_full_width() {
        assert!(Account::from_seed_hex("00", 0).is_err());
        assert!(Account::from_seed_hex(&"g".repeat(64), 0).is_err());
    }

    #[test]
    fn test_generate() {
        let account = Account::generate().unwrap();
        assert!(account.has_private_key());
        assert_eq!(account.seed_hex().len(), 64);
        assert_eq!(account.address().len(), 65);
    }

    #[test]
    fn test_from_address_has_no_secrets() {
        let account = Account::from_address(ADDR_0).unwrap();
        assert_eq!(account.public_key_hex(), PUB_0);
        assert!(!account.has_private_key());
        assert_eq!(account.seed_hex(), "");
        assert_eq!(account.private_key_hex(), "");
        assert_eq!(
            account.sign(&BlockHash::zero()),
            Err(AccountError::NoPrivateKey)
        );
    }

    #[test]
    fn test_address_is_set_once() {
        let mut account = Account::from_address(ADDR_0).unwrap();
        account.set_address(ADDR_1).unwrap();
        assert_eq!(account.address(), ADDR_0);
    }

    #[test]
    fn test_legacy_address_normalised() {
        let legacy = ADDR_0.replacen("nano_", "xrb_", 1);
        assert_eq!(Account::from_address(&legacy).unwrap().address(), ADDR_0);
    }

    #[test]
    fn test_empty_account() {
        let account = Account::new();
        assert_eq!(account.address(), "");
        assert_eq!(account.public_key_hex(), "");
        assert!(!account.has_private_key());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let account = Account::from_seed_hex(ZERO_SEED, 0).unwrap();
        let rendered = format!("{account:?}");
        assert!(!rendered.contains(PRIV_0));
        assert!(rendered.contains("redacted"));
    }

    #[test]
    fn test_regression_block() {
        let account = Account::from_seed_hex(ZERO_SEED, 0).unwrap();
        let representative = Account::from_address(ADDR_1).unwrap();
        let balance = Amount::from_raw_str("1000000000000000000000000000000").unwrap();
        assert_eq!(balance.raw(), MNANO_RATIO);

        let hash = account.block_hash(
            &BlockHash::zero(),
            representative.public_key(),
            &balance,
            &Link::None,
        );
        assert_eq!(
            hash.encode_hex(),
            "41348E7D98592CD59D7740F0DDCA45970D3AD8C297FAEE8444C028A65E01DA0B"
        );

        let signature = account.sign(&hash).unwrap();
        assert_eq!(
            signature.encode_hex(),
            "9FEB65803B858B47448CEE6E5D6BC02D9BFD5C2FFC931A1F853842CF18CA6383\
             B00C6398472FF56F3288FF59533BF280F03EC81D5829D60BFFCFF71778F8950C"
        );
        assert!(account.verify(&hash, &signature).is_ok());
        assert!(representative.verify(&hash, &signature).is_err());
    }

    #[test]
    fn test_signature_fails_on_altered_hash_or_signature() {
        let account = Account::from_seed_hex(ONE_SEED, 3).unwrap();
        let hash = BlockHash::from(12345u64);
        let signature = account.sign(&hash).unwrap();

        let mut bad_hash = *hash.as_bytes();
        bad_hash[0] ^= 1;
        assert!(account
            .verify(&BlockHash::from_bytes(bad_hash), &signature)
            .is_err());

        let mut bad_sig = *signature.as_bytes();
        bad_sig[40] ^= 1;
        assert!(account
            .verify(&hash, &Signature::from_bytes(bad_sig))
            .is_err());
    }

    #[test]
    fn test_create_send_block() {
        let account = Account::from_seed_hex(ZERO_SEED, 0).unwrap();
        let destination = Account::from_address(ADDR_1).unwrap();
        let block = account
            .create_block(
                BlockSubtype::Send,
                BlockHash::from(1u64),
                *destination.public_key(),
                Amount::from_raw(5),
                Link::Destination(*destination.public_key()),
            )
            .unwrap();
        assert!(block.verify().is_ok());
        assert_eq!(block.work, None);

        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["type"], "state");
        assert_eq!(json["account"], ADDR_0);
        assert_eq!(json["representative"], ADDR_1);
        assert_eq!(json["balance"], "5");
        assert_eq!(json["link"], destination.public_key_hex());
        assert_eq!(json["link_as_account"], ADDR_1);
        assert_eq!(json["signature"].as_str().unwrap().len(), 128);
        assert!(json.get("work").is_none());
    }

    #[test]
    fn test_create_block_rejects_bad_input() {
        let account = Account::from_seed_hex(ZERO_SEED, 0).unwrap();
        let rep = *account.public_key();

        let err = account
            .create_block(
                BlockSubtype::Receive,
                BlockHash::from(1u64),
                rep,
                Amount::from_raw(5),
                Link::Destination(rep),
            )
            .unwrap_err();
        assert!(matches!(err, AccountError::InvalidLink { .. }));

        let err = account
            .create_block(
                BlockSubtype::Open,
                BlockHash::from(1u64),
                rep,
                Amount::from_raw(5),
                Link::SourceBlock(BlockHash::from(2u64)),
            )
            .unwrap_err();
        assert!(matches!(err, AccountError::InvalidEncoding(_)));

        let watch_only = Account::from_address(ADDR_1).unwrap();
        assert_eq!(
            watch_only.create_block(
                BlockSubtype::Change,
                BlockHash::from(1u64),
                rep,
                Amount::from_raw(5),
                Link::None,
            ),
            Err(AccountError::NoPrivateKey)
        );
    }

    #[test]
    fn test_open_block_with_work() {
        let account = Account::from_seed_hex(ONE_SEED, 0).unwrap();
        let block = account
            .create_block(
                BlockSubtype::Open,
                BlockHash::zero(),
                *account.public_key(),
                Amount::from_raw(MNANO_RATIO),
                Link::SourceBlock(BlockHash::from(77u64)),
            )
            .unwrap()
            .with_work(crate::domain::Work(0xabc));
        assert_eq!(block.work_root(), *account.public_key());

        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["work"], "0000000000000abc");
        assert!(json.get("link_as_account").is_none());
        assert!(block.verify().is_ok());
    }
}
