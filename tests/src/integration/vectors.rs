//! Known-answer checks that span shared-crypto, shared-types and nw-01/02.

use nw_01_accounts::{
    decode_address, encode_address, is_valid_address, Account, BlockSubtype, Link, Work,
};
use nw_02_node_rpc::RequestBuilder;
use shared_crypto::{derive_public_key, deterministic_key};
use shared_types::{Amount, BlockHash, RawKey, MNANO_RATIO};

const ZERO_SEED: &str = "0000000000000000000000000000000000000000000000000000000000000000";
const ONE_SEED: &str = "0000000000000000000000000000000000000000000000000000000000000001";
const ADDR_0_0: &str = "nano_3i1aq1cchnmbn9x5rsbap8b15akfh7wj7pwskuzi7ahz8oq6cobd99d4r3b7";
const ADDR_0_1: &str = "nano_3rrf6cus8pye6o1kzi5n6wwjof8bjb7ff4xcgesi3njxid6x64pms6onw1f9";
const ADDR_1_0: &str = "nano_1sjkhzzeuhup4u9fbd9f77k9puwfbaadymfjnjgbtmiuchqqnmodbwrsnhn9";
const CHANGE_HASH: &str = "41348E7D98592CD59D7740F0DDCA45970D3AD8C297FAEE8444C028A65E01DA0B";

#[test]
fn test_crypto_primitives_match_account_derivation() {
    for (seed_hex, index, address) in [
        (ZERO_SEED, 0, ADDR_0_0),
        (ZERO_SEED, 1, ADDR_0_1),
        (ONE_SEED, 0, ADDR_1_0),
    ] {
        let seed = RawKey::decode_hex(seed_hex).unwrap();
        let public_key = derive_public_key(&deterministic_key(&seed, index));
        assert_eq!(encode_address(&public_key), address);

        let account = Account::from_seed_hex(seed_hex, index).unwrap();
        assert_eq!(account.address(), address);
        assert_eq!(account.public_key(), &public_key);
        assert_eq!(decode_address(address).unwrap(), public_key);
    }
}

#[test]
fn test_legacy_and_corrupted_addresses() {
    let legacy = ADDR_0_0.replacen("nano_", "xrb_", 1);
    assert!(is_valid_address(&legacy));
    assert_eq!(
        decode_address(&legacy).unwrap(),
        decode_address(ADDR_0_0).unwrap()
    );

    let mut corrupted = ADDR_0_0.to_string();
    corrupted.pop();
    corrupted.push('9');
    assert!(!is_valid_address(&corrupted));
}

#[test]
fn test_change_block_hash_and_signature() {
    let account = Account::from_seed_hex(ZERO_SEED, 0).unwrap();
    let representative = Account::from_address(ADDR_0_1).unwrap();

    let block = account
        .create_block(
            BlockSubtype::Change,
            BlockHash::zero(),
            *representative.public_key(),
            Amount::from_raw(MNANO_RATIO),
            Link::None,
        )
        .unwrap();
    assert_eq!(block.hash().encode_hex(), CHANGE_HASH);
    block.verify().unwrap();

    // A watch-only copy verifies but cannot sign.
    let watch_only = Account::from_address(ADDR_0_0).unwrap();
    watch_only.verify(&block.hash(), &block.signature).unwrap();
    assert!(watch_only.sign(&block.hash()).is_err());
}

#[test]
fn test_builder_serialises_signed_block() {
    let account = Account::from_seed_hex(ZERO_SEED, 0).unwrap();
    let block = account
        .create_block(
            BlockSubtype::Change,
            BlockHash::zero(),
            *account.public_key(),
            Amount::from_raw(MNANO_RATIO),
            Link::None,
        )
        .unwrap()
        .with_work(Work(0x2bf2_9ef0_0786_a6bc));

    let body = RequestBuilder::new(&account)
        .process(block.clone())
        .to_json()
        .unwrap();
    assert_eq!(body["action"], "process");
    assert_eq!(body["json_block"], "true");
    assert_eq!(body["subtype"], "change");
    assert_eq!(body["block"]["account"], ADDR_0_0);
    assert_eq!(body["block"]["balance"], MNANO_RATIO.to_string());
    assert_eq!(body["block"]["work"], "2bf29ef00786a6bc");
    assert_eq!(
        body["block"]["signature"],
        block.signature.encode_hex().as_str()
    );
}
