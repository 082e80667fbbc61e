//! # Nano Wallet Benchmarks
//!
//! | Area | Operation |
//! |------|-----------|
//! | shared-crypto | Deterministic key + public key derivation |
//! | nw-01 | Address encode / decode |
//! | nw-01 | State block hash, sign, verify |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use nw_01_accounts::{decode_address, encode_address, Account, BlockSubtype, Link};
use shared_crypto::{derive_public_key, deterministic_key};
use shared_types::{Amount, BlockHash, RawKey};
use std::time::Duration;

const ZERO_SEED: &str = "0000000000000000000000000000000000000000000000000000000000000000";

// ============================================================================
// Key derivation
// ============================================================================

fn bench_key_derivation(c: &mut Criterion) {
    let mut group = c.benchmark_group("key-derivation");
    group.measurement_time(Duration::from_secs(5));
    let seed = RawKey::decode_hex(ZERO_SEED).unwrap();

    group.bench_function("deterministic_key", |b| {
        b.iter(|| black_box(deterministic_key(&seed, black_box(7))))
    });

    group.bench_function("account_from_seed", |b| {
        b.iter(|| black_box(Account::from_seed(seed.clone(), black_box(7))))
    });

    for count in [10u32, 100] {
        group.throughput(Throughput::Elements(u64::from(count)));
        group.bench_with_input(BenchmarkId::new("derive_range", count), &count, |b, &n| {
            b.iter(|| {
                (0..n)
                    .map(|index| derive_public_key(&deterministic_key(&seed, index)))
                    .count()
            })
        });
    }
    group.finish();
}

// ============================================================================
// Address codec
// ============================================================================

fn bench_address_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("address-codec");
    let account = Account::from_seed_hex(ZERO_SEED, 0).unwrap();
    let address = account.address().to_string();

    group.bench_function("encode", |b| {
        b.iter(|| black_box(encode_address(black_box(account.public_key()))))
    });
    group.bench_function("decode", |b| {
        b.iter(|| black_box(decode_address(black_box(&address))))
    });
    group.finish();
}

// ============================================================================
// State blocks
// ============================================================================

fn bench_state_blocks(c: &mut Criterion) {
    let mut group = c.benchmark_group("state-blocks");
    let account = Account::from_seed_hex(ZERO_SEED, 0).unwrap();
    let destination = Account::from_seed_hex(ZERO_SEED, 1).unwrap();
    let previous = BlockHash::from(1u64);
    let balance = Amount::from_raw(1_000);
    let link = Link::Destination(*destination.public_key());

    group.bench_function("hash", |b| {
        b.iter(|| {
            black_box(account.block_hash(&previous, account.public_key(), &balance, &link))
        })
    });

    group.bench_function("create_signed_send", |b| {
        b.iter(|| {
            black_box(account.create_block(
                BlockSubtype::Send,
                previous,
                *account.public_key(),
                balance,
                link,
            ))
        })
    });

    let block = account
        .create_block(
            BlockSubtype::Send,
            previous,
            *account.public_key(),
            balance,
            link,
        )
        .unwrap();
    group.bench_function("verify", |b| b.iter(|| black_box(block.verify())));
    group.finish();
}

criterion_group!(
    benches,
    bench_key_derivation,
    bench_address_codec,
    bench_state_blocks
);
criterion_main!(benches);
