//! # Integration Test Flows
//!
//! A send published through nw-03, confirmed by the in-memory node, pushed
//! to nw-04 and received automatically on the destination chain.
//!
//! ## Flow Tested:
//!
//! 1. **Sender (03) → node**: `account_info`, `work_generate`, `process`
//! 2. **Node → AccountWatcher (04)**: confirmation frame for the send
//! 3. **AccountWatcher (04) → Receiver (03) → node**: open or receive block

use super::ledger::SimulatedLedger;
use nw_01_accounts::{Account, BlockSubtype};
use nw_03_transfers::{Sender, TransferConfig, TransferError};
use nw_04_account_watcher::{
    AccountWatcher, ChannelEvent, MockPushChannel, WatcherConfig, WatcherEvent,
};
use serde_json::Value;
use shared_types::{Amount, BlockHash};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::timeout;
use wallet_telemetry::{init_telemetry, TelemetryConfig};

// =============================================================================
// TEST FIXTURES
// =============================================================================

const ZERO_SEED: &str = "0000000000000000000000000000000000000000000000000000000000000000";
const REPRESENTATIVE: &str = "nano_1sjkhzzeuhup4u9fbd9f77k9puwfbaadymfjnjgbtmiuchqqnmodbwrsnhn9";
const GENESIS_FRONTIER: &str = "991CF190094C00F0B68E2E5F75F6BEE95A2E0BD93CEAA4A6734DB9F19B728948";

fn account(index: u32) -> Account {
    Account::from_seed_hex(ZERO_SEED, index).unwrap()
}

/// Ledger where seed 0 / index 0 holds `balance` raw.
fn funded_ledger(balance: u128) -> Arc<SimulatedLedger> {
    let _ = init_telemetry(TelemetryConfig {
        console_output: false,
        ..TelemetryConfig::for_subsystem("tests", "integration")
    });
    let ledger = SimulatedLedger::new();
    ledger.fund(
        account(0).address(),
        BlockHash::decode_hex(GENESIS_FRONTIER).unwrap(),
        Amount::from_raw(balance),
        REPRESENTATIVE,
    );
    ledger
}

fn watcher_config() -> WatcherConfig {
    WatcherConfig {
        transfer: TransferConfig::with_default_representative(REPRESENTATIVE),
        ..WatcherConfig::default()
    }
}

async fn send(ledger: &Arc<SimulatedLedger>, amount: u128) -> Result<(), TransferError> {
    let sender = Sender::new(ledger.node(), TransferConfig::default())?;
    sender
        .send(&account(0), &account(1), Amount::from_raw(amount))
        .await
        .map(|_| ())
}

async fn next_event(events: &mut mpsc::UnboundedReceiver<WatcherEvent>) -> WatcherEvent {
    timeout(Duration::from_secs(5), events.recv())
        .await
        .expect("watcher event within timeout")
        .expect("event stream open")
}

// =============================================================================
// INTEGRATION TESTS: SEND → CONFIRMATION → AUTO-RECEIVE
// =============================================================================

#[tokio::test]
async fn test_send_is_auto_received_by_watcher() {
    let ledger = funded_ledger(1_000);
    send(&ledger, 300).await.unwrap();
    assert_eq!(
        ledger.head(account(0).address()).unwrap().balance,
        Amount::from_raw(700)
    );
    assert_eq!(ledger.receivable_count(), 1);

    let channel = MockPushChannel::connected();
    let (mut watcher, mut events) =
        AccountWatcher::new(channel.clone(), ledger.node(), watcher_config()).unwrap();
    watcher.add_watched_account(account(1)).await.unwrap();
    assert_eq!(channel.sent_actions(), vec!["subscribe"]);

    for frame in ledger.drain_confirmations() {
        watcher.on_frame(&frame).unwrap();
    }
    assert_eq!(watcher.active_receives(), 1);
    timeout(Duration::from_secs(5), watcher.next_completion())
        .await
        .unwrap();

    match next_event(&mut events).await {
        WatcherEvent::ReceiveCompleted {
            account: address,
            result,
            ..
        } => {
            assert_eq!(address, account(1).address());
            let outcome = result.unwrap();
            assert_eq!(outcome.subtype, BlockSubtype::Open);
            assert_eq!(outcome.balance, Amount::from_raw(300));
        }
        other => panic!("expected receive completion, got {other:?}"),
    }

    let head = ledger.head(account(1).address()).unwrap();
    assert_eq!(head.balance, Amount::from_raw(300));
    assert_eq!(head.representative, REPRESENTATIVE);
    assert_eq!(ledger.receivable_count(), 0);

    // The open block's own confirmation is forwarded, not received again.
    let open_frames = ledger.drain_confirmations();
    assert_eq!(open_frames.len(), 1);
    watcher.on_frame(&open_frames[0]).unwrap();
    match next_event(&mut events).await {
        WatcherEvent::ConfirmationReceived(frame) => {
            assert_eq!(frame["message"]["block"]["subtype"], "open");
        }
        other => panic!("expected forwarded confirmation, got {other:?}"),
    }
    assert_eq!(watcher.pending_count(), 0);
}

#[tokio::test]
async fn test_two_sends_open_then_receive() {
    let ledger = funded_ledger(1_000);
    send(&ledger, 100).await.unwrap();
    send(&ledger, 250).await.unwrap();

    let (mut watcher, mut events) = AccountWatcher::new(
        MockPushChannel::connected(),
        ledger.node(),
        watcher_config(),
    )
    .unwrap();
    watcher.add_watched_account(account(1)).await.unwrap();

    for frame in ledger.drain_confirmations() {
        watcher.on_frame(&frame).unwrap();
    }
    // One chain, one receive at a time.
    assert_eq!(watcher.active_receives(), 1);
    assert_eq!(watcher.pending_count(), 1);

    let mut subtypes = Vec::new();
    for _ in 0..2 {
        timeout(Duration::from_secs(5), watcher.next_completion())
            .await
            .unwrap();
        match next_event(&mut events).await {
            WatcherEvent::ReceiveCompleted { result, .. } => {
                subtypes.push(result.unwrap().subtype);
            }
            other => panic!("expected receive completion, got {other:?}"),
        }
    }

    assert_eq!(subtypes, vec![BlockSubtype::Open, BlockSubtype::Receive]);
    assert_eq!(
        ledger.head(account(1).address()).unwrap().balance,
        Amount::from_raw(350)
    );
    assert_eq!(ledger.receivable_count(), 0);
}

#[tokio::test]
async fn test_watch_only_account_is_not_received() {
    let ledger = funded_ledger(1_000);
    send(&ledger, 5).await.unwrap();

    let (mut watcher, mut events) = AccountWatcher::new(
        MockPushChannel::connected(),
        ledger.node(),
        watcher_config(),
    )
    .unwrap();
    let watch_only = Account::from_address(account(1).address()).unwrap();
    watcher.add_watched_account(watch_only).await.unwrap();

    for frame in ledger.drain_confirmations() {
        watcher.on_frame(&frame).unwrap();
    }
    assert!(matches!(
        next_event(&mut events).await,
        WatcherEvent::ConfirmationReceived(_)
    ));
    assert_eq!(watcher.active_receives(), 0);
    assert_eq!(ledger.receivable_count(), 1);
}

#[tokio::test]
async fn test_overdraw_publishes_nothing() {
    let ledger = funded_ledger(10);
    let node = ledger.node();
    let sender = Sender::new(node.clone(), TransferConfig::default()).unwrap();

    let result = sender
        .send(&account(0), &account(1), Amount::from_raw(11))
        .await;
    assert!(result.is_err());
    assert!(!node.actions().contains(&"process"));
    assert_eq!(
        ledger.head(account(0).address()).unwrap().balance,
        Amount::from_raw(10)
    );
    assert!(ledger.drain_confirmations().is_empty());
    assert!(sender.is_ready());
}

#[tokio::test]
async fn test_run_loop_end_to_end() {
    let ledger = funded_ledger(1_000);
    send(&ledger, 42).await.unwrap();

    let channel = MockPushChannel::new();
    let (mut watcher, mut events) =
        AccountWatcher::new(channel.clone(), ledger.node(), watcher_config()).unwrap();
    watcher.add_watched_account(account(1)).await.unwrap();
    assert!(channel.sent().is_empty());

    let (channel_tx, channel_rx) = mpsc::channel(16);
    let handle = tokio::spawn(watcher.run(channel_rx));

    channel.set_connected(true);
    channel_tx.send(ChannelEvent::Connected).await.unwrap();
    for frame in ledger.drain_confirmations() {
        channel_tx.send(ChannelEvent::Frame(frame)).await.unwrap();
    }

    match next_event(&mut events).await {
        WatcherEvent::ReceiveCompleted { result, .. } => {
            assert_eq!(result.unwrap().balance, Amount::from_raw(42));
        }
        other => panic!("expected receive completion, got {other:?}"),
    }
    let subscribe: Value = channel.sent_json()[0].clone();
    assert_eq!(subscribe["options"]["accounts"][0], account(1).address());

    channel.set_connected(false);
    channel_tx
        .send(ChannelEvent::Closed { was_clean: true })
        .await
        .unwrap();
    assert_eq!(
        next_event(&mut events).await,
        WatcherEvent::Disconnected { was_clean: true }
    );

    drop(channel_tx);
    timeout(Duration::from_secs(5), handle)
        .await
        .unwrap()
        .unwrap();
}
