//! Account watcher service.
//!
//! Owns the watch list, the pending receive queue and the receiver pool.
//! All mutation happens in the handler methods, which [`AccountWatcher::run`]
//! calls one at a time; auto-receives run as spawned tasks and report back
//! through an internal completion channel.

use crate::domain::{
    ChannelEvent, InboundMessage, OutboundMessage, PendingReceive, PendingReceiveQueue,
    WatchList, WatcherConfig, WatcherError, WatcherEvent,
};
use crate::pool::{PooledReceiver, ReceiverPool};
use crate::ports::PushChannel;
use crate::SUBSYSTEM;
use nw_01_accounts::Account;
use nw_02_node_rpc::NodeRpc;
use nw_03_transfers::{TransferError, TransferOutcome};
use shared_types::BlockHash;
use std::collections::HashSet;
use tokio::sync::mpsc;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};
use wallet_telemetry::{log_account_event, log_block_event, log_event};

/// Result of one auto-receive task.
#[derive(Debug)]
struct Completion {
    slot: usize,
    account: String,
    source: BlockHash,
    result: Result<TransferOutcome, TransferError>,
}

/// Watches accounts for confirmations and receives incoming sends.
pub struct AccountWatcher<C, R> {
    config: WatcherConfig,
    channel: C,
    watch_list: WatchList,
    subscribed: bool,
    queue: PendingReceiveQueue,
    pool: ReceiverPool<R>,
    receiving: HashSet<String>,
    in_flight: HashSet<BlockHash>,
    events: mpsc::UnboundedSender<WatcherEvent>,
    completions_tx: mpsc::UnboundedSender<Completion>,
    completions_rx: mpsc::UnboundedReceiver<Completion>,
}

impl<C, R> AccountWatcher<C, R>
where
    C: PushChannel,
    R: NodeRpc + Clone + 'static,
{
    /// Create a watcher and the stream of events it reports.
    pub fn new(
        channel: C,
        rpc: R,
        config: WatcherConfig,
    ) -> Result<(Self, mpsc::UnboundedReceiver<WatcherEvent>), WatcherError> {
        config.validate()?;
        let (events, events_rx) = mpsc::unbounded_channel();
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        let pool = ReceiverPool::new(rpc, config.transfer.clone(), config.max_receivers);

        Ok((
            Self {
                config,
                channel,
                watch_list: WatchList::new(),
                subscribed: false,
                queue: PendingReceiveQueue::new(),
                pool,
                receiving: HashSet::new(),
                in_flight: HashSet::new(),
                events,
                completions_tx,
                completions_rx,
            },
            events_rx,
        ))
    }

    /// Configuration in use.
    pub fn config(&self) -> &WatcherConfig {
        &self.config
    }

    /// Watched accounts.
    pub fn watch_list(&self) -> &WatchList {
        &self.watch_list
    }

    /// The push channel.
    pub fn channel(&self) -> &C {
        &self.channel
    }

    /// True once the node has been sent a full subscription on this
    /// connection.
    pub fn is_subscribed(&self) -> bool {
        self.subscribed
    }

    /// True while the push channel is connected.
    pub fn is_connected(&self) -> bool {
        self.channel.is_connected()
    }

    /// Enable or disable auto-receive.
    pub fn set_auto_receive(&mut self, enabled: bool) {
        self.config.auto_receive = enabled;
    }

    /// Whether auto-receive is enabled.
    pub fn auto_receive(&self) -> bool {
        self.config.auto_receive
    }

    /// Receives waiting for a receiver.
    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }

    /// Receives in flight.
    pub fn active_receives(&self) -> usize {
        self.pool.in_use()
    }

    /// Watch one more account.
    pub async fn add_watched_account(&mut self, account: Account) -> Result<(), WatcherError> {
        self.update_watched_accounts(vec![account], &[]).await
    }

    /// Add and remove watched accounts, then tell the node if connected:
    /// a full `subscribe` the first time, an `update` afterwards.
    pub async fn update_watched_accounts(
        &mut self,
        add: Vec<Account>,
        remove: &[&str],
    ) -> Result<(), WatcherError> {
        if let Some(account) = add.iter().find(|a| a.address().is_empty()) {
            return Err(WatcherError::InvalidAccount(format!(
                "account at index {} has no address",
                account.index()
            )));
        }

        let mut removed = Vec::new();
        for address in remove {
            if let Some(account) = self.watch_list.remove(address) {
                let dropped = self.queue.remove_account(address);
                if dropped > 0 {
                    debug!(account = %account.address(), dropped, "Dropped pending receives");
                }
                removed.push(account.address().to_string());
            }
        }
        let mut added = Vec::new();
        for account in add {
            let address = account.address().to_string();
            if self.watch_list.insert(account) {
                added.push(address);
            }
        }
        info!(
            added = added.len(),
            removed = removed.len(),
            watched = self.watch_list.len(),
            "Watch list updated"
        );

        if !self.channel.is_connected() {
            return Ok(());
        }
        if self.subscribed {
            if added.is_empty() && removed.is_empty() {
                return Ok(());
            }
            self.send(OutboundMessage::update(added, removed)).await
        } else {
            self.subscribe().await
        }
    }

    async fn subscribe(&mut self) -> Result<(), WatcherError> {
        if self.watch_list.is_empty() {
            return Ok(());
        }
        self.send(OutboundMessage::subscribe(self.watch_list.addresses()))
            .await?;
        self.subscribed = true;
        Ok(())
    }

    async fn send(&self, message: OutboundMessage) -> Result<(), WatcherError> {
        debug!(action = message.action(), "Sending to push channel");
        self.channel.send_text(message.to_text()?).await
    }

    /// Channel connected: subscribe with the full watch list.
    pub async fn on_connected(&mut self) -> Result<(), WatcherError> {
        log_event!(
            info,
            SUBSYSTEM,
            "Push channel connected",
            watched = self.watch_list.len()
        );
        self.subscribed = false;
        self.subscribe().await
    }

    /// Channel closed. The next connect re-subscribes.
    pub fn on_disconnected(&mut self, was_clean: bool) {
        if was_clean {
            log_event!(info, SUBSYSTEM, "Push channel closed");
        } else {
            log_event!(warn, SUBSYSTEM, "Push channel lost");
        }
        self.subscribed = false;
        self.emit(WatcherEvent::Disconnected { was_clean });
    }

    /// Send a ping if connected.
    pub async fn keepalive(&self) -> Result<(), WatcherError> {
        if !self.channel.is_connected() {
            return Ok(());
        }
        self.send(OutboundMessage::Ping).await
    }

    /// Handle one inbound text frame.
    ///
    /// Sends to a watched account holding its private key are queued for
    /// auto-receive; every other confirmation is forwarded unchanged.
    pub fn on_frame(&mut self, text: &str) -> Result<(), WatcherError> {
        let confirmation = match InboundMessage::parse(text)? {
            InboundMessage::Ack(ack) => {
                debug!(ack = %ack, "Push channel ack");
                return Ok(());
            }
            InboundMessage::Confirmation(confirmation) => confirmation,
        };

        let account_known = self.watch_list.contains(&confirmation.account);
        let link = self.watch_list.get(&confirmation.link_as_account);
        if !account_known && link.is_none() {
            return Err(WatcherError::UnwatchedAccount {
                account: confirmation.account,
                link: confirmation.link_as_account,
            });
        }

        let receiver = link.filter(|account| {
            self.config.auto_receive && confirmation.is_send() && account.has_private_key()
        });
        match receiver {
            Some(account) => {
                let (hash, amount) = confirmation.receivable()?;
                if self.in_flight.contains(&hash) {
                    debug!(hash = %hash, "Receive already in flight");
                    return Ok(());
                }
                let entry = PendingReceive {
                    account: account.clone(),
                    hash,
                    amount,
                };
                if self.queue.push(entry) {
                    debug!(
                        account = %confirmation.link_as_account,
                        hash = %hash,
                        amount = %amount,
                        "Queued auto-receive"
                    );
                }
                self.dispatch()
            }
            None => {
                self.emit(WatcherEvent::ConfirmationReceived(confirmation.raw));
                Ok(())
            }
        }
    }

    /// Start queued receives while receivers are free.
    fn dispatch(&mut self) -> Result<(), WatcherError> {
        while !self.queue.is_empty() {
            let Some(PooledReceiver { slot, receiver }) = self.pool.acquire()? else {
                break;
            };
            let receiving = &self.receiving;
            let Some(entry) = self.queue.pop_next(|address| !receiving.contains(address)) else {
                self.pool.release(slot);
                break;
            };

            let address = entry.address();
            self.receiving.insert(address.clone());
            self.in_flight.insert(entry.hash);
            log_account_event!(
                info,
                SUBSYSTEM,
                "Starting auto-receive",
                address,
                source = %entry.hash,
                slot
            );

            let completions = self.completions_tx.clone();
            tokio::spawn(async move {
                let result = receiver
                    .receive(&entry.account, entry.hash, entry.amount)
                    .await;
                let completion = Completion {
                    slot,
                    account: address,
                    source: entry.hash,
                    result,
                };
                if completions.send(completion).is_err() {
                    debug!("Watcher dropped before receive completed");
                }
            });
        }
        Ok(())
    }

    fn on_completion(&mut self, completion: Completion) {
        let Completion {
            slot,
            account,
            source,
            result,
        } = completion;
        self.pool.release(slot);
        self.receiving.remove(&account);
        self.in_flight.remove(&source);

        match &result {
            Ok(outcome) => {
                log_block_event!(
                    info,
                    SUBSYSTEM,
                    "Auto-receive completed",
                    outcome.subtype,
                    outcome.hash,
                    account = %account
                )
            }
            Err(e) => log_account_event!(
                warn,
                SUBSYSTEM,
                "Auto-receive failed",
                account,
                code = e.code(),
                error = %e
            ),
        }
        self.emit(WatcherEvent::ReceiveCompleted {
            account,
            source,
            result,
        });

        if let Err(e) = self.dispatch() {
            warn!(error = %e, "Could not start next receive");
        }
    }

    /// Wait for one auto-receive to finish and handle it.
    pub async fn next_completion(&mut self) {
        if let Some(completion) = self.completions_rx.recv().await {
            self.on_completion(completion);
        }
    }

    fn emit(&self, event: WatcherEvent) {
        if self.events.send(event).is_err() {
            debug!("Watcher event receiver dropped");
        }
    }

    /// Drive the watcher until the channel event stream ends.
    pub async fn run(mut self, mut channel_events: mpsc::Receiver<ChannelEvent>) {
        let period = self.config.keepalive_interval;
        let mut keepalive = interval_at(Instant::now() + period, period);
        keepalive.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                event = channel_events.recv() => match event {
                    Some(ChannelEvent::Connected) => {
                        if let Err(e) = self.on_connected().await {
                            warn!(error = %e, "Subscription failed");
                        }
                    }
                    Some(ChannelEvent::Frame(text)) => {
                        if let Err(e) = self.on_frame(&text) {
                            warn!(error = %e, "Dropped push channel frame");
                        }
                    }
                    Some(ChannelEvent::Closed { was_clean }) => self.on_disconnected(was_clean),
                    None => {
                        info!("Push channel event stream ended");
                        break;
                    }
                },
                Some(completion) = self.completions_rx.recv() => self.on_completion(completion),
                _ = keepalive.tick() => {
                    if let Err(e) = self.keepalive().await {
                        warn!(error = %e, "Keepalive failed");
                    }
                }
            }
        }
    }
}
