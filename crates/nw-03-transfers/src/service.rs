//! Sender and Receiver services.
//!
//! Both drive a [`TransferMachine`] over a [`NodeRpc`] transport. Each reply
//! wait is bounded by `request_timeout`; dropping the future mid-flight
//! cancels the operation so the service is ready again.

use crate::domain::{Stage, TransferConfig, TransferError, TransferOutcome, TransferPhase};
use crate::machine::{Step, TransferMachine};
use crate::SUBSYSTEM;
use nw_01_accounts::Account;
use nw_02_node_rpc::{NodeRpc, RpcRequest};
use shared_types::{Amount, BlockHash};
use std::time::Duration;
use wallet_telemetry::log_event;

/// Cancels the operation unless disarmed.
struct CancelGuard<'a> {
    machine: &'a TransferMachine,
    armed: bool,
}

impl Drop for CancelGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.machine.cancel();
        }
    }
}

fn stage_of(request: &RpcRequest) -> Stage {
    match request {
        RpcRequest::WorkGenerate { .. } => Stage::WorkGenerate,
        RpcRequest::Process { .. } => Stage::Process,
        _ => Stage::AccountInfo,
    }
}

/// Shared request loop.
#[derive(Debug)]
struct Driver<R> {
    rpc: R,
    machine: TransferMachine,
    timeout: Option<Duration>,
}

impl<R: NodeRpc> Driver<R> {
    fn new(rpc: R, config: TransferConfig) -> Result<Self, TransferError> {
        let timeout = config.request_timeout;
        Ok(Self {
            rpc,
            machine: TransferMachine::new(config)?,
            timeout,
        })
    }

    async fn run(&self, first: RpcRequest) -> Result<TransferOutcome, TransferError> {
        let mut guard = CancelGuard {
            machine: &self.machine,
            armed: true,
        };
        let mut request = first;
        loop {
            let reply = match self.timeout {
                Some(limit) => {
                    match tokio::time::timeout(limit, self.rpc.call(&request)).await {
                        Ok(reply) => reply,
                        Err(_) => {
                            let stage = stage_of(&request);
                            log_event!(
                                warn,
                                SUBSYSTEM,
                                "Node did not reply in time",
                                %stage,
                                timeout = ?limit
                            );
                            return Err(TransferError::Timeout { stage });
                        }
                    }
                }
                None => self.rpc.call(&request).await,
            };

            match self.machine.on_reply(reply) {
                Step::Request(next) => request = next,
                Step::Completed(outcome) => {
                    guard.armed = false;
                    return Ok(outcome);
                }
                Step::Failed(error) => {
                    guard.armed = false;
                    return Err(error);
                }
            }
        }
    }
}

/// Sends funds from an account holding its private key.
#[derive(Debug)]
pub struct Sender<R> {
    driver: Driver<R>,
}

impl<R: NodeRpc> Sender<R> {
    /// Create a sender. Fails on invalid configuration.
    pub fn new(rpc: R, config: TransferConfig) -> Result<Self, TransferError> {
        Ok(Self {
            driver: Driver::new(rpc, config)?,
        })
    }

    /// Send `amount` from `sender` to `destination` and wait for the result.
    ///
    /// Precondition failures and `Busy` are returned before any request is
    /// made.
    pub async fn send(
        &self,
        sender: &Account,
        destination: &Account,
        amount: Amount,
    ) -> Result<TransferOutcome, TransferError> {
        let first = self.driver.machine.start_send(sender, destination, amount)?;
        self.driver.run(first).await
    }

    /// True when no send is in flight.
    pub fn is_ready(&self) -> bool {
        self.driver.machine.is_ready()
    }

    /// Current phase.
    pub fn phase(&self) -> TransferPhase {
        self.driver.machine.phase()
    }

    /// Transport in use.
    pub fn rpc(&self) -> &R {
        &self.driver.rpc
    }
}

/// Receives pending sends into an account holding its private key.
#[derive(Debug)]
pub struct Receiver<R> {
    driver: Driver<R>,
}

impl<R: NodeRpc> Receiver<R> {
    /// Create a receiver. Fails on invalid configuration.
    pub fn new(rpc: R, config: TransferConfig) -> Result<Self, TransferError> {
        Ok(Self {
            driver: Driver::new(rpc, config)?,
        })
    }

    /// Receive the send block `source` carrying `amount` into `receiver`.
    ///
    /// Opens the account with the configured default representative when the
    /// node has never seen it.
    pub async fn receive(
        &self,
        receiver: &Account,
        source: BlockHash,
        amount: Amount,
    ) -> Result<TransferOutcome, TransferError> {
        let first = self.driver.machine.start_receive(receiver, source, amount)?;
        self.driver.run(first).await
    }

    /// True when no receive is in flight.
    pub fn is_ready(&self) -> bool {
        self.driver.machine.is_ready()
    }

    /// Current phase.
    pub fn phase(&self) -> TransferPhase {
        self.driver.machine.phase()
    }

    /// Transport in use.
    pub fn rpc(&self) -> &R {
        &self.driver.rpc
    }
}
