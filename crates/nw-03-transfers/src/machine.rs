//! # Transfer State Machine
//!
//! Sans-I/O core shared by [`Sender`](crate::Sender) and
//! [`Receiver`](crate::Receiver). A `start_*` call returns the first request;
//! each reply is fed to [`TransferMachine::on_reply`], which returns the next
//! request or the final result. The three legs are strictly sequential.
//!
//! The state lives behind a mutex, so replies may be delivered from a
//! different thread than the one that started the operation. Only one
//! operation is in flight at a time; a second `start_*` fails with `Busy`
//! and leaves the first untouched.

use crate::SUBSYSTEM;
use crate::domain::{
    ConfigError, Operation, Stage, TransferConfig, TransferError, TransferKind, TransferOutcome,
    TransferPhase, TransferState,
};
use nw_01_accounts::{Account, BlockSubtype, Link, StateBlock};
use nw_02_node_rpc::{
    AccountInfoReply, ProcessReply, RequestBuilder, RpcRequest, TransportError, WorkReply,
};
use parking_lot::Mutex;
use serde_json::Value;
use shared_types::{Amount, BlockHash, PublicKey};
use tracing::{debug, warn};
use uuid::Uuid;
use wallet_telemetry::{log_account_event, log_block_event, log_event};

/// Result of feeding one reply to the machine.
#[derive(Clone, Debug, PartialEq)]
pub enum Step {
    /// Send this request next.
    Request(RpcRequest),
    /// Finished; the machine is ready again.
    Completed(TransferOutcome),
    /// Aborted; the machine is ready again.
    Failed(TransferError),
}

/// Single-flight send/receive state machine.
#[derive(Debug)]
pub struct TransferMachine {
    config: TransferConfig,
    default_representative: Option<PublicKey>,
    state: Mutex<TransferState>,
}

impl TransferMachine {
    /// Create a machine. The config is validated here.
    pub fn new(config: TransferConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let default_representative = config.default_representative_key()?;
        Ok(Self {
            config,
            default_representative,
            state: Mutex::new(TransferState::Ready),
        })
    }

    /// Configuration in use.
    pub fn config(&self) -> &TransferConfig {
        &self.config
    }

    /// Current phase.
    pub fn phase(&self) -> TransferPhase {
        self.state.lock().phase()
    }

    /// True when no operation is in flight.
    pub fn is_ready(&self) -> bool {
        self.phase() == TransferPhase::Ready
    }

    /// Id of the operation in flight.
    pub fn current_operation(&self) -> Option<Uuid> {
        self.state.lock().operation().map(|op| op.id)
    }

    /// Start sending `amount` from `sender` to `destination`.
    pub fn start_send(
        &self,
        sender: &Account,
        destination: &Account,
        amount: Amount,
    ) -> Result<RpcRequest, TransferError> {
        require_signer(sender)?;
        if destination.address().is_empty() {
            return Err(TransferError::MissingCounterparty(
                "destination public key not set",
            ));
        }
        require_amount(&amount)?;

        self.start(
            sender,
            TransferKind::Send {
                destination: *destination.public_key(),
                amount,
            },
        )
    }

    /// Start receiving the send block `source` into `receiver`.
    pub fn start_receive(
        &self,
        receiver: &Account,
        source: BlockHash,
        amount: Amount,
    ) -> Result<RpcRequest, TransferError> {
        require_signer(receiver)?;
        if source.is_zero() {
            return Err(TransferError::MissingCounterparty("source block hash not set"));
        }
        require_amount(&amount)?;

        self.start(receiver, TransferKind::Receive { source, amount })
    }

    fn start(&self, account: &Account, kind: TransferKind) -> Result<RpcRequest, TransferError> {
        let mut state = self.state.lock();
        if !matches!(*state, TransferState::Ready) {
            return Err(TransferError::Busy {
                state: state.phase().as_str(),
            });
        }

        let operation = Operation {
            id: Uuid::new_v4(),
            account: account.clone(),
            kind,
        };
        log_account_event!(
            info,
            SUBSYSTEM,
            "Starting transfer",
            account.address(),
            operation = %operation.id,
            kind = operation.kind.name(),
            amount = %operation.kind.amount()
        );

        let request = RequestBuilder::new(account).account_info();
        *state = TransferState::AwaitingAccountInfo { operation };
        Ok(request)
    }

    /// Abandon the operation in flight. Returns `false` when idle.
    pub fn cancel(&self) -> bool {
        let previous = std::mem::take(&mut *self.state.lock());
        match previous.operation() {
            Some(op) => {
                warn!(operation = %op.id, phase = %previous.phase(), "Transfer cancelled");
                true
            }
            None => false,
        }
    }

    /// Feed the reply to the last request.
    ///
    /// Every outcome other than [`Step::Request`] leaves the machine ready.
    pub fn on_reply(&self, reply: Result<Value, TransportError>) -> Step {
        let mut state = self.state.lock();
        let current = std::mem::take(&mut *state);
        let operation_id = current.operation().map(|op| op.id);

        let result = match current {
            TransferState::Ready => Err(TransferError::NotInFlight),
            TransferState::AwaitingAccountInfo { operation } => {
                self.on_account_info(operation, reply)
            }
            TransferState::AwaitingWork { operation, block } => {
                self.on_work(operation, block, reply)
            }
            TransferState::AwaitingProcess {
                operation,
                subtype,
                hash,
                balance,
            } => self.on_process(operation, subtype, hash, balance, reply),
        };

        match result {
            Ok(Advance::Next(next_state, request)) => {
                debug!(
                    operation = ?operation_id,
                    phase = %next_state.phase(),
                    action = request.action(),
                    "Transfer advanced"
                );
                *state = next_state;
                Step::Request(request)
            }
            Ok(Advance::Done(outcome)) => {
                log_block_event!(
                    info,
                    SUBSYSTEM,
                    "Transfer completed",
                    outcome.subtype,
                    outcome.hash,
                    operation = %outcome.id,
                    account = %outcome.account
                );
                Step::Completed(outcome)
            }
            Err(error) => {
                log_event!(
                    warn,
                    SUBSYSTEM,
                    "Transfer failed",
                    operation = ?operation_id,
                    code = error.code(),
                    error = %error
                );
                Step::Failed(error)
            }
        }
    }

    fn on_account_info(
        &self,
        operation: Operation,
        reply: Result<Value, TransportError>,
    ) -> Result<Advance, TransferError> {
        let stage = Stage::AccountInfo;
        let reply = reply.map_err(|e| TransferError::from_transport(stage, e))?;

        let (block, difficulty) = match operation.kind {
            TransferKind::Send {
                destination,
                amount,
            } => {
                let info =
                    AccountInfoReply::parse(&reply).map_err(|e| TransferError::from_reply(stage, e))?;
                let balance = info.balance.checked_sub(&amount).map_err(|_| {
                    TransferError::UnexpectedAccountState(format!(
                        "balance {} raw is less than {} raw",
                        info.balance, amount
                    ))
                })?;
                let block = operation.account.create_block(
                    BlockSubtype::Send,
                    info.frontier,
                    info.representative,
                    balance,
                    Link::Destination(destination),
                )?;
                (block, self.config.work_difficulty.as_deref())
            }
            TransferKind::Receive { source, amount } => {
                let info = AccountInfoReply::parse_optional(&reply)
                    .map_err(|e| TransferError::from_reply(stage, e))?;
                let (previous, representative, balance) = match info {
                    Some(info) => {
                        let balance = info.balance.checked_add(&amount).map_err(|_| {
                            TransferError::UnexpectedAccountState(format!(
                                "balance {} raw plus {} raw overflows",
                                info.balance, amount
                            ))
                        })?;
                        (info.frontier, info.representative, balance)
                    }
                    None => {
                        let representative = self.default_representative.ok_or_else(|| {
                            TransferError::UnexpectedAccountState(
                                "account not opened and no default representative configured"
                                    .into(),
                            )
                        })?;
                        debug!(operation = %operation.id, "Opening new account");
                        (BlockHash::zero(), representative, amount)
                    }
                };
                let block = operation.account.create_block(
                    BlockSubtype::for_receive(&previous),
                    previous,
                    representative,
                    balance,
                    Link::SourceBlock(source),
                )?;
                (block, self.config.receive_work_difficulty.as_deref())
            }
        };

        let request = RequestBuilder::new(&operation.account).work_generate(
            &block.work_root(),
            difficulty,
            self.config.use_peers,
        );
        Ok(Advance::Next(
            TransferState::AwaitingWork { operation, block },
            request,
        ))
    }

    fn on_work(
        &self,
        operation: Operation,
        block: StateBlock,
        reply: Result<Value, TransportError>,
    ) -> Result<Advance, TransferError> {
        let stage = Stage::WorkGenerate;
        let reply = reply.map_err(|e| TransferError::from_transport(stage, e))?;
        let work = WorkReply::parse(&reply).map_err(|e| TransferError::from_reply(stage, e))?;

        let root = block.work_root();
        if let Some(echoed) = work.hash {
            if echoed != root {
                return Err(TransferError::HashMismatch {
                    stage,
                    expected: root,
                    actual: echoed,
                });
            }
        }

        let block = block.with_work(work.work);
        let subtype = block.subtype;
        let hash = block.hash();
        let balance = block.balance;
        let request = RequestBuilder::new(&operation.account).process(block);
        Ok(Advance::Next(
            TransferState::AwaitingProcess {
                operation,
                subtype,
                hash,
                balance,
            },
            request,
        ))
    }

    fn on_process(
        &self,
        operation: Operation,
        subtype: BlockSubtype,
        hash: BlockHash,
        balance: Amount,
        reply: Result<Value, TransportError>,
    ) -> Result<Advance, TransferError> {
        let stage = Stage::Process;
        let reply = reply.map_err(|e| TransferError::from_transport(stage, e))?;
        let processed =
            ProcessReply::parse(&reply).map_err(|e| TransferError::from_reply(stage, e))?;

        if processed.hash != hash {
            return Err(TransferError::HashMismatch {
                stage,
                expected: hash,
                actual: processed.hash,
            });
        }

        Ok(Advance::Done(TransferOutcome {
            id: operation.id,
            account: operation.account.address().to_string(),
            subtype,
            hash,
            balance,
        }))
    }
}

enum Advance {
    Next(TransferState, RpcRequest),
    Done(TransferOutcome),
}

fn require_signer(account: &Account) -> Result<(), TransferError> {
    if account.has_private_key() {
        Ok(())
    } else {
        Err(TransferError::NoPrivateKey {
            account: account.address().to_string(),
        })
    }
}

fn require_amount(amount: &Amount) -> Result<(), TransferError> {
    if amount.is_zero() {
        Err(TransferError::InvalidAmount("amount not set".into()))
    } else {
        Ok(())
    }
}
