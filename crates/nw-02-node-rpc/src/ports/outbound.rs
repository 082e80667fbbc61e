//! # Outbound Ports
//!
//! The node transport. Implementations send the request body to the node
//! (or the work server for [`Endpoint::Work`](crate::domain::Endpoint)) and
//! return the parsed JSON reply, whatever it contains. Interpreting node
//! errors is the caller's job.

use crate::domain::{RpcRequest, TransportError};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Arc;

/// Node RPC transport - outbound port.
#[async_trait]
pub trait NodeRpc: Send + Sync {
    /// Send one request and return the JSON reply.
    async fn call(&self, request: &RpcRequest) -> Result<Value, TransportError>;
}

#[async_trait]
impl<T: NodeRpc + ?Sized> NodeRpc for Arc<T> {
    async fn call(&self, request: &RpcRequest) -> Result<Value, TransportError> {
        (**self).call(request).await
    }
}

// =============================================================================
// Mock Implementation for Testing
// =============================================================================

type Handler = dyn Fn(&RpcRequest) -> Result<Value, TransportError> + Send + Sync;

/// Scripted node for tests.
///
/// Replies are taken from the script in order; once it is empty the handler
/// answers, and without a handler the call fails with a connection error.
#[derive(Clone, Default)]
pub struct MockNodeRpc {
    script: Arc<Mutex<VecDeque<Result<Value, TransportError>>>>,
    handler: Option<Arc<Handler>>,
    requests: Arc<Mutex<Vec<RpcRequest>>>,
}

impl MockNodeRpc {
    /// Empty script, no handler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every unscripted call with `handler`.
    pub fn with_handler<F>(handler: F) -> Self
    where
        F: Fn(&RpcRequest) -> Result<Value, TransportError> + Send + Sync + 'static,
    {
        Self {
            handler: Some(Arc::new(handler)),
            ..Self::default()
        }
    }

    /// Queue a JSON reply.
    pub fn push_reply(&self, reply: Value) -> &Self {
        self.script.lock().push_back(Ok(reply));
        self
    }

    /// Queue a transport failure.
    pub fn push_error(&self, error: TransportError) -> &Self {
        self.script.lock().push_back(Err(error));
        self
    }

    /// Every request received so far.
    pub fn requests(&self) -> Vec<RpcRequest> {
        self.requests.lock().clone()
    }

    /// Actions received so far, in order.
    pub fn actions(&self) -> Vec<&'static str> {
        self.requests.lock().iter().map(RpcRequest::action).collect()
    }

    /// Number of requests received.
    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    /// Scripted replies not yet consumed.
    pub fn remaining(&self) -> usize {
        self.script.lock().len()
    }
}

#[async_trait]
impl NodeRpc for MockNodeRpc {
    async fn call(&self, request: &RpcRequest) -> Result<Value, TransportError> {
        self.requests.lock().push(request.clone());
        if let Some(reply) = self.script.lock().pop_front() {
            return reply;
        }
        match &self.handler {
            Some(handler) => handler(request),
            None => Err(TransportError::Connection(format!(
                "no scripted reply for {}",
                request.action()
            ))),
        }
    }
}
