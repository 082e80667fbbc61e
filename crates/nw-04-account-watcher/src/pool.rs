//! Receiver pool.
//!
//! Receivers are created on demand up to a fixed capacity and recycled
//! through a free list, so acquiring one is O(1).

use nw_02_node_rpc::NodeRpc;
use nw_03_transfers::{Receiver, TransferConfig, TransferError};
use std::sync::Arc;
use tracing::debug;

/// Handle to a pooled receiver. Give the slot back with
/// [`ReceiverPool::release`].
#[derive(Debug)]
pub struct PooledReceiver<R> {
    /// Slot index.
    pub slot: usize,
    /// The receiver.
    pub receiver: Arc<Receiver<R>>,
}

/// Lazily grown pool of [`Receiver`]s sharing one transport.
#[derive(Debug)]
pub struct ReceiverPool<R> {
    rpc: R,
    config: TransferConfig,
    receivers: Vec<Arc<Receiver<R>>>,
    busy: Vec<bool>,
    free: Vec<usize>,
    capacity: usize,
}

impl<R: NodeRpc + Clone> ReceiverPool<R> {
    /// Empty pool holding at most `capacity` receivers.
    pub fn new(rpc: R, config: TransferConfig, capacity: usize) -> Self {
        Self {
            rpc,
            config,
            receivers: Vec::new(),
            busy: Vec::new(),
            free: Vec::new(),
            capacity,
        }
    }

    /// A free receiver, creating one if the pool is below capacity.
    /// `None` when every receiver is busy.
    pub fn acquire(&mut self) -> Result<Option<PooledReceiver<R>>, TransferError> {
        if let Some(slot) = self.free.pop() {
            self.busy[slot] = true;
            return Ok(Some(PooledReceiver {
                slot,
                receiver: Arc::clone(&self.receivers[slot]),
            }));
        }
        if self.receivers.len() >= self.capacity {
            return Ok(None);
        }

        let receiver = Arc::new(Receiver::new(self.rpc.clone(), self.config.clone())?);
        let slot = self.receivers.len();
        self.receivers.push(Arc::clone(&receiver));
        self.busy.push(true);
        debug!(slot, size = self.receivers.len(), "Receiver created");
        Ok(Some(PooledReceiver { slot, receiver }))
    }

    /// Return a slot. Unknown or already free slots are ignored.
    pub fn release(&mut self, slot: usize) {
        if let Some(busy) = self.busy.get_mut(slot).filter(|busy| **busy) {
            *busy = false;
            self.free.push(slot);
        }
    }

    /// Receivers created so far.
    pub fn size(&self) -> usize {
        self.receivers.len()
    }

    /// Receivers currently handed out.
    pub fn in_use(&self) -> usize {
        self.receivers.len() - self.free.len()
    }

    /// Maximum number of receivers.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nw_02_node_rpc::MockNodeRpc;

    fn pool(capacity: usize) -> ReceiverPool<MockNodeRpc> {
        ReceiverPool::new(MockNodeRpc::new(), TransferConfig::default(), capacity)
    }

    #[test]
    fn test_grows_lazily_to_capacity() {
        let mut pool = pool(2);
        assert_eq!(pool.size(), 0);

        let first = pool.acquire().unwrap().unwrap();
        let second = pool.acquire().unwrap().unwrap();
        assert_ne!(first.slot, second.slot);
        assert_eq!(pool.size(), 2);
        assert!(pool.acquire().unwrap().is_none());
        assert_eq!(pool.in_use(), 2);
    }

    #[test]
    fn test_release_recycles() {
        let mut pool = pool(1);
        let first = pool.acquire().unwrap().unwrap();
        pool.release(first.slot);
        pool.release(first.slot);
        assert_eq!(pool.in_use(), 0);

        let again = pool.acquire().unwrap().unwrap();
        assert_eq!(again.slot, first.slot);
        assert!(Arc::ptr_eq(&again.receiver, &first.receiver));
        assert_eq!(pool.size(), 1);
    }

    #[test]
    fn test_double_release_after_reacquire() {
        let mut pool = pool(2);
        let first = pool.acquire().unwrap().unwrap();
        let second = pool.acquire().unwrap().unwrap();
        pool.release(first.slot);
        pool.release(first.slot);
        pool.release(second.slot);
        pool.release(second.slot);
        assert_eq!(pool.in_use(), 0);

        let a = pool.acquire().unwrap().unwrap();
        let b = pool.acquire().unwrap().unwrap();
        assert_ne!(a.slot, b.slot);
        assert!(pool.acquire().unwrap().is_none());
        assert_eq!(pool.in_use(), 2);
    }

    #[test]
    fn test_release_unknown_slot() {
        let mut pool = pool(1);
        pool.release(7);
        assert_eq!(pool.in_use(), 0);
        assert_eq!(pool.size(), 0);
    }

    #[test]
    fn test_invalid_transfer_config() {
        let config = TransferConfig::with_default_representative("nano_bad");
        let mut pool = ReceiverPool::new(MockNodeRpc::new(), config, 1);
        assert!(pool.acquire().is_err());
    }
}
