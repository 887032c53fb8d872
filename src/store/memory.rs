//! In-memory [`Collection`] used by the tests and the demo.

use super::{Change, ChangeBatch, ChangeKind, Collection, Record, StoreError};
use parking_lot::Mutex;
use std::sync::mpsc::{self, Receiver, Sender};

/// A collection held entirely in memory.
///
/// Every mutation broadcasts one change batch to all live subscribers, so a
/// chart wired to it updates exactly as it would against a hosted backend.
#[derive(Default)]
pub struct MemoryCollection {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    docs: Vec<Record>,
    subscribers: Vec<Sender<ChangeBatch>>,
}

impl MemoryCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current contents, in insertion order.
    pub fn snapshot(&self) -> Vec<Record> {
        self.inner.lock().docs.clone()
    }

    pub fn insert(&self, record: Record) {
        let mut inner = self.inner.lock();
        inner.docs.retain(|r| r.id != record.id);
        inner.docs.push(record.clone());
        inner.broadcast(vec![Change::added(record)]);
    }

    pub fn update(&self, record: Record) -> Result<(), StoreError> {
        let mut inner = self.inner.lock();
        let index = inner
            .docs
            .iter()
            .position(|r| r.id == record.id)
            .ok_or_else(|| StoreError::NotFound(record.id.clone()))?;
        inner.docs[index] = record.clone();
        inner.broadcast(vec![Change::modified(record)]);
        Ok(())
    }

    pub fn remove(&self, id: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.lock();
        let index = inner
            .docs
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_owned()))?;
        let doc = inner.docs.remove(index);
        inner.broadcast(vec![Change::removed(doc)]);
        Ok(())
    }

    /// Apply an arbitrary batch and broadcast it as-is. Lets tests inject
    /// multi-change batches and out-of-order deliveries.
    pub fn apply(&self, batch: ChangeBatch) {
        let mut inner = self.inner.lock();
        for change in &batch {
            match change.kind {
                ChangeKind::Added | ChangeKind::Modified => {
                    inner.docs.retain(|r| r.id != change.doc.id);
                    inner.docs.push(change.doc.clone());
                }
                ChangeKind::Removed => inner.docs.retain(|r| r.id != change.doc.id),
            }
        }
        inner.broadcast(batch);
    }
}

impl Inner {
    fn broadcast(&mut self, batch: ChangeBatch) {
        // drop subscribers that hung up
        self.subscribers
            .retain(|tx| tx.send(batch.clone()).is_ok());
    }
}

impl Collection for MemoryCollection {
    fn subscribe(&self) -> Receiver<ChangeBatch> {
        let (tx, rx) = mpsc::channel();
        let mut inner = self.inner.lock();
        if !inner.docs.is_empty() {
            // initial snapshot arrives as one batch of added changes
            let initial = inner.docs.iter().cloned().map(Change::added).collect();
            let _ = tx.send(initial);
        }
        inner.subscribers.push(tx);
        rx
    }

    fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.remove(id)
    }
}
