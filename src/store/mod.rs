//! The document-collection backend: change feed, reducer and the
//! [`Collection`] capability the chart deletes through.

use std::sync::mpsc::Receiver;
use thiserror::Error;
use tracing::warn;

mod memory;

pub use memory::MemoryCollection;

/// A document in the charted collection.
///
/// Identity is `id`; `cost` drives slice size and `name` drives color and
/// label.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub id: String,
    pub name: String,
    pub cost: f64,
}

impl Record {
    pub fn new(id: impl Into<String>, name: impl Into<String>, cost: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            cost,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Added,
    Modified,
    Removed,
}

/// One change notification: a kind plus the document snapshot it refers to.
#[derive(Debug, Clone)]
pub struct Change {
    pub kind: ChangeKind,
    pub doc: Record,
}

impl Change {
    pub fn added(doc: Record) -> Self {
        Self {
            kind: ChangeKind::Added,
            doc,
        }
    }

    pub fn modified(doc: Record) -> Self {
        Self {
            kind: ChangeKind::Modified,
            doc,
        }
    }

    pub fn removed(doc: Record) -> Self {
        Self {
            kind: ChangeKind::Removed,
            doc,
        }
    }
}

/// Changes are delivered in batches; the chart re-renders once per batch.
pub type ChangeBatch = Vec<Change>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no document with id `{0}`")]
    NotFound(String),
    #[error("collection is disconnected")]
    Disconnected,
}

/// The backend capability the chart needs: a live change feed and
/// delete-by-id. Reconnection, authentication and query semantics live behind
/// the implementation.
pub trait Collection: Send + Sync {
    /// Open a live subscription. Implementations deliver the current contents
    /// as an initial `Added` batch, then one batch per mutation.
    fn subscribe(&self) -> Receiver<ChangeBatch>;

    fn delete(&self, id: &str) -> Result<(), StoreError>;
}

/// Apply a change batch to `records`, returning the new list.
///
/// Changes apply in event order within the batch. Ids stay unique: an `Added`
/// for an id already present replaces the existing record, and a `Modified`
/// for an absent id is skipped with a warning rather than invented.
pub fn reduce(records: &[Record], batch: &ChangeBatch) -> Vec<Record> {
    let mut next = records.to_vec();
    for change in batch {
        let doc = &change.doc;
        let at = next.iter().position(|r| r.id == doc.id);
        match change.kind {
            ChangeKind::Added => match at {
                Some(index) => {
                    warn!(id = %doc.id, "added change for a known document, replacing");
                    next[index] = doc.clone();
                }
                None => next.push(doc.clone()),
            },
            ChangeKind::Modified => match at {
                Some(index) => next[index] = doc.clone(),
                None => warn!(id = %doc.id, "modified change for an unknown document, skipping"),
            },
            ChangeKind::Removed => next.retain(|r| r.id != doc.id),
        }
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn milk() -> Record {
        Record::new("1", "milk", 12.0)
    }

    fn bread() -> Record {
        Record::new("2", "bread", 30.0)
    }

    #[test]
    fn added_appends() {
        let list = reduce(&[], &vec![Change::added(milk()), Change::added(bread())]);
        assert_eq!(list, vec![milk(), bread()]);
    }

    #[test]
    fn modified_replaces_by_id() {
        let list = vec![milk(), bread()];
        let cheaper = Record::new("2", "bread", 10.0);
        let list = reduce(&list, &vec![Change::modified(cheaper.clone())]);
        assert_eq!(list, vec![milk(), cheaper]);
    }

    #[test]
    fn removed_filters_by_id() {
        let list = vec![milk(), bread()];
        let list = reduce(&list, &vec![Change::removed(milk())]);
        assert_eq!(list, vec![bread()]);
    }

    #[test]
    fn add_then_remove_restores_prior_list() {
        let before = vec![milk()];
        let after = reduce(
            &before,
            &vec![Change::added(bread()), Change::removed(bread())],
        );
        assert_eq!(after, before);
    }

    #[test]
    fn modified_for_unknown_id_is_skipped() {
        let before = vec![milk()];
        let after = reduce(&before, &vec![Change::modified(bread())]);
        assert_eq!(after, before);
    }

    #[test]
    fn duplicate_added_keeps_ids_unique() {
        let replacement = Record::new("1", "milk", 99.0);
        let list = reduce(
            &[milk()],
            &vec![Change::added(replacement.clone())],
        );
        assert_eq!(list, vec![replacement]);
    }

    #[test]
    fn batch_applies_in_event_order() {
        let list = reduce(
            &[],
            &vec![
                Change::added(milk()),
                Change::modified(Record::new("1", "milk", 5.0)),
                Change::added(bread()),
            ],
        );
        assert_eq!(list, vec![Record::new("1", "milk", 5.0), bread()]);
    }

    #[test]
    fn reduce_does_not_mutate_its_input() {
        let before = vec![milk()];
        let _ = reduce(&before, &vec![Change::removed(milk())]);
        assert_eq!(before, vec![milk()]);
    }
}
