//! Collapses records that describe the same business.
//!
//! Two records are duplicates when their composite key (business name plus
//! normalized phone number) matches. The first record seen for a key holds
//! the slot until a record carrying an `Emails` field arrives, which replaces
//! it. Replacement keeps the slot's original position in the output.

use crate::types::Record;
use indexmap::map::Entry;
use indexmap::IndexMap;
use tracing::trace;

/// What happened to a record offered to the [`Deduplicator`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// First record for its key
    Inserted,
    /// Took over the key from an earlier record
    Replaced,
    /// Lost to the record already holding the key
    Dropped,
}

/// Owns the dedup table for the duration of one pass over the input.
#[derive(Debug, Default)]
pub struct Deduplicator {
    table: IndexMap<String, Record>,
    replaced: usize,
    dropped: usize,
}

impl Deduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offers one record. Records must be offered in input order.
    pub fn offer(&mut self, record: Record) -> Resolution {
        let key = record.composite_key();
        match self.table.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(record);
                Resolution::Inserted
            }
            Entry::Occupied(mut slot) => {
                if record.has_emails_field() {
                    trace!(key = %slot.key(), "Replacing record with one carrying Emails");
                    slot.insert(record);
                    self.replaced += 1;
                    Resolution::Replaced
                } else {
                    self.dropped += 1;
                    Resolution::Dropped
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Ends the pass and hands back the winners in first-seen key order.
    pub fn finish(self) -> ConflationResult {
        ConflationResult {
            records: self.table.into_values().collect(),
            replaced: self.replaced,
            dropped: self.dropped,
        }
    }
}

/// Output of a dedup pass
#[derive(Debug, Clone, Default)]
pub struct ConflationResult {
    pub records: Vec<Record>,
    /// Records that displaced an earlier holder of their key
    pub replaced: usize,
    /// Records discarded because their key was already held
    pub dropped: usize,
}

/// Runs a full dedup pass over `records`.
pub fn deduplicate<I>(records: I) -> ConflationResult
where
    I: IntoIterator<Item = Record>,
{
    let mut dedup = Deduplicator::new();
    for record in records {
        dedup.offer(record);
    }
    dedup.finish()
}
