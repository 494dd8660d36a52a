use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;

use super::poisoned;
use crate::domain::{
    models::{ActivityId, DateRange, EntryKey, TimesheetEntry},
    ports::outbound::EntryStore,
    TimesheetError,
};

/// Entry store backed by an ordered map, so range reads are a map range.
#[derive(Default)]
pub struct MemoryEntryStore {
    entries: RwLock<BTreeMap<EntryKey, TimesheetEntry>>,
    writes: AtomicUsize,
}

impl MemoryEntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    /// Seed entries without counting them as writes.
    pub fn with_entries(self, entries: impl IntoIterator<Item = TimesheetEntry>) -> Self {
        if let Ok(mut map) = self.entries.write() {
            map.extend(entries.into_iter().map(|entry| (entry.key.clone(), entry)));
        }
        self
    }

    #[cfg(test)]
    pub fn get(&self, key: &EntryKey) -> Result<Option<TimesheetEntry>, TimesheetError> {
        Ok(self.entries.read().map_err(poisoned)?.get(key).cloned())
    }

    /// Sum of all hours ever booked on the activity, regardless of date.
    pub fn total_hours(&self, activity_id: &ActivityId) -> Result<f64, TimesheetError> {
        let entries = self.entries.read().map_err(poisoned)?;
        Ok(entries
            .values()
            .filter(|entry| entry.activity_id() == activity_id)
            .map(TimesheetEntry::booked_hours)
            .sum())
    }

    #[cfg(test)]
    /// Number of deletes and merges performed so far.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl EntryStore for MemoryEntryStore {
    async fn delete(&self, key: &EntryKey) -> Result<(), TimesheetError> {
        self.entries.write().map_err(poisoned)?.remove(key);
        self.writes.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    async fn merge(&self, entry: TimesheetEntry) -> Result<TimesheetEntry, TimesheetError> {
        self.entries
            .write()
            .map_err(poisoned)?
            .insert(entry.key.clone(), entry.clone());
        self.writes.fetch_add(1, Ordering::Relaxed);
        Ok(entry)
    }

    async fn get_entries_in_range(
        &self,
        activity_id: &ActivityId,
        range: &DateRange,
    ) -> Result<Vec<TimesheetEntry>, TimesheetError> {
        let from = EntryKey::new(activity_id.clone(), range.start());
        let to = EntryKey::new(activity_id.clone(), range.end());

        let entries = self.entries.read().map_err(poisoned)?;
        Ok(entries.range(from..=to).map(|(_, entry)| entry.clone()).collect())
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;

    #[tokio::test]
    async fn range_read_is_scoped_to_activity_and_dates() {
        let store = MemoryEntryStore::new().with_entries([
            TimesheetEntry::new("a", date!(2008 - 03 - 31), Some(1.0)),
            TimesheetEntry::new("a", date!(2008 - 04 - 01), Some(2.0)),
            TimesheetEntry::new("a", date!(2008 - 04 - 07), Some(3.0)),
            TimesheetEntry::new("b", date!(2008 - 04 - 02), Some(4.0)),
        ]);
        let range = DateRange::new(date!(2008 - 04 - 01), date!(2008 - 04 - 06)).unwrap();

        let found = store
            .get_entries_in_range(&ActivityId::new("a"), &range)
            .await
            .unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].hours, Some(2.0));
        assert_eq!(store.total_hours(&ActivityId::new("a")).unwrap(), 6.0);
    }

    #[tokio::test]
    async fn merge_overwrites_and_delete_removes() {
        let store = MemoryEntryStore::new();
        let key = EntryKey::new("a", date!(2008 - 04 - 01));

        store
            .merge(TimesheetEntry::new("a", key.date, Some(5.0)))
            .await
            .unwrap();
        store
            .merge(TimesheetEntry::new("a", key.date, Some(8.0)).with_comment("late"))
            .await
            .unwrap();

        let stored = store.get(&key).unwrap().unwrap();
        assert_eq!(stored.hours, Some(8.0));
        assert_eq!(stored.comment.as_deref(), Some("late"));

        store.delete(&key).await.unwrap();
        assert!(store.get(&key).unwrap().is_none());
        assert_eq!(store.writes(), 3);
    }
}
