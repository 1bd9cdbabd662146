//! JSON-array documents edited one record at a time.
//!
//! Records this build cannot decode (an unknown status, a bad timestamp) are
//! skipped on read but written back untouched, so a rewrite never drops them.

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use super::{KeyValueStore, StorageError};

#[derive(Debug, Clone)]
pub(crate) struct Records {
    key: &'static str,
    values: Vec<Value>,
}

impl Records {
    /// `None` when `raw` is not a JSON array.
    pub(crate) fn parse(key: &'static str, raw: &str) -> Option<Self> {
        match serde_json::from_str(raw) {
            Ok(values) => Some(Self { key, values }),
            Err(e) => {
                tracing::warn!(key, error = %e, "malformed document, treating as empty");
                None
            }
        }
    }

    /// Missing and malformed documents both load as an empty set.
    pub(crate) fn load(kv: &dyn KeyValueStore, key: &'static str) -> Result<Self, StorageError> {
        let records = kv.get(key)?.and_then(|raw| Self::parse(key, &raw));
        Ok(records.unwrap_or(Self { key, values: Vec::new() }))
    }

    pub(crate) fn from_records<T: Serialize>(key: &'static str, records: &[T]) -> crate::Result<Self> {
        let values = records.iter().map(serde_json::to_value).collect::<Result<_, _>>()?;
        Ok(Self { key, values })
    }

    pub(crate) fn decoded<T: DeserializeOwned>(&self) -> Vec<T> {
        self.values
            .iter()
            .enumerate()
            .filter_map(|(index, value)| match serde_json::from_value(value.clone()) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!(key = self.key, index, error = %e, "skipping undecodable record");
                    None
                }
            })
            .collect()
    }

    pub(crate) fn push<T: Serialize>(&mut self, record: &T) -> crate::Result<()> {
        self.values.push(serde_json::to_value(record)?);
        Ok(())
    }

    /// Applies `edit` to the first decodable record matching `wanted` and
    /// writes it back in place. Returns the edited record.
    pub(crate) fn update_first<T: DeserializeOwned + Serialize>(
        &mut self,
        wanted: impl Fn(&T) -> bool,
        edit: impl FnOnce(&mut T),
    ) -> crate::Result<Option<T>> {
        for value in self.values.iter_mut() {
            let Ok(mut record) = serde_json::from_value::<T>(value.clone()) else { continue };
            if wanted(&record) {
                edit(&mut record);
                *value = serde_json::to_value(&record)?;
                return Ok(Some(record));
            }
        }
        Ok(None)
    }

    /// Drops every decodable record matching `unwanted`; returns how many went.
    pub(crate) fn remove_where<T: DeserializeOwned>(&mut self, unwanted: impl Fn(&T) -> bool) -> usize {
        let before = self.values.len();
        self.values
            .retain(|value| !serde_json::from_value::<T>(value.clone()).is_ok_and(|record| unwanted(&record)));
        before - self.values.len()
    }

    pub(crate) fn save(&self, kv: &dyn KeyValueStore) -> crate::Result<()> {
        super::save(kv, self.key, &self.values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    const KEY: &str = "numbers";

    fn seeded(raw: &str) -> MemoryStore {
        let kv = MemoryStore::new();
        kv.set(KEY, raw.to_string()).unwrap();
        kv
    }

    #[test]
    fn test_undecodable_records_are_skipped_not_lost() {
        let kv = seeded(r#"[1, "two", 3]"#);
        let mut records = Records::load(&kv, KEY).unwrap();
        assert_eq!(records.decoded::<u32>(), vec![1, 3]);

        records.push(&4u32).unwrap();
        records.save(&kv).unwrap();
        assert_eq!(kv.get(KEY).unwrap().as_deref(), Some(r#"[1,"two",3,4]"#));
    }

    #[test]
    fn test_update_and_remove_leave_foreign_records() {
        let kv = seeded(r#"[1, "two", 3]"#);
        let mut records = Records::load(&kv, KEY).unwrap();
        assert_eq!(records.update_first(|n: &u32| *n == 3, |n| *n = 30).unwrap(), Some(30));
        assert!(records.update_first(|n: &u32| *n == 99, |n| *n = 0).unwrap().is_none());
        assert_eq!(records.remove_where(|n: &u32| *n == 1), 1);
        records.save(&kv).unwrap();
        assert_eq!(kv.get(KEY).unwrap().as_deref(), Some(r#"["two",30]"#));
    }

    #[test]
    fn test_malformed_document_loads_empty() {
        let kv = seeded("{not json");
        assert!(Records::load(&kv, KEY).unwrap().decoded::<u32>().is_empty());
        assert!(Records::parse(KEY, "{not json").is_none());
        assert!(Records::load(&MemoryStore::new(), KEY).unwrap().decoded::<u32>().is_empty());
    }
}
