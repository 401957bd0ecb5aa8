use super::backend::StorageBackend;
use super::repair::backfill_ids;
use super::{LoadReport, LoadSource};
use crate::error::{Result, ShelfError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A value held in memory and written through to a storage slot on every change.
///
/// Loaded once with [`CollectionStore::load`]; from then on the in-memory value is
/// authoritative and storage is a best-effort mirror of it.
pub struct CollectionStore<T, B: StorageBackend> {
    backend: B,
    key: String,
    value: T,
}

impl<T, B> CollectionStore<T, B>
where
    T: Serialize + DeserializeOwned,
    B: StorageBackend,
{
    /// Rehydrate the value stored under `key`, falling back to `initial`.
    ///
    /// Fallback order:
    /// 1. Read: nothing stored, empty text, or the medium fails → `initial`
    /// 2. Parse: text is not JSON, or not a `T` → `initial`
    /// 3. Repair: sequence entries without an id get a fresh one
    ///
    /// A sequence is decoded entry by entry: entries that do not decode are set aside
    /// under the [`rejected_key`] slot and reported, the rest load normally.
    ///
    /// Never fails; problems are recorded in the returned [`LoadReport`].
    pub fn load(backend: B, key: impl Into<String>, initial: T) -> (Self, LoadReport) {
        let key = key.into();
        let mut report = LoadReport::default();

        let persisted = read_stored(&backend, &key, &mut report)
            .and_then(|text| parse_stored(&key, &text, &mut report));

        let value = match persisted {
            Some(tree) => match repair_and_decode::<T>(tree) {
                Ok(decoded) => {
                    report.source = LoadSource::Persisted;
                    report.backfilled_ids = decoded.backfilled;
                    if !decoded.rejected.is_empty() {
                        set_aside(&backend, &key, &decoded.rejected);
                    }
                    report.rejected = decoded.rejected;
                    decoded.value
                }
                Err(e) => {
                    tracing::warn!(key = %key, error = %e, "stored value has the wrong shape, using initial value");
                    report.error = Some(ShelfError::read(&key, ShelfError::Serialization(e)));
                    repair_initial(initial, &mut report)
                }
            },
            None => repair_initial(initial, &mut report),
        };

        if report.backfilled_ids > 0 {
            tracing::debug!(key = %key, count = report.backfilled_ids, "backfilled missing ids");
        }

        (
            Self {
                backend,
                key,
                value,
            },
            report,
        )
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Replace the value and write it through.
    ///
    /// The replacement stands even when the write fails; the error is returned so the
    /// caller can tell the user their change is not saved.
    pub fn set(&mut self, value: T) -> Result<()> {
        self.value = value;
        self.persist()
    }

    /// Modify the value in place, then write it through as [`set`](Self::set) does.
    pub fn update<F: FnOnce(&mut T)>(&mut self, f: F) -> Result<()> {
        f(&mut self.value);
        self.persist()
    }

    fn persist(&self) -> Result<()> {
        let result = serde_json::to_string(&self.value)
            .map_err(ShelfError::Serialization)
            .and_then(|text| self.backend.set_item(&self.key, &text));

        match result {
            Ok(()) => {
                tracing::debug!(key = %self.key, "persisted collection");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "failed to persist collection, keeping in-memory value");
                Err(ShelfError::write(&self.key, e))
            }
        }
    }
}

/// Slot holding the entries of `key` that could not be decoded.
pub fn rejected_key(key: &str) -> String {
    format!("{}.rejected", key)
}

fn read_stored<B: StorageBackend>(backend: &B, key: &str, report: &mut LoadReport) -> Option<String> {
    match backend.get_item(key) {
        Ok(text) => text.filter(|text| !text.is_empty()),
        Err(e) => {
            tracing::warn!(key = %key, error = %e, "failed to read from storage, using initial value");
            report.error = Some(ShelfError::read(key, e));
            None
        }
    }
}

fn parse_stored(key: &str, text: &str, report: &mut LoadReport) -> Option<Value> {
    match serde_json::from_str(text) {
        Ok(tree) => Some(tree),
        Err(e) => {
            tracing::warn!(key = %key, error = %e, "stored value is not valid JSON, using initial value");
            report.error = Some(ShelfError::read(key, ShelfError::Serialization(e)));
            None
        }
    }
}

struct Decoded<T> {
    value: T,
    backfilled: usize,
    rejected: Vec<Value>,
}

fn repair_and_decode<T: DeserializeOwned>(tree: Value) -> serde_json::Result<Decoded<T>> {
    let entries = match tree {
        Value::Array(entries) => entries,
        other => {
            return Ok(Decoded {
                value: T::deserialize(&other)?,
                backfilled: 0,
                rejected: Vec::new(),
            })
        }
    };

    let mut kept = Vec::with_capacity(entries.len());
    let mut rejected = Vec::new();
    let mut backfilled = 0;
    for entry in entries {
        // Each entry is tried as a one-element sequence of T
        let mut candidate = Value::Array(vec![entry.clone()]);
        let assigned = backfill_ids(&mut candidate)?;
        let decodes = T::deserialize(&candidate).is_ok();
        match candidate {
            Value::Array(repaired) if decodes => {
                kept.extend(repaired);
                backfilled += assigned;
            }
            _ => rejected.push(entry),
        }
    }

    let value = T::deserialize(&Value::Array(kept))?;
    Ok(Decoded {
        value,
        backfilled,
        rejected,
    })
}

// The initial value gets the same id repair as stored data.
fn repair_initial<T: Serialize + DeserializeOwned>(initial: T, report: &mut LoadReport) -> T {
    report.source = LoadSource::Default;
    match serde_json::to_value(&initial).and_then(repair_and_decode::<T>) {
        Ok(decoded) if decoded.rejected.is_empty() => {
            report.backfilled_ids = decoded.backfilled;
            decoded.value
        }
        _ => initial,
    }
}

/// Merge `rejected` into the rejected slot of `key`. Best effort: a failure is logged only.
fn set_aside<B: StorageBackend>(backend: &B, key: &str, rejected: &[Value]) {
    let slot = rejected_key(key);
    tracing::warn!(key = %key, slot = %slot, count = rejected.len(), "set aside entries that could not be decoded");

    let result = backend.get_item(&slot).and_then(|existing| {
        let mut kept: Vec<Value> = existing
            .and_then(|text| serde_json::from_str(&text).ok())
            .unwrap_or_default();
        for entry in rejected {
            if !kept.contains(entry) {
                kept.push(entry.clone());
            }
        }
        let text = serde_json::to_string(&kept)?;
        backend.set_item(&slot, &text)
    });

    if let Err(e) = result {
        tracing::warn!(key = %key, slot = %slot, error = %e, "failed to store rejected entries");
    }
}
