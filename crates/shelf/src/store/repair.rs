//! Identifier backfill for decoded collections.
//!
//! Runs on the JSON tree before it is decoded into the caller's type, so the repair
//! works for any record shape that keys its identity under `"id"`.
//!
//! - Sequence entries that are objects with no `id`, or `id: null`, get a fresh id.
//! - Entries that already carry an id are left untouched, whatever its type.
//! - Non-object entries and non-sequence values are left untouched.

use crate::model::ProductId;
use serde_json::Value;

pub const ID_FIELD: &str = "id";

/// Assigns a fresh id to every sequence entry lacking one. Returns how many were assigned.
pub fn backfill_ids(value: &mut Value) -> serde_json::Result<usize> {
    let Value::Array(entries) = value else {
        return Ok(0);
    };

    let mut assigned = 0;
    for entry in entries.iter_mut() {
        if let Value::Object(fields) = entry {
            let missing = fields.get(ID_FIELD).map_or(true, Value::is_null);
            if missing {
                let id = serde_json::to_value(ProductId::generate())?;
                fields.insert(ID_FIELD.to_string(), id);
                assigned += 1;
            }
        }
    }
    Ok(assigned)
}
