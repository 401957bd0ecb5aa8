//! # Domain Model: Products and Their Identity
//!
//! A [`Product`] is the single record type managed by shelf: a name, a price, a
//! supplier email and the date it entered stock. Its [`ProductId`] is the merge key
//! used when an edited product is written back into the collection.
//!
//! ## Persisted Shape
//!
//! Products are stored as a JSON array with camelCase keys:
//!
//! ```text
//! [{"id": "0190c6a2-...", "name": "Laptop", "price": 1200.0,
//!   "supplierEmail": "sales@example.com", "entryDate": "2023-11-15"}]
//! ```
//!
//! ## Legacy Entries
//!
//! Collections written by earlier versions may hold entries with no `id`, with a
//! numeric `id`, or with fields missing altogether. Deserialization is lenient:
//!
//! - Missing `id` → `None` (the store backfills it on load, see [`crate::store::repair`])
//! - Numeric `id` → [`ProductId::Number`], kept as is
//! - Missing `name` / `supplierEmail` → empty text
//! - Missing `price` → `0`
//! - Missing `entryDate` → `None`
//!
//! Products emitted by the form always carry every field.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identifier of a product.
///
/// Ids minted here are UUIDv7 (millisecond timestamp prefix plus random bits), so
/// two ids generated in the same process never collide in practice. The other
/// variants exist only to carry legacy ids through a load/save cycle unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
    Uuid(Uuid),
    Number(serde_json::Number),
    Text(String),
}

impl ProductId {
    pub fn generate() -> Self {
        ProductId::Uuid(Uuid::now_v7())
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductId::Uuid(id) => write!(f, "{}", id),
            ProductId::Number(n) => write!(f, "{}", n),
            ProductId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<Uuid> for ProductId {
    fn from(id: Uuid) -> Self {
        ProductId::Uuid(id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default)]
    pub id: Option<ProductId>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub supplier_email: String,
    #[serde(default)]
    pub entry_date: Option<NaiveDate>,
}

impl Product {
    /// Creates a product with a freshly generated id.
    pub fn new(
        name: impl Into<String>,
        price: f64,
        supplier_email: impl Into<String>,
        entry_date: NaiveDate,
    ) -> Self {
        Self {
            id: Some(ProductId::generate()),
            name: name.into(),
            price,
            supplier_email: supplier_email.into(),
            entry_date: Some(entry_date),
        }
    }

    pub fn has_id(&self) -> bool {
        self.id.is_some()
    }
}
