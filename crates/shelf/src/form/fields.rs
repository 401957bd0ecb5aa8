use crate::model::{Product, ProductId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The editable fields of a product form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Name,
    Price,
    SupplierEmail,
    EntryDate,
}

impl Field {
    pub const ALL: [Field; 4] = [
        Field::Name,
        Field::Price,
        Field::SupplierEmail,
        Field::EntryDate,
    ];

    /// External name, as used by input widgets and persisted data.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Price => "price",
            Field::SupplierEmail => "supplierEmail",
            Field::EntryDate => "entryDate",
        }
    }

    /// Human label used in messages.
    pub fn label(&self) -> &'static str {
        match self {
            Field::Name => "Product name",
            Field::Price => "Price",
            Field::SupplierEmail => "Supplier email",
            Field::EntryDate => "Entry date",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown form field '{0}'")]
pub struct UnknownField(pub String);

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// The transient draft of a product, every field held as typed text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormBuffer {
    pub name: String,
    pub price: String,
    pub supplier_email: String,
    pub entry_date: String,
    pub id: Option<ProductId>,
}

impl FormBuffer {
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            price: product.price.to_string(),
            supplier_email: product.supplier_email.clone(),
            entry_date: product
                .entry_date
                .map(|date| date.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            id: product.id.clone(),
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Price => &self.price,
            Field::SupplierEmail => &self.supplier_email,
            Field::EntryDate => &self.entry_date,
        }
    }

    pub(crate) fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Name => self.name = value,
            Field::Price => self.price = value,
            Field::SupplierEmail => self.supplier_email = value,
            Field::EntryDate => self.entry_date = value,
        }
    }

    pub fn is_empty(&self) -> bool {
        Field::ALL.iter().all(|field| self.get(*field).is_empty()) && self.id.is_none()
    }
}

/// Coarse classification of field errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Required,
    Duplicate,
    Range,
    Format,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("{} is required.", .0.label())]
    Required(Field),

    #[error("A product with this name already exists.")]
    DuplicateName,

    #[error("Price must be a number greater than 0.")]
    PriceOutOfRange,

    #[error("Supplier email is not valid.")]
    InvalidEmail,

    #[error("Entry date must be a date in YYYY-MM-DD form.")]
    InvalidDate,

    #[error("{} must be at most {max} characters.", .field.label())]
    TooLong { field: Field, max: usize },
}

impl FieldError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FieldError::Required(_) => ErrorKind::Required,
            FieldError::DuplicateName => ErrorKind::Duplicate,
            FieldError::PriceOutOfRange | FieldError::TooLong { .. } => ErrorKind::Range,
            FieldError::InvalidEmail | FieldError::InvalidDate => ErrorKind::Format,
        }
    }
}

/// Per-field errors. A field with no problem has no entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, FieldError>);

impl FieldErrors {
    pub fn get(&self, field: Field) -> Option<&FieldError> {
        self.0.get(&field)
    }

    pub fn insert(&mut self, field: Field, error: FieldError) {
        self.0.insert(field, error);
    }

    /// Drop the error for `field`. Returns whether there was one.
    pub fn clear(&mut self, field: Field) -> bool {
        self.0.remove(&field).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &FieldError)> {
        self.0.iter().map(|(field, error)| (*field, error))
    }
}
