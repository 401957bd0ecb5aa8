//! # Product Form
//!
//! [`ProductForm`] is the controller behind a create/edit product form. It owns the
//! edit buffer and the per-field error map, and nothing else: the product list, the
//! storage and the "which product is being edited" decision all live with the caller.
//!
//! ## Lifecycle
//!
//! ```text
//!   initialize(None)            initialize(Some(&product))
//!        │                               │
//!        ▼                               ▼
//!   ┌──────────┐                   ┌──────────┐
//!   │  Create  │                   │   Edit   │
//!   └──────────┘                   └──────────┘
//!        │ update_field / validate        │
//!        ▼                               ▼
//!   submit ─► on_submit(product)    submit ─► on_submit(product)
//!        │   buffer reset               │   buffer kept; caller leaves edit
//!        ▼                               ▼   mode and calls initialize(None)
//! ```
//!
//! The caller invokes [`ProductForm::initialize`] whenever the product being edited
//! changes identity. Nothing re-runs implicitly.
//!
//! ## Outbound Events
//!
//! Submission and cancellation are reported through a [`FormHandler`] passed to the
//! call. `on_submit` runs exactly once per successful validation.

pub mod fields;
pub mod price;
pub mod validation;

pub use fields::{ErrorKind, Field, FieldError, FieldErrors, FormBuffer, UnknownField};

use crate::model::Product;
use price::PriceKeystroke;

/// Receiver of the form's outbound events.
pub trait FormHandler {
    fn on_submit(&mut self, product: Product);
    fn on_cancel_edit(&mut self);
}

/// Outbound events, for callers that prefer to queue them.
#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    Submitted(Product),
    CancelEdit,
}

impl FormHandler for Vec<FormEvent> {
    fn on_submit(&mut self, product: Product) {
        self.push(FormEvent::Submitted(product));
    }

    fn on_cancel_edit(&mut self) {
        self.push(FormEvent::CancelEdit);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

/// Outcome of a single field update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldUpdate {
    /// The value was stored as given.
    Stored,
    /// The value was replaced by the canonical zero price.
    Clamped,
    /// The buffer was left unchanged.
    Rejected,
}

#[derive(Debug, Clone, Default)]
pub struct ProductForm {
    buffer: FormBuffer,
    errors: FieldErrors,
    existing_names: Vec<String>,
    editing: Option<Product>,
}

impl ProductForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter edit mode for `product`, or create mode for `None`. Always clears errors.
    pub fn initialize(&mut self, product: Option<&Product>) {
        self.buffer = product.map(FormBuffer::from_product).unwrap_or_default();
        self.editing = product.cloned();
        self.errors = FieldErrors::default();
    }

    /// Names the duplicate check compares against.
    pub fn set_existing_names(&mut self, names: Vec<String>) {
        self.existing_names = names;
    }

    pub fn existing_names(&self) -> &[String] {
        &self.existing_names
    }

    pub fn update_field(&mut self, field: Field, raw: &str) -> FieldUpdate {
        let update = match field {
            Field::Price => self.update_price(raw),
            _ => {
                self.buffer.set(field, raw.to_string());
                FieldUpdate::Stored
            }
        };

        if update != FieldUpdate::Rejected {
            self.errors.clear(field);
        }
        update
    }

    fn update_price(&mut self, raw: &str) -> FieldUpdate {
        match price::guard_keystroke(raw) {
            PriceKeystroke::Reject => {
                tracing::debug!(input = %raw, "price keystroke rejected");
                FieldUpdate::Rejected
            }
            PriceKeystroke::Keep => {
                self.buffer.price = raw.to_string();
                FieldUpdate::Stored
            }
            PriceKeystroke::Zero => {
                self.buffer.price = price::ZERO.to_string();
                if raw == price::ZERO {
                    FieldUpdate::Stored
                } else {
                    tracing::debug!(input = %raw, "price clamped to zero");
                    FieldUpdate::Clamped
                }
            }
        }
    }

    /// Check every field, replacing the error map with the result.
    pub fn validate(&mut self) -> Result<(), FieldErrors> {
        self.errors =
            validation::validate_buffer(&self.buffer, &self.existing_names, self.editing.as_ref());
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors.clone())
        }
    }

    /// Validate and, if valid, hand the finished product to `handler`.
    ///
    /// Returns whether a product was emitted. In create mode the buffer is reset
    /// afterwards; in edit mode it is left for the caller to re-initialize.
    pub fn submit<H: FormHandler + ?Sized>(&mut self, handler: &mut H) -> bool {
        if self.validate().is_err() {
            return false;
        }
        let Some(product) = self.finalize() else {
            return false;
        };

        handler.on_submit(product);

        if self.editing.is_none() {
            self.buffer = FormBuffer::default();
        }
        true
    }

    /// Signal that the user abandoned the edit. The form itself does not change.
    pub fn cancel_edit<H: FormHandler + ?Sized>(&self, handler: &mut H) {
        handler.on_cancel_edit();
    }

    fn finalize(&self) -> Option<Product> {
        let price = price::parse_leading_number(self.buffer.price.trim())?;
        let entry_date = validation::parse_entry_date(&self.buffer.entry_date)?;
        Some(Product {
            id: self.buffer.id.clone(),
            name: self.buffer.name.clone(),
            price,
            supplier_email: self.buffer.supplier_email.clone(),
            entry_date: Some(entry_date),
        })
    }

    pub fn buffer(&self) -> &FormBuffer {
        &self.buffer
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn error(&self, field: Field) -> Option<&FieldError> {
        self.errors.get(field)
    }

    pub fn editing(&self) -> Option<&Product> {
        self.editing.as_ref()
    }

    pub fn mode(&self) -> FormMode {
        if self.editing.is_some() {
            FormMode::Edit
        } else {
            FormMode::Create
        }
    }
}
