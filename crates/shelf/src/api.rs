//! # API Facade
//!
//! [`ShelfApi`] is the owner the form and the store were designed to collaborate
//! through. It is the single entry point a UI talks to.
//!
//! ## Role and Responsibilities
//!
//! - **Wires** the form to the collection: existing names flow into the form, submitted
//!   products flow into the store
//! - **Tracks edit mode**: which product is being edited, re-initializing the form
//!   whenever that changes
//! - **Dispatches** collection changes to the command layer
//! - **Returns structured types** (`Result<CmdResult>`), never printed text
//!
//! ## Generic Over StorageBackend
//!
//! - Production: `ShelfApi<FsBackend>`
//! - Testing: `ShelfApi<MemBackend>`

use crate::commands::{self, CmdMessage, CmdResult, Products};
use crate::error::{Result, ShelfError};
use crate::form::{Field, FieldUpdate, FormHandler, ProductForm};
use crate::model::{Product, ProductId};
use crate::store::backend::StorageBackend;
use crate::store::{CollectionStore, LoadReport};

pub struct ShelfApi<B: StorageBackend> {
    form: ProductForm,
    products: Products<B>,
    editing: Option<ProductId>,
}

impl<B: StorageBackend> ShelfApi<B> {
    /// Load the collection stored under `key` and start in create mode.
    pub fn open(backend: B, key: impl Into<String>) -> (Self, LoadReport) {
        let (products, report) = CollectionStore::load(backend, key, Vec::new());
        let mut api = Self {
            form: ProductForm::new(),
            products,
            editing: None,
        };
        api.sync_existing_names();
        (api, report)
    }

    pub fn products(&self) -> &[Product] {
        self.products.get()
    }

    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products.get().iter().find(|p| p.id.as_ref() == Some(id))
    }

    pub fn form(&self) -> &ProductForm {
        &self.form
    }

    pub fn store(&self) -> &Products<B> {
        &self.products
    }

    pub fn editing(&self) -> Option<&ProductId> {
        self.editing.as_ref()
    }

    pub fn update_field(&mut self, field: Field, raw: &str) -> FieldUpdate {
        self.form.update_field(field, raw)
    }

    /// Switch the form to editing the product with `id`.
    ///
    /// Asking to edit the product already being edited keeps the current draft.
    pub fn begin_edit(&mut self, id: &ProductId) -> Result<()> {
        if self.editing.as_ref() == Some(id) {
            return Ok(());
        }
        let product = self
            .product(id)
            .cloned()
            .ok_or_else(|| ShelfError::ProductNotFound(id.clone()))?;

        self.editing = Some(id.clone());
        self.form.initialize(Some(&product));
        Ok(())
    }

    pub fn cancel_edit(&mut self) {
        let mut owner = Owner::new(&mut self.products);
        self.form.cancel_edit(&mut owner);
        let leave_edit = owner.leave_edit;
        if leave_edit {
            self.leave_edit_mode();
        }
    }

    /// Submit the form. Invalid input leaves the errors on the form and returns a
    /// result carrying one error message per field.
    pub fn submit(&mut self) -> Result<CmdResult> {
        let mut owner = Owner::new(&mut self.products);
        let emitted = self.form.submit(&mut owner);
        let Owner {
            outcome,
            leave_edit,
            ..
        } = owner;

        if !emitted {
            let mut result = CmdResult::default();
            for (field, error) in self.form.errors().iter() {
                result.add_message(CmdMessage::error(format!("{}: {}", field, error)));
            }
            return Ok(result);
        }

        if leave_edit && self.editing.is_some() {
            self.leave_edit_mode();
        }
        self.sync_existing_names();
        outcome.unwrap_or_else(|| Ok(CmdResult::default()))
    }

    pub fn delete_product(&mut self, id: &ProductId) -> Result<CmdResult> {
        let result = commands::delete::run(&mut self.products, id)?;
        if self.editing.as_ref() == Some(id) {
            self.leave_edit_mode();
        }
        self.sync_existing_names();
        Ok(result)
    }

    fn leave_edit_mode(&mut self) {
        self.editing = None;
        self.form.initialize(None);
    }

    fn sync_existing_names(&mut self) {
        let names = self.products.get().iter().map(|p| p.name.clone()).collect();
        self.form.set_existing_names(names);
    }
}

/// Receives the form's events on behalf of the API while the form is borrowed.
struct Owner<'a, B: StorageBackend> {
    products: &'a mut Products<B>,
    outcome: Option<Result<CmdResult>>,
    leave_edit: bool,
}

impl<'a, B: StorageBackend> Owner<'a, B> {
    fn new(products: &'a mut Products<B>) -> Self {
        Self {
            products,
            outcome: None,
            leave_edit: false,
        }
    }
}

impl<B: StorageBackend> FormHandler for Owner<'_, B> {
    fn on_submit(&mut self, product: Product) {
        self.outcome = Some(commands::submit::run(&mut *self.products, product));
        self.leave_edit = true;
    }

    fn on_cancel_edit(&mut self) {
        self.leave_edit = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::form::{FieldError, FormBuffer, FormMode};
    use crate::test_utils::{ApiFixture, FIXTURE_KEY};

    fn fill(api: &mut ShelfApi<impl StorageBackend>, name: &str, price: &str) {
        api.update_field(Field::Name, name);
        api.update_field(Field::Price, price);
        api.update_field(Field::SupplierEmail, "supplier@example.com");
        api.update_field(Field::EntryDate, "2024-07-01");
    }

    #[test]
    fn test_open_syncs_existing_names() {
        let fixture = ApiFixture::with_products(&["Laptop", "Mouse"]);
        assert_eq!(fixture.api.form().existing_names(), &["Laptop", "Mouse"]);
    }

    #[test]
    fn test_open_backfills_legacy_ids() {
        let fixture = ApiFixture::with_stored(r#"[{"name":"X","price":1}]"#);
        assert_eq!(fixture.report.backfilled_ids, 1);
        assert!(fixture.api.products()[0].id.is_some());
    }

    #[test]
    fn test_create_product() {
        let mut api = ApiFixture::new().api;
        fill(&mut api, "Nuevo Producto", "500");

        let result = api.submit().unwrap();

        assert_eq!(api.products().len(), 1);
        assert!(api.products()[0].id.is_some());
        assert_eq!(result.affected_products.len(), 1);
        assert!(api.form().buffer().is_empty());
        assert_eq!(api.form().existing_names(), &["Nuevo Producto"]);
        assert!(api.store().backend().raw(FIXTURE_KEY).is_some());
    }

    #[test]
    fn test_create_duplicate_is_rejected() {
        let mut api = ApiFixture::with_products(&["Laptop"]).api;
        fill(&mut api, "LAPTOP", "500");

        let result = api.submit().unwrap();

        assert_eq!(api.products().len(), 1);
        assert!(result.has_level(MessageLevel::Error));
        assert_eq!(api.form().error(Field::Name), Some(&FieldError::DuplicateName));
        assert_eq!(api.form().buffer().name, "LAPTOP");
    }

    #[test]
    fn test_edit_product_keeps_id_and_leaves_edit_mode() {
        let mut api = ApiFixture::with_products(&["Laptop", "Mouse"]).api;
        let id = api.products()[0].id.clone().unwrap();

        api.begin_edit(&id).unwrap();
        assert_eq!(api.form().mode(), FormMode::Edit);
        assert_eq!(api.form().buffer().name, "Laptop");

        api.update_field(Field::Price, "1500");
        api.submit().unwrap();

        assert_eq!(api.products().len(), 2);
        assert_eq!(api.products()[0].id.as_ref(), Some(&id));
        assert_eq!(api.products()[0].price, 1500.0);
        assert_eq!(api.editing(), None);
        assert_eq!(api.form().mode(), FormMode::Create);
        assert!(api.form().buffer().is_empty());
    }

    #[test]
    fn test_edit_rename_onto_other_product_is_rejected() {
        let mut api = ApiFixture::with_products(&["Laptop", "Mouse"]).api;
        let id = api.products()[0].id.clone().unwrap();

        api.begin_edit(&id).unwrap();
        api.update_field(Field::Name, "mouse");
        api.submit().unwrap();

        assert_eq!(api.form().error(Field::Name), Some(&FieldError::DuplicateName));
        assert_eq!(api.editing(), Some(&id));
    }

    #[test]
    fn test_begin_edit_same_product_keeps_draft() {
        let mut api = ApiFixture::with_products(&["Laptop"]).api;
        let id = api.products()[0].id.clone().unwrap();

        api.begin_edit(&id).unwrap();
        api.update_field(Field::Name, "Laptop 2");
        api.begin_edit(&id).unwrap();

        assert_eq!(api.form().buffer().name, "Laptop 2");
    }

    #[test]
    fn test_switching_edited_product_reinitializes_form() {
        let mut api = ApiFixture::with_products(&["Laptop", "Mouse"]).api;
        let laptop = api.products()[0].id.clone().unwrap();
        let mouse = api.products()[1].id.clone().unwrap();

        api.begin_edit(&laptop).unwrap();
        api.update_field(Field::Name, "Laptop Pro");
        api.update_field(Field::SupplierEmail, "");
        api.submit().unwrap();
        assert!(api.form().error(Field::SupplierEmail).is_some());

        api.begin_edit(&mouse).unwrap();

        assert_eq!(api.editing(), Some(&mouse));
        assert_eq!(api.form().buffer(), &FormBuffer::from_product(&api.products()[1]));
        assert_eq!(api.form().buffer().name, "Mouse");
        assert!(api.form().errors().is_empty());

        // Laptop's name is only exempt while Laptop itself is being edited
        api.update_field(Field::Name, "laptop");
        api.submit().unwrap();
        assert_eq!(api.form().error(Field::Name), Some(&FieldError::DuplicateName));
        assert_eq!(api.products()[1].name, "Mouse");
    }

    #[test]
    fn test_begin_edit_unknown_product() {
        let mut api = ApiFixture::new().api;
        let result = api.begin_edit(&ProductId::generate());
        assert!(matches!(result, Err(ShelfError::ProductNotFound(_))));
    }

    #[test]
    fn test_cancel_edit_resets_form() {
        let mut api = ApiFixture::with_products(&["Product A"]).api;
        let id = api.products()[0].id.clone().unwrap();
        api.begin_edit(&id).unwrap();

        api.cancel_edit();

        assert_eq!(api.editing(), None);
        assert_eq!(api.form().mode(), FormMode::Create);
        assert!(api.form().buffer().is_empty());
    }

    #[test]
    fn test_delete_edited_product_leaves_edit_mode() {
        let mut api = ApiFixture::with_products(&["Laptop", "Mouse"]).api;
        let id = api.products()[1].id.clone().unwrap();
        api.begin_edit(&id).unwrap();

        api.delete_product(&id).unwrap();

        assert_eq!(api.products().len(), 1);
        assert_eq!(api.editing(), None);
        assert_eq!(api.form().existing_names(), &["Laptop"]);
    }

    #[test]
    fn test_write_failure_keeps_product_in_memory() {
        let mut api = ApiFixture::new().api;
        api.store().backend().set_simulate_write_error(true);
        fill(&mut api, "Offline", "10");

        let result = api.submit().unwrap();

        assert_eq!(api.products().len(), 1);
        assert!(result.has_level(MessageLevel::Warning));
    }
}
