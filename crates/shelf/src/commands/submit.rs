use super::{CmdMessage, CmdResult, Products};
use crate::error::Result;
use crate::model::{Product, ProductId};
use crate::store::backend::StorageBackend;

/// Merge a validated product into the collection.
///
/// - No id: a new product. It gets a fresh id and is appended.
/// - Known id: replaces the product with that id, keeping its position.
/// - Unknown id: the product was removed while being edited; it is appended again.
pub fn run<B: StorageBackend>(products: &mut Products<B>, mut product: Product) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    let position = product
        .id
        .as_ref()
        .and_then(|id| products.get().iter().position(|p| p.id.as_ref() == Some(id)));

    let message = match position {
        Some(_) => CmdMessage::success(format!("Product updated: {}", product.name)),
        None if product.has_id() => {
            CmdMessage::info(format!("Product restored: {}", product.name))
        }
        None => {
            product.id = Some(ProductId::generate());
            CmdMessage::success(format!("Product added: {}", product.name))
        }
    };

    let stored = product.clone();
    let outcome = products.update(|list| match position {
        Some(index) => list[index] = stored,
        None => list.push(stored),
    });

    result.add_message(message);
    result.note_persisted(outcome);
    result.affected_products.push(product);
    Ok(result)
}
