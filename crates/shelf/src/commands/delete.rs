use super::{CmdMessage, CmdResult, Products};
use crate::error::{Result, ShelfError};
use crate::model::ProductId;
use crate::store::backend::StorageBackend;

pub fn run<B: StorageBackend>(products: &mut Products<B>, id: &ProductId) -> Result<CmdResult> {
    let position = products
        .get()
        .iter()
        .position(|p| p.id.as_ref() == Some(id))
        .ok_or_else(|| ShelfError::ProductNotFound(id.clone()))?;

    let mut removed = None;
    let outcome = products.update(|list| removed = Some(list.remove(position)));

    let mut result = CmdResult::default();
    if let Some(product) = removed {
        result.add_message(CmdMessage::success(format!(
            "Product deleted: {}",
            product.name
        )));
        result.affected_products.push(product);
    }
    result.note_persisted(outcome);
    Ok(result)
}
