use crate::error::Result;

/// Abstract interface for the key/value storage medium.
///
/// This trait handles the "how" of storage (filesystem vs memory), while
/// [`CollectionStore`](super::collection::CollectionStore) handles the "what"
/// (decoding, id repair, write-through).
///
/// All methods take `&self`; backends that hold state use interior mutability.
pub trait StorageBackend {
    /// Read the text stored under `key`.
    /// Returns Ok(None) if nothing is stored there.
    /// Returns Err only on actual medium failures (permissions, disk failure).
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    /// MUST be atomic: a reader never observes a partial write.
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
}

impl<B: StorageBackend + ?Sized> StorageBackend for &B {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        (**self).set_item(key, value)
    }
}
