//! Durable storage for the serialized cart.
//!
//! The cart lives in a single key-value slot named [`CART_STORAGE_KEY`]. An
//! adapter only has to read and replace that slot's raw string; encoding and
//! fallback handling live in [`super::CartStore`].

use thiserror::Error;

/// Name of the durable slot holding the serialized cart.
pub const CART_STORAGE_KEY: &str = "cart";

/// Errors raised by a storage adapter.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing store could not be read or written.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// The cart could not be serialized.
    #[error("Failed to encode cart: {0}")]
    Encode(#[from] serde_json::Error),

    /// The encoded value exceeds what the backing store accepts.
    #[error("Value too large: {len} bytes (limit {limit})")]
    TooLarge { len: usize, limit: usize },
}

/// Narrow read/write access to the cart slot.
pub trait CartStorage {
    /// Read the raw slot value. `Ok(None)` means nothing has been stored.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing store can't be read.
    fn read(&self) -> Result<Option<String>, StorageError>;

    /// Replace the slot value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing store rejects the write.
    fn write(&mut self, value: &str) -> Result<(), StorageError>;
}

impl<S: CartStorage + ?Sized> CartStorage for &mut S {
    fn read(&self) -> Result<Option<String>, StorageError> {
        (**self).read()
    }

    fn write(&mut self, value: &str) -> Result<(), StorageError> {
        (**self).write(value)
    }
}

/// In-memory slot, used in tests and anywhere a throwaway cart is enough.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    value: Option<String>,
    writes: usize,
}

impl MemoryStorage {
    /// An empty slot.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            value: None,
            writes: 0,
        }
    }

    /// A slot pre-populated with `raw`.
    #[must_use]
    pub fn with_value(raw: impl Into<String>) -> Self {
        Self {
            value: Some(raw.into()),
            writes: 0,
        }
    }

    /// The current raw value.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Number of writes performed so far.
    #[must_use]
    pub const fn writes(&self) -> usize {
        self.writes
    }
}

impl CartStorage for MemoryStorage {
    fn read(&self) -> Result<Option<String>, StorageError> {
        Ok(self.value.clone())
    }

    fn write(&mut self, value: &str) -> Result<(), StorageError> {
        self.value = Some(value.to_string());
        self.writes += 1;
        Ok(())
    }
}
