//! Cart store: hydrate once, update purely, persist after every mutation.

use tracing::{debug, warn};

use super::{CartState, CartStorage, StorageError};
use crate::types::ProductId;

/// Where a hydrated cart came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HydrateSource {
    /// Parsed from the stored value.
    Stored,
    /// Nothing stored yet.
    Missing,
    /// The storage adapter failed to read.
    Unreadable,
    /// A value was stored but couldn't be parsed.
    Corrupt,
}

/// Result of [`CartStore::hydrate_with_source`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hydrated {
    pub state: CartState,
    pub source: HydrateSource,
}

impl Hydrated {
    fn empty(source: HydrateSource) -> Self {
        Self {
            state: CartState::new(),
            source,
        }
    }
}

/// Cart operations bound to a storage adapter.
///
/// Every mutating operation takes the current state, returns the new state,
/// and writes the full new state to storage. Write failures are logged and
/// otherwise ignored: losing a cart is not worth failing the request over.
#[derive(Debug)]
pub struct CartStore<S> {
    storage: S,
}

impl<S: CartStorage> CartStore<S> {
    pub const fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Read the persisted cart. Absent or unparsable storage yields an empty
    /// cart; this never fails.
    pub fn hydrate(&self) -> CartState {
        self.hydrate_with_source().state
    }

    /// Like [`Self::hydrate`], also reporting which branch was taken.
    pub fn hydrate_with_source(&self) -> Hydrated {
        let raw = match self.storage.read() {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("No stored cart, starting empty");
                return Hydrated::empty(HydrateSource::Missing);
            }
            Err(e) => {
                warn!(error = %e, "Failed to read cart storage, starting empty");
                return Hydrated::empty(HydrateSource::Unreadable);
            }
        };

        match CartState::decode(&raw) {
            Ok(state) => Hydrated {
                state,
                source: HydrateSource::Stored,
            },
            Err(e) => {
                warn!(error = %e, "Discarding unparsable cart");
                Hydrated::empty(HydrateSource::Corrupt)
            }
        }
    }

    /// Add one of `id`. Persists the result.
    pub fn increment(&mut self, state: &CartState, id: ProductId) -> CartState {
        let next = state.incremented(id);
        self.persist(&next);
        next
    }

    /// Change `id`'s quantity by `delta`, dropping it at zero. Persists the result.
    pub fn adjust(&mut self, state: &CartState, id: ProductId, delta: i64) -> CartState {
        let next = state.adjusted(id, delta);
        self.persist(&next);
        next
    }

    /// Drop `id` entirely. Persists the result.
    pub fn remove(&mut self, state: &CartState, id: ProductId) -> CartState {
        let next = state.without(id);
        self.persist(&next);
        next
    }

    /// Write the complete state, logging and swallowing any failure.
    pub fn persist(&mut self, state: &CartState) {
        if let Err(e) = self.try_persist(state) {
            warn!(error = %e, "Failed to persist cart");
        }
    }

    /// Write the complete state.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if encoding or the write fails.
    pub fn try_persist(&mut self, state: &CartState) -> Result<(), StorageError> {
        let encoded = state.encode()?;
        self.storage.write(&encoded)
    }

    pub const fn storage(&self) -> &S {
        &self.storage
    }
}
