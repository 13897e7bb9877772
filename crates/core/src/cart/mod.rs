//! Cart state: a mapping from product id to a positive quantity.
//!
//! # Invariant
//!
//! Every key present in a [`CartState`] has a quantity of at least 1. Updates
//! that would leave a quantity at zero or below remove the key instead.
//!
//! Updates are pure: each returns a new `CartState` and leaves the receiver
//! untouched. Persistence is layered on top by [`CartStore`].

mod storage;
mod store;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize, Serializer};

use crate::types::ProductId;

pub use storage::{CART_STORAGE_KEY, CartStorage, MemoryStorage, StorageError};
pub use store::{CartStore, HydrateSource, Hydrated};

/// Product quantities in the cart, ordered by product id.
///
/// Serializes as a JSON object keyed by decimal-string ids, e.g.
/// `{"1":2,"4":1}`. Deserializing drops zero quantities.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "BTreeMap<ProductId, u32>")]
pub struct CartState(BTreeMap<ProductId, u32>);

impl CartState {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Quantity for `id`, or 0 if the product isn't in the cart.
    #[must_use]
    pub fn quantity(&self, id: ProductId) -> u32 {
        self.0.get(&id).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.0.contains_key(&id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of distinct products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Entries in product id order.
    pub fn iter(&self) -> impl Iterator<Item = (ProductId, u32)> + '_ {
        self.0.iter().map(|(id, quantity)| (*id, *quantity))
    }

    /// Sum of all quantities. Used for the header badge.
    #[must_use]
    pub fn total_item_count(&self) -> u64 {
        self.0.values().map(|quantity| u64::from(*quantity)).sum()
    }

    /// A copy with `id`'s quantity increased by one, created at 1 if absent.
    #[must_use]
    pub fn incremented(&self, id: ProductId) -> Self {
        let mut next = self.0.clone();
        let quantity = next.entry(id).or_insert(0);
        *quantity = quantity.saturating_add(1);
        Self(next)
    }

    /// A copy with `id`'s quantity changed by `delta`.
    ///
    /// A resulting quantity of zero or below removes `id`.
    #[must_use]
    pub fn adjusted(&self, id: ProductId, delta: i64) -> Self {
        let target = i64::from(self.quantity(id)).saturating_add(delta);
        let mut next = self.0.clone();
        if target <= 0 {
            next.remove(&id);
        } else {
            next.insert(id, u32::try_from(target).unwrap_or(u32::MAX));
        }
        Self(next)
    }

    /// A copy without `id`, whatever its prior quantity.
    #[must_use]
    pub fn without(&self, id: ProductId) -> Self {
        let mut next = self.0.clone();
        next.remove(&id);
        Self(next)
    }

    /// Serialize to the persisted JSON form.
    ///
    /// # Errors
    ///
    /// Returns the serializer error; with integer keys and values this does
    /// not happen in practice.
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse the persisted JSON form.
    ///
    /// # Errors
    ///
    /// Fails on malformed JSON, non-integer keys, and negative or fractional
    /// quantities.
    pub fn decode(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

impl From<BTreeMap<ProductId, u32>> for CartState {
    fn from(mut entries: BTreeMap<ProductId, u32>) -> Self {
        entries.retain(|_, quantity| *quantity > 0);
        Self(entries)
    }
}

impl FromIterator<(ProductId, u32)> for CartState {
    fn from_iter<I: IntoIterator<Item = (ProductId, u32)>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<BTreeMap<_, _>>())
    }
}

impl Serialize for CartState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn id(n: i32) -> ProductId {
        ProductId::new(n)
    }

    fn cart(entries: &[(i32, u32)]) -> CartState {
        entries.iter().map(|(n, q)| (id(*n), *q)).collect()
    }

    fn assert_positive(state: &CartState) {
        assert!(state.iter().all(|(_, quantity)| quantity >= 1));
    }

    #[test]
    fn test_increment_creates_then_grows() {
        let once = CartState::new().incremented(id(3));
        assert_eq!(once.quantity(id(3)), 1);

        let twice = once.incremented(id(3));
        assert_eq!(twice.quantity(id(3)), 2);
        // previous value untouched
        assert_eq!(once.quantity(id(3)), 1);
    }

    #[test]
    fn test_adjust_by_negative_quantity_removes() {
        let state = cart(&[(1, 2), (4, 1)]);
        let quantity = i64::from(state.quantity(id(1)));

        let next = state.adjusted(id(1), -quantity);
        assert!(!next.contains(id(1)));
        assert_eq!(next, cart(&[(4, 1)]));
    }

    #[test]
    fn test_adjust_below_zero_removes() {
        let next = cart(&[(1, 1)]).adjusted(id(1), -5);
        assert!(next.is_empty());
    }

    #[test]
    fn test_adjust_absent_with_negative_delta_is_noop() {
        let state = cart(&[(2, 1)]);
        assert_eq!(state.adjusted(id(7), -1), state);
    }

    #[test]
    fn test_adjust_absent_with_positive_delta_creates() {
        let next = CartState::new().adjusted(id(5), 3);
        assert_eq!(next.quantity(id(5)), 3);
    }

    #[test]
    fn test_adjust_zero_delta_on_absent_does_not_store_zero() {
        let next = CartState::new().adjusted(id(5), 0);
        assert!(next.is_empty());
    }

    #[test]
    fn test_remove_ignores_prior_quantity() {
        let state = cart(&[(1, 9), (2, 1)]);
        assert_eq!(state.without(id(1)), cart(&[(2, 1)]));
        assert_eq!(state.without(id(42)), state);
    }

    #[test]
    fn test_quantities_stay_positive_through_updates() {
        let mut state = CartState::new();
        for (n, delta) in [(1, 2), (1, -1), (2, 1), (1, -3), (3, 0), (2, -1), (4, 5)] {
            state = state.adjusted(id(n), delta);
            assert_positive(&state);
        }
        assert_eq!(state, cart(&[(4, 5)]));
    }

    #[test]
    fn test_total_item_count() {
        assert_eq!(CartState::new().total_item_count(), 0);
        assert_eq!(cart(&[(1, 2), (4, 1), (8, 10)]).total_item_count(), 13);
    }

    #[test]
    fn test_encode_matches_persisted_layout() {
        assert_eq!(cart(&[(4, 1), (1, 2)]).encode().unwrap(), r#"{"1":2,"4":1}"#);
        assert_eq!(CartState::new().encode().unwrap(), "{}");
    }

    #[test]
    fn test_decode_round_trip() {
        let state = cart(&[(1, 2), (4, 1), (999, 3)]);
        assert_eq!(CartState::decode(&state.encode().unwrap()).unwrap(), state);
    }

    #[test]
    fn test_decode_drops_zero_quantities() {
        let state = CartState::decode(r#"{"1":0,"2":3}"#).unwrap();
        assert_eq!(state, cart(&[(2, 3)]));
    }

    #[test]
    fn test_decode_rejects_malformed_values() {
        for raw in [
            "",
            "not json",
            "null",
            "[1,2]",
            r#"{"abc":1}"#,
            r#"{"1":-2}"#,
            r#"{"1":1.5}"#,
            r#"{"1":"2"}"#,
        ] {
            assert!(CartState::decode(raw).is_err(), "accepted {raw:?}");
        }
    }

    #[test]
    fn test_from_iter_drops_zero_quantities() {
        let state = cart(&[(1, 0), (2, 2)]);
        assert!(!state.contains(id(1)));
        assert_eq!(state.len(), 1);
    }
}
