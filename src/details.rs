//! Assembly of the item detail view: one point lookup plus one rate lookup.

use crate::core::item::ShoppingItem;
use crate::core::rates::{RateLookupError, RateProvider, RateSnapshot, convert};
use crate::core::store::{ItemStore, StoreError};

/// The merged result the detail renderer consumes. A rate-lookup failure is
/// carried alongside the record so the caller can still display the item's
/// own fields next to an error state.
#[derive(Debug)]
pub struct ItemDetails {
    pub item: ShoppingItem,
    pub rates: Result<RateSnapshot, RateLookupError>,
}

impl ItemDetails {
    /// The item price converted into the target currency, or `None` while
    /// rates are unavailable. Codes the upstream did not quote fall back to
    /// the identity factor.
    pub fn converted(&self, code: &str) -> Option<f64> {
        self.rates
            .as_ref()
            .ok()
            .map(|rates| convert(self.item.estimated_price, rates.factor_or_identity(code)))
    }
}

/// Runs the store lookup and the rate lookup concurrently and merges them
/// once both finish. The two calls have no ordering dependency; dropping
/// the returned future cancels both without side effects (reads only).
pub async fn load_details(
    store: &dyn ItemStore,
    provider: &dyn RateProvider,
    id: u64,
    base: &str,
    targets: &[String],
) -> Result<ItemDetails, StoreError> {
    let (item, rates) = tokio::join!(store.get_by_id(id), provider.fetch_rates(base, targets));
    let item = item?.ok_or(StoreError::NotFound(id))?;
    Ok(ItemDetails { item, rates })
}
