use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Storefront;

/// One tracked product from the registry. Loaded once at startup and immutable
/// for the run. `name` is the identity every observation is keyed by, even
/// when the scraped display title drifts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub storefront: Storefront,
    pub target_price: Decimal,
}
