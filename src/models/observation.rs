use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::generate_id;

/// One time-stamped price sample for a product. Created exactly once per
/// successful extraction, appended to the price history, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Observation {
    pub id: String,
    /// Registry identity, not the scraped title. Correlates history rows even
    /// when the display title varies between rounds.
    pub product: String,
    /// Display title as scraped.
    pub title: String,
    pub price: Decimal,
    pub timestamp: DateTime<Utc>,
}

impl Observation {
    pub fn new(product: impl Into<String>, title: impl Into<String>, price: Decimal) -> Self {
        Self {
            id: generate_id(),
            product: product.into(),
            title: title.into(),
            price,
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_observation_creation() {
        let price = Decimal::from_str("209.90").unwrap();
        let observation = Observation::new("Keyboard", "Teclado Gamer Mecânico", price);

        assert_eq!(observation.product, "Keyboard");
        assert_eq!(observation.title, "Teclado Gamer Mecânico");
        assert_eq!(observation.price, price);
        assert_eq!(observation.id.len(), 32);
    }

    #[test]
    fn test_observations_get_distinct_ids() {
        let price = Decimal::from_str("10.00").unwrap();
        let first = Observation::new("A", "A", price);
        let second = Observation::new("A", "A", price);
        assert_ne!(first.id, second.id);
    }
}
