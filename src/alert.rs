use rust_decimal::Decimal;

use crate::models::{Observation, Product};

/// Fires iff the observed price is at or below the product's target.
///
/// Intentionally stateless: no hysteresis, no cross-round de-duplication.
/// Every round that satisfies the condition fires again.
pub fn should_alert(price: Decimal, target_price: Decimal) -> bool {
    price <= target_price
}

/// Transient notification payload; built per hit, delivered, never stored.
#[derive(Debug, Clone)]
pub struct AlertEvent {
    pub product: String,
    pub message: String,
}

impl AlertEvent {
    pub fn new(product: &Product, observation: &Observation) -> Self {
        let message = format!(
            "🚨 PRICE ALERT 🚨\nProduct: {}\nCurrent price: {:.2}\nTarget: {:.2}\nLink: {}",
            observation.title, observation.price, product.target_price, product.url
        );
        Self {
            product: product.name.clone(),
            message,
        }
    }
}
