use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod observation;
pub mod product;

// Re-exports for convenience
pub use observation::*;
pub use product::*;

/// The site-specific extraction strategy a product is bound to. A closed set:
/// adding a storefront means adding one extractor variant, not threading
/// conditionals through the monitor loop.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Storefront {
    /// Primary storefront, assumed when the registry record omits the field.
    #[default]
    MercadoLivre,
    Amazon,
}

impl Storefront {
    pub fn as_str(&self) -> &'static str {
        match self {
            Storefront::MercadoLivre => "mercado_livre",
            Storefront::Amazon => "amazon",
        }
    }
}

// Helper function to generate row ids in the format expected by the database
pub fn generate_id() -> String {
    Uuid::new_v4().simple().to_string()
}
