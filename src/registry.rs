use std::path::Path;

use tracing::debug;
use url::Url;

use crate::models::Product;
use crate::utils::error::RegistryError;

/// Loads the tracked-product list from a JSON file.
///
/// The registry is the monitor's only fatal input: a missing or malformed
/// file means there is nothing meaningful to run, so errors here are meant to
/// terminate the process before the first round. Order in the file is the
/// order products are checked each round.
pub fn load(path: &Path) -> Result<Vec<Product>, RegistryError> {
    let raw = std::fs::read_to_string(path).map_err(|source| RegistryError::Missing {
        path: path.to_path_buf(),
        source,
    })?;

    let products: Vec<Product> =
        serde_json::from_str(&raw).map_err(|e| malformed(path, e.to_string()))?;

    for product in &products {
        if product.name.trim().is_empty() {
            return Err(malformed(path, "product with empty name".to_string()));
        }
        if let Err(e) = Url::parse(&product.url) {
            return Err(malformed(
                path,
                format!("invalid url for {:?}: {}", product.name, e),
            ));
        }
    }

    debug!(products = products.len(), path = %path.display(), "product registry loaded");
    Ok(products)
}

fn malformed(path: &Path, reason: String) -> RegistryError {
    RegistryError::Malformed {
        path: path.to_path_buf(),
        reason,
    }
}
