use async_trait::async_trait;
use rust_decimal::Decimal;
use scraper::{Html, Selector};

use crate::fetch::PageFetcher;
use crate::models::Storefront;
use crate::utils::error::ExtractionError;

pub mod amazon;
pub mod mercado_livre;
pub mod price;

pub use amazon::Amazon;
pub use mercado_livre::MercadoLivre;

/// Normalized result of scraping one product page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageData {
    /// Display title as rendered on the page.
    pub title: String,
    /// Currency-normalized decimal price.
    pub price: Decimal,
}

/// One extraction strategy per storefront.
///
/// Implementations issue exactly one outbound request per call and never
/// retry; the round cadence already provides retry spacing. Structural
/// failures (missing title or price markup) surface as `LayoutMismatch` and
/// are an expected outcome, never a panic.
#[async_trait]
pub trait Extractor: Send + Sync {
    fn storefront(&self) -> Storefront;

    async fn extract(&self, fetcher: &PageFetcher, url: &str)
        -> Result<PageData, ExtractionError>;
}

/// Selects the extraction strategy for a product's declared storefront.
pub fn for_storefront(storefront: Storefront) -> &'static dyn Extractor {
    match storefront {
        Storefront::MercadoLivre => &MercadoLivre,
        Storefront::Amazon => &Amazon,
    }
}

// Literal selectors only; every constant is exercised by the tests below.
fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap()
}

fn select_text(document: &Html, css: &str) -> Option<String> {
    let element = document.select(&selector(css)).next()?;
    // Collapse layout whitespace between text nodes
    let text = element.text().collect::<String>();
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if text.is_empty() { None } else { Some(text) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_dispatch() {
        assert_eq!(
            for_storefront(Storefront::MercadoLivre).storefront(),
            Storefront::MercadoLivre
        );
        assert_eq!(for_storefront(Storefront::Amazon).storefront(), Storefront::Amazon);
    }

    #[test]
    fn test_select_text_joins_nested_nodes() {
        let document = Html::parse_document(
            r#"<html><body><h1 class="title"> Teclado <em>Gamer</em> </h1></body></html>"#,
        );
        assert_eq!(
            select_text(&document, "h1.title"),
            Some("Teclado Gamer".to_string())
        );
    }

    #[test]
    fn test_select_text_missing_element() {
        let document = Html::parse_document("<html><body></body></html>");
        assert_eq!(select_text(&document, "h1.title"), None);
    }

    #[test]
    fn test_all_storefront_selectors_parse() {
        for css in [
            mercado_livre::TITLE,
            mercado_livre::PRICE_LINE,
            mercado_livre::PRICE_WHOLE,
            mercado_livre::PRICE_CENTS,
            amazon::TITLE,
            amazon::PRICE,
            amazon::PRICE_WHOLE,
            amazon::PRICE_FRACTION,
        ] {
            assert!(Selector::parse(css).is_ok(), "selector `{css}` should parse");
        }
    }
}
