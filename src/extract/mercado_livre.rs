use async_trait::async_trait;
use scraper::Html;

use super::{price, select_text, selector, Extractor, PageData};
use crate::fetch::PageFetcher;
use crate::models::Storefront;
use crate::utils::error::ExtractionError;

pub(super) const TITLE: &str = "h1.ui-pdp-title";
pub(super) const PRICE_LINE: &str = "div.ui-pdp-price__second-line";
pub(super) const PRICE_WHOLE: &str = "span.andes-money-amount__fraction";
pub(super) const PRICE_CENTS: &str = "span.andes-money-amount__cents";

/// Mercado Livre product pages. The listed price is split across markup
/// nodes: `andes-money-amount__fraction` holds the whole units (with grouping
/// dots), `andes-money-amount__cents` the cents. Cents are omitted for round
/// prices.
pub struct MercadoLivre;

#[async_trait]
impl Extractor for MercadoLivre {
    fn storefront(&self) -> Storefront {
        Storefront::MercadoLivre
    }

    async fn extract(
        &self,
        fetcher: &PageFetcher,
        url: &str,
    ) -> Result<PageData, ExtractionError> {
        let body = fetcher.fetch(url).await?;
        parse_page(&body)
    }
}

fn parse_page(body: &str) -> Result<PageData, ExtractionError> {
    let document = Html::parse_document(body);

    let title =
        select_text(&document, TITLE).ok_or_else(|| ExtractionError::layout_mismatch(TITLE))?;

    let price_line = document
        .select(&selector(PRICE_LINE))
        .next()
        .ok_or_else(|| ExtractionError::layout_mismatch(PRICE_LINE))?;

    let whole = price_line
        .select(&selector(PRICE_WHOLE))
        .next()
        .map(|e| e.text().collect::<String>())
        .ok_or_else(|| ExtractionError::layout_mismatch(PRICE_WHOLE))?;

    let cents = price_line
        .select(&selector(PRICE_CENTS))
        .next()
        .map(|e| e.text().collect::<String>());

    let price = price::from_parts(&whole, cents.as_deref())
        .ok_or_else(|| ExtractionError::layout_mismatch(PRICE_WHOLE))?;

    Ok(PageData { title, price })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn page(title: &str, whole: &str, cents: Option<&str>) -> String {
        let cents_span = cents
            .map(|c| format!(r#"<span class="andes-money-amount__cents">{c}</span>"#))
            .unwrap_or_default();
        format!(
            r#"<html><body>
                <h1 class="ui-pdp-title">{title}</h1>
                <div class="ui-pdp-price__second-line">
                    <span class="andes-money-amount__currency-symbol">R$</span>
                    <span class="andes-money-amount__fraction">{whole}</span>
                    {cents_span}
                </div>
            </body></html>"#
        )
    }

    #[test]
    fn test_parse_split_price() {
        let data = page("Teclado Gamer Mecânico", "209", Some("90"));
        let parsed = parse_page(&data).unwrap();
        assert_eq!(parsed.title, "Teclado Gamer Mecânico");
        assert_eq!(parsed.price, Decimal::from_str("209.90").unwrap());
    }

    #[test]
    fn test_parse_grouped_whole_units() {
        let data = page("Notebook", "1.209", Some("90"));
        let parsed = parse_page(&data).unwrap();
        assert_eq!(parsed.price, Decimal::from_str("1209.90").unwrap());
    }

    #[test]
    fn test_missing_cents_default_to_zero() {
        let data = page("Mouse", "89", None);
        let parsed = parse_page(&data).unwrap();
        assert_eq!(parsed.price, Decimal::from_str("89.00").unwrap());
    }

    #[test]
    fn test_missing_price_markup() {
        let body = r#"<html><body><h1 class="ui-pdp-title">Teclado</h1></body></html>"#;
        let err = parse_page(body).unwrap_err();
        assert!(matches!(
            err,
            ExtractionError::LayoutMismatch { ref selector } if selector == PRICE_LINE
        ));
    }

    #[test]
    fn test_missing_title_markup() {
        let body = r#"<html><body>
            <div class="ui-pdp-price__second-line">
                <span class="andes-money-amount__fraction">10</span>
            </div>
        </body></html>"#;
        let err = parse_page(body).unwrap_err();
        assert!(matches!(
            err,
            ExtractionError::LayoutMismatch { ref selector } if selector == TITLE
        ));
    }

    #[test]
    fn test_garbage_price_text_is_layout_mismatch() {
        let data = page("Teclado", "--", None);
        let err = parse_page(&data).unwrap_err();
        assert!(matches!(err, ExtractionError::LayoutMismatch { .. }));
    }
}
