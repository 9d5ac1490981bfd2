use async_trait::async_trait;
use scraper::Html;

use super::{price, select_text, selector, Extractor, PageData};
use crate::fetch::PageFetcher;
use crate::models::Storefront;
use crate::utils::error::ExtractionError;

pub(super) const TITLE: &str = "span#productTitle";
pub(super) const PRICE: &str = "span.a-price";
pub(super) const PRICE_WHOLE: &str = "span.a-price-whole";
pub(super) const PRICE_FRACTION: &str = "span.a-price-fraction";

/// Amazon product pages. Prices render as `a-price-whole` plus an optional
/// `a-price-fraction` node; the whole node often carries a trailing decimal
/// separator of its own.
pub struct Amazon;

#[async_trait]
impl Extractor for Amazon {
    fn storefront(&self) -> Storefront {
        Storefront::Amazon
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

    let price_block = document
        .select(&selector(PRICE))
        .next()
        .ok_or_else(|| ExtractionError::layout_mismatch(PRICE))?;

    let whole = price_block
        .select(&selector(PRICE_WHOLE))
        .next()
        .map(|e| e.text().collect::<String>())
        .ok_or_else(|| ExtractionError::layout_mismatch(PRICE_WHOLE))?;

    let fraction = price_block
        .select(&selector(PRICE_FRACTION))
        .next()
        .map(|e| e.text().collect::<String>());

    let price = price::from_parts(&whole, fraction.as_deref())
        .ok_or_else(|| ExtractionError::layout_mismatch(PRICE_WHOLE))?;

    Ok(PageData { title, price })
}
