use tokio::time::sleep;
use tracing::{error, info, warn};

use crate::alert::{self, AlertEvent};
use crate::config::MonitorConfig;
use crate::extract;
use crate::fetch::PageFetcher;
use crate::models::{Observation, Product};
use crate::notify::{Notifier, NotifyStatus};
use crate::store::PriceStore;

/// Outcome of one full pass over the product registry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundSummary {
    pub products_checked: usize,
    pub observations_recorded: usize,
    pub alerts_sent: usize,
    pub failures: usize,
}

#[derive(Debug, Default)]
struct ProductOutcome {
    recorded: bool,
    alerted: bool,
    failed: bool,
}

impl ProductOutcome {
    fn failed() -> Self {
        Self {
            failed: true,
            ..Self::default()
        }
    }
}

/// The monitoring pipeline. One logical worker: products are checked
/// sequentially within a round, which bounds the outbound request rate per
/// site and keeps store writes strictly ordered.
pub struct Monitor<N> {
    products: Vec<Product>,
    fetcher: PageFetcher,
    store: PriceStore,
    notifier: N,
    config: MonitorConfig,
}

impl<N: Notifier> Monitor<N> {
    pub fn new(
        products: Vec<Product>,
        fetcher: PageFetcher,
        store: PriceStore,
        notifier: N,
        config: MonitorConfig,
    ) -> Self {
        Self {
            products,
            fetcher,
            store,
            notifier,
            config,
        }
    }

    /// Runs one round over the registry and returns its summary.
    ///
    /// Per-product failures — extraction, store write, alert delivery — are
    /// logged with product identity and error kind, then skipped; the round
    /// always runs to completion. Nothing is appended for a failed
    /// extraction.
    pub async fn run_once(&self) -> RoundSummary {
        info!(products = self.products.len(), "starting verification round");
        let mut summary = RoundSummary::default();

        for (index, product) in self.products.iter().enumerate() {
            if index > 0 {
                // Politeness pause so a round never hammers the source sites
                sleep(self.config.product_delay()).await;
            }

            let outcome = self.check_product(product).await;
            summary.products_checked += 1;
            summary.observations_recorded += usize::from(outcome.recorded);
            summary.alerts_sent += usize::from(outcome.alerted);
            summary.failures += usize::from(outcome.failed);
        }

        info!(
            checked = summary.products_checked,
            recorded = summary.observations_recorded,
            alerts = summary.alerts_sent,
            failures = summary.failures,
            "round complete"
        );
        summary
    }

    /// Runs rounds forever with the configured inter-round pause.
    ///
    /// Never returns; stopping is the caller dropping the future (the binary
    /// races it against ctrl-c). Appends are atomic per observation, so
    /// cancellation at any await point cannot leave a torn row behind.
    pub async fn run_forever(&self) {
        loop {
            self.run_once().await;
            info!(
                next_round_in_secs = self.config.round_interval_secs,
                "sleeping until next round"
            );
            sleep(self.config.round_interval()).await;
        }
    }

    async fn check_product(&self, product: &Product) -> ProductOutcome {
        info!(product = %product.name, storefront = product.storefront.as_str(), "checking");

        let extractor = extract::for_storefront(product.storefront);
        let page = match extractor.extract(&self.fetcher, &product.url).await {
            Ok(page) => page,
            Err(e) => {
                // The product gets another attempt next round
                warn!(
                    product = %product.name,
                    kind = e.kind(),
                    error = %e,
                    "extraction failed, skipping product this round"
                );
                return ProductOutcome::failed();
            }
        };

        let observation = Observation::new(&product.name, &page.title, page.price);
        let mut outcome = ProductOutcome::default();

        match self.store.append(&observation).await {
            Ok(()) => {
                outcome.recorded = true;
                info!(product = %product.name, price = %observation.price, "price recorded");
            }
            Err(e) => {
                // The round continues; the alert check still runs on the
                // in-memory observation
                error!(product = %product.name, error = %e, "failed to persist observation");
                outcome.failed = true;
            }
        }

        if alert::should_alert(observation.price, product.target_price) {
            let event = AlertEvent::new(product, &observation);
            match self.notifier.notify(&event.message).await {
                Ok(NotifyStatus::Sent) => {
                    outcome.alerted = true;
                    info!(product = %product.name, "alert delivered");
                }
                Ok(NotifyStatus::Disabled) => {}
                Err(e) => {
                    warn!(product = %product.name, error = %e, "alert delivery failed");
                }
            }
        }

        outcome
    }
}
