//! Linear refresh run: ping, snapshot, rewrite every quantity, snapshot, stats.

pub mod report;

pub use report::*;

use rand::Rng;
use tracing::{debug, info, instrument};

use crate::config::UpdateMode;
use crate::domain::{QuantityRange, RefreshReport, StockSnapshot, StockStats};
use crate::error::RefreshError;
use crate::store::ProductStore;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RefreshSettings {
    pub range: QuantityRange,
    pub sample_limit: u32,
    pub mode: UpdateMode,
}

impl Default for RefreshSettings {
    fn default() -> Self {
        Self {
            range: QuantityRange::default(),
            sample_limit: 10,
            mode: UpdateMode::PerDocument,
        }
    }
}

/// Owns the store for the length of one run and releases it at the end.
pub struct StockRefresher<S: ProductStore> {
    store: S,
    settings: RefreshSettings,
}

impl<S: ProductStore> StockRefresher<S> {
    pub fn new(store: S, settings: RefreshSettings) -> Self {
        Self { store, settings }
    }

    /// Runs the refresh and closes the store whether or not it succeeded.
    ///
    /// A failure at any step aborts the run. Quantities written before the
    /// failure stay written.
    pub async fn run<R: Rng>(self, rng: &mut R) -> Result<RefreshReport, RefreshError> {
        let outcome = self.refresh(rng).await;

        self.store.close().await;
        println!("\nConnection closed");
        info!("Store released");

        outcome
    }

    #[instrument(skip(self, rng), fields(mode = ?self.settings.mode, min = self.settings.range.min(), max = self.settings.range.max()))]
    async fn refresh<R: Rng>(&self, rng: &mut R) -> Result<RefreshReport, RefreshError> {
        self.store.ping().await?;
        println!("Connected to MongoDB\n");

        println!("Checking current products...");
        let before = self.snapshot().await?;
        println!("\n{}", SnapshotView::new("Found", &before));

        println!("\nUpdating product stock...");
        let updated = match self.settings.mode {
            UpdateMode::PerDocument => self.update_each(rng).await?,
            UpdateMode::Bulk => self.store.randomize_all(self.settings.range).await?,
        };
        println!("{} products updated!", updated);
        info!(updated, "Stock refreshed");

        println!("\nChecking products after update...");
        let after = self.snapshot().await?;
        println!("\n{}", SnapshotView::new("Updated", &after));

        let stats = self.stats().await?;
        println!("\n{}", stats);

        Ok(RefreshReport {
            before,
            updated,
            after,
            stats,
        })
    }

    async fn snapshot(&self) -> Result<StockSnapshot, RefreshError> {
        let sample = self.store.sample(self.settings.sample_limit).await?;
        let total = self.store.count_all().await?;
        let zero_or_missing = self.store.count_zero_or_missing().await?;
        debug!(total, zero_or_missing, "Snapshot taken");

        Ok(StockSnapshot {
            sample,
            total,
            zero_or_missing,
        })
    }

    /// One independent, unconditional write per product, issued in scan order.
    async fn update_each<R: Rng>(&self, rng: &mut R) -> Result<u64, RefreshError> {
        let ids = self.store.product_ids().await?;
        let mut updated = 0;
        for id in &ids {
            let quantity = self.settings.range.sample(rng);
            self.store.set_quantity(id, quantity).await?;
            updated += 1;
        }
        Ok(updated)
    }

    async fn stats(&self) -> Result<StockStats, RefreshError> {
        let total = self.store.count_all().await?;
        let in_stock = self.store.count_in_stock().await?;
        Ok(StockStats { total, in_stock })
    }
}
