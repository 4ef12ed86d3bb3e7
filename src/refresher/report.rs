//! Human-readable console rendering of snapshots and statistics.

use std::fmt;

use crate::domain::{StockSnapshot, StockStats};

/// Sampled products followed by the zero-stock count.
pub struct SnapshotView<'a> {
    heading: &'a str,
    snapshot: &'a StockSnapshot,
}

impl<'a> SnapshotView<'a> {
    pub fn new(heading: &'a str, snapshot: &'a StockSnapshot) -> Self {
        Self { heading, snapshot }
    }
}

impl fmt::Display for SnapshotView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} {} products (showing first {}):",
            self.heading,
            self.snapshot.total,
            self.snapshot.sample.len()
        )?;
        for (idx, product) in self.snapshot.sample.iter().enumerate() {
            writeln!(
                f,
                "   {}. {}: quantity = {}",
                idx + 1,
                product.display_name(),
                product.stock_level()
            )?;
        }
        write!(
            f,
            "Products with zero stock or no quantity field: {}",
            self.snapshot.zero_or_missing
        )
    }
}

impl fmt::Display for StockStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Final statistics:")?;
        writeln!(f, "   Total products: {}", self.total)?;
        writeln!(f, "   Products in stock: {}", self.in_stock)?;
        write!(f, "   Products out of stock: {}", self.out_of_stock())
    }
}
