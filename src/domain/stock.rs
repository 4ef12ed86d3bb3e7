use super::Product;

/// Read-only view of the collection taken before and after a refresh.
#[derive(Debug, Clone, PartialEq)]
pub struct StockSnapshot {
    pub sample: Vec<Product>,
    pub total: u64,
    pub zero_or_missing: u64,
}

/// Final in-stock statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockStats {
    pub total: u64,
    pub in_stock: u64,
}

impl StockStats {
    pub fn out_of_stock(&self) -> u64 {
        self.total.saturating_sub(self.in_stock)
    }
}

/// Everything a completed run observed.
#[derive(Debug, Clone, PartialEq)]
pub struct RefreshReport {
    pub before: StockSnapshot,
    pub updated: u64,
    pub after: StockSnapshot,
    pub stats: StockStats,
}
