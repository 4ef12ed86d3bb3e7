//! # Mock Framework
//!
//! In-memory [`ProductStore`] for testing the refresher without a database.
//!
//! Use [`MockProductStore::with_products`] to seed a collection, optionally
//! arm a failure with [`MockProductStore::fail_on`], then hand a clone to the
//! code under test. The original handle keeps observing the shared state:
//! recorded calls, stored quantities, and whether the store was closed.

use std::sync::{Arc, Mutex, MutexGuard};

use mongodb::bson::Bson;
use rand::{rngs::StdRng, SeedableRng};

use crate::domain::{Product, QuantityRange};
use crate::error::RefreshError;
use crate::store::ProductStore;

/// One request observed by the mock, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreCall {
    Ping,
    Sample(u32),
    CountAll,
    CountZeroOrMissing,
    CountInStock,
    ProductIds,
    SetQuantity(Bson, u32),
    RandomizeAll,
    Close,
}

impl StoreCall {
    pub fn is_read(&self) -> bool {
        matches!(
            self,
            StoreCall::Sample(_)
                | StoreCall::CountAll
                | StoreCall::CountZeroOrMissing
                | StoreCall::CountInStock
                | StoreCall::ProductIds
        )
    }

    pub fn is_write(&self) -> bool {
        matches!(self, StoreCall::SetQuantity(..) | StoreCall::RandomizeAll)
    }
}

/// Request the mock should fail instead of serving.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FailurePoint {
    Ping,
    Sample,
    /// Fails the n-th `set_quantity` call (zero-based).
    SetQuantity(usize),
}

#[derive(Default)]
struct MockState {
    products: Vec<Product>,
    calls: Vec<StoreCall>,
    failure: Option<FailurePoint>,
    updates: usize,
    closed: bool,
}

#[derive(Clone, Default)]
pub struct MockProductStore {
    state: Arc<Mutex<MockState>>,
}

impl MockProductStore {
    pub fn with_products(products: Vec<Product>) -> Self {
        let state = MockState {
            products,
            ..MockState::default()
        };
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// Seeds products `product_1..` with the given quantities and no names.
    pub fn with_quantities(quantities: &[Option<i64>]) -> Self {
        let products = quantities
            .iter()
            .enumerate()
            .map(|(i, q)| Product::new(format!("product_{}", i + 1), None, *q))
            .collect();
        Self::with_products(products)
    }

    pub fn fail_on(self, point: FailurePoint) -> Self {
        self.lock().failure = Some(point);
        self
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.lock().calls.clone()
    }

    pub fn products(&self) -> Vec<Product> {
        self.lock().products.clone()
    }

    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().expect("mock state poisoned")
    }

    fn record(&self, call: StoreCall) -> MutexGuard<'_, MockState> {
        let mut state = self.lock();
        state.calls.push(call);
        state
    }
}

impl ProductStore for MockProductStore {
    async fn ping(&self) -> Result<(), RefreshError> {
        let state = self.record(StoreCall::Ping);
        if state.failure == Some(FailurePoint::Ping) {
            return Err(RefreshError::Ping("server selection timeout".to_string()));
        }
        Ok(())
    }

    async fn sample(&self, limit: u32) -> Result<Vec<Product>, RefreshError> {
        let state = self.record(StoreCall::Sample(limit));
        if state.failure == Some(FailurePoint::Sample) {
            return Err(RefreshError::Read("cursor killed".to_string()));
        }
        Ok(state.products.iter().take(limit as usize).cloned().collect())
    }

    async fn count_all(&self) -> Result<u64, RefreshError> {
        let state = self.record(StoreCall::CountAll);
        Ok(state.products.len() as u64)
    }

    async fn count_zero_or_missing(&self) -> Result<u64, RefreshError> {
        let state = self.record(StoreCall::CountZeroOrMissing);
        Ok(state.products.iter().filter(|p| p.is_out_of_stock()).count() as u64)
    }

    async fn count_in_stock(&self) -> Result<u64, RefreshError> {
        let state = self.record(StoreCall::CountInStock);
        Ok(state.products.iter().filter(|p| p.stock_level() > 0).count() as u64)
    }

    async fn product_ids(&self) -> Result<Vec<Bson>, RefreshError> {
        let state = self.record(StoreCall::ProductIds);
        Ok(state.products.iter().map(|p| p.id.clone()).collect())
    }

    async fn set_quantity(&self, id: &Bson, quantity: u32) -> Result<(), RefreshError> {
        let mut state = self.record(StoreCall::SetQuantity(id.clone(), quantity));
        if state.failure == Some(FailurePoint::SetQuantity(state.updates)) {
            return Err(RefreshError::write(id, "write concern error"));
        }
        state.updates += 1;
        if let Some(product) = state.products.iter_mut().find(|p| &p.id == id) {
            product.quantity = Some(i64::from(quantity));
        }
        Ok(())
    }

    async fn randomize_all(&self, range: QuantityRange) -> Result<u64, RefreshError> {
        let mut state = self.record(StoreCall::RandomizeAll);
        let mut rng = StdRng::seed_from_u64(state.products.len() as u64);
        for product in state.products.iter_mut() {
            product.quantity = Some(i64::from(range.sample(&mut rng)));
        }
        Ok(state.products.len() as u64)
    }

    async fn close(self) {
        let mut state = self.record(StoreCall::Close);
        state.closed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_store_records_calls() {
        let store = MockProductStore::with_quantities(&[Some(0), Some(3)]);
        let observer = store.clone();

        assert_eq!(store.count_in_stock().await.unwrap(), 1);
        store.set_quantity(&Bson::String("product_1".into()), 20).await.unwrap();
        store.close().await;

        assert_eq!(
            observer.calls(),
            vec![
                StoreCall::CountInStock,
                StoreCall::SetQuantity(Bson::String("product_1".into()), 20),
                StoreCall::Close,
            ]
        );
        assert_eq!(observer.products()[0].quantity, Some(20));
        assert!(observer.is_closed());
    }

    #[tokio::test]
    async fn test_mock_store_injects_write_failure() {
        let store = MockProductStore::with_quantities(&[Some(1), Some(2)]).fail_on(FailurePoint::SetQuantity(1));
        let first = Bson::String("product_1".into());
        let second = Bson::String("product_2".into());

        assert!(store.set_quantity(&first, 50).await.is_ok());
        assert!(matches!(
            store.set_quantity(&second, 50).await,
            Err(RefreshError::Write { .. })
        ));
        assert_eq!(store.products()[1].quantity, Some(2));
    }
}
