//! Storage seam between the refresher and the document database.

pub mod mongo;

pub use mongo::*;

use mongodb::bson::Bson;

use crate::domain::{Product, QuantityRange};
use crate::error::RefreshError;

/// Operations the refresher needs from a product collection.
///
/// Every call is a single round trip and callers await each one before
/// issuing the next.
#[allow(async_fn_in_trait)]
pub trait ProductStore: Sized {
    /// Lightweight request confirming the connection is usable.
    async fn ping(&self) -> Result<(), RefreshError>;

    /// Up to `limit` products, projected to name and quantity.
    async fn sample(&self, limit: u32) -> Result<Vec<Product>, RefreshError>;

    async fn count_all(&self) -> Result<u64, RefreshError>;

    /// Products whose quantity is zero, null, or absent.
    async fn count_zero_or_missing(&self) -> Result<u64, RefreshError>;

    /// Products whose quantity is strictly positive.
    async fn count_in_stock(&self) -> Result<u64, RefreshError>;

    /// Identifiers of every product in the collection, no filter.
    async fn product_ids(&self) -> Result<Vec<Bson>, RefreshError>;

    /// Unconditionally overwrites the quantity of one product.
    async fn set_quantity(&self, id: &Bson, quantity: u32) -> Result<(), RefreshError>;

    /// Assigns a random quantity from `range` to every product in one
    /// server-side update. Returns the number of modified documents.
    async fn randomize_all(&self, range: QuantityRange) -> Result<u64, RefreshError>;

    /// Releases the underlying connection.
    async fn close(self);
}
