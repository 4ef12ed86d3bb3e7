use std::time::Duration;

use futures::TryStreamExt;
use mongodb::bson::{doc, Bson, Document};
use mongodb::options::{ClientOptions, ServerApi, ServerApiVersion};
use mongodb::{Client, Collection};
use tracing::{debug, instrument, warn};

use super::ProductStore;
use crate::domain::{Product, QuantityRange};
use crate::error::RefreshError;

/// Matches products whose quantity is zero, null, or absent.
///
/// `null` matches both an explicit null and a missing field.
fn zero_or_missing_filter() -> Document {
    doc! { "$or": [ { "quantity": 0 }, { "quantity": null } ] }
}

fn in_stock_filter() -> Document {
    doc! { "quantity": { "$gt": 0 } }
}

/// Update pipeline assigning `min + floor($rand * width)` to every product.
///
/// `$rand` is in [0, 1), so with `width = max - min + 1` every value in
/// `[min, max]` is reachable, both ends included.
fn randomize_pipeline(range: QuantityRange) -> Vec<Document> {
    let min = i64::from(range.min());
    let width = i64::from(range.width());
    vec![doc! {
        "$set": {
            "quantity": {
                "$toInt": {
                    "$add": [
                        min,
                        { "$floor": { "$multiply": [ { "$rand": {} }, width ] } }
                    ]
                }
            }
        }
    }]
}

/// Product collection backed by a MongoDB deployment.
pub struct MongoProductStore {
    client: Client,
    products: Collection<Document>,
}

impl MongoProductStore {
    /// Builds a client for `uri` and binds it to `database.collection`.
    ///
    /// The driver connects lazily, so an unreachable server only surfaces on
    /// the first request (normally [`ProductStore::ping`]).
    #[instrument(skip(uri))]
    pub async fn connect(
        uri: &str,
        database: &str,
        collection: &str,
        timeout: Duration,
    ) -> Result<Self, RefreshError> {
        let mut options = ClientOptions::parse(uri)
            .await
            .map_err(|e| RefreshError::Connect(e.to_string()))?;
        options.server_api = Some(ServerApi::builder().version(ServerApiVersion::V1).build());
        options.connect_timeout = Some(timeout);
        options.server_selection_timeout = Some(timeout);

        let client = Client::with_options(options).map_err(|e| RefreshError::Connect(e.to_string()))?;
        let products = client.database(database).collection::<Document>(collection);
        debug!("Client created");

        Ok(Self { client, products })
    }

    async fn count(&self, filter: Document) -> Result<u64, RefreshError> {
        self.products
            .count_documents(filter)
            .await
            .map_err(|e| RefreshError::Read(e.to_string()))
    }
}

impl ProductStore for MongoProductStore {
    #[instrument(skip(self))]
    async fn ping(&self) -> Result<(), RefreshError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| RefreshError::Ping(e.to_string()))?;
        debug!("Ping acknowledged");
        Ok(())
    }

    #[instrument(skip(self), fields(collection = %self.products.name()))]
    async fn sample(&self, limit: u32) -> Result<Vec<Product>, RefreshError> {
        let cursor = self
            .products
            .find(doc! {})
            .projection(doc! { "name": 1, "quantity": 1 })
            .limit(i64::from(limit))
            .await
            .map_err(|e| RefreshError::Read(e.to_string()))?;
        let docs: Vec<Document> = cursor
            .try_collect()
            .await
            .map_err(|e| RefreshError::Read(e.to_string()))?;

        Ok(docs.iter().filter_map(Product::from_document).collect())
    }

    async fn count_all(&self) -> Result<u64, RefreshError> {
        self.count(doc! {}).await
    }

    async fn count_zero_or_missing(&self) -> Result<u64, RefreshError> {
        self.count(zero_or_missing_filter()).await
    }

    async fn count_in_stock(&self) -> Result<u64, RefreshError> {
        self.count(in_stock_filter()).await
    }

    #[instrument(skip(self), fields(collection = %self.products.name()))]
    async fn product_ids(&self) -> Result<Vec<Bson>, RefreshError> {
        let mut cursor = self
            .products
            .find(doc! {})
            .projection(doc! { "_id": 1 })
            .await
            .map_err(|e| RefreshError::Read(e.to_string()))?;

        let mut ids = Vec::new();
        while let Some(doc) = cursor
            .try_next()
            .await
            .map_err(|e| RefreshError::Read(e.to_string()))?
        {
            match doc.get("_id") {
                Some(id) => ids.push(id.clone()),
                None => warn!("Skipping document without _id"),
            }
        }
        debug!(count = ids.len(), "Scanned product ids");
        Ok(ids)
    }

    #[instrument(skip(self, id), fields(id = %id))]
    async fn set_quantity(&self, id: &Bson, quantity: u32) -> Result<(), RefreshError> {
        // QuantityRange caps values at i32::MAX.
        let quantity = i32::try_from(quantity).map_err(|e| RefreshError::write(id, e))?;
        self.products
            .update_one(doc! { "_id": id.clone() }, doc! { "$set": { "quantity": quantity } })
            .await
            .map_err(|e| RefreshError::write(id, e))?;
        debug!("Quantity updated");
        Ok(())
    }

    #[instrument(skip(self), fields(collection = %self.products.name()))]
    async fn randomize_all(&self, range: QuantityRange) -> Result<u64, RefreshError> {
        let result = self
            .products
            .update_many(doc! {}, randomize_pipeline(range))
            .await
            .map_err(|e| RefreshError::write("*", e))?;
        // Matched, not modified: a product that drew its old value still counts.
        debug!(
            matched = result.matched_count,
            modified = result.modified_count,
            "Bulk update applied"
        );
        Ok(result.matched_count)
    }

    async fn close(self) {
        self.client.shutdown().await;
        debug!("Client shut down");
    }
}
