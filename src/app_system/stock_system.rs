use tracing::info;

use crate::config::Config;
use crate::domain::RefreshReport;
use crate::error::RefreshError;
use crate::refresher::StockRefresher;
use crate::store::MongoProductStore;

/// Builds the MongoDB-backed refresher described by `config` and runs it once.
///
/// The range is validated before any connection is attempted.
pub async fn refresh_stock(config: &Config) -> Result<RefreshReport, RefreshError> {
    let settings = config.settings()?;

    info!(
        database = %config.database,
        collection = %config.collection,
        mode = ?settings.mode,
        "Starting stock refresh"
    );

    let store = MongoProductStore::connect(
        &config.uri,
        &config.database,
        &config.collection,
        config.connect_timeout(),
    )
    .await?;

    let mut rng = rand::thread_rng();
    StockRefresher::new(store, settings).run(&mut rng).await
}
