#![forbid(unsafe_code)]

pub mod config;
pub mod import;
pub mod server;

use services::{AppServices, AppServicesError};

use crate::config::{StorageArgs, StorageMode};

/// Open the store selected by `storage` and wire services over it.
///
/// # Errors
///
/// Returns `AppServicesError` if the store cannot be opened.
pub async fn open_services(storage: &StorageArgs) -> Result<AppServices, AppServicesError> {
    match storage.storage_mode {
        StorageMode::File => {
            tracing::info!(path = %storage.data_file.display(), "using JSON data file");
            AppServices::new_json_file(storage.data_file.clone()).await
        }
        StorageMode::Db => {
            tracing::info!(url = %storage.db_url, "using sqlite database");
            AppServices::new_sqlite(&storage.db_url).await
        }
        StorageMode::Remote => {
            tracing::info!(url = %storage.api_url, "using remote words server");
            Ok(AppServices::new_remote(&storage.api_url))
        }
    }
}
