//! `/config` endpoints.

use super::ApiClient;
use crate::error::ApiError;
use crate::models::ConcurrentConfig;

pub struct ConfigApi<'a> {
    client: &'a ApiClient,
}

impl<'a> ConfigApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn get_concurrent(&self) -> Result<ConcurrentConfig, ApiError> {
        self.client.get("/config/concurrent").await?.into_data()
    }

    pub async fn update_concurrent(&self, config: &ConcurrentConfig) -> Result<ConcurrentConfig, ApiError> {
        self.client
            .put("/config/concurrent", config)
            .await?
            .into_data()
    }
}
