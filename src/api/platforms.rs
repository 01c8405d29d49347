//! `/platforms` endpoints.

use super::ApiClient;
use crate::error::ApiError;
use crate::models::{ConnectionTest, Platform, PlatformInput, SyncStarted};

pub struct PlatformsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> PlatformsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Platform>, ApiError> {
        self.client.get("/platforms").await?.into_data()
    }

    pub async fn get(&self, id: i64) -> Result<Platform, ApiError> {
        self.client.get(&format!("/platforms/{}", id)).await?.into_data()
    }

    pub async fn create(&self, platform: &PlatformInput) -> Result<Platform, ApiError> {
        self.client.post("/platforms", platform).await?.into_data()
    }

    pub async fn update(&self, id: i64, platform: &PlatformInput) -> Result<Platform, ApiError> {
        self.client
            .put(&format!("/platforms/{}", id), platform)
            .await?
            .into_data()
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete_ack(&format!("/platforms/{}", id)).await?;
        Ok(())
    }

    /// Check that the backend can log into the platform.
    pub async fn test(&self, id: i64) -> Result<ConnectionTest, ApiError> {
        self.client
            .post_action(&format!("/platforms/{}/test", id))
            .await?
            .into_data()
    }

    /// Start an inventory sync; progress is tracked as a collection task.
    pub async fn sync(&self, id: i64) -> Result<SyncStarted, ApiError> {
        self.client
            .post_action(&format!("/platforms/{}/sync", id))
            .await?
            .into_data()
    }
}
