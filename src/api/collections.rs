//! `/collections` endpoints.

use super::ApiClient;
use crate::error::ApiError;
use crate::models::{CollectionResult, CollectionTask, Download, Page, TaskFilter};

pub struct CollectionsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> CollectionsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, filter: &TaskFilter) -> Result<Page<Vec<CollectionTask>>, ApiError> {
        self.client
            .get_with_query("/collections", filter)
            .await?
            .into_page()
    }

    pub async fn get(&self, id: i64) -> Result<CollectionTask, ApiError> {
        self.client
            .get(&format!("/collections/{}", id))
            .await?
            .into_data()
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client
            .delete_ack(&format!("/collections/{}", id))
            .await?;
        Ok(())
    }

    pub async fn cancel(&self, id: i64) -> Result<CollectionTask, ApiError> {
        self.client
            .post_action(&format!("/collections/{}/cancel", id))
            .await?
            .into_data()
    }

    /// Re-run the failed hosts of a task.
    pub async fn retry(&self, id: i64) -> Result<CollectionTask, ApiError> {
        self.client
            .post_action(&format!("/collections/{}/retry", id))
            .await?
            .into_data()
    }

    pub async fn results(&self, id: i64) -> Result<Vec<CollectionResult>, ApiError> {
        self.client
            .get(&format!("/collections/{}/results", id))
            .await?
            .into_data()
    }

    pub async fn export_csv(&self, id: i64) -> Result<Download, ApiError> {
        self.client
            .get_bytes(&format!("/collections/{}/export/csv", id))
            .await
    }
}
