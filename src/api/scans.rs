//! `/scans` endpoints.

use super::ApiClient;
use crate::error::ApiError;
use crate::models::{Host, Page, ScanRequest, ScanTask, TaskFilter};

pub struct ScansApi<'a> {
    client: &'a ApiClient,
}

impl<'a> ScansApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn create(&self, request: &ScanRequest) -> Result<ScanTask, ApiError> {
        self.client.post("/scans", request).await?.into_data()
    }

    pub async fn list(&self, filter: &TaskFilter) -> Result<Page<Vec<ScanTask>>, ApiError> {
        self.client.get_with_query("/scans", filter).await?.into_page()
    }

    pub async fn get(&self, id: i64) -> Result<ScanTask, ApiError> {
        self.client.get(&format!("/scans/{}", id)).await?.into_data()
    }

    /// Hosts discovered by the scan.
    pub async fn results(&self, id: i64) -> Result<Vec<Host>, ApiError> {
        self.client
            .get(&format!("/scans/{}/results", id))
            .await?
            .into_data()
    }

    pub async fn cancel(&self, id: i64) -> Result<ScanTask, ApiError> {
        self.client
            .post_action(&format!("/scans/{}/cancel", id))
            .await?
            .into_data()
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete_ack(&format!("/scans/{}", id)).await?;
        Ok(())
    }
}
