//! `/tags` endpoints, including tag assignment on hosts and platforms.

use serde_json::json;

use super::ApiClient;
use crate::error::ApiError;
use crate::models::{Host, Page, Platform, RemovedCount, Tag, TagHostsFilter, TagInput};

pub struct TagsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> TagsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Tag>, ApiError> {
        self.client.get("/tags").await?.into_data()
    }

    pub async fn get(&self, id: i64) -> Result<Tag, ApiError> {
        self.client.get(&format!("/tags/{}", id)).await?.into_data()
    }

    pub async fn create(&self, tag: &TagInput) -> Result<Tag, ApiError> {
        self.client.post("/tags", tag).await?.into_data()
    }

    pub async fn update(&self, id: i64, tag: &TagInput) -> Result<Tag, ApiError> {
        self.client.put(&format!("/tags/{}", id), tag).await?.into_data()
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete_ack(&format!("/tags/{}", id)).await?;
        Ok(())
    }

    /// Attach tags to a host, returning the host with its updated tag list.
    pub async fn add_to_host(&self, host_id: i64, tag_ids: &[i64]) -> Result<Host, ApiError> {
        self.client
            .post(&format!("/tags/hosts/{}", host_id), &json!({ "tag_ids": tag_ids }))
            .await?
            .into_data()
    }

    pub async fn remove_from_host(&self, host_id: i64, tag_id: i64) -> Result<(), ApiError> {
        self.client
            .delete_ack(&format!("/tags/hosts/{}/{}", host_id, tag_id))
            .await?;
        Ok(())
    }

    pub async fn add_to_platform(&self, platform_id: i64, tag_ids: &[i64]) -> Result<Platform, ApiError> {
        self.client
            .post(
                &format!("/tags/platforms/{}", platform_id),
                &json!({ "tag_ids": tag_ids }),
            )
            .await?
            .into_data()
    }

    pub async fn remove_from_platform(&self, platform_id: i64, tag_id: i64) -> Result<(), ApiError> {
        self.client
            .delete_ack(&format!("/tags/platforms/{}/{}", platform_id, tag_id))
            .await?;
        Ok(())
    }

    pub async fn hosts(&self, tag_id: i64, filter: &TagHostsFilter) -> Result<Page<Vec<Host>>, ApiError> {
        self.client
            .get_with_query(&format!("/tags/{}/hosts", tag_id), filter)
            .await?
            .into_page()
    }

    pub async fn batch_remove_hosts(&self, tag_id: i64, host_ids: &[i64]) -> Result<RemovedCount, ApiError> {
        self.client
            .post(
                &format!("/tags/{}/hosts/batch-remove", tag_id),
                &json!({ "host_ids": host_ids }),
            )
            .await?
            .into_data()
    }
}
