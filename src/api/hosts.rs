//! `/hosts` endpoints.

use serde::Serialize;
use serde_json::json;

use super::ApiClient;
use crate::error::ApiError;
use crate::models::{
    BatchCreateResult, BatchDeleteResult, BatchUpdateResult, CollectStarted, Download, Host,
    HostCredentials, HostDetail, HostExportFormat, HostFilter, HostInput, HostRelationships,
    HostUpdate, Page, PlatformTree, StoredCredentials,
};

pub struct HostsApi<'a> {
    client: &'a ApiClient,
}

#[derive(Serialize)]
struct FormatQuery {
    format: &'static str,
}

impl<'a> HostsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, filter: &HostFilter) -> Result<Page<Vec<Host>>, ApiError> {
        self.client.get_with_query("/hosts", filter).await?.into_page()
    }

    pub async fn get(&self, id: i64) -> Result<Host, ApiError> {
        self.client.get(&format!("/hosts/{}", id)).await?.into_data()
    }

    pub async fn create(&self, host: &HostInput) -> Result<Host, ApiError> {
        self.client.post("/hosts", host).await?.into_data()
    }

    pub async fn update(&self, id: i64, host: &HostInput) -> Result<Host, ApiError> {
        self.client.put(&format!("/hosts/{}", id), host).await?.into_data()
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete_ack(&format!("/hosts/{}", id)).await?;
        Ok(())
    }

    pub async fn batch_delete(&self, host_ids: &[i64]) -> Result<BatchDeleteResult, ApiError> {
        self.client
            .post("/hosts/batch/delete", &json!({ "host_ids": host_ids }))
            .await?
            .into_data()
    }

    /// Create many hosts; hosts whose IP already exists are updated instead.
    pub async fn batch_create(&self, hosts: &[HostInput]) -> Result<BatchCreateResult, ApiError> {
        self.client
            .post("/hosts/batch", &json!({ "hosts": hosts }))
            .await?
            .into_data()
    }

    pub async fn batch_update(&self, hosts: &[HostUpdate]) -> Result<BatchUpdateResult, ApiError> {
        self.client
            .post("/hosts/batch/update", &json!({ "hosts": hosts }))
            .await?
            .into_data()
    }

    pub async fn set_credentials(
        &self,
        id: i64,
        credentials: &HostCredentials,
    ) -> Result<StoredCredentials, ApiError> {
        self.client
            .post(&format!("/hosts/{}/credentials", id), credentials)
            .await?
            .into_data()
    }

    pub async fn get_credentials(&self, id: i64) -> Result<StoredCredentials, ApiError> {
        self.client
            .get(&format!("/hosts/{}/credentials", id))
            .await?
            .into_data()
    }

    pub async fn batch_set_credentials(
        &self,
        host_ids: &[i64],
        credentials: &HostCredentials,
    ) -> Result<BatchUpdateResult, ApiError> {
        self.client
            .post(
                "/hosts/batch/credentials",
                &json!({ "host_ids": host_ids, "credentials": credentials }),
            )
            .await?
            .into_data()
    }

    /// Start collection. `concurrent_limit: None` is sent as `null`, leaving
    /// the backend default in charge.
    pub async fn batch_collect(
        &self,
        host_ids: &[i64],
        concurrent_limit: Option<u32>,
    ) -> Result<CollectStarted, ApiError> {
        self.client
            .post(
                "/hosts/batch/collect",
                &json!({ "host_ids": host_ids, "concurrent_limit": concurrent_limit }),
            )
            .await?
            .into_data()
    }

    pub async fn details(&self, id: i64) -> Result<Vec<HostDetail>, ApiError> {
        self.client
            .get(&format!("/hosts/{}/details", id))
            .await?
            .into_data()
    }

    pub async fn relationships(&self, id: i64) -> Result<HostRelationships, ApiError> {
        self.client
            .get(&format!("/hosts/{}/relationships", id))
            .await?
            .into_data()
    }

    /// Platform-sourced hosts grouped platform, hypervisor, VM.
    pub async fn tree(&self) -> Result<Vec<PlatformTree>, ApiError> {
        self.client.get("/hosts/tree").await?.into_data()
    }

    pub async fn export_templates(&self) -> Result<serde_json::Value, ApiError> {
        self.client.get("/hosts/export/templates").await?.into_data()
    }

    pub async fn export_excel(&self, payload: &serde_json::Value) -> Result<Download, ApiError> {
        self.client.post_bytes("/hosts/export/excel", payload).await
    }

    pub async fn export_csv(&self, filter: &HostFilter) -> Result<Download, ApiError> {
        let path = super::query::with_query("/hosts/export/csv", filter)?;
        self.client.get_bytes(&path).await
    }

    /// Latest collected data of one host as a JSON or YAML document.
    pub async fn export_host(&self, id: i64, format: HostExportFormat) -> Result<Download, ApiError> {
        let path = super::query::with_query(
            &format!("/hosts/{}/export", id),
            &FormatQuery {
                format: format.as_str(),
            },
        )?;
        self.client.get_bytes(&path).await
    }
}
