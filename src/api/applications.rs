//! `/applications` endpoints and the graph save/export contract.
//!
//! `save_graph` always sends the complete graph; the backend replaces
//! whatever it stored before. Saving the same payload twice leaves the same
//! state. Nothing here validates the graph: callers that want local checks
//! run [`GraphPayload::validate`] first.

use super::ApiClient;
use crate::error::ApiError;
use crate::models::{
    AddHostsRequest, Application, ApplicationGraph, ApplicationInput, Download, GraphPayload,
    HostRelationship, RelationshipInput,
};

pub struct ApplicationsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> ApplicationsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Application>, ApiError> {
        self.client.get("/applications").await?.into_data()
    }

    pub async fn get(&self, id: i64) -> Result<Application, ApiError> {
        self.client
            .get(&format!("/applications/{}", id))
            .await?
            .into_data()
    }

    pub async fn create(&self, app: &ApplicationInput) -> Result<Application, ApiError> {
        self.client.post("/applications", app).await?.into_data()
    }

    pub async fn update(&self, id: i64, app: &ApplicationInput) -> Result<Application, ApiError> {
        self.client
            .put(&format!("/applications/{}", id), app)
            .await?
            .into_data()
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client
            .delete_ack(&format!("/applications/{}", id))
            .await?;
        Ok(())
    }

    /// Add hosts as members. Hosts already in the application are skipped by the backend.
    pub async fn add_hosts(&self, id: i64, request: &AddHostsRequest) -> Result<Application, ApiError> {
        self.client
            .post(&format!("/applications/{}/hosts", id), request)
            .await?
            .into_data()
    }

    pub async fn remove_host(&self, id: i64, host_id: i64) -> Result<(), ApiError> {
        self.client
            .delete_ack(&format!("/applications/{}/hosts/{}", id, host_id))
            .await?;
        Ok(())
    }

    pub async fn relationships(&self, id: i64) -> Result<Vec<HostRelationship>, ApiError> {
        self.client
            .get(&format!("/applications/{}/relationships", id))
            .await?
            .into_data()
    }

    pub async fn create_relationship(
        &self,
        id: i64,
        relationship: &RelationshipInput,
    ) -> Result<HostRelationship, ApiError> {
        self.client
            .post(&format!("/applications/{}/relationships", id), relationship)
            .await?
            .into_data()
    }

    pub async fn update_relationship(
        &self,
        id: i64,
        relationship_id: i64,
        relationship: &RelationshipInput,
    ) -> Result<HostRelationship, ApiError> {
        self.client
            .put(
                &format!("/applications/{}/relationships/{}", id, relationship_id),
                relationship,
            )
            .await?
            .into_data()
    }

    pub async fn delete_relationship(&self, id: i64, relationship_id: i64) -> Result<(), ApiError> {
        self.client
            .delete_ack(&format!(
                "/applications/{}/relationships/{}",
                id, relationship_id
            ))
            .await?;
        Ok(())
    }

    pub async fn get_graph(&self, id: i64) -> Result<ApplicationGraph, ApiError> {
        self.client
            .get(&format!("/applications/{}/graph", id))
            .await?
            .into_data()
    }

    /// Replace the stored graph with `graph`.
    pub async fn save_graph(&self, id: i64, graph: &GraphPayload) -> Result<(), ApiError> {
        let _: crate::models::Ack = self
            .client
            .put(&format!("/applications/{}/graph", id), graph)
            .await?;
        Ok(())
    }

    pub async fn export_graph(&self, id: i64) -> Result<Download, ApiError> {
        self.client
            .get_bytes(&format!("/applications/{}/graph/export", id))
            .await
    }
}
