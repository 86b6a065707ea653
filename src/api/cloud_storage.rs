//! Cloud storage accounts (linked cloud drives).

use reqwest::Method;

use super::types::{
    CloudStorage, CloudStorageQuery, ConnectionTest, CreateCloudStorageParams, Page,
    UpdateCloudStorageParams,
};
use super::{FusionClient, IdsBody};
use crate::error::Result;

impl FusionClient {
    pub async fn list_cloud_storage(&self, query: &CloudStorageQuery) -> Result<Page<CloudStorage>> {
        self.get("/api/cloud-storage", query).await
    }

    pub async fn get_cloud_storage(&self, id: i64) -> Result<CloudStorage> {
        self.get_bare(&format!("/api/cloud-storage/{id}")).await
    }

    pub async fn create_cloud_storage(
        &self,
        params: &CreateCloudStorageParams,
    ) -> Result<CloudStorage> {
        self.send_json(Method::POST, "/api/cloud-storage", params)
            .await
    }

    pub async fn update_cloud_storage(
        &self,
        params: &UpdateCloudStorageParams,
    ) -> Result<CloudStorage> {
        self.send_json(Method::PUT, &format!("/api/cloud-storage/{}", params.id), params)
            .await
    }

    pub async fn delete_cloud_storage(&self, ids: &[i64]) -> Result<()> {
        self.send_json_unit(Method::DELETE, "/api/cloud-storage", &IdsBody { ids })
            .await
    }

    pub async fn set_default_cloud_storage(&self, id: i64) -> Result<()> {
        self.send_empty_unit(Method::PUT, &format!("/api/cloud-storage/{id}/set-default"))
            .await
    }

    /// Force a token refresh; returns the record with updated expiry fields.
    pub async fn refresh_cloud_storage_token(&self, id: i64) -> Result<CloudStorage> {
        self.send_empty(Method::POST, &format!("/api/cloud-storage/{id}/refresh-token"))
            .await
    }

    pub async fn test_cloud_storage(&self, id: i64) -> Result<ConnectionTest> {
        self.send_empty(Method::POST, &format!("/api/cloud-storage/{id}/test"))
            .await
    }
}
