//! Cloud path mounts.

use reqwest::Method;
use serde::Serialize;

use super::types::{
    CloudFileList, CloudPath, CloudPathQuery, CloudPathTest, CreateCloudPathParams, Page,
    UpdateCloudPathParams,
};
use super::FusionClient;
use crate::error::Result;

impl FusionClient {
    pub async fn list_cloud_paths(&self, query: &CloudPathQuery) -> Result<Page<CloudPath>> {
        self.get("/api/cloud-path/list", query).await
    }

    pub async fn get_cloud_path(&self, id: i64) -> Result<CloudPath> {
        self.get_bare(&format!("/api/cloud-path/{id}")).await
    }

    pub async fn create_cloud_path(&self, params: &CreateCloudPathParams) -> Result<CloudPath> {
        self.send_json(Method::POST, "/api/cloud-path", params).await
    }

    pub async fn update_cloud_path(
        &self,
        id: i64,
        params: &UpdateCloudPathParams,
    ) -> Result<CloudPath> {
        self.send_json(Method::PUT, &format!("/api/cloud-path/{id}"), params)
            .await
    }

    pub async fn delete_cloud_path(&self, id: i64) -> Result<()> {
        self.send_empty_unit(Method::DELETE, &format!("/api/cloud-path/{id}"))
            .await
    }

    /// Dry-run a path configuration without persisting it.
    pub async fn test_cloud_path(&self, params: &CreateCloudPathParams) -> Result<CloudPathTest> {
        self.send_json(Method::POST, "/api/cloud-path/test", params)
            .await
    }

    pub async fn toggle_cloud_path(&self, id: i64, is_active: bool) -> Result<()> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct ToggleBody {
            is_active: bool,
        }
        self.send_json_unit(
            Method::PUT,
            &format!("/api/cloud-path/{id}/toggle"),
            &ToggleBody { is_active },
        )
        .await
    }

    pub async fn list_cloud_path_files(
        &self,
        id: i64,
        path: Option<&str>,
    ) -> Result<CloudFileList> {
        #[derive(Serialize)]
        struct FilesQuery<'a> {
            #[serde(skip_serializing_if = "Option::is_none")]
            path: Option<&'a str>,
        }
        self.get(&format!("/api/cloud-path/{id}/files"), &FilesQuery { path })
            .await
    }
}
