//! Library scan tasks.

use reqwest::Method;
use serde::Serialize;

use super::types::{CreateScanTaskParams, Page, ScanTask, ScanTaskLog, ScanTaskQuery};
use super::FusionClient;
use crate::error::Result;

impl FusionClient {
    pub async fn list_scan_tasks(&self, query: &ScanTaskQuery) -> Result<Page<ScanTask>> {
        self.get("/api/scan-task/list", query).await
    }

    pub async fn get_scan_task(&self, id: i64) -> Result<ScanTask> {
        self.get_bare(&format!("/api/scan-task/{id}")).await
    }

    pub async fn create_scan_task(&self, params: &CreateScanTaskParams) -> Result<ScanTask> {
        self.send_json(Method::POST, "/api/scan-task", params).await
    }

    pub async fn start_scan_task(&self, id: i64) -> Result<()> {
        self.send_empty_unit(Method::POST, &format!("/api/scan-task/{id}/start"))
            .await
    }

    pub async fn stop_scan_task(&self, id: i64) -> Result<()> {
        self.send_empty_unit(Method::POST, &format!("/api/scan-task/{id}/stop"))
            .await
    }

    pub async fn delete_scan_task(&self, id: i64) -> Result<()> {
        self.send_empty_unit(Method::DELETE, &format!("/api/scan-task/{id}"))
            .await
    }

    /// Task log lines, newest first. This endpoint pages with `page`, not
    /// `current`.
    pub async fn scan_task_logs(
        &self,
        id: i64,
        page: Option<u64>,
        page_size: Option<u64>,
    ) -> Result<Page<ScanTaskLog>> {
        #[derive(Serialize)]
        struct LogsQuery {
            #[serde(skip_serializing_if = "Option::is_none")]
            page: Option<u64>,
            #[serde(rename = "pageSize", skip_serializing_if = "Option::is_none")]
            page_size: Option<u64>,
        }
        self.get(
            &format!("/api/scan-task/{id}/logs"),
            &LogsQuery { page, page_size },
        )
        .await
    }

    /// Re-run a failed task from the beginning.
    pub async fn retry_scan_task(&self, id: i64) -> Result<()> {
        self.send_empty_unit(Method::POST, &format!("/api/scan-task/{id}/retry"))
            .await
    }

    /// Tasks currently in the `running` state, unpaged.
    pub async fn active_scan_tasks(&self) -> Result<Vec<ScanTask>> {
        self.get_bare("/api/scan-task/active").await
    }
}
