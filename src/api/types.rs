//! Wire types shared by the resource clients.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{FusionError, Result};

/// The `{code, message, data}` response envelope. `code == 0` means success;
/// every non-zero code is surfaced uniformly as [`FusionError::Api`].
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub code: i64,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn into_result(self) -> Result<T> {
        if self.code != 0 {
            return Err(FusionError::Api {
                code: self.code,
                message: self.message,
            });
        }
        self.data
            .ok_or_else(|| FusionError::InvalidResponse("response data is empty".to_string()))
    }
}

/// Paged list payload.
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    pub list: Vec<T>,
    pub total: u64,
    pub current: u64,
    #[serde(rename = "pageSize")]
    pub page_size: u64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PageQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<u64>,
    #[serde(rename = "pageSize", skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u64>,
}

// ---------------------------------------------------------------------------
// Users & login

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: Option<String>,
    pub avatar: Option<String>,
    pub create_time: Option<DateTime<Utc>>,
    pub update_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginParams {
    pub username: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_login: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResult {
    pub token: String,
    pub user: User,
    /// Unix timestamp (seconds) at which the bearer token expires.
    pub expire_at: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateUserParams {
    pub username: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateUserParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordParams {
    pub old_password: String,
    pub new_password: String,
}

// ---------------------------------------------------------------------------
// Cloud storage

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageStatus {
    Active,
    Disabled,
    Error,
}

/// A linked cloud-drive account with its token lifecycle settings.
#[derive(Debug, Clone, Deserialize)]
pub struct CloudStorage {
    pub id: i64,
    pub user_id: i64,
    pub storage_type: String,
    pub storage_name: String,
    pub app_id: Option<String>,
    pub app_secret: Option<String>,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub token_expires_at: Option<DateTime<Utc>>,
    pub refresh_expires_at: Option<DateTime<Utc>>,
    pub last_refresh_at: Option<DateTime<Utc>>,
    pub auto_refresh: bool,
    pub refresh_before_min: i64,
    pub status: StorageStatus,
    pub error_message: Option<String>,
    pub last_error_at: Option<DateTime<Utc>>,
    pub config: Option<String>,
    pub is_default: bool,
    pub sort_order: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CloudStorageQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<u64>,
    #[serde(rename = "pageSize", skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<StorageStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateCloudStorageParams {
    pub storage_type: String,
    pub storage_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_secret: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_refresh: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_before_min: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateCloudStorageParams {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_secret: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_refresh: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_before_min: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<StorageStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConnectionTest {
    pub connected: bool,
    pub message: Option<String>,
}

// ---------------------------------------------------------------------------
// Cloud paths

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CloudPathKind {
    Local,
    Webdav,
    Alist,
}

/// A mount point synchronized into the media library.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudPath {
    pub id: i64,
    pub name: String,
    pub path: String,
    #[serde(rename = "type")]
    pub kind: CloudPathKind,
    pub config: Option<serde_json::Value>,
    pub is_active: bool,
    pub create_time: DateTime<Utc>,
    pub update_time: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CloudPathQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<u64>,
    #[serde(rename = "pageSize", skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<CloudPathKind>,
    #[serde(rename = "isActive", skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateCloudPathParams {
    pub name: String,
    pub path: String,
    #[serde(rename = "type")]
    pub kind: CloudPathKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCloudPathParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CloudPathTest {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudFileEntry {
    pub name: String,
    pub path: String,
    pub is_dir: bool,
    pub size: Option<u64>,
    pub mod_time: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CloudFileList {
    pub files: Vec<CloudFileEntry>,
}

// ---------------------------------------------------------------------------
// Media library

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Movie,
    Tv,
    Anime,
}

/// One library entry backed by a scanned file.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    pub id: i64,
    pub title: String,
    pub original_title: Option<String>,
    pub year: Option<i32>,
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub genre: Option<Vec<String>>,
    pub rating: Option<f64>,
    pub overview: Option<String>,
    pub poster: Option<String>,
    pub backdrop: Option<String>,
    pub file_path: String,
    pub file_size: u64,
    /// Runtime in seconds.
    pub duration: Option<u64>,
    pub resolution: Option<String>,
    pub create_time: DateTime<Utc>,
    pub update_time: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct MediaQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<u64>,
    #[serde(rename = "pageSize", skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<MediaKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
}

/// Search takes `page`, not `current`, unlike the list endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct MediaSearchQuery {
    pub keyword: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<MediaKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u64>,
    #[serde(rename = "pageSize", skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u64>,
}

impl MediaSearchQuery {
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            kind: None,
            page: None,
            page_size: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMediaParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backdrop: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaStats {
    pub total_count: u64,
    pub movie_count: u64,
    pub tv_count: u64,
    pub anime_count: u64,
    /// Aggregate library size in bytes.
    pub total_size: u64,
    /// Aggregate runtime in seconds.
    pub total_duration: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StreamUrl {
    pub url: String,
}

// ---------------------------------------------------------------------------
// Scan tasks

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanTaskStatus {
    Pending,
    Running,
    Completed,
    Failed,
}

/// A library scan over one cloud path.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanTask {
    pub id: i64,
    pub name: String,
    pub path_id: i64,
    pub status: ScanTaskStatus,
    /// Completion percentage, 0–100.
    pub progress: u32,
    pub total_files: u64,
    pub processed_files: u64,
    pub create_time: DateTime<Utc>,
    pub update_time: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanTaskQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<u64>,
    #[serde(rename = "pageSize", skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ScanTaskStatus>,
    #[serde(rename = "pathId", skip_serializing_if = "Option::is_none")]
    pub path_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateScanTaskParams {
    pub name: String,
    pub path_id: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanLogLevel {
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanTaskLog {
    pub id: i64,
    pub level: ScanLogLevel,
    pub message: String,
    pub create_time: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// STRM generation

/// Path filters applied while walking a 115 directory tree; serialized as a
/// JSON string into the multipart form.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StrmFilterRules {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download: Option<Vec<String>>,
}

/// Input for generating STRM files from an exported 115 directory tree.
#[derive(Debug, Clone)]
pub struct Strm115TreeParams {
    /// File name of the exported tree, e.g. `tree.txt`.
    pub tree_file_name: String,
    /// Raw contents of the exported tree file.
    pub tree_contents: Vec<u8>,
    pub cloud_storage_id: i64,
    /// Prefix prepended to every generated STRM entry.
    pub content_prefix: Option<String>,
    /// Local directory the STRM files are written into.
    pub save_local_path: String,
    pub filter_rules: StrmFilterRules,
}

// ---------------------------------------------------------------------------
// Match/redirect rules

/// A 302 redirect rule mapping a source path onto a cloud storage target.
#[derive(Debug, Clone, Deserialize)]
pub struct MatchRule {
    pub id: i64,
    pub source_path: String,
    pub target_path: String,
    pub cloud_storage_id: i64,
    pub cloud_storage: Option<CloudStorage>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct MatchRuleQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<u64>,
    #[serde(rename = "pageSize", skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_storage_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateMatchRuleParams {
    pub source_path: String,
    pub target_path: String,
    pub cloud_storage_id: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateMatchRuleParams {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_storage_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchTest {
    pub matched: bool,
    pub result_path: Option<String>,
    pub message: Option<String>,
}

// ---------------------------------------------------------------------------
// Pickcode cache

/// Cached file-path → pickcode mapping used by the 302 redirect handler.
#[derive(Debug, Clone, Deserialize)]
pub struct PickcodeCache {
    pub id: i64,
    pub file_path: String,
    pub pickcode: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PickcodeCacheQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<u64>,
    #[serde(rename = "pageSize", skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pickcode: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatePickcodeCacheParams {
    pub file_path: String,
    pub pickcode: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdatePickcodeCacheParams {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pickcode: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PickcodeCacheStats {
    pub total: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeletedCount {
    pub deleted_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_success_yields_data() {
        let envelope: ApiResponse<i64> =
            serde_json::from_str(r#"{"code":0,"message":"ok","data":7}"#).expect("parse");
        assert_eq!(envelope.into_result().expect("data"), 7);
    }

    #[test]
    fn envelope_nonzero_code_is_api_error() {
        let envelope: ApiResponse<i64> =
            serde_json::from_str(r#"{"code":1001,"message":"missing field","data":null}"#)
                .expect("parse");
        match envelope.into_result() {
            Err(crate::error::FusionError::Api { code, message }) => {
                assert_eq!(code, 1001);
                assert_eq!(message, "missing field");
            }
            other => panic!("expected api error, got {other:?}"),
        }
    }

    #[test]
    fn envelope_null_data_on_success_is_invalid() {
        let envelope: ApiResponse<i64> =
            serde_json::from_str(r#"{"code":0,"message":"ok","data":null}"#).expect("parse");
        assert!(matches!(
            envelope.into_result(),
            Err(crate::error::FusionError::InvalidResponse(_))
        ));
    }

    #[test]
    fn cloud_path_uses_camel_case_wire_names() {
        let json = r#"{
            "id": 3,
            "name": "movies",
            "path": "/mnt/movies",
            "type": "webdav",
            "config": {"endpoint": "https://dav.example"},
            "isActive": true,
            "createTime": "2025-04-01T10:00:00Z",
            "updateTime": "2025-04-02T10:00:00Z"
        }"#;
        let path: CloudPath = serde_json::from_str(json).expect("parse");
        assert_eq!(path.kind, CloudPathKind::Webdav);
        assert!(path.is_active);
    }
}
