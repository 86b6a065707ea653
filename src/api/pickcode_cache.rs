//! Pickcode cache entries.

use reqwest::Method;

use super::types::{
    CreatePickcodeCacheParams, DeletedCount, Page, PickcodeCache, PickcodeCacheQuery,
    PickcodeCacheStats, UpdatePickcodeCacheParams,
};
use super::{FusionClient, IdsBody};
use crate::error::Result;

impl FusionClient {
    pub async fn list_pickcode_cache(
        &self,
        query: &PickcodeCacheQuery,
    ) -> Result<Page<PickcodeCache>> {
        self.get("/api/pickcode-cache", query).await
    }

    pub async fn get_pickcode_cache(&self, id: i64) -> Result<PickcodeCache> {
        self.get_bare(&format!("/api/pickcode-cache/{id}")).await
    }

    pub async fn create_pickcode_cache(
        &self,
        params: &CreatePickcodeCacheParams,
    ) -> Result<PickcodeCache> {
        self.send_json(Method::POST, "/api/pickcode-cache", params)
            .await
    }

    pub async fn update_pickcode_cache(
        &self,
        params: &UpdatePickcodeCacheParams,
    ) -> Result<PickcodeCache> {
        self.send_json(Method::PUT, &format!("/api/pickcode-cache/{}", params.id), params)
            .await
    }

    pub async fn delete_pickcode_cache(&self, id: i64) -> Result<()> {
        self.send_empty_unit(Method::DELETE, &format!("/api/pickcode-cache/{id}"))
            .await
    }

    pub async fn batch_delete_pickcode_cache(&self, ids: &[i64]) -> Result<DeletedCount> {
        self.send_json(Method::POST, "/api/pickcode-cache/batch/delete", &IdsBody { ids })
            .await
    }

    pub async fn clear_pickcode_cache(&self) -> Result<DeletedCount> {
        self.send_empty(Method::DELETE, "/api/pickcode-cache/clear")
            .await
    }

    pub async fn pickcode_cache_stats(&self) -> Result<PickcodeCacheStats> {
        self.get_bare("/api/pickcode-cache/stats").await
    }
}
