//! Media library entries.

use reqwest::Method;

use super::types::{
    Media, MediaQuery, MediaSearchQuery, MediaStats, Page, StreamUrl, UpdateMediaParams,
};
use super::FusionClient;
use crate::error::Result;

impl FusionClient {
    pub async fn list_media(&self, query: &MediaQuery) -> Result<Page<Media>> {
        self.get("/api/media/list", query).await
    }

    pub async fn get_media(&self, id: i64) -> Result<Media> {
        self.get_bare(&format!("/api/media/{id}")).await
    }

    /// Full-text search over titles; `query.kind` narrows by media type.
    pub async fn search_media(&self, query: &MediaSearchQuery) -> Result<Page<Media>> {
        self.get("/api/media/search", query).await
    }

    pub async fn update_media(&self, id: i64, params: &UpdateMediaParams) -> Result<Media> {
        self.send_json(Method::PUT, &format!("/api/media/{id}"), params)
            .await
    }

    pub async fn delete_media(&self, id: i64) -> Result<()> {
        self.send_empty_unit(Method::DELETE, &format!("/api/media/{id}"))
            .await
    }

    pub async fn media_stats(&self) -> Result<MediaStats> {
        self.get_bare("/api/media/stats").await
    }

    /// Re-fetch metadata for one entry from the upstream providers.
    pub async fn refresh_media_metadata(&self, id: i64) -> Result<()> {
        self.send_empty_unit(Method::POST, &format!("/api/media/{id}/refresh"))
            .await
    }

    pub async fn generate_media_thumbnail(&self, id: i64) -> Result<()> {
        self.send_empty_unit(Method::POST, &format!("/api/media/{id}/thumbnail"))
            .await
    }

    pub async fn media_stream_url(&self, id: i64) -> Result<StreamUrl> {
        self.get_bare(&format!("/api/media/{id}/stream")).await
    }
}
