//! 302 redirect rules.

use reqwest::Method;
use serde::Serialize;

use super::types::{CreateMatchRuleParams, MatchRule, MatchRuleQuery, MatchTest, Page, UpdateMatchRuleParams};
use super::{FusionClient, IdsBody};
use crate::error::Result;

impl FusionClient {
    pub async fn list_match_rules(&self, query: &MatchRuleQuery) -> Result<Page<MatchRule>> {
        self.get("/api/match-302", query).await
    }

    pub async fn get_match_rule(&self, id: i64) -> Result<MatchRule> {
        self.get_bare(&format!("/api/match-302/{id}")).await
    }

    pub async fn create_match_rule(&self, params: &CreateMatchRuleParams) -> Result<MatchRule> {
        self.send_json(Method::POST, "/api/match-302", params).await
    }

    pub async fn update_match_rule(&self, params: &UpdateMatchRuleParams) -> Result<MatchRule> {
        self.send_json(Method::PUT, &format!("/api/match-302/{}", params.id), params)
            .await
    }

    pub async fn delete_match_rule(&self, id: i64) -> Result<()> {
        self.send_empty_unit(Method::DELETE, &format!("/api/match-302/{id}"))
            .await
    }

    pub async fn batch_delete_match_rules(&self, ids: &[i64]) -> Result<()> {
        self.send_json_unit(Method::DELETE, "/api/match-302/batch-delete", &IdsBody { ids })
            .await
    }

    /// All rules targeting one cloud storage account.
    pub async fn match_rules_for_storage(&self, cloud_storage_id: i64) -> Result<Vec<MatchRule>> {
        self.get_bare(&format!("/api/match-302/cloud-storage/{cloud_storage_id}"))
            .await
    }

    /// Run a rule against a candidate path without redirecting.
    pub async fn test_match_rule(&self, id: i64, test_path: &str) -> Result<MatchTest> {
        #[derive(Serialize)]
        struct TestBody<'a> {
            test_path: &'a str,
        }
        self.send_json(
            Method::POST,
            &format!("/api/match-302/{id}/test"),
            &TestBody { test_path },
        )
        .await
    }
}
