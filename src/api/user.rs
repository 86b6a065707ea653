//! Login, current user, and user management.

use chrono::{DateTime, Utc};
use reqwest::Method;

use super::types::{
    ChangePasswordParams, CreateUserParams, LoginParams, LoginResult, Page, PageQuery,
    UpdateUserParams, User,
};
use super::FusionClient;
use crate::auth::SessionToken;
use crate::error::Result;

impl FusionClient {
    /// Authenticate and persist the bearer token in the session store, so
    /// every subsequent call on this client is authenticated.
    pub async fn login(&self, params: &LoginParams) -> Result<LoginResult> {
        let result: LoginResult = self
            .send_json(Method::POST, "/api/auth/login", params)
            .await?;
        let expire_at = DateTime::<Utc>::from_timestamp(result.expire_at, 0);
        self.session_store().save(&SessionToken {
            token: result.token.clone(),
            expire_at,
        })?;
        Ok(result)
    }

    /// Drop the stored bearer token. Local only; the backend keeps no
    /// server-side session.
    pub fn logout(&self) -> Result<()> {
        self.session_store().clear()?;
        Ok(())
    }

    pub async fn current_user(&self) -> Result<User> {
        self.get_bare("/api/me").await
    }

    pub async fn list_users(&self, query: &PageQuery) -> Result<Page<User>> {
        self.get("/api/user/list", query).await
    }

    pub async fn create_user(&self, params: &CreateUserParams) -> Result<User> {
        self.send_json(Method::POST, "/api/user", params).await
    }

    pub async fn update_user(&self, id: i64, params: &UpdateUserParams) -> Result<User> {
        self.send_json(Method::PUT, &format!("/api/user/{id}"), params)
            .await
    }

    pub async fn delete_user(&self, id: i64) -> Result<()> {
        self.send_empty_unit(Method::DELETE, &format!("/api/user/{id}"))
            .await
    }

    pub async fn change_password(&self, params: &ChangePasswordParams) -> Result<()> {
        self.send_json_unit(Method::PUT, "/api/user/password", params)
            .await
    }
}
