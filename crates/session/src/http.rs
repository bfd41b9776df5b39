//! HTTP transport implementing the portal API contract.
//!
//! Mirrors the server conventions end to end: the persisted token rides in
//! the `Authorization` header of every request, responses carry the
//! `{ code, data, message }` envelope, and envelope code 401 (or an HTTP
//! 401) means the session is no longer valid.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use medconsole_core::{
    ApiError, ApiResult, Envelope, MenuNode, RawMenuNode, UserProfile, sanitize_menus,
};

use crate::api::{Credentials, PortalApi, RegisterForm};
use crate::config::ClientConfig;
use crate::store::{KeyValueStore, keys};

pub struct HttpPortalApi {
    base_url: String,
    client: reqwest::Client,
    /// Token source. Read per request so a login in the same process is
    /// picked up without rebuilding the client.
    store: Arc<dyn KeyValueStore>,
}

impl HttpPortalApi {
    pub fn new(config: &ClientConfig, store: Arc<dyn KeyValueStore>) -> ApiResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| ApiError::network(err.to_string()))?;
        Ok(Self {
            base_url: config.base_url.clone(),
            client,
            store,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.store.get(keys::TOKEN) {
            Some(token) if !token.is_empty() => request.header("Authorization", token),
            _ => request,
        }
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> ApiResult<Envelope<T>> {
        let response = request
            .send()
            .await
            .map_err(|err| ApiError::network(err.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ApiError::auth("unauthorized"));
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ApiError::server(
                status.as_u16() as i32,
                if message.is_empty() {
                    status.canonical_reason().unwrap_or("request failed").to_string()
                } else {
                    message
                },
            ));
        }

        response
            .json::<Envelope<T>>()
            .await
            .map_err(|err| ApiError::payload(err.to_string()))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<Envelope<T>> {
        let request = self.authorized(self.client.get(self.url(path)));
        self.send(request).await
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<Envelope<T>> {
        let request = self.authorized(self.client.post(self.url(path)).json(body));
        self.send(request).await
    }
}

#[async_trait]
impl PortalApi for HttpPortalApi {
    async fn login(&self, credentials: &Credentials) -> ApiResult<String> {
        self.post::<_, String>("/auth/login", credentials)
            .await?
            .into_result()
    }

    async fn register(&self, form: &RegisterForm) -> ApiResult<String> {
        self.post::<_, String>("/auth/register", form)
            .await?
            .into_result()
    }

    async fn logout(&self) -> ApiResult<()> {
        self.post::<_, serde_json::Value>("/auth/logout", &serde_json::json!({}))
            .await?
            .into_unit()
    }

    async fn fetch_profile(&self) -> ApiResult<UserProfile> {
        self.get::<UserProfile>("/auth/user/info").await?.into_result()
    }

    async fn fetch_menus(&self) -> ApiResult<Vec<MenuNode>> {
        let raw = self
            .get::<Vec<RawMenuNode>>("/permission/user/menus")
            .await?
            .into_result()?;
        Ok(sanitize_menus(raw))
    }

    async fn fetch_permissions(&self) -> ApiResult<Vec<String>> {
        self.get::<Vec<String>>("/permission/user/permissions")
            .await?
            .into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn endpoint_urls_join_onto_the_base() {
        let store = Arc::new(MemoryStore::new());
        let api = HttpPortalApi::new(&ClientConfig::new("http://localhost:8080/api"), store)
            .unwrap();
        assert_eq!(api.url("/auth/login"), "http://localhost:8080/api/auth/login");
    }
}
