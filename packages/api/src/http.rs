//! # HTTP implementation of the Resource API
//!
//! [`HttpApi`] speaks JSON over `reqwest`. On wasm the browser's fetch carries the
//! session cookie for same-origin requests; on native the client keeps its own
//! cookie store so a login survives across calls.
//!
//! The base URL must be absolute. In the browser the configured base (usually
//! `"/api"`) is resolved against the page origin with [`HttpApi::with_origin`].

use reqwest::{RequestBuilder, Response, Url};
use serde::Serialize;

use crate::{
    ApiError, Credentials, Endpoint, Product, ProductDraft, Referral, ResourceApi, SignupForm,
    User,
};

#[derive(Clone, Debug)]
pub struct HttpApi {
    client: reqwest::Client,
    base: Url,
}

impl HttpApi {
    /// Create a client for an absolute base URL such as `https://shop.example/api`.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let base =
            Url::parse(base_url).map_err(|_| ApiError::InvalidBaseUrl(base_url.to_string()))?;
        Self::from_url(base)
    }

    /// Resolve a possibly relative base URL against the page origin.
    pub fn with_origin(origin: &str, base_url: &str) -> Result<Self, ApiError> {
        let base = Url::parse(origin)
            .and_then(|origin| origin.join(base_url))
            .map_err(|_| ApiError::InvalidBaseUrl(format!("{origin} + {base_url}")))?;
        Self::from_url(base)
    }

    fn from_url(mut base: Url) -> Result<Self, ApiError> {
        if base.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl(base.to_string()));
        }
        // Url::join drops the last segment unless the base ends with '/'.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self {
            client: build_client()?,
            base,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Absolute URL of an endpoint.
    pub fn endpoint_url(&self, endpoint: Endpoint) -> Result<Url, ApiError> {
        self.base
            .join(&endpoint.path())
            .map_err(|_| ApiError::InvalidBaseUrl(self.base.to_string()))
    }

    fn request(&self, endpoint: Endpoint) -> Result<RequestBuilder, ApiError> {
        Ok(self
            .client
            .request(endpoint.method(), self.endpoint_url(endpoint)?))
    }

    fn request_json<T: Serialize>(
        &self,
        endpoint: Endpoint,
        body: &T,
    ) -> Result<RequestBuilder, ApiError> {
        Ok(self.request(endpoint)?.json(body))
    }

    async fn dispatch(
        &self,
        endpoint: Endpoint,
        request: RequestBuilder,
    ) -> Result<Response, ApiError> {
        tracing::debug!("{}", endpoint);
        let response = request.send().await.map_err(|e| {
            tracing::warn!("{} failed to send: {}", endpoint, e);
            ApiError::from(e)
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let err = ApiError::from_status(status.as_u16(), &body);
        tracing::debug!("{} answered {}: {}", endpoint, status, err);
        Err(err)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn build_client() -> Result<reqwest::Client, ApiError> {
    Ok(reqwest::Client::builder().cookie_store(true).build()?)
}

#[cfg(target_arch = "wasm32")]
fn build_client() -> Result<reqwest::Client, ApiError> {
    Ok(reqwest::Client::new())
}

impl ResourceApi for HttpApi {
    async fn login(&self, credentials: &Credentials) -> Result<User, ApiError> {
        let request = self.request_json(Endpoint::Login, credentials)?;
        let response = self.dispatch(Endpoint::Login, request).await?;
        Ok(response.json().await?)
    }

    async fn signup(&self, form: &SignupForm) -> Result<(), ApiError> {
        let request = self.request_json(Endpoint::Signup, form)?;
        self.dispatch(Endpoint::Signup, request).await?;
        Ok(())
    }

    async fn logout(&self) -> Result<(), ApiError> {
        let request = self.request(Endpoint::Logout)?;
        self.dispatch(Endpoint::Logout, request).await?;
        Ok(())
    }

    async fn current_user(&self) -> Result<User, ApiError> {
        let request = self.request(Endpoint::CurrentUser)?;
        let response = self.dispatch(Endpoint::CurrentUser, request).await?;
        Ok(response.json().await?)
    }

    async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        let request = self.request(Endpoint::ListProducts)?;
        let response = self.dispatch(Endpoint::ListProducts, request).await?;
        Ok(response.json().await?)
    }

    async fn create_product(&self, draft: &ProductDraft) -> Result<(), ApiError> {
        let request = self.request_json(Endpoint::CreateProduct, draft)?;
        self.dispatch(Endpoint::CreateProduct, request).await?;
        Ok(())
    }

    async fn referral(&self) -> Result<Referral, ApiError> {
        let request = self.request(Endpoint::Referral)?;
        let response = self.dispatch(Endpoint::Referral, request).await?;
        Ok(response.json().await?)
    }

    async fn request_creator(&self) -> Result<(), ApiError> {
        let request = self.request(Endpoint::RequestCreator)?;
        self.dispatch(Endpoint::RequestCreator, request).await?;
        Ok(())
    }

    async fn approve_creator(&self, user_id: u64) -> Result<(), ApiError> {
        let endpoint = Endpoint::ApproveCreator(user_id);
        let request = self.request(endpoint)?;
        self.dispatch(endpoint, request).await?;
        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        let request = self.request(Endpoint::ListUsers)?;
        let response = self.dispatch(Endpoint::ListUsers, request).await?;
        Ok(response.json().await?)
    }
}
