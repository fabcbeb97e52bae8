//! # API crate — the Resource API contract consumed by the storefront client
//!
//! Everything the client knows about the remote account/catalog service lives here:
//! the wire models, the endpoint table, and the async [`ResourceApi`] trait that the
//! request-domain controllers in the `store` crate are generic over.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`models`] | Wire models (`User`, `Role`, `Product`, `ProductDraft`, `Referral`) and request bodies (`Credentials`, `SignupForm`) |
//! | [`endpoint`] | One variant per Resource API operation, with its HTTP method and path |
//! | [`error`] | [`ApiError`], the single failure type every implementation returns |
//! | [`http`] | [`HttpApi`], the `reqwest` implementation used in the browser and on native |
//! | [`memory`] | [`MemoryApi`], an in-memory implementation of the server rules for tests (`memory` feature) |
//!
//! ## Operations
//!
//! | Operation | Endpoint | Response |
//! |-----------|----------|----------|
//! | `login` | `POST /login` | [`User`] |
//! | `signup` | `POST /signup` | — |
//! | `logout` | `GET /logout` | — |
//! | `current_user` | `GET /user` | [`User`] |
//! | `list_products` | `GET /products` | `Vec<Product>` |
//! | `create_product` | `POST /products` | — |
//! | `referral` | `GET /referral` | [`Referral`] |
//! | `request_creator` | `POST /request_creator` | — |
//! | `approve_creator` | `POST /admin/approve_creator/{id}` | — |
//! | `list_users` | `GET /admin/users` | `Vec<User>` |

use std::future::Future;

pub mod endpoint;
pub mod error;
pub mod http;
#[cfg(any(test, feature = "memory"))]
pub mod memory;
pub mod models;

pub use endpoint::Endpoint;
pub use error::ApiError;
pub use http::HttpApi;
#[cfg(any(test, feature = "memory"))]
pub use memory::MemoryApi;
pub use models::{
    Credentials, DraftError, Product, ProductDraft, Referral, Role, SignupForm, User,
};

/// Async interface to the remote Resource API.
///
/// Futures are not required to be `Send`: the client runs on a single cooperative
/// thread in the browser.
pub trait ResourceApi {
    fn login(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<User, ApiError>>;
    fn signup(
        &self,
        form: &SignupForm,
    ) -> impl Future<Output = Result<(), ApiError>>;
    fn logout(&self) -> impl Future<Output = Result<(), ApiError>>;
    fn current_user(&self) -> impl Future<Output = Result<User, ApiError>>;
    fn list_products(&self) -> impl Future<Output = Result<Vec<Product>, ApiError>>;
    fn create_product(
        &self,
        draft: &ProductDraft,
    ) -> impl Future<Output = Result<(), ApiError>>;
    fn referral(&self) -> impl Future<Output = Result<Referral, ApiError>>;
    fn request_creator(&self) -> impl Future<Output = Result<(), ApiError>>;
    fn approve_creator(
        &self,
        user_id: u64,
    ) -> impl Future<Output = Result<(), ApiError>>;
    fn list_users(&self) -> impl Future<Output = Result<Vec<User>, ApiError>>;
}
