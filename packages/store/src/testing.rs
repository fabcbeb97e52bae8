//! Resource API double whose responses complete only when a test releases them.
//!
//! Each gated endpoint pops the next queued receiver and waits on it; with no
//! receiver queued it answers immediately. `admin` logs in as an approved
//! admin, anyone else as an approved creator.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use api::{
    ApiError, Credentials, Product, ProductDraft, Referral, ResourceApi, Role, SignupForm, User,
};
use tokio::sync::oneshot;

type Gates<T> = RefCell<VecDeque<oneshot::Receiver<T>>>;

#[derive(Default)]
pub(crate) struct GatedApi {
    logins: Gates<()>,
    products: Gates<Vec<Product>>,
    users: Gates<Vec<User>>,
    login_calls: Cell<usize>,
}

impl GatedApi {
    pub(crate) fn gate_login(&self, rx: oneshot::Receiver<()>) {
        self.logins.borrow_mut().push_back(rx);
    }

    pub(crate) fn gate_products(&self, rx: oneshot::Receiver<Vec<Product>>) {
        self.products.borrow_mut().push_back(rx);
    }

    pub(crate) fn gate_users(&self, rx: oneshot::Receiver<Vec<User>>) {
        self.users.borrow_mut().push_back(rx);
    }

    pub(crate) fn login_calls(&self) -> usize {
        self.login_calls.get()
    }
}

/// Wait for the next queued release, or answer `T::default()` at once.
async fn released<T: Default>(gates: &Gates<T>) -> Result<T, ApiError> {
    // Pop first so the borrow is not held across the await.
    let gate = gates.borrow_mut().pop_front();
    match gate {
        Some(rx) => rx
            .await
            .map_err(|_| ApiError::Transport("gate dropped".to_string())),
        None => Ok(T::default()),
    }
}

impl ResourceApi for GatedApi {
    async fn login(&self, credentials: &Credentials) -> Result<User, ApiError> {
        self.login_calls.set(self.login_calls.get() + 1);
        released(&self.logins).await?;
        let role = if credentials.username == "admin" {
            Role::Admin
        } else {
            Role::Creator
        };
        Ok(User {
            username: credentials.username.clone(),
            role,
            approved: true,
            ..Default::default()
        })
    }

    async fn signup(&self, _form: &SignupForm) -> Result<(), ApiError> {
        Ok(())
    }

    async fn logout(&self) -> Result<(), ApiError> {
        Ok(())
    }

    async fn current_user(&self) -> Result<User, ApiError> {
        Err(ApiError::Unauthorized)
    }

    async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        released(&self.products).await
    }

    async fn create_product(&self, _draft: &ProductDraft) -> Result<(), ApiError> {
        Ok(())
    }

    async fn referral(&self) -> Result<Referral, ApiError> {
        Err(ApiError::Unauthorized)
    }

    async fn request_creator(&self) -> Result<(), ApiError> {
        Ok(())
    }

    async fn approve_creator(&self, _user_id: u64) -> Result<(), ApiError> {
        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        released(&self.users).await
    }
}
