//! In-memory Resource API for tests. Built with the `memory` feature.
//!
//! Follows the server's rules: a seeded `admin`/`adminpass` account, login-gated
//! endpoints, creator requests that flip the role to an unapproved creator, and
//! catalog writes restricted to approved creators. Every call is recorded so
//! tests can assert which requests a controller issued.

use std::cell::RefCell;
use std::rc::Rc;

use crate::{
    ApiError, Credentials, Endpoint, Product, ProductDraft, Referral, ResourceApi, Role,
    SignupForm, User,
};

#[derive(Clone, Debug)]
struct Account {
    id: u64,
    username: String,
    email: String,
    password: String,
    role: Role,
    approved: bool,
    referral_code: String,
    referred_by: Option<u64>,
}

impl Account {
    fn to_user(&self) -> User {
        User {
            id: Some(self.id),
            username: self.username.clone(),
            email: Some(self.email.clone()),
            role: self.role,
            approved: self.approved,
        }
    }
}

#[derive(Debug)]
struct Inner {
    accounts: Vec<Account>,
    products: Vec<Product>,
    session: Option<u64>,
    calls: Vec<Endpoint>,
    offline: bool,
    origin: String,
}

/// In-memory [`ResourceApi`]. Clones share the same server state.
#[derive(Clone, Debug)]
pub struct MemoryApi {
    inner: Rc<RefCell<Inner>>,
}

impl Default for MemoryApi {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryApi {
    /// A server with only the seeded admin account.
    pub fn new() -> Self {
        let api = Self {
            inner: Rc::new(RefCell::new(Inner {
                accounts: Vec::new(),
                products: Vec::new(),
                session: None,
                calls: Vec::new(),
                offline: false,
                origin: "http://localhost:8080".to_string(),
            })),
        };
        api.add_account("admin", "admin@example.com", "adminpass", Role::Admin, true);
        api
    }

    /// Insert an account directly, bypassing signup. Returns its id.
    pub fn add_account(
        &self,
        username: &str,
        email: &str,
        password: &str,
        role: Role,
        approved: bool,
    ) -> u64 {
        let mut inner = self.inner.borrow_mut();
        let id = inner.accounts.len() as u64 + 1;
        inner.accounts.push(Account {
            id,
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            role,
            approved,
            referral_code: uuid::Uuid::new_v4().to_string(),
            referred_by: None,
        });
        id
    }

    /// Insert a product directly. Returns its id.
    pub fn add_product(&self, draft: ProductDraft) -> u64 {
        let mut inner = self.inner.borrow_mut();
        let id = inner.products.len() as u64 + 1;
        inner.products.push(draft.into_product(Some(id)));
        id
    }

    /// While offline every call fails with a transport error.
    pub fn set_offline(&self, offline: bool) {
        self.inner.borrow_mut().offline = offline;
    }

    /// Drop the server-side session, as if it expired.
    pub fn expire_session(&self) {
        self.inner.borrow_mut().session = None;
    }

    /// Endpoints called so far, in call order.
    pub fn calls(&self) -> Vec<Endpoint> {
        self.inner.borrow().calls.clone()
    }

    pub fn call_count(&self, endpoint: Endpoint) -> usize {
        self.inner
            .borrow()
            .calls
            .iter()
            .filter(|e| **e == endpoint)
            .count()
    }

    pub fn clear_calls(&self) {
        self.inner.borrow_mut().calls.clear();
    }

    /// Current server-side view of an account.
    pub fn account(&self, username: &str) -> Option<User> {
        self.inner
            .borrow()
            .accounts
            .iter()
            .find(|a| a.username == username)
            .map(Account::to_user)
    }

    /// Id of the account that referred `username`, if any.
    pub fn referred_by(&self, username: &str) -> Option<u64> {
        self.inner
            .borrow()
            .accounts
            .iter()
            .find(|a| a.username == username)
            .and_then(|a| a.referred_by)
    }

    /// Record the call and fail if offline.
    fn enter(&self, endpoint: Endpoint) -> Result<(), ApiError> {
        let mut inner = self.inner.borrow_mut();
        inner.calls.push(endpoint);
        if inner.offline {
            return Err(ApiError::Transport("server unreachable".to_string()));
        }
        Ok(())
    }

    /// Like `enter`, but also requires a logged-in session.
    fn enter_logged_in(&self, endpoint: Endpoint) -> Result<Account, ApiError> {
        self.enter(endpoint)?;
        let inner = self.inner.borrow();
        let id = inner.session.ok_or(ApiError::Unauthorized)?;
        inner
            .accounts
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or(ApiError::Unauthorized)
    }

    fn require_admin(account: &Account) -> Result<(), ApiError> {
        if account.role != Role::Admin {
            return Err(ApiError::Forbidden("Unauthorized".to_string()));
        }
        Ok(())
    }
}

impl ResourceApi for MemoryApi {
    async fn login(&self, credentials: &Credentials) -> Result<User, ApiError> {
        self.enter(Endpoint::Login)?;
        let mut inner = self.inner.borrow_mut();
        let account = inner
            .accounts
            .iter()
            .find(|a| a.username == credentials.username && a.password == credentials.password)
            .cloned()
            .ok_or(ApiError::Unauthorized)?;
        inner.session = Some(account.id);
        Ok(User {
            id: None,
            email: None,
            ..account.to_user()
        })
    }

    async fn signup(&self, form: &SignupForm) -> Result<(), ApiError> {
        self.enter(Endpoint::Signup)?;
        let referred_by = {
            let inner = self.inner.borrow();
            if inner
                .accounts
                .iter()
                .any(|a| a.username == form.username || a.email == form.email)
            {
                return Err(ApiError::Rejected {
                    status: 409,
                    message: "Username or email already taken".to_string(),
                });
            }
            form.referral_code.as_ref().and_then(|code| {
                inner
                    .accounts
                    .iter()
                    .find(|a| &a.referral_code == code)
                    .map(|a| a.id)
            })
        };
        let id = self.add_account(&form.username, &form.email, &form.password, Role::Regular, false);
        if let Some(account) = self
            .inner
            .borrow_mut()
            .accounts
            .iter_mut()
            .find(|a| a.id == id)
        {
            account.referred_by = referred_by;
        }
        Ok(())
    }

    async fn logout(&self) -> Result<(), ApiError> {
        self.enter_logged_in(Endpoint::Logout)?;
        self.inner.borrow_mut().session = None;
        Ok(())
    }

    async fn current_user(&self) -> Result<User, ApiError> {
        let account = self.enter_logged_in(Endpoint::CurrentUser)?;
        Ok(User {
            id: None,
            email: None,
            ..account.to_user()
        })
    }

    async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        self.enter_logged_in(Endpoint::ListProducts)?;
        Ok(self.inner.borrow().products.clone())
    }

    async fn create_product(&self, draft: &ProductDraft) -> Result<(), ApiError> {
        let account = self.enter_logged_in(Endpoint::CreateProduct)?;
        if !account.to_user().can_publish() {
            return Err(ApiError::Forbidden("Unauthorized".to_string()));
        }
        self.add_product(draft.clone());
        Ok(())
    }

    async fn referral(&self) -> Result<Referral, ApiError> {
        let account = self.enter_logged_in(Endpoint::Referral)?;
        let origin = self.inner.borrow().origin.clone();
        Ok(Referral {
            referral_link: format!("{}/signup?ref={}", origin, account.referral_code),
            referral_code: Some(account.referral_code),
        })
    }

    async fn request_creator(&self) -> Result<(), ApiError> {
        let account = self.enter_logged_in(Endpoint::RequestCreator)?;
        if account.role != Role::Regular {
            return Err(ApiError::Rejected {
                status: 400,
                message: "Already creator or admin".to_string(),
            });
        }
        let mut inner = self.inner.borrow_mut();
        if let Some(a) = inner.accounts.iter_mut().find(|a| a.id == account.id) {
            a.role = Role::Creator;
            a.approved = false;
        }
        Ok(())
    }

    async fn approve_creator(&self, user_id: u64) -> Result<(), ApiError> {
        let account = self.enter_logged_in(Endpoint::ApproveCreator(user_id))?;
        Self::require_admin(&account)?;
        let mut inner = self.inner.borrow_mut();
        let target = inner
            .accounts
            .iter_mut()
            .find(|a| a.id == user_id)
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;
        target.approved = true;
        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        let account = self.enter_logged_in(Endpoint::ListUsers)?;
        Self::require_admin(&account)?;
        Ok(self
            .inner
            .borrow()
            .accounts
            .iter()
            .map(|a| User {
                email: None,
                ..a.to_user()
            })
            .collect())
    }
}
