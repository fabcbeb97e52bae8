//! The Resource API endpoint table.

use reqwest::Method;

/// One Resource API operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Login,
    Signup,
    Logout,
    CurrentUser,
    ListProducts,
    CreateProduct,
    Referral,
    RequestCreator,
    ApproveCreator(u64),
    ListUsers,
}

impl Endpoint {
    pub fn method(&self) -> Method {
        match self {
            Endpoint::Logout
            | Endpoint::CurrentUser
            | Endpoint::ListProducts
            | Endpoint::Referral
            | Endpoint::ListUsers => Method::GET,
            Endpoint::Login
            | Endpoint::Signup
            | Endpoint::CreateProduct
            | Endpoint::RequestCreator
            | Endpoint::ApproveCreator(_) => Method::POST,
        }
    }

    /// Path relative to the API base, without a leading slash.
    pub fn path(&self) -> String {
        match self {
            Endpoint::Login => "login".to_string(),
            Endpoint::Signup => "signup".to_string(),
            Endpoint::Logout => "logout".to_string(),
            Endpoint::CurrentUser => "user".to_string(),
            Endpoint::ListProducts | Endpoint::CreateProduct => "products".to_string(),
            Endpoint::Referral => "referral".to_string(),
            Endpoint::RequestCreator => "request_creator".to_string(),
            Endpoint::ApproveCreator(id) => format!("admin/approve_creator/{id}"),
            Endpoint::ListUsers => "admin/users".to_string(),
        }
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} /{}", self.method(), self.path())
    }
}
