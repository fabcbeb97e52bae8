//! Authorization preconditions checked before privileged requests.

use api::User;
use thiserror::Error;

use crate::session::Session;

/// Why a precondition refused an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Denied {
    #[error("you need to be logged in")]
    NotAuthenticated,
    #[error("admin role required")]
    NotAdmin,
    #[error("only approved creators can add products")]
    NotPublisher,
}

pub fn require_authenticated(session: &Session) -> Result<&User, Denied> {
    session.user().ok_or(Denied::NotAuthenticated)
}

pub fn require_admin(session: &Session) -> Result<&User, Denied> {
    let user = require_authenticated(session)?;
    if !user.is_admin() {
        return Err(Denied::NotAdmin);
    }
    Ok(user)
}

pub fn require_publisher(session: &Session) -> Result<&User, Denied> {
    let user = require_authenticated(session)?;
    if !user.can_publish() {
        return Err(Denied::NotPublisher);
    }
    Ok(user)
}
