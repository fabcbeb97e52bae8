//! # Store crate — client-side state synchronization
//!
//! Keeps the UI-visible state (session identity and role, product catalog, admin
//! user list, referral link) consistent with the remote Resource API across
//! asynchronous request/response cycles. No UI framework is involved: the UI
//! registers a watcher with [`SessionController::watch`] and re-reads state when it
//! fires.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`session`] | [`SessionController`] and the [`Session`] state machine |
//! | [`resources`] | [`ResourceStore`]: catalog, admin list, referral link, product draft |
//! | [`access`] | Named authorization preconditions |
//! | [`state`] | Single-writer [`State`] containers and their [`Notifier`] |
//! | [`notices`] | User-visible notice log |
//! | [`dialog`] | Which modal affordance is open |

pub mod access;
pub mod dialog;
pub mod notices;
pub mod resources;
pub mod session;
pub mod state;

#[cfg(test)]
mod testing;

pub use access::Denied;
pub use dialog::{Dialog, Dialogs};
pub use notices::{Notice, NoticeLevel, Notices};
pub use resources::ResourceStore;
pub use session::{AuthState, Session, SessionController};
pub use state::{Notifier, Reader, State};
