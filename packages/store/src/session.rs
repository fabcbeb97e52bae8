//! # Session controller
//!
//! Owns the [`Session`] (authentication state and the current [`User`]) and gates
//! what the [`ResourceStore`] fetches. Each action is a linear sequence of
//! suspension points: issue the Resource API call, then run the named continuation
//! for its outcome.
//!
//! | Action | On success | On failure |
//! |--------|-----------|------------|
//! | [`login`](SessionController::login) | Authenticated, close login dialog, fetch catalog and admin list | Failed, "Login failed" notice |
//! | [`signup`](SessionController::signup) | close signup dialog, ask the user to log in | "Signup failed" notice |
//! | [`logout`](SessionController::logout) | Anonymous, resources cleared | same (outcome is only logged) |
//! | [`probe_identity`](SessionController::probe_identity) | Authenticated, fetch admin list | Anonymous, silently |
//! | [`request_creator_upgrade`](SessionController::request_creator_upgrade) | "Request sent", re-probe | notice, re-probe |
//!
//! There is no cancellation. Within one session a response that arrives after a
//! later action still applies; every write replaces state wholesale, so the last
//! response to arrive wins. A response requested under an earlier session
//! [generation](Session::generation) is dropped.

use std::rc::Rc;

use api::{Credentials, ResourceApi, Role, SignupForm, User};

use crate::access::require_authenticated;
use crate::dialog::{Dialog, Dialogs};
use crate::notices::Notices;
use crate::resources::ResourceStore;
use crate::state::{Notifier, State};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthState {
    Anonymous,
    Authenticating,
    Authenticated,
    /// The last login attempt was rejected. Logged out.
    Failed,
}

impl AuthState {
    /// Whether a login attempt may start from this state.
    pub fn accepts_login(self) -> bool {
        matches!(self, AuthState::Anonymous | AuthState::Failed)
    }
}

/// Authentication state plus the identity it belongs to.
///
/// `Authenticated` holds exactly when a user is present; the constructors below
/// are the only way to build a session, which keeps that true.
///
/// `generation` changes whenever the identity changes or the session is ended.
/// A response is applied only if the generation it was requested under is
/// still current.
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    auth: AuthState,
    user: Option<User>,
    ready: bool,
    generation: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            auth: AuthState::Anonymous,
            user: None,
            ready: false,
            generation: 0,
        }
    }
}

impl Session {
    pub fn auth_state(&self) -> AuthState {
        self.auth
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|u| u.role)
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth == AuthState::Authenticated
    }

    /// The startup probe has finished; sections may render.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn next_generation(&self, user: Option<&User>) -> u64 {
        let same = self.user.as_ref().map(|u| &u.username) == user.map(|u| &u.username);
        if same {
            self.generation
        } else {
            self.generation + 1
        }
    }

    pub(crate) fn anonymous(&self) -> Self {
        Self {
            auth: AuthState::Anonymous,
            user: None,
            ready: self.ready,
            generation: self.next_generation(None),
        }
    }

    pub(crate) fn authenticating(&self) -> Self {
        Self {
            auth: AuthState::Authenticating,
            user: None,
            ready: self.ready,
            generation: self.next_generation(None),
        }
    }

    pub(crate) fn authenticated(&self, user: User) -> Self {
        Self {
            generation: self.next_generation(Some(&user)),
            auth: AuthState::Authenticated,
            user: Some(user),
            ready: self.ready,
        }
    }

    pub(crate) fn failed(&self) -> Self {
        Self {
            auth: AuthState::Failed,
            user: None,
            ready: self.ready,
            generation: self.next_generation(None),
        }
    }

    /// Logged out. Always starts a new generation, even from Anonymous, so
    /// a login still in flight is dropped as well.
    pub(crate) fn ended(&self) -> Self {
        Self {
            auth: AuthState::Anonymous,
            user: None,
            ready: self.ready,
            generation: self.generation + 1,
        }
    }

    pub(crate) fn into_ready(self) -> Self {
        Self {
            ready: true,
            ..self
        }
    }
}

/// Entry point of the request domain. Cloning shares all state.
pub struct SessionController<A> {
    api: Rc<A>,
    session: State<Session>,
    resources: ResourceStore<A>,
    dialogs: Dialogs,
    notices: Notices,
    notifier: Notifier,
}

impl<A> Clone for SessionController<A> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            session: self.session.clone(),
            resources: self.resources.clone(),
            dialogs: self.dialogs.clone(),
            notices: self.notices.clone(),
            notifier: self.notifier.clone(),
        }
    }
}

impl<A: ResourceApi> SessionController<A> {
    pub fn new(api: A) -> Self {
        let notifier = Notifier::new();
        let api = Rc::new(api);
        let session = State::new(Session::default(), &notifier);
        let dialogs = Dialogs::new(&notifier);
        let notices = Notices::new(&notifier);
        let resources = ResourceStore::new(
            api.clone(),
            session.reader(),
            dialogs.clone(),
            notices.clone(),
            &notifier,
        );

        Self {
            api,
            session,
            resources,
            dialogs,
            notices,
            notifier,
        }
    }

    /// Register a callback run after every state change.
    pub fn watch(&self, watcher: impl Fn() + 'static) {
        self.notifier.watch(watcher);
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn session(&self) -> Session {
        self.session.get()
    }

    pub fn resources(&self) -> &ResourceStore<A> {
        &self.resources
    }

    pub fn dialogs(&self) -> &Dialogs {
        &self.dialogs
    }

    pub fn notices(&self) -> &Notices {
        &self.notices
    }

    /// Page-load sequence: probe the identity, load the catalog for a known user,
    /// then mark the session ready.
    pub async fn start(&self) {
        if self.probe_identity().await {
            self.resources.fetch_catalog().await;
        }
        self.session.replace(self.session.get().into_ready());
    }

    pub async fn login(&self, credentials: Credentials) {
        let current = self.session.with(Session::auth_state);
        if !current.accepts_login() {
            tracing::warn!("Ignoring login for {} while {:?}", credentials.username, current);
            return;
        }

        self.session.replace(self.session.with(Session::authenticating));
        let generation = self.generation();
        let outcome = self.api.login(&credentials).await;
        if self.generation() != generation {
            tracing::debug!("Dropping login response for {}: session changed", credentials.username);
            return;
        }
        match outcome {
            Ok(user) => self.on_logged_in(user).await,
            Err(e) => self.on_login_failed(&credentials.username, e),
        }
    }

    fn generation(&self) -> u64 {
        self.session.with(Session::generation)
    }

    async fn on_logged_in(&self, user: User) {
        tracing::info!("Logged in as {} ({})", user.username, user.role.label());
        self.session.replace(self.session.with(|s| s.authenticated(user)));
        self.dialogs.close_if(Dialog::Login);
        self.resources.fetch_catalog().await;
        self.resources.fetch_admin_users().await;
    }

    fn on_login_failed(&self, username: &str, e: api::ApiError) {
        tracing::info!("Login for {} failed: {}", username, e);
        self.session.replace(self.session.with(Session::failed));
        self.notices.error("Login failed");
    }

    /// Create an account. Never logs in; the user is asked to log in separately.
    pub async fn signup(&self, form: SignupForm) {
        match self.api.signup(&form).await {
            Ok(()) => {
                tracing::info!("Signed up {}", form.username);
                self.dialogs.close_if(Dialog::Signup);
                self.notices.success("Signup successful, please log in");
            }
            Err(e) => {
                tracing::info!("Signup for {} failed: {}", form.username, e);
                self.notices.error("Signup failed");
            }
        }
    }

    /// End the session. The local reset happens whatever the server answers.
    pub async fn logout(&self) {
        if let Err(e) = self.api.logout().await {
            tracing::warn!("Logout request failed: {}", e);
        }
        self.reset();
        tracing::info!("Logged out");
    }

    /// Ask the server who we are. Returns whether a session is active.
    ///
    /// A failure is the expected answer for first-time visitors and is not
    /// surfaced to the user.
    pub async fn probe_identity(&self) -> bool {
        let generation = self.generation();
        let outcome = self.api.current_user().await;
        if self.generation() != generation {
            tracing::debug!("Dropping identity response: session changed");
            return self.session.with(Session::is_authenticated);
        }
        match outcome {
            Ok(user) => {
                tracing::info!("Session active for {}", user.username);
                self.session.replace(self.session.with(|s| s.authenticated(user)));
                self.resources.fetch_admin_users().await;
                true
            }
            Err(e) => {
                tracing::debug!("No active session: {}", e);
                if self.session.with(Session::is_authenticated) {
                    self.reset();
                } else {
                    self.session.replace(self.session.with(Session::anonymous));
                }
                false
            }
        }
    }

    /// Flag the account for creator review, then refresh the identity so the
    /// pending flag and role reflect the server.
    pub async fn request_creator_upgrade(&self) {
        if let Err(denied) = self.session.with(|s| require_authenticated(s).map(|_| ())) {
            tracing::warn!("Creator request skipped: {}", denied);
            return;
        }

        match self.api.request_creator().await {
            Ok(()) => self.notices.success("Request sent"),
            Err(e) => {
                tracing::warn!("Creator request failed: {}", e);
                self.notices
                    .error(format!("Creator request failed: {}", e.user_message()));
            }
        }
        self.probe_identity().await;
    }

    /// Drop everything tied to the previous session.
    fn reset(&self) {
        self.session.replace(self.session.with(Session::ended));
        self.resources.clear();
        self.dialogs.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notices::NoticeLevel;
    use crate::testing::GatedApi;
    use api::{ApiError, Endpoint, MemoryApi, ProductDraft};
    use tokio::sync::oneshot;

    fn admin_credentials() -> Credentials {
        Credentials::new("admin", "adminpass")
    }

    fn seeded_api() -> MemoryApi {
        let api = MemoryApi::new();
        api.add_product(ProductDraft {
            name: "Userbot".to_string(),
            description: "Automates a chat account".to_string(),
            price: 25.0,
            r#type: "userbot".to_string(),
            demo_url: String::new(),
        });
        api
    }

    #[tokio::test]
    async fn test_login_with_valid_credentials() {
        let controller = SessionController::new(seeded_api());
        controller.dialogs().open(Dialog::Login);

        controller.login(admin_credentials()).await;

        let session = controller.session();
        assert_eq!(session.auth_state(), AuthState::Authenticated);
        assert_eq!(
            session.user(),
            Some(&User {
                username: "admin".to_string(),
                role: Role::Admin,
                approved: true,
                ..Default::default()
            })
        );
        assert_eq!(controller.dialogs().current(), None);
        assert_eq!(controller.resources().catalog().len(), 1);
        assert_eq!(controller.resources().admin_users().len(), 1);
        assert_eq!(
            controller.api().calls(),
            vec![Endpoint::Login, Endpoint::ListProducts, Endpoint::ListUsers]
        );
    }

    #[tokio::test]
    async fn test_login_with_invalid_credentials() {
        let controller = SessionController::new(seeded_api());
        controller.dialogs().open(Dialog::Login);

        controller
            .login(Credentials::new("admin", "not-the-password"))
            .await;

        let session = controller.session();
        assert_eq!(session.auth_state(), AuthState::Failed);
        assert!(session.user().is_none());
        assert!(controller.resources().catalog().is_empty());
        assert_eq!(controller.dialogs().current(), Some(Dialog::Login));

        let notice = controller.notices().last().unwrap();
        assert_eq!(notice.level, NoticeLevel::Error);
        assert_eq!(notice.message, "Login failed");
        assert_eq!(controller.api().calls(), vec![Endpoint::Login]);

        // A failed attempt may be retried.
        controller.login(admin_credentials()).await;
        assert!(controller.session().is_authenticated());
    }

    #[tokio::test]
    async fn test_login_ignored_while_authenticated() {
        let controller = SessionController::new(seeded_api());
        controller.login(admin_credentials()).await;
        controller.api().clear_calls();

        controller.login(admin_credentials()).await;
        assert!(controller.api().calls().is_empty());
        assert!(controller.session().is_authenticated());
    }

    #[tokio::test]
    async fn test_login_ignored_while_authenticating() {
        let controller = SessionController::new(GatedApi::default());
        let (tx, rx) = oneshot::channel();
        controller.api().gate_login(rx);

        let mut first = Box::pin(controller.login(Credentials::new("maker", "pw")));
        assert!(futures::poll!(first.as_mut()).is_pending());
        assert_eq!(controller.session().auth_state(), AuthState::Authenticating);

        controller.login(Credentials::new("admin", "adminpass")).await;
        assert_eq!(controller.api().login_calls(), 1);
        assert_eq!(controller.session().auth_state(), AuthState::Authenticating);

        let _ = tx.send(());
        first.await;
        let session = controller.session();
        assert_eq!(session.user().map(|u| u.username.as_str()), Some("maker"));
    }

    #[tokio::test]
    async fn test_login_answer_after_logout_is_dropped() {
        let controller = SessionController::new(GatedApi::default());
        let (tx, rx) = oneshot::channel();
        controller.api().gate_login(rx);

        let mut login = Box::pin(controller.login(Credentials::new("maker", "pw")));
        assert!(futures::poll!(login.as_mut()).is_pending());
        controller.logout().await;

        let _ = tx.send(());
        login.await;
        assert_eq!(controller.session().auth_state(), AuthState::Anonymous);
    }

    #[test]
    fn test_generation_follows_identity() {
        let maker = User {
            username: "maker".to_string(),
            ..Default::default()
        };
        let start = Session::default();
        let pending = start.authenticating();
        assert_eq!(pending.generation(), start.generation());

        let signed_in = pending.authenticated(maker.clone());
        assert_ne!(signed_in.generation(), start.generation());
        // A refreshed identity for the same user keeps the generation.
        let refreshed = signed_in.authenticated(maker);
        assert_eq!(refreshed.generation(), signed_in.generation());

        let ended = refreshed.ended();
        assert_ne!(ended.generation(), refreshed.generation());
        assert_ne!(ended.ended().generation(), ended.generation());
    }

    #[tokio::test]
    async fn test_logout_clears_state_even_when_request_fails() {
        let controller = SessionController::new(seeded_api());
        controller.login(admin_credentials()).await;
        controller.resources().fetch_referral_link().await;
        assert!(!controller.resources().admin_users().is_empty());

        controller.api().set_offline(true);
        controller.logout().await;

        let session = controller.session();
        assert_eq!(session.auth_state(), AuthState::Anonymous);
        assert!(session.user().is_none());
        assert!(controller.resources().admin_users().is_empty());
        assert!(controller.resources().catalog().is_empty());
        assert!(controller.resources().referral_link().is_none());
        assert_eq!(controller.api().call_count(Endpoint::Logout), 1);
    }

    #[tokio::test]
    async fn test_startup_without_session_fetches_nothing() {
        let controller = SessionController::new(seeded_api());

        controller.start().await;

        let session = controller.session();
        assert_eq!(session.auth_state(), AuthState::Anonymous);
        assert!(session.is_ready());
        assert!(controller.notices().entries().is_empty());
        assert_eq!(controller.api().calls(), vec![Endpoint::CurrentUser]);
    }

    #[tokio::test]
    async fn test_startup_with_admin_session_loads_sections_before_ready() {
        let api = seeded_api();
        api.login(&admin_credentials()).await.unwrap();
        api.clear_calls();

        let controller = SessionController::new(api);
        let ready_seen_with_data = Rc::new(std::cell::Cell::new(false));
        {
            let controller_view = controller.clone();
            let flag = ready_seen_with_data.clone();
            controller.watch(move || {
                let session = controller_view.session();
                if session.is_ready() && !flag.get() {
                    let resources = controller_view.resources();
                    flag.set(!resources.catalog().is_empty() && !resources.admin_users().is_empty());
                }
            });
        }

        controller.start().await;

        assert!(controller.session().is_authenticated());
        assert!(ready_seen_with_data.get());
        let calls = controller.api().calls();
        assert_eq!(calls[0], Endpoint::CurrentUser);
        assert!(calls.contains(&Endpoint::ListProducts));
        assert!(calls.contains(&Endpoint::ListUsers));
    }

    #[tokio::test]
    async fn test_signup_never_authenticates() {
        let controller = SessionController::new(seeded_api());
        controller.dialogs().open(Dialog::Signup);

        controller
            .signup(SignupForm::new("newbie", "newbie@example.com", "pw", None))
            .await;

        assert_eq!(controller.session().auth_state(), AuthState::Anonymous);
        assert_eq!(controller.dialogs().current(), None);
        let notice = controller.notices().last().unwrap();
        assert_eq!(notice.level, NoticeLevel::Success);
        assert_eq!(controller.api().calls(), vec![Endpoint::Signup]);

        // The same username again is rejected and the dialog stays open.
        controller.dialogs().open(Dialog::Signup);
        controller
            .signup(SignupForm::new("newbie", "other@example.com", "pw", None))
            .await;
        assert_eq!(controller.notices().last().unwrap().message, "Signup failed");
        assert_eq!(controller.dialogs().current(), Some(Dialog::Signup));
    }

    #[tokio::test]
    async fn test_creator_request_refreshes_identity() {
        let api = seeded_api();
        api.add_account("maker", "maker@example.com", "pw", Role::Regular, false);
        let controller = SessionController::new(api);
        controller.login(Credentials::new("maker", "pw")).await;
        assert!(controller.session().user().unwrap().can_request_creator());

        controller.request_creator_upgrade().await;

        let user = controller.session().user().cloned().unwrap();
        assert!(user.creator_request_pending());
        assert_eq!(controller.notices().last().unwrap().message, "Request sent");

        // A repeated request is rejected by the server; the identity is still refreshed.
        controller.api().clear_calls();
        controller.request_creator_upgrade().await;
        assert_eq!(
            controller.notices().last().unwrap().level,
            NoticeLevel::Error
        );
        assert_eq!(
            controller.api().calls(),
            vec![Endpoint::RequestCreator, Endpoint::CurrentUser]
        );
    }

    #[tokio::test]
    async fn test_creator_request_requires_session() {
        let controller = SessionController::new(seeded_api());
        controller.request_creator_upgrade().await;
        assert!(controller.api().calls().is_empty());
    }

    #[tokio::test]
    async fn test_expired_session_on_reprobe_clears_resources() {
        let controller = SessionController::new(seeded_api());
        controller.login(admin_credentials()).await;
        assert!(!controller.resources().catalog().is_empty());

        controller.api().expire_session();
        assert!(!controller.probe_identity().await);

        assert_eq!(controller.session().auth_state(), AuthState::Anonymous);
        assert!(controller.resources().catalog().is_empty());
        assert!(controller.resources().admin_users().is_empty());
        assert_eq!(
            controller.api().current_user().await,
            Err(ApiError::Unauthorized)
        );
    }
}
