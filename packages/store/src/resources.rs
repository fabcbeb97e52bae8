//! # Resource store
//!
//! Owns the product catalog, the admin user list, the referral link and the
//! product draft. Every fetch replaces its container wholesale on completion;
//! nothing is patched locally ahead of the server.
//!
//! A response is applied only while the session that requested it is still
//! current. Once the session ends or changes hands, late responses are dropped.
//!
//! Privileged calls run only after their precondition from [`crate::access`]
//! passes. A non-admin asking for the user list is skipped silently; everything
//! else that is refused or fails surfaces a notice.

use std::rc::Rc;

use api::{Product, ProductDraft, ResourceApi, User};

use crate::access::{require_admin, require_publisher, Denied};
use crate::dialog::{Dialog, Dialogs};
use crate::notices::Notices;
use crate::session::Session;
use crate::state::{Notifier, Reader, State};

pub struct ResourceStore<A> {
    api: Rc<A>,
    session: Reader<Session>,
    catalog: State<Vec<Product>>,
    admin_users: State<Vec<User>>,
    referral_link: State<Option<String>>,
    draft: State<ProductDraft>,
    dialogs: Dialogs,
    notices: Notices,
}

impl<A> Clone for ResourceStore<A> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            session: self.session.clone(),
            catalog: self.catalog.clone(),
            admin_users: self.admin_users.clone(),
            referral_link: self.referral_link.clone(),
            draft: self.draft.clone(),
            dialogs: self.dialogs.clone(),
            notices: self.notices.clone(),
        }
    }
}

impl<A: ResourceApi> ResourceStore<A> {
    pub(crate) fn new(
        api: Rc<A>,
        session: Reader<Session>,
        dialogs: Dialogs,
        notices: Notices,
        notifier: &Notifier,
    ) -> Self {
        Self {
            api,
            session,
            catalog: State::new(Vec::new(), notifier),
            admin_users: State::new(Vec::new(), notifier),
            referral_link: State::new(None, notifier),
            draft: State::new(ProductDraft::default(), notifier),
            dialogs,
            notices,
        }
    }

    /// Products in server order.
    pub fn catalog(&self) -> Vec<Product> {
        self.catalog.get()
    }

    pub fn admin_users(&self) -> Vec<User> {
        self.admin_users.get()
    }

    pub fn referral_link(&self) -> Option<String> {
        self.referral_link.get()
    }

    pub fn draft(&self) -> ProductDraft {
        self.draft.get()
    }

    /// Form binding for the product draft.
    pub fn set_draft(&self, draft: ProductDraft) {
        self.draft.replace(draft);
    }

    fn check(&self, rule: fn(&Session) -> Result<&User, Denied>) -> Result<(), Denied> {
        self.session.with(|s| rule(s).map(|_| ()))
    }

    fn generation(&self) -> u64 {
        self.session.with(Session::generation)
    }

    /// Whether a response requested under `generation` may still be applied.
    fn is_current(&self, generation: u64, what: &str) -> bool {
        let current = self.generation();
        if current != generation {
            tracing::debug!("Dropping {} from session {} (now {})", what, generation, current);
        }
        current == generation
    }

    pub async fn fetch_catalog(&self) {
        let generation = self.generation();
        let outcome = self.api.list_products().await;
        if !self.is_current(generation, "product list") {
            return;
        }
        match outcome {
            Ok(products) => {
                tracing::debug!("Catalog has {} products", products.len());
                self.catalog.replace(products);
            }
            Err(e) => {
                tracing::warn!("Failed to load products: {}", e);
                self.notices
                    .error(format!("Could not load products: {}", e.user_message()));
            }
        }
    }

    /// Submit `draft`, reset the stored draft, then resynchronize the catalog.
    ///
    /// The draft resets as soon as the server accepts the product, before the
    /// catalog refresh completes. A rejected submission keeps the draft.
    pub async fn add_product(&self, draft: ProductDraft) {
        if let Err(denied) = self.check(require_publisher) {
            tracing::warn!("Add product refused: {}", denied);
            self.notices.warning(denied.to_string());
            return;
        }
        if let Err(invalid) = draft.validate() {
            self.notices.warning(invalid.to_string());
            return;
        }

        let generation = self.generation();
        match self.api.create_product(&draft).await {
            Ok(()) => {
                tracing::info!("Added product {}", draft.name);
                if !self.is_current(generation, "product confirmation") {
                    return;
                }
                self.draft.replace(ProductDraft::default());
                self.fetch_catalog().await;
            }
            Err(e) => {
                tracing::warn!("Failed to add product {}: {}", draft.name, e);
                self.notices
                    .error(format!("Could not add product: {}", e.user_message()));
            }
        }
    }

    /// Load the caller's referral link. Touches nothing but the link.
    pub async fn fetch_referral_link(&self) -> Option<String> {
        let generation = self.generation();
        let outcome = self.api.referral().await;
        if !self.is_current(generation, "referral link") {
            return None;
        }
        match outcome {
            Ok(referral) => {
                self.referral_link
                    .replace(Some(referral.referral_link.clone()));
                Some(referral.referral_link)
            }
            Err(e) => {
                tracing::warn!("Failed to load referral link: {}", e);
                self.notices.error(format!(
                    "Could not load your referral link: {}",
                    e.user_message()
                ));
                None
            }
        }
    }

    /// Load the referral link and open its dialog.
    pub async fn show_referral(&self) {
        if self.fetch_referral_link().await.is_some() {
            self.dialogs.open(Dialog::Referral);
        }
    }

    /// Refresh the admin user list. A no-op unless the session is an admin's.
    pub async fn fetch_admin_users(&self) {
        if let Err(denied) = self.check(require_admin) {
            tracing::debug!("Skipping admin user list: {}", denied);
            return;
        }

        let generation = self.generation();
        let outcome = self.api.list_users().await;
        if !self.is_current(generation, "user list") {
            return;
        }
        match outcome {
            Ok(users) => self.admin_users.replace(users),
            Err(e) => {
                tracing::warn!("Failed to load users: {}", e);
                self.notices
                    .error(format!("Could not load users: {}", e.user_message()));
            }
        }
    }

    /// Approve a creator request, then refresh the admin list from the server.
    pub async fn approve_creator(&self, user_id: u64) {
        if let Err(denied) = self.check(require_admin) {
            tracing::warn!("Approval of user {} skipped: {}", user_id, denied);
            return;
        }

        match self.api.approve_creator(user_id).await {
            Ok(()) => {
                tracing::info!("Approved creator {}", user_id);
                self.fetch_admin_users().await;
            }
            Err(e) => {
                tracing::warn!("Failed to approve user {}: {}", user_id, e);
                self.notices
                    .error(format!("Could not approve creator: {}", e.user_message()));
            }
        }
    }

    /// Forget everything loaded for the previous session.
    pub(crate) fn clear(&self) {
        self.catalog.replace(Vec::new());
        self.admin_users.replace(Vec::new());
        self.referral_link.replace(None);
        self.draft.replace(ProductDraft::default());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use api::{Credentials, Endpoint, MemoryApi, Role};
    use tokio::sync::oneshot;

    use crate::notices::NoticeLevel;
    use crate::testing::GatedApi;
    use crate::{AuthState, SessionController};

    fn draft(name: &str) -> ProductDraft {
        ProductDraft {
            name: name.to_string(),
            description: format!("{name} description"),
            price: 12.5,
            r#type: "bot".to_string(),
            demo_url: "https://demo.example".to_string(),
        }
    }

    fn names(products: &[Product]) -> Vec<String> {
        products.iter().map(|p| p.name.clone()).collect()
    }

    async fn logged_in(username: &str, role: Role, approved: bool) -> SessionController<MemoryApi> {
        let api = MemoryApi::new();
        if username != "admin" {
            api.add_account(username, &format!("{username}@example.com"), "pw", role, approved);
        }
        let password = if username == "admin" { "adminpass" } else { "pw" };
        let controller = SessionController::new(api);
        controller
            .login(Credentials::new(username, password))
            .await;
        controller.api().clear_calls();
        controller
    }

    #[tokio::test]
    async fn test_admin_list_is_noop_for_non_admins() {
        let controller = logged_in("maker", Role::Creator, true).await;

        controller.resources().fetch_admin_users().await;

        assert!(controller.resources().admin_users().is_empty());
        assert_eq!(controller.api().call_count(Endpoint::ListUsers), 0);
        assert!(controller.notices().entries().is_empty());

        let anonymous = SessionController::new(MemoryApi::new());
        anonymous.resources().fetch_admin_users().await;
        assert!(anonymous.api().calls().is_empty());
    }

    #[tokio::test]
    async fn test_add_product_lands_once_and_resets_draft() {
        let controller = logged_in("maker", Role::Creator, true).await;
        let resources = controller.resources();
        resources.set_draft(draft("Portfolio site"));

        resources.add_product(resources.draft()).await;

        assert_eq!(names(&resources.catalog()), vec!["Portfolio site"]);
        assert_eq!(resources.draft(), ProductDraft::default());
        assert_eq!(
            controller.api().calls(),
            vec![Endpoint::CreateProduct, Endpoint::ListProducts]
        );

        // Each add triggers its own refresh.
        resources.add_product(draft("Chat bot")).await;
        assert_eq!(
            names(&resources.catalog()),
            vec!["Portfolio site", "Chat bot"]
        );
        assert_eq!(controller.api().call_count(Endpoint::ListProducts), 2);
    }

    #[tokio::test]
    async fn test_add_product_refused_for_pending_creator() {
        let controller = logged_in("maker", Role::Creator, false).await;
        let resources = controller.resources();
        resources.set_draft(draft("Bot"));

        resources.add_product(resources.draft()).await;

        assert_eq!(controller.api().call_count(Endpoint::CreateProduct), 0);
        assert_eq!(resources.draft().name, "Bot");
        let notice = controller.notices().last().unwrap();
        assert_eq!(notice.level, NoticeLevel::Warning);
        assert_eq!(notice.message, Denied::NotPublisher.to_string());
    }

    #[tokio::test]
    async fn test_invalid_draft_is_not_submitted() {
        let controller = logged_in("maker", Role::Creator, true).await;
        let mut bad = draft("Bot");
        bad.price = -3.0;

        controller.resources().add_product(bad).await;

        assert!(controller.api().calls().is_empty());
        assert_eq!(
            controller.notices().last().unwrap().level,
            NoticeLevel::Warning
        );
    }

    #[tokio::test]
    async fn test_failed_submission_keeps_draft() {
        let controller = logged_in("maker", Role::Creator, true).await;
        let resources = controller.resources();
        resources.set_draft(draft("Bot"));
        controller.api().set_offline(true);

        resources.add_product(resources.draft()).await;

        assert_eq!(resources.draft().name, "Bot");
        assert_eq!(controller.api().call_count(Endpoint::ListProducts), 0);
        assert_eq!(
            controller.notices().last().unwrap().level,
            NoticeLevel::Error
        );
    }

    #[tokio::test]
    async fn test_approve_creator_refreshes_admin_list() {
        let api = MemoryApi::new();
        let maker = api.add_account("maker", "maker@example.com", "pw", Role::Creator, false);
        let controller = SessionController::new(api);
        controller
            .login(Credentials::new("admin", "adminpass"))
            .await;
        let pending = |c: &SessionController<MemoryApi>| {
            c.resources()
                .admin_users()
                .iter()
                .find(|u| u.id == Some(maker))
                .map(User::creator_request_pending)
        };
        assert_eq!(pending(&controller), Some(true));

        controller.api().clear_calls();
        controller.resources().approve_creator(maker).await;

        assert_eq!(pending(&controller), Some(false));
        assert_eq!(
            controller.api().calls(),
            vec![Endpoint::ApproveCreator(maker), Endpoint::ListUsers]
        );
    }

    #[tokio::test]
    async fn test_failed_approval_surfaces_notice_without_refresh() {
        let controller = logged_in("admin", Role::Admin, true).await;

        controller.resources().approve_creator(42).await;

        assert_eq!(controller.api().calls(), vec![Endpoint::ApproveCreator(42)]);
        assert_eq!(
            controller.notices().last().unwrap().level,
            NoticeLevel::Error
        );
    }

    #[tokio::test]
    async fn test_show_referral_only_touches_link_and_dialog() {
        let controller = logged_in("maker", Role::Regular, false).await;
        let before = controller.resources().catalog();

        controller.resources().show_referral().await;

        let link = controller.resources().referral_link().unwrap();
        assert!(link.contains("/signup?ref="));
        assert_eq!(controller.dialogs().current(), Some(Dialog::Referral));
        assert_eq!(controller.resources().catalog(), before);
        assert_eq!(controller.api().calls(), vec![Endpoint::Referral]);
    }

    #[tokio::test]
    async fn test_fetch_failures_surface_notices() {
        let controller = logged_in("admin", Role::Admin, true).await;
        let catalog = controller.resources().catalog();
        controller.api().set_offline(true);

        controller.resources().fetch_catalog().await;
        controller.resources().show_referral().await;

        assert_eq!(controller.resources().catalog(), catalog);
        assert_eq!(controller.dialogs().current(), None);
        let errors = controller
            .notices()
            .entries()
            .iter()
            .filter(|n| n.level == NoticeLevel::Error)
            .count();
        assert_eq!(errors, 2);
    }

    fn listed(name: &str) -> Vec<Product> {
        vec![draft(name).into_product(Some(1))]
    }

    #[tokio::test]
    async fn test_last_response_to_arrive_wins() {
        let controller = SessionController::new(GatedApi::default());
        controller.login(Credentials::new("maker", "pw")).await;
        let resources = controller.resources();

        let (tx_first, rx_first) = oneshot::channel();
        let (tx_second, rx_second) = oneshot::channel();
        controller.api().gate_products(rx_first);
        controller.api().gate_products(rx_second);

        // Issue the first fetch and leave it in flight.
        let mut first = Box::pin(resources.fetch_catalog());
        assert!(futures::poll!(first.as_mut()).is_pending());

        // The second fetch is issued later and answered first.
        let _ = tx_second.send(listed("second"));
        resources.fetch_catalog().await;
        assert_eq!(names(&resources.catalog()), vec!["second"]);

        // The stale response arrives last and replaces it.
        let _ = tx_first.send(listed("first"));
        first.await;
        assert_eq!(names(&resources.catalog()), vec!["first"]);
    }

    #[tokio::test]
    async fn test_draft_resets_before_catalog_refresh_completes() {
        let controller = SessionController::new(GatedApi::default());
        controller.login(Credentials::new("maker", "pw")).await;
        let resources = controller.resources();
        let (tx, rx) = oneshot::channel();
        controller.api().gate_products(rx);
        resources.set_draft(draft("Landing page"));

        let mut add = Box::pin(resources.add_product(resources.draft()));
        assert!(futures::poll!(add.as_mut()).is_pending());
        assert_eq!(resources.draft(), ProductDraft::default());
        assert!(resources.catalog().is_empty());

        let _ = tx.send(listed("Landing page"));
        add.await;
        assert_eq!(names(&resources.catalog()), vec!["Landing page"]);
    }

    #[tokio::test]
    async fn test_user_list_after_logout_is_dropped() {
        let controller = SessionController::new(GatedApi::default());
        let (tx, rx) = oneshot::channel();
        controller.api().gate_users(rx);

        // Login completes and leaves the admin list request in flight.
        let mut login = Box::pin(controller.login(Credentials::new("admin", "adminpass")));
        assert!(futures::poll!(login.as_mut()).is_pending());
        assert!(controller.session().is_authenticated());

        controller.logout().await;
        let admin = User {
            id: Some(1),
            username: "admin".to_string(),
            role: Role::Admin,
            approved: true,
            ..Default::default()
        };
        let _ = tx.send(vec![admin]);
        login.await;

        assert!(controller.resources().admin_users().is_empty());
        assert_eq!(controller.session().auth_state(), AuthState::Anonymous);
        assert!(controller.notices().entries().is_empty());
    }

    #[tokio::test]
    async fn test_catalog_after_logout_is_dropped() {
        let controller = SessionController::new(GatedApi::default());
        let (tx, rx) = oneshot::channel();
        controller.api().gate_products(rx);

        let mut login = Box::pin(controller.login(Credentials::new("maker", "pw")));
        assert!(futures::poll!(login.as_mut()).is_pending());

        controller.logout().await;
        let _ = tx.send(listed("Members only"));
        login.await;

        assert!(controller.resources().catalog().is_empty());
        assert_eq!(controller.session().auth_state(), AuthState::Anonymous);
    }

    #[tokio::test]
    async fn test_late_catalog_from_previous_user_is_dropped() {
        let controller = SessionController::new(GatedApi::default());
        controller.login(Credentials::new("maker", "pw")).await;
        let resources = controller.resources();
        let (tx, rx) = oneshot::channel();
        controller.api().gate_products(rx);

        let mut stale = Box::pin(resources.fetch_catalog());
        assert!(futures::poll!(stale.as_mut()).is_pending());

        controller.logout().await;
        controller.login(Credentials::new("other", "pw")).await;
        let _ = tx.send(listed("maker's view"));
        stale.await;

        assert!(resources.catalog().is_empty());
        let session = controller.session();
        assert_eq!(session.user().map(|u| u.username.as_str()), Some("other"));
    }
}
