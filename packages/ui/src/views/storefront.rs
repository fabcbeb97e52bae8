use dioxus::prelude::*;

use crate::admin_panel::AdminPanel;
use crate::catalog::{ProductForm, ProductList};
use crate::client::use_client;
use crate::dialogs::DialogHost;
use crate::navbar::Navbar;
use crate::notice_tray::NoticeTray;

/// The single storefront page.
#[component]
pub fn StorefrontView() -> Element {
    let client = use_client();
    let pending = client
        .session()
        .user()
        .is_some_and(|u| u.creator_request_pending());

    rsx! {
        Navbar {}
        main {
            class: "storefront",
            header {
                class: "hero",
                h1 { "Bots, apps and code, built by creators" }
                p { "Browse the catalog, or become a creator and sell your own." }
            }
            if pending {
                p { class: "banner", "Your creator request is waiting for admin approval." }
            }
            ProductForm {}
            ProductList {}
            AdminPanel {}
        }
        DialogHost {}
        NoticeTray {}
    }
}
