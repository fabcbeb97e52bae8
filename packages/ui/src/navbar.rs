use dioxus::prelude::*;
use store::Dialog;

use crate::client::use_client;
use crate::icons::{FaRightFromBracket, FaRightToBracket, FaShareNodes, FaUser, FaUserPlus};
use crate::Icon;

/// Top bar: brand plus the session actions for the current identity.
#[component]
pub fn Navbar() -> Element {
    let client = use_client();
    let session = client.session();

    let actions = match session.user().cloned() {
        None => {
            let (login, signup) = (client.clone(), client.clone());
            rsx! {
                button {
                    class: "btn",
                    onclick: move |_| login.dialogs().open(Dialog::Login),
                    Icon { icon: FaRightToBracket, width: 14, height: 14 }
                    " Log in"
                }
                button {
                    class: "btn primary",
                    onclick: move |_| signup.dialogs().open(Dialog::Signup),
                    Icon { icon: FaUserPlus, width: 14, height: 14 }
                    " Sign up"
                }
            }
        }
        Some(user) => {
            let (referral, upgrade, logout) = (client.clone(), client.clone(), client.clone());
            rsx! {
                span {
                    class: "navbar-user",
                    Icon { icon: FaUser, width: 14, height: 14 }
                    " {user.username} "
                    span { class: "role-badge", "{user.role.label()}" }
                    if user.creator_request_pending() {
                        span { class: "role-badge pending", "pending approval" }
                    }
                }
                button {
                    class: "btn",
                    onclick: move |_| {
                        let referral = referral.clone();
                        async move { referral.resources().show_referral().await }
                    },
                    Icon { icon: FaShareNodes, width: 14, height: 14 }
                    " Referral"
                }
                if user.can_request_creator() {
                    button {
                        class: "btn",
                        onclick: move |_| {
                            let upgrade = upgrade.clone();
                            async move { upgrade.request_creator_upgrade().await }
                        },
                        "Become a creator"
                    }
                }
                button {
                    class: "btn",
                    onclick: move |_| {
                        let logout = logout.clone();
                        async move { logout.logout().await }
                    },
                    Icon { icon: FaRightFromBracket, width: 14, height: 14 }
                    " Log out"
                }
            }
        }
    };

    rsx! {
        nav {
            class: "navbar",
            span { class: "navbar-brand", "Storefront" }
            div { class: "navbar-actions", {actions} }
        }
    }
}
