//! Login, signup and referral dialogs. Which one is showing lives in the
//! store's [`Dialogs`](store::Dialogs); these components only render it.

use api::{Credentials, SignupForm};
use dioxus::prelude::*;
use store::Dialog;

use crate::client::use_client;
use crate::views::ModalOverlay;

/// Renders whichever dialog is open, if any.
#[component]
pub fn DialogHost() -> Element {
    let client = use_client();
    let close = {
        let client = client.clone();
        move |_: ()| client.dialogs().close()
    };

    match client.dialogs().current() {
        Some(Dialog::Login) => rsx! {
            ModalOverlay { title: "Log in", on_close: close, LoginFields {} }
        },
        Some(Dialog::Signup) => rsx! {
            ModalOverlay { title: "Sign up", on_close: close, SignupFields {} }
        },
        Some(Dialog::Referral) => rsx! {
            ModalOverlay { title: "Your referral link", on_close: close, ReferralPanel {} }
        },
        None => rsx! {},
    }
}

#[component]
fn LoginFields() -> Element {
    let client = use_client();
    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);
    let busy = !client.session().auth_state().accepts_login();

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let client = client.clone();
        async move {
            client
                .login(Credentials::new(username().trim(), password()))
                .await;
            password.set(String::new());
        }
    };

    rsx! {
        form {
            class: "dialog-form",
            onsubmit: onsubmit,
            label { r#for: "login-username", "Username" }
            input {
                id: "login-username",
                r#type: "text",
                autocomplete: "username",
                value: username(),
                oninput: move |evt: FormEvent| username.set(evt.value()),
            }
            label { r#for: "login-password", "Password" }
            input {
                id: "login-password",
                r#type: "password",
                autocomplete: "current-password",
                value: password(),
                oninput: move |evt: FormEvent| password.set(evt.value()),
            }
            button {
                class: "btn primary",
                r#type: "submit",
                disabled: busy,
                if busy { "Logging in..." } else { "Log in" }
            }
        }
    }
}

#[component]
fn SignupFields() -> Element {
    let client = use_client();
    let mut username = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut referral_code = use_signal(|| page_referral_code().unwrap_or_default());

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let client = client.clone();
        async move {
            let form = SignupForm::new(
                username().trim(),
                email().trim(),
                password(),
                Some(referral_code()),
            );
            client.signup(form).await;
        }
    };

    rsx! {
        form {
            class: "dialog-form",
            onsubmit: onsubmit,
            label { r#for: "signup-username", "Username" }
            input {
                id: "signup-username",
                r#type: "text",
                value: username(),
                oninput: move |evt: FormEvent| username.set(evt.value()),
            }
            label { r#for: "signup-email", "Email" }
            input {
                id: "signup-email",
                r#type: "email",
                value: email(),
                oninput: move |evt: FormEvent| email.set(evt.value()),
            }
            label { r#for: "signup-password", "Password" }
            input {
                id: "signup-password",
                r#type: "password",
                autocomplete: "new-password",
                value: password(),
                oninput: move |evt: FormEvent| password.set(evt.value()),
            }
            label { r#for: "signup-referral", "Referral code (optional)" }
            input {
                id: "signup-referral",
                r#type: "text",
                value: referral_code(),
                oninput: move |evt: FormEvent| referral_code.set(evt.value()),
            }
            button { class: "btn primary", r#type: "submit", "Sign up" }
        }
    }
}

#[component]
fn ReferralPanel() -> Element {
    let client = use_client();
    let link = client.resources().referral_link().unwrap_or_default();

    rsx! {
        div {
            class: "dialog-form",
            p { "Share this link. Sign-ups through it are credited to you." }
            input {
                class: "referral-link",
                r#type: "text",
                readonly: true,
                value: "{link}",
            }
        }
    }
}

/// The `ref` parameter of the page URL, used to pre-fill the referral code.
#[cfg(target_arch = "wasm32")]
fn page_referral_code() -> Option<String> {
    let search = web_sys::window()?.location().search().ok()?;
    referral_from_query(&search)
}

#[cfg(not(target_arch = "wasm32"))]
fn page_referral_code() -> Option<String> {
    None
}

/// Extract `ref` from a query string such as `?ref=abc&x=1`.
pub fn referral_from_query(search: &str) -> Option<String> {
    search
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "ref")
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
