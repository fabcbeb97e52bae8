use dioxus::prelude::*;
use store::NoticeLevel;

use crate::client::use_client;
use crate::icons::FaXmark;
use crate::Icon;

const NOTICE_CSS: Asset = asset!("/assets/styling/notices.css");

/// Stack of recent notices, newest first, each dismissable.
#[component]
pub fn NoticeTray() -> Element {
    let client = use_client();
    let entries = client.notices().entries();

    let clear = client.clone();
    rsx! {
        document::Stylesheet { href: NOTICE_CSS }

        if !entries.is_empty() {
            div {
                class: "notice-tray",
                div {
                    class: "notice-tray-header",
                    span { "Notices" }
                    button {
                        onclick: move |_| clear.notices().clear(),
                        "Clear"
                    }
                }
                for notice in entries.into_iter().rev().take(5) {
                    div {
                        key: "{notice.id}",
                        class: match notice.level {
                            NoticeLevel::Error => "notice error",
                            NoticeLevel::Warning => "notice warning",
                            NoticeLevel::Success => "notice success",
                            NoticeLevel::Info => "notice info",
                        },
                        span { "{notice.message}" }
                        DismissButton { id: notice.id }
                    }
                }
            }
        }
    }
}

#[component]
fn DismissButton(id: u64) -> Element {
    let client = use_client();
    rsx! {
        button {
            class: "notice-dismiss",
            title: "Dismiss",
            onclick: move |_| client.notices().dismiss(id),
            Icon { icon: FaXmark, width: 10, height: 10 }
        }
    }
}
