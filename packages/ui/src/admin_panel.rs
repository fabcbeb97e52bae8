use dioxus::prelude::*;

use crate::catalog::list_key;
use crate::client::use_client;
use crate::icons::FaCheck;
use crate::Icon;

/// User list with approve buttons for pending creator requests. Admins only.
#[component]
pub fn AdminPanel() -> Element {
    let client = use_client();
    let is_admin = client.session().user().is_some_and(|u| u.is_admin());
    if !is_admin || !client.session().is_ready() {
        return rsx! {};
    }

    let users = client.resources().admin_users();

    rsx! {
        section {
            class: "admin-panel",
            h2 { "Users" }
            table {
                thead {
                    tr {
                        th { "User" }
                        th { "Role" }
                        th { "Status" }
                        th {}
                    }
                }
                tbody {
                    for (index, user) in users.into_iter().enumerate() {
                        tr {
                            key: "{list_key(user.id, index)}",
                            td { "{user.username}" }
                            td { "{user.role.label()}" }
                            td {
                                if user.creator_request_pending() {
                                    "pending"
                                } else if user.approved {
                                    "approved"
                                } else {
                                    ""
                                }
                            }
                            td {
                                {
                                    user.id
                                        .filter(|_| user.creator_request_pending())
                                        .map(|id| rsx! { ApproveButton { user_id: id } })
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn ApproveButton(user_id: u64) -> Element {
    let client = use_client();
    rsx! {
        button {
            class: "btn small",
            onclick: move |_| {
                let client = client.clone();
                async move { client.resources().approve_creator(user_id).await }
            },
            Icon { icon: FaCheck, width: 12, height: 12 }
            " Approve"
        }
    }
}
