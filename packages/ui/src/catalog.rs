//! Product catalog and the creator's product form.

use api::{Product, ProductDraft};
use dioxus::prelude::*;

use crate::client::use_client;

#[component]
pub fn ProductList() -> Element {
    let client = use_client();
    let products = client.resources().catalog();

    if !client.session().is_ready() {
        return rsx! {
            section { class: "catalog", p { class: "muted", "Loading products..." } }
        };
    }

    rsx! {
        section {
            class: "catalog",
            h2 { "Products" }
            if products.is_empty() {
                p { class: "muted", "No products yet." }
            }
            div {
                class: "product-grid",
                for (index, product) in products.into_iter().enumerate() {
                    ProductCard { key: "{list_key(product.id, index)}", product: product }
                }
            }
        }
    }
}

#[component]
fn ProductCard(product: Product) -> Element {
    let price = format!("{:.2}", product.price);
    let demo = product
        .demo_url
        .clone()
        .filter(|url| !url.is_empty())
        .map(|url| {
            rsx! {
                a { href: "{url}", target: "_blank", rel: "noopener", "Demo" }
            }
        });
    rsx! {
        article {
            class: "product-card",
            h3 { "{product.name}" }
            if !product.r#type.is_empty() {
                span { class: "product-type", "{product.r#type}" }
            }
            p { "{product.description}" }
            div {
                class: "product-footer",
                span { class: "product-price", "${price}" }
                {demo}
            }
        }
    }
}

/// Form for approved creators. The draft lives in the store so a failed
/// submission keeps what was typed.
///
/// The price is kept as typed and parsed on submit, so partial input such as
/// `1.` survives re-renders.
#[component]
pub fn ProductForm() -> Element {
    let client = use_client();
    let mut price_text = use_signal(String::new);
    let can_publish = client.session().user().is_some_and(|u| u.can_publish());
    if !can_publish {
        return rsx! {};
    }

    let draft = client.resources().draft();
    let edit = {
        let client = client.clone();
        move |apply: fn(&mut ProductDraft, String), value: String| {
            let mut draft = client.resources().draft();
            apply(&mut draft, value);
            client.resources().set_draft(draft);
        }
    };
    let (on_name, on_description, on_type, on_demo) =
        (edit.clone(), edit.clone(), edit.clone(), edit);

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let client = client.clone();
        async move {
            let draft = with_price(client.resources().draft(), &price_text());
            client.resources().add_product(draft).await;
            if client.resources().draft() == ProductDraft::default() {
                price_text.set(String::new());
            }
        }
    };

    rsx! {
        section {
            class: "product-form",
            h2 { "Add a product" }
            form {
                class: "dialog-form",
                onsubmit: onsubmit,
                label { r#for: "product-name", "Name" }
                input {
                    id: "product-name",
                    r#type: "text",
                    value: "{draft.name}",
                    oninput: move |evt: FormEvent| on_name(|d, v| d.name = v, evt.value()),
                }
                label { r#for: "product-description", "Description" }
                textarea {
                    id: "product-description",
                    value: "{draft.description}",
                    oninput: move |evt: FormEvent| {
                        on_description(|d, v| d.description = v, evt.value())
                    },
                }
                label { r#for: "product-price", "Price" }
                input {
                    id: "product-price",
                    r#type: "text",
                    inputmode: "decimal",
                    placeholder: "0.00",
                    value: price_text(),
                    oninput: move |evt: FormEvent| price_text.set(evt.value()),
                }
                label { r#for: "product-type", "Type" }
                select {
                    id: "product-type",
                    value: "{draft.r#type}",
                    onchange: move |evt: FormEvent| on_type(|d, v| d.r#type = v, evt.value()),
                    option { value: "", "Choose a type" }
                    for kind in PRODUCT_TYPES {
                        option { key: "{kind}", value: "{kind}", "{kind}" }
                    }
                }
                label { r#for: "product-demo", "Demo URL" }
                input {
                    id: "product-demo",
                    r#type: "url",
                    value: "{draft.demo_url}",
                    oninput: move |evt: FormEvent| on_demo(|d, v| d.demo_url = v, evt.value()),
                }
                button { class: "btn primary", r#type: "submit", "Add product" }
            }
        }
    }
}

const PRODUCT_TYPES: [&str; 5] = ["bot", "userbot", "website", "app", "coding"];

/// Key for a keyed list row. Rows without a server id fall back to their
/// position in a separate namespace so the two can never collide.
pub(crate) fn list_key(id: Option<u64>, index: usize) -> String {
    match id {
        Some(id) => format!("id-{id}"),
        None => format!("idx-{index}"),
    }
}

fn with_price(draft: ProductDraft, text: &str) -> ProductDraft {
    ProductDraft {
        price: parse_price(text),
        ..draft
    }
}

/// Parse the price field. Anything unparsable becomes NaN, which the draft
/// validation rejects on submit.
fn parse_price(value: &str) -> f64 {
    let value = value.trim();
    if value.is_empty() {
        return 0.0;
    }
    value.parse().unwrap_or(f64::NAN)
}
