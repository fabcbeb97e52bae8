//! This crate contains all shared UI for the storefront.

use dioxus::prelude::*;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub const STOREFRONT_CSS: Asset = asset!("/assets/styling/storefront.css");

pub mod config;
pub use config::{ApiConfig, ClientConfig};

pub mod views;
pub use views::StorefrontView;

mod client;
pub use client::{use_client, Client, ClientProvider};

mod navbar;
pub use navbar::Navbar;

pub mod dialogs;
pub use dialogs::DialogHost;

mod catalog;
pub use catalog::{ProductForm, ProductList};

mod admin_panel;
pub use admin_panel::AdminPanel;

mod notice_tray;
pub use notice_tray::NoticeTray;

mod scene_background;
pub use scene_background::SceneBackground;
