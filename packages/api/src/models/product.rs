//! # Catalog models
//!
//! | Struct | Represents |
//! |--------|-----------|
//! | [`Product`] | A catalog entry as listed by `GET /products`, in server order. |
//! | [`ProductDraft`] | The body of `POST /products`. `Default` is the empty draft the product form resets to. |
//! | [`Referral`] | The caller's referral code and shareable link from `GET /referral`. |

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Server-assigned identity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub name: String,
    pub description: String,
    pub price: f64,
    /// Product kind: "bot", "userbot", "website", "app", "coding", ...
    #[serde(default)]
    pub r#type: String,
    #[serde(default)]
    pub demo_url: Option<String>,
}

/// A product being composed by a creator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub r#type: String,
    pub demo_url: String,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DraftError {
    #[error("a product needs a name")]
    MissingName,
    #[error("price must be a number of at least 0")]
    InvalidPrice,
}

impl ProductDraft {
    /// Check the draft before it is submitted.
    pub fn validate(&self) -> Result<(), DraftError> {
        if self.name.trim().is_empty() {
            return Err(DraftError::MissingName);
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(DraftError::InvalidPrice);
        }
        Ok(())
    }

    /// The product this draft becomes once the server assigns `id`.
    pub fn into_product(self, id: Option<u64>) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            r#type: self.r#type,
            demo_url: Some(self.demo_url).filter(|u| !u.is_empty()),
        }
    }
}

/// Response of `GET /referral`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Referral {
    #[serde(default)]
    pub referral_code: Option<String>,
    pub referral_link: String,
}
