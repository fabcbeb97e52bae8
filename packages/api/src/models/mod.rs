//! Wire models exchanged with the Resource API.

mod product;
mod user;

pub use product::{DraftError, Product, ProductDraft, Referral};
pub use user::{Credentials, Role, SignupForm, User};
