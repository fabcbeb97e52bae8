mod modal_overlay;
pub use modal_overlay::ModalOverlay;

mod storefront;
pub use storefront::StorefrontView;
