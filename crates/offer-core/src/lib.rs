//! Variant and offer resolution logic for landing pages.
//!
//! A promotional page is assembled from independent, admin-configured
//! sections. This crate decides which product identity, price, image,
//! and variant selection is currently active for each section, and
//! normalizes a CTA click into a purchase intent a downstream order
//! pipeline can trust:
//!
//! - **Variant**: axis definitions and the section/page fallback rule
//! - **Selection**: the customer's per-section choices and completeness
//! - **Overrides**: per-option image and price resolution
//! - **Rotation**: the pre-selection hero image carousel
//! - **Intent**: catalog vs. virtual vs. no-product identity, and the
//!   purchase intent handed to the cart/order boundary
//!
//! Everything here is pure and synchronous; resolvers degrade to
//! documented defaults on malformed configuration instead of failing a
//! render.
//!
//! # Example
//!
//! ```rust
//! use offer_core::prelude::*;
//!
//! let axes = vec![VariantAxis::new("Size", vec!["S".into(), "M".into()])];
//! let mut selection = SelectionState::new();
//! selection.select(&axes, "Size", "M").unwrap();
//! assert!(selection.is_complete(&axes));
//! assert_eq!(selection.summary().as_deref(), Some("Size: M"));
//! ```

pub mod config;
pub mod error;
pub mod ids;
pub mod intent;
pub mod money;
pub mod overrides;
pub mod rotation;
pub mod selection;
pub mod variant;

pub use error::OfferError;
pub use ids::*;
pub use money::Money;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::{PageConfig, SectionConfig, NO_PRODUCT_SENTINEL};
    pub use crate::error::OfferError;
    pub use crate::ids::{PageId, ProductId, SectionId};
    pub use crate::intent::{build_intent, ProductIdentity, PurchaseIntent, VirtualProduct};
    pub use crate::money::Money;
    pub use crate::overrides::{
        resolve_visual, OverrideEntry, OverrideMap, ResolvedVisual, SectionDefaults,
    };
    pub use crate::rotation::{ImageRotation, ROTATION_INTERVAL};
    pub use crate::selection::SelectionState;
    pub use crate::variant::{resolve_variant_set, VariantAxis};
}
