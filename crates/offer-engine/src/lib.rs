//! CTA orchestration and external boundaries for the offer resolution
//! engine.
//!
//! [`offer_core`] decides what is currently for sale in a section; this
//! crate wires that decision to the outside world:
//!
//! - **Boundary**: traits for the cart endpoint, the catalog read
//!   endpoint, navigation, and user notices
//! - **Analytics**: paired ad-pixel and generic analytics events,
//!   emitted best-effort
//! - **Orchestrator**: the single CTA entry point every section calls,
//!   with validation, dispatch, and bounded cart calls
//! - **Page**: the per-page session holding section selection and
//!   rotation state, seeded from the catalog on load
//!
//! # Example
//!
//! ```rust,ignore
//! use offer_engine::prelude::*;
//!
//! let orchestrator = CtaOrchestrator::new(cart, navigator, notifier, hub);
//! let mut session = PageSession::load(page, catalog.as_ref(), hub2).await;
//! session.select(&section_id, "Size", "M")?;
//! let outcome = session
//!     .trigger_cta(&section_id, &orchestrator, Pathway::AddToCart)
//!     .await;
//! ```

pub mod analytics;
pub mod boundary;
pub mod error;
pub mod orchestrator;
pub mod page;

pub use error::CtaError;
pub use orchestrator::{CtaOrchestrator, CtaOutcome, Pathway};
pub use page::PageSession;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::analytics::{
        AnalyticsEvent, AnalyticsHub, AnalyticsSink, EventPayload, PixelEvent, PixelSink,
    };
    pub use crate::boundary::{
        CartApi, CartApiError, CartLine, CartRefresh, CatalogApi, CatalogApiError, CatalogProduct,
        Navigator, Notice, NoticeKind, Notifier, Route,
    };
    pub use crate::error::CtaError;
    pub use crate::orchestrator::{CtaOrchestrator, CtaOutcome, Pathway, CART_CALL_TIMEOUT};
    pub use crate::page::PageSession;
    pub use offer_core::prelude::*;
}
