//! External collaborator boundaries.
//!
//! The engine never talks to the backend REST API, the router, or the
//! toast layer directly; each is a trait implemented by the host
//! application. Tests drive the orchestrator against in-process
//! recorders of these traits.

use async_trait::async_trait;
use offer_core::ids::ProductId;
use offer_core::intent::{ProductIdentity, PurchaseIntent};
use offer_core::money::Money;
use offer_core::variant::VariantAxis;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Failure from the external cart mutation endpoint.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct CartApiError(pub String);

/// Failure from the catalog read endpoint.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct CatalogApiError(pub String);

/// What gets added to the cart: a catalog reference or the structured
/// description of a virtual purchase.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum CartLine {
    /// A backend catalog product, referenced by id.
    Catalog(ProductId),
    /// A virtual purchase with no catalog id; the cart stores the full
    /// description.
    Virtual {
        name: String,
        price: Money,
        image: Option<String>,
        variant_name: Option<String>,
    },
}

impl CartLine {
    /// Derive the cart payload from a purchase intent.
    ///
    /// `None` when there is nothing purchasable.
    pub fn from_intent(intent: &PurchaseIntent) -> Option<Self> {
        match &intent.identity {
            ProductIdentity::Catalog(id) => Some(CartLine::Catalog(id.clone())),
            ProductIdentity::Virtual(v) => Some(CartLine::Virtual {
                name: v.name.clone(),
                price: v.price,
                image: v.image.clone(),
                variant_name: intent.selected_variant_summary.clone(),
            }),
            ProductIdentity::NoProduct => None,
        }
    }
}

/// Cart mutation boundary.
#[async_trait]
pub trait CartApi: Send + Sync {
    /// Add a line to the customer's cart.
    ///
    /// `variant_id` is a catalog-level variant reference; this engine
    /// always passes `None` and describes the chosen options through the
    /// line's variant name instead.
    ///
    /// Implementations should treat the call as idempotent by intent:
    /// replaying the same line after a timeout must be safe. The engine
    /// itself never retries.
    async fn add_to_cart(
        &self,
        line: CartLine,
        quantity: i64,
        variant_id: Option<String>,
    ) -> Result<(), CartApiError>;
}

/// A catalog product as returned by the read-only product endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogProduct {
    pub id: ProductId,
    pub name: String,
    pub price: Money,
    /// Variant axes defined on the catalog product; seeds the page-level
    /// fallback.
    pub variants: Vec<VariantAxis>,
    pub images: Vec<String>,
}

/// Catalog read boundary; used once per page load.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn product_by_id(&self, id: &ProductId) -> Result<CatalogProduct, CatalogApiError>;
}

/// Where a navigation lands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// The order page; the purchase intent rides as transition state.
    Order,
    /// A product detail page.
    ProductDetail(ProductId),
    /// An admin-configured external link.
    External(String),
}

/// Page navigation boundary.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route, intent: Option<PurchaseIntent>);
}

/// Kind of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Missing variant selection; transient prompt.
    Validation,
    /// A boundary call failed; the customer may retry manually.
    Failure,
}

/// A non-blocking, toast-style message. A marketing page never shows a
/// modal or full-page error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Validation,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Failure,
            message: message.into(),
        }
    }
}

/// Notification boundary.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Fire-and-forget callback refreshing the navbar cart count after a
/// successful add-to-cart.
pub type CartRefresh = Arc<dyn Fn() + Send + Sync>;
