//! Admin-authored landing page configuration.
//!
//! Pages and sections are persisted by the admin console backend and
//! arrive here as JSON. Every field tolerates absence: a half-configured
//! section must still render with defaults, never fail.

use crate::ids::{PageId, ProductId, SectionId};
use crate::money::Money;
use crate::overrides::{OverrideMap, SectionDefaults};
use crate::variant::VariantAxis;
use serde::{Deserialize, Serialize};

/// Section-level product id value that forces "no product" even when a
/// page-level product id exists.
pub const NO_PRODUCT_SENTINEL: &str = "NONE";

/// Anchor name of the preferred scroll target for blocked validations.
pub const PRODUCT_SHOWCASE_ANCHOR: &str = "product-showcase";

/// Fallback scroll target when no showcase section exists.
pub const LANDING_HERO_ANCHOR: &str = "landing-hero";

/// One independently configured block of a landing page.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SectionConfig {
    /// Section identifier.
    pub id: SectionId,
    /// Section kind label (hero, product-showcase, faq, ...).
    pub kind: Option<String>,
    /// Display title; doubles as the virtual product name.
    pub title: Option<String>,
    /// Product id override; may be the `"NONE"` sentinel.
    pub product_id: Option<String>,
    /// Section-own variant axes; empty means use the page fallback.
    pub variants: Vec<VariantAxis>,
    /// Per-option visual and price overrides.
    pub overrides: OverrideMap,
    /// Default product image.
    pub image: Option<String>,
    /// Default price display string.
    pub price: Option<String>,
    /// Default struck-through original price display string.
    pub original_price: Option<String>,
    /// CTA button copy; may embed a `$`-price for virtual offers.
    pub cta_text: Option<String>,
    /// Custom CTA link; `"#"` and `"#order"` mean "no custom link".
    pub custom_link: Option<String>,
    /// Page anchor this section renders under.
    pub anchor: Option<String>,
}

impl SectionConfig {
    /// Whether this section's product id is the "no product" sentinel.
    pub fn declares_no_product(&self) -> bool {
        self.product_id.as_deref() == Some(NO_PRODUCT_SENTINEL)
    }

    /// The section's own catalog product id, ignoring the sentinel and
    /// empty strings.
    pub fn own_product_id(&self) -> Option<ProductId> {
        match self.product_id.as_deref() {
            None | Some("") | Some(NO_PRODUCT_SENTINEL) => None,
            Some(id) => Some(ProductId::new(id)),
        }
    }

    /// An explicit external CTA link, when one is configured.
    ///
    /// `"#"` and `"#order"` are placeholder values the page builder
    /// writes for "use the purchase flow"; anything else redirects and
    /// bypasses all variant logic.
    pub fn external_link(&self) -> Option<&str> {
        match self.custom_link.as_deref() {
            None | Some("") | Some("#") | Some("#order") => None,
            Some(link) => Some(link),
        }
    }

    /// Static fallbacks used when no override matches the selection.
    ///
    /// Unparseable price strings degrade to absent.
    pub fn defaults(&self) -> SectionDefaults {
        SectionDefaults {
            image: self.image.clone(),
            price: self.price.as_deref().and_then(Money::parse),
            original_price: self.original_price.as_deref().and_then(Money::parse),
        }
    }
}

/// A published landing page: shared product context plus its sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PageConfig {
    /// Page identifier.
    pub id: PageId,
    /// Page-level catalog product, if the page sells one.
    pub product_id: Option<ProductId>,
    /// Page-level variant fallback for sections without their own axes.
    pub available_variants: Vec<VariantAxis>,
    /// Ordered sections.
    pub sections: Vec<SectionConfig>,
}

impl PageConfig {
    /// The anchor a blocked validation should scroll to: the product
    /// showcase when present, else the hero, else nothing.
    pub fn scroll_anchor(&self) -> Option<&str> {
        let has = |name: &str| {
            self.sections
                .iter()
                .any(|s| s.anchor.as_deref() == Some(name))
        };
        if has(PRODUCT_SHOWCASE_ANCHOR) {
            Some(PRODUCT_SHOWCASE_ANCHOR)
        } else if has(LANDING_HERO_ANCHOR) {
            Some(LANDING_HERO_ANCHOR)
        } else {
            None
        }
    }
}
