//! Product identity resolution and purchase intent building.

use crate::config::SectionConfig;
use crate::ids::ProductId;
use crate::money::Money;
use crate::overrides::ResolvedVisual;
use serde::{Deserialize, Serialize};

/// Every intent purchases exactly one unit.
pub const INTENT_QUANTITY: i64 = 1;

/// A purchasable line item with no backend catalog identity, fully
/// described by the landing page configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VirtualProduct {
    /// Display name, from the section title.
    pub name: String,
    /// Price from the section's price field or its CTA copy.
    pub price: Money,
    /// Image resolved for the current selection.
    pub image: Option<String>,
}

/// What the customer is buying, in descending order of backing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum ProductIdentity {
    /// A concrete backend catalog product.
    Catalog(ProductId),
    /// A page-described product with no catalog id.
    Virtual(VirtualProduct),
    /// Nothing purchasable: the sentinel suppressed the catalog and no
    /// virtual price data exists.
    NoProduct,
}

impl ProductIdentity {
    /// Whether this identity is backed by the catalog.
    pub fn is_catalog(&self) -> bool {
        matches!(self, ProductIdentity::Catalog(_))
    }

    /// The catalog product id, when there is one.
    pub fn catalog_id(&self) -> Option<&ProductId> {
        match self {
            ProductIdentity::Catalog(id) => Some(id),
            _ => None,
        }
    }
}

/// The normalized, validated description of what the customer is about
/// to buy. Built fresh per CTA invocation and handed straight to the
/// cart/order boundary; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PurchaseIntent {
    /// Resolved product identity.
    pub identity: ProductIdentity,
    /// Always one unit.
    pub quantity: i64,
    /// `"Size: M, Color: Red"` style summary, `None` without selection.
    pub selected_variant_summary: Option<String>,
    /// Image resolved for the current selection.
    pub image: Option<String>,
    /// Page-specific price for a catalog product, bypassing the
    /// catalog's stored price downstream.
    pub price_override: Option<Money>,
}

impl PurchaseIntent {
    /// Content id for analytics payloads.
    pub fn content_id(&self) -> Option<&str> {
        self.identity.catalog_id().map(ProductId::as_str)
    }

    /// Monetary value for analytics payloads.
    pub fn value(&self) -> Option<Money> {
        match &self.identity {
            ProductIdentity::Catalog(_) => self.price_override,
            ProductIdentity::Virtual(v) => Some(v.price),
            ProductIdentity::NoProduct => None,
        }
    }
}

/// The price a virtual offer would carry: the section's price field when
/// it parses, else the first `$`-price embedded in the CTA copy.
fn virtual_price(section: &SectionConfig) -> Option<Money> {
    section
        .price
        .as_deref()
        .filter(|p| !p.trim().is_empty())
        .and_then(Money::parse)
        .or_else(|| section.cta_text.as_deref().and_then(Money::extract))
}

fn virtual_product(section: &SectionConfig, visual: &ResolvedVisual, price: Money) -> VirtualProduct {
    VirtualProduct {
        name: section
            .title
            .clone()
            .unwrap_or_else(|| "Untitled offer".to_string()),
        price,
        image: visual.image.clone(),
    }
}

/// Build the purchase intent for one CTA invocation.
///
/// Identity resolution order:
/// 1. The section's `"NONE"` sentinel suppresses every catalog id, the
///    page-level one included. The offer is then virtual if any price
///    data exists (price field or `$`-price in CTA copy), else there is
///    nothing to purchase.
/// 2. A section-level product id wins over the page-level one.
/// 3. With no id anywhere, the offer is virtual; its price defaults to
///    zero when no price data exists.
///
/// A catalog identity still carries `price_override` whenever the
/// resolved visual produced a price (override match or section default),
/// letting a landing page sell a catalog product at a page-specific
/// price without mutating the catalog.
pub fn build_intent(
    page_product_id: Option<&ProductId>,
    section: &SectionConfig,
    visual: &ResolvedVisual,
    selected_variant_summary: Option<String>,
) -> PurchaseIntent {
    let identity = if section.declares_no_product() {
        match virtual_price(section) {
            Some(price) => ProductIdentity::Virtual(virtual_product(section, visual, price)),
            None => ProductIdentity::NoProduct,
        }
    } else if let Some(id) = section.own_product_id() {
        ProductIdentity::Catalog(id)
    } else if let Some(id) = page_product_id {
        ProductIdentity::Catalog(id.clone())
    } else {
        let price = virtual_price(section).unwrap_or_else(Money::zero);
        ProductIdentity::Virtual(virtual_product(section, visual, price))
    };

    let price_override = if identity.is_catalog() {
        visual.price
    } else {
        None
    };

    PurchaseIntent {
        identity,
        quantity: INTENT_QUANTITY,
        selected_variant_summary,
        image: visual.image.clone(),
        price_override,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visual() -> ResolvedVisual {
        ResolvedVisual {
            image: Some("hero.jpg".into()),
            price: None,
            original_price: None,
        }
    }

    #[test]
    fn test_sentinel_beats_page_product() {
        let section = SectionConfig {
            product_id: Some("NONE".into()),
            ..Default::default()
        };
        let page_id = ProductId::new("42");
        let intent = build_intent(Some(&page_id), &section, &visual(), None);
        assert_eq!(intent.identity, ProductIdentity::NoProduct);
        assert_eq!(intent.value(), None);
    }

    #[test]
    fn test_sentinel_with_cta_price_yields_virtual() {
        let section = SectionConfig {
            product_id: Some("NONE".into()),
            title: Some("Starter Bundle".into()),
            cta_text: Some("Get yours for $19.99".into()),
            ..Default::default()
        };
        let page_id = ProductId::new("77");
        let intent = build_intent(Some(&page_id), &section, &visual(), None);
        match intent.identity {
            ProductIdentity::Virtual(v) => {
                assert_eq!(v.price, Money::new(1999));
                assert_eq!(v.name, "Starter Bundle");
                assert_eq!(v.image.as_deref(), Some("hero.jpg"));
            }
            other => panic!("expected virtual identity, got {:?}", other),
        }
        assert_eq!(intent.price_override, None);
    }

    #[test]
    fn test_section_product_beats_page_product() {
        let section = SectionConfig {
            product_id: Some("77".into()),
            ..Default::default()
        };
        let page_id = ProductId::new("42");
        let intent = build_intent(Some(&page_id), &section, &visual(), None);
        assert_eq!(intent.identity, ProductIdentity::Catalog(ProductId::new("77")));
    }

    #[test]
    fn test_page_product_used_when_section_silent() {
        let section = SectionConfig::default();
        let page_id = ProductId::new("42");
        let intent = build_intent(Some(&page_id), &section, &visual(), None);
        assert_eq!(intent.identity, ProductIdentity::Catalog(ProductId::new("42")));
    }

    #[test]
    fn test_structured_price_field_beats_cta_copy() {
        let section = SectionConfig {
            price: Some("$25.00".into()),
            cta_text: Some("Now only $19.99".into()),
            ..Default::default()
        };
        let intent = build_intent(None, &section, &visual(), None);
        match intent.identity {
            ProductIdentity::Virtual(v) => assert_eq!(v.price, Money::new(2500)),
            other => panic!("expected virtual identity, got {:?}", other),
        }
    }

    #[test]
    fn test_virtual_price_defaults_to_zero() {
        let section = SectionConfig {
            cta_text: Some("Shop the collection".into()),
            ..Default::default()
        };
        let intent = build_intent(None, &section, &visual(), None);
        match intent.identity {
            ProductIdentity::Virtual(v) => {
                assert!(v.price.is_zero());
                assert_eq!(v.name, "Untitled offer");
            }
            other => panic!("expected virtual identity, got {:?}", other),
        }
    }

    #[test]
    fn test_catalog_carries_price_override() {
        let section = SectionConfig {
            product_id: Some("77".into()),
            ..Default::default()
        };
        let visual = ResolvedVisual {
            image: None,
            price: Some(Money::new(1200)),
            original_price: None,
        };
        let intent = build_intent(None, &section, &visual, Some("Size: M".into()));
        assert_eq!(intent.price_override, Some(Money::new(1200)));
        assert_eq!(intent.value(), Some(Money::new(1200)));
        assert_eq!(intent.selected_variant_summary.as_deref(), Some("Size: M"));
        assert_eq!(intent.quantity, 1);
    }

    #[test]
    fn test_catalog_without_price_data_has_no_override() {
        let section = SectionConfig {
            product_id: Some("77".into()),
            ..Default::default()
        };
        let intent = build_intent(None, &section, &visual(), None);
        assert_eq!(intent.price_override, None);
        assert_eq!(intent.content_id(), Some("77"));
    }
}
