//! Visual and price overrides per variant option.
//!
//! Admins may attach an image, a color swatch, and a price pair to any
//! single `(axis, option)` combination. At render time the active
//! selection is folded over the map to decide which product photo and
//! which price the customer currently sees.

use crate::money::Money;
use crate::selection::SelectionState;
use crate::variant::is_color_axis_name;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Overrides attached to one `(axis, option)` combination.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct OverrideEntry {
    /// Product photo shown while this option is selected.
    #[serde(default)]
    pub image: Option<String>,
    /// Swatch color for the option button.
    #[serde(default)]
    pub color: Option<String>,
    /// Price display string (e.g., "$19.99").
    #[serde(default)]
    pub price: Option<String>,
    /// Struck-through original price display string.
    #[serde(default)]
    pub original_price: Option<String>,
}

/// Admin-configured override map, keyed by `"<axis>:<option>"`.
///
/// Insertion order is preserved so that derived sequences (e.g., the
/// auto-rotation frame list) are deterministic. Read-only at render time.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct OverrideMap(IndexMap<String, OverrideEntry>);

impl OverrideMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    fn key(axis: &str, option: &str) -> String {
        format!("{}:{}", axis, option)
    }

    /// Attach an override to an `(axis, option)` combination.
    pub fn insert(&mut self, axis: &str, option: &str, entry: OverrideEntry) {
        self.0.insert(Self::key(axis, option), entry);
    }

    /// Look up the override for an `(axis, option)` combination.
    pub fn get(&self, axis: &str, option: &str) -> Option<&OverrideEntry> {
        self.0.get(&Self::key(axis, option))
    }

    /// Whether any override is configured.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of configured overrides.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// All override images, in configuration order.
    pub fn images(&self) -> impl Iterator<Item = &str> {
        self.0.values().filter_map(|e| e.image.as_deref())
    }

    /// Swatch color configured for an option button, if any.
    pub fn swatch(&self, axis: &str, option: &str) -> Option<&str> {
        self.get(axis, option).and_then(|e| e.color.as_deref())
    }
}

/// A section's static fallbacks when no override applies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionDefaults {
    /// Default product image.
    pub image: Option<String>,
    /// Default price.
    pub price: Option<Money>,
    /// Default struck-through original price.
    pub original_price: Option<Money>,
}

/// The image and price pair currently active for a section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedVisual {
    /// Active product image.
    pub image: Option<String>,
    /// Active price.
    pub price: Option<Money>,
    /// Active original price, for strike-through display.
    pub original_price: Option<Money>,
}

/// Resolve the active image and price for the current selection.
///
/// Images and prices resolve asymmetrically, and that asymmetry governs
/// which product photo the customer sees once they have picked both a
/// color and a size:
///
/// - image: an override from a color axis beats overrides from any other
///   axis; among non-color axes the latest selection wins.
/// - price / original price: plain last-write-wins in selection order,
///   regardless of axis kind.
///
/// An empty selection returns the section's static defaults unchanged.
/// Override price strings that fail to parse are ignored.
pub fn resolve_visual(
    selection: &SelectionState,
    defaults: &SectionDefaults,
    map: &OverrideMap,
) -> ResolvedVisual {
    if selection.is_empty() {
        return ResolvedVisual {
            image: defaults.image.clone(),
            price: defaults.price,
            original_price: defaults.original_price,
        };
    }

    let mut color_image: Option<&str> = None;
    let mut other_image: Option<&str> = None;
    let mut price: Option<Money> = None;
    let mut original_price: Option<Money> = None;

    for (axis, option) in selection.entries() {
        let Some(entry) = map.get(axis, option) else {
            continue;
        };
        if let Some(image) = entry.image.as_deref() {
            if is_color_axis_name(axis) {
                color_image = Some(image);
            } else {
                other_image = Some(image);
            }
        }
        if let Some(parsed) = entry.price.as_deref().and_then(Money::parse) {
            price = Some(parsed);
        }
        if let Some(parsed) = entry.original_price.as_deref().and_then(Money::parse) {
            original_price = Some(parsed);
        }
    }

    ResolvedVisual {
        image: color_image
            .or(other_image)
            .map(str::to_string)
            .or_else(|| defaults.image.clone()),
        price: price.or(defaults.price),
        original_price: original_price.or(defaults.original_price),
    }
}
