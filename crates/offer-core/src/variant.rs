//! Variant axes and the section/page variant set fallback.

use serde::{Deserialize, Serialize};

/// A product dimension offered for choice (e.g., Size, Color).
///
/// Axes come either from admin-authored section configuration or from the
/// linked catalog product's variant definition, and are immutable once a
/// page is published. An axis with no options is tolerated downstream as
/// "nothing to pick from", never rejected here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct VariantAxis {
    /// Axis name, unique within a variant set (e.g., "Size").
    pub name: String,
    /// Ordered options offered for this axis.
    #[serde(default)]
    pub options: Vec<String>,
}

impl VariantAxis {
    /// Create a new axis.
    pub fn new(name: impl Into<String>, options: Vec<String>) -> Self {
        Self {
            name: name.into(),
            options,
        }
    }

    /// Whether this axis carries an option with the given value.
    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }

    /// Whether this axis names a color dimension.
    ///
    /// Color axes win the image override tie-break: the photo for a
    /// chosen colorway beats any other axis's override image.
    pub fn is_color_axis(&self) -> bool {
        is_color_axis_name(&self.name)
    }
}

/// Whether an axis name denotes a color dimension.
pub fn is_color_axis_name(name: &str) -> bool {
    let name = name.to_lowercase();
    name.contains("color") || name.contains("colour") || name.contains("shade")
}

/// Resolve the authoritative variant set for a section.
///
/// A section uses its own axes when it declares any, otherwise the
/// page-level fallback (typically seeded from the linked catalog
/// product). The two lists are never merged.
pub fn resolve_variant_set<'a>(
    section_variants: &'a [VariantAxis],
    page_variants: &'a [VariantAxis],
) -> &'a [VariantAxis] {
    if section_variants.is_empty() {
        page_variants
    } else {
        section_variants
    }
}
