//! Per-section customer selection state.

use crate::error::OfferError;
use crate::variant::VariantAxis;
use serde::{Deserialize, Serialize};

/// The customer's chosen option per variant axis, in selection order.
///
/// Backed by an explicit ordered sequence of `(axis, option)` pairs so
/// the tie-break order used by override resolution is a deterministic,
/// testable input. Re-selecting an axis replaces its option in place and
/// keeps the axis's original position.
///
/// Created empty per section render; reset only by remount. Dispatch
/// outcomes never mutate it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SelectionState {
    chosen: Vec<(String, String)>,
}

impl SelectionState {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a choice for an axis.
    ///
    /// The axis must exist in the active variant set and the option must
    /// be one the axis offers; otherwise the selection is left unchanged
    /// and an error is returned.
    pub fn select(
        &mut self,
        axes: &[VariantAxis],
        axis_name: &str,
        option: &str,
    ) -> Result<(), OfferError> {
        let axis = axes
            .iter()
            .find(|a| a.name == axis_name)
            .ok_or_else(|| OfferError::UnknownAxis(axis_name.to_string()))?;

        if !axis.has_option(option) {
            return Err(OfferError::InvalidOption {
                axis: axis_name.to_string(),
                option: option.to_string(),
            });
        }

        if let Some(entry) = self.chosen.iter_mut().find(|(name, _)| name == axis_name) {
            entry.1 = option.to_string();
        } else {
            self.chosen.push((axis_name.to_string(), option.to_string()));
        }
        Ok(())
    }

    /// The chosen option for an axis, if any.
    pub fn get(&self, axis_name: &str) -> Option<&str> {
        self.chosen
            .iter()
            .find(|(name, _)| name == axis_name)
            .map(|(_, option)| option.as_str())
    }

    /// Whether no choice has been made yet.
    pub fn is_empty(&self) -> bool {
        self.chosen.is_empty()
    }

    /// Number of axes with a choice.
    pub fn len(&self) -> usize {
        self.chosen.len()
    }

    /// Iterate `(axis, option)` pairs in selection order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.chosen.iter().map(|(a, o)| (a.as_str(), o.as_str()))
    }

    /// Whether every axis in the set has a choice.
    ///
    /// An empty axis set is vacuously complete.
    pub fn is_complete(&self, axes: &[VariantAxis]) -> bool {
        axes.iter().all(|axis| self.get(&axis.name).is_some())
    }

    /// Ordered names of axes still lacking a choice.
    pub fn missing_axes(&self, axes: &[VariantAxis]) -> Vec<String> {
        axes.iter()
            .filter(|axis| self.get(&axis.name).is_none())
            .map(|axis| axis.name.clone())
            .collect()
    }

    /// Require a complete selection before purchase.
    pub fn require_complete(&self, axes: &[VariantAxis]) -> Result<(), OfferError> {
        let missing = self.missing_axes(axes);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(OfferError::IncompleteSelection(missing))
        }
    }

    /// Human-readable summary, e.g. `"Size: M, Color: Red"`.
    ///
    /// `None` when nothing has been chosen; carried on the purchase
    /// intent so the order pipeline can show what was picked.
    pub fn summary(&self) -> Option<String> {
        if self.chosen.is_empty() {
            return None;
        }
        Some(
            self.chosen
                .iter()
                .map(|(axis, option)| format!("{}: {}", axis, option))
                .collect::<Vec<_>>()
                .join(", "),
        )
    }
}
