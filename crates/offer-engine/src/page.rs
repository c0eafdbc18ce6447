//! Runtime state for one loaded landing page.
//!
//! A session owns the published page configuration plus the per-section
//! customer state (selection and image rotation). Sections share nothing
//! with each other except the read-only page-level variant fallback.

use crate::analytics::{AnalyticsEvent, AnalyticsHub, EventPayload, PixelEvent};
use crate::boundary::CatalogApi;
use crate::orchestrator::{CtaOrchestrator, CtaOutcome, Pathway};
use offer_core::config::PageConfig;
use offer_core::error::OfferError;
use offer_core::ids::{ProductId, SectionId};
use offer_core::money::Money;
use offer_core::overrides::{resolve_visual, ResolvedVisual};
use offer_core::rotation::ImageRotation;
use offer_core::selection::SelectionState;
use offer_core::variant::{resolve_variant_set, VariantAxis};
use tracing::{debug, warn};

/// Per-section mutable state.
struct SectionRuntime {
    selection: SelectionState,
    rotation: ImageRotation,
}

/// A loaded landing page and its per-section customer state.
pub struct PageSession {
    page: PageConfig,
    runtimes: Vec<SectionRuntime>,
    analytics: AnalyticsHub,
}

impl PageSession {
    /// Load a page: seed the page-level variant fallback from the
    /// catalog when needed, emit the page view events, and create empty
    /// per-section state.
    ///
    /// The catalog is consulted only when the page links a product and
    /// declares no variants of its own. A catalog failure downgrades to
    /// an empty fallback; the page still renders.
    pub async fn load(
        mut page: PageConfig,
        catalog: &dyn CatalogApi,
        analytics: AnalyticsHub,
    ) -> Self {
        if page.available_variants.is_empty() {
            if let Some(product_id) = page.product_id.clone() {
                match catalog.product_by_id(&product_id).await {
                    Ok(product) => {
                        debug!(
                            page = %page.id,
                            product = %product_id,
                            axes = product.variants.len(),
                            "seeded variant fallback from catalog"
                        );
                        page.available_variants = product.variants;
                    }
                    Err(err) => {
                        warn!(
                            page = %page.id,
                            product = %product_id,
                            error = %err,
                            "catalog seed failed, keeping empty fallback"
                        );
                    }
                }
            }
        }

        analytics.emit(
            PixelEvent::ViewContent,
            AnalyticsEvent::ViewItem,
            &EventPayload::for_content(page.product_id.as_ref().map(|id| id.as_str().to_string())),
        );

        let runtimes = page
            .sections
            .iter()
            .map(|section| SectionRuntime {
                selection: SelectionState::new(),
                rotation: ImageRotation::new(section.image.as_deref(), &section.overrides),
            })
            .collect();

        Self {
            page,
            runtimes,
            analytics,
        }
    }

    /// The page configuration, with any seeded variant fallback applied.
    pub fn page(&self) -> &PageConfig {
        &self.page
    }

    fn position(&self, section_id: &SectionId) -> Option<usize> {
        self.page.sections.iter().position(|s| &s.id == section_id)
    }

    /// The variant set in force for a section.
    pub fn axes(&self, section_id: &SectionId) -> Option<&[VariantAxis]> {
        let idx = self.position(section_id)?;
        Some(resolve_variant_set(
            &self.page.sections[idx].variants,
            &self.page.available_variants,
        ))
    }

    /// A section's current selection.
    pub fn selection(&self, section_id: &SectionId) -> Option<&SelectionState> {
        self.position(section_id)
            .map(|idx| &self.runtimes[idx].selection)
    }

    /// Record a customer choice and stop the section's image rotation.
    pub fn select(
        &mut self,
        section_id: &SectionId,
        axis: &str,
        option: &str,
    ) -> Result<(), OfferError> {
        let idx = self
            .position(section_id)
            .ok_or_else(|| OfferError::UnknownSection(section_id.as_str().to_string()))?;
        let axes = resolve_variant_set(
            &self.page.sections[idx].variants,
            &self.page.available_variants,
        );
        let runtime = &mut self.runtimes[idx];
        runtime.selection.select(axes, axis, option)?;
        runtime.rotation.selection_made();
        Ok(())
    }

    /// The image and price pair a section should render right now.
    pub fn resolved_visual(&self, section_id: &SectionId) -> Option<ResolvedVisual> {
        let idx = self.position(section_id)?;
        let section = &self.page.sections[idx];
        Some(resolve_visual(
            &self.runtimes[idx].selection,
            &section.defaults(),
            &section.overrides,
        ))
    }

    /// The image to show, preferring the rotation frame while the
    /// pre-selection carousel is still running.
    pub fn active_image(&self, section_id: &SectionId) -> Option<String> {
        let idx = self.position(section_id)?;
        let runtime = &self.runtimes[idx];
        if runtime.rotation.is_rotating() {
            return runtime.rotation.current().map(str::to_string);
        }
        self.resolved_visual(section_id).and_then(|v| v.image)
    }

    /// Advance a section's rotation by one frame (timer callback).
    pub fn tick_rotation(&mut self, section_id: &SectionId) -> Option<String> {
        let idx = self.position(section_id)?;
        self.runtimes[idx].rotation.tick().map(str::to_string)
    }

    /// Whether a section's carousel is still running.
    pub fn is_rotating(&self, section_id: &SectionId) -> bool {
        self.position(section_id)
            .map(|idx| self.runtimes[idx].rotation.is_rotating())
            .unwrap_or(false)
    }

    /// Run a CTA click for a section through the shared orchestrator.
    pub async fn trigger_cta(
        &self,
        section_id: &SectionId,
        orchestrator: &CtaOrchestrator,
        pathway: Pathway,
    ) -> CtaOutcome {
        match self.position(section_id) {
            Some(idx) => {
                orchestrator
                    .trigger(
                        &self.page,
                        &self.page.sections[idx],
                        &self.runtimes[idx].selection,
                        pathway,
                    )
                    .await
            }
            None => {
                warn!(section = %section_id, "CTA for unknown section");
                CtaOutcome::Skipped
            }
        }
    }

    /// Emit the purchase events after the external order pipeline
    /// confirms completion.
    pub fn confirm_purchase(&self, product_id: Option<&ProductId>, value: Money) {
        self.analytics.emit(
            PixelEvent::Purchase,
            AnalyticsEvent::Purchase,
            &EventPayload {
                content_id: product_id.map(|id| id.as_str().to_string()),
                content_name: None,
                value: Some(value),
            },
        );
    }
}
