//! CTA orchestration state machine.
//!
//! Every section's call-to-action funnels through one orchestrator, so
//! validation, analytics, and dispatch behave identically no matter
//! which section the customer clicked. A click moves through
//! `Idle -> Validating -> { Redirected | Blocked | Dispatching } -> Idle`;
//! the terminal stage of each invocation is reported as a [`CtaOutcome`].

use crate::analytics::{AnalyticsEvent, AnalyticsHub, EventPayload, PixelEvent};
use crate::boundary::{CartApi, CartLine, CartRefresh, Navigator, Notice, Notifier, Route};
use crate::error::CtaError;
use offer_core::config::{PageConfig, SectionConfig};
use offer_core::intent::{build_intent, ProductIdentity, PurchaseIntent};
use offer_core::overrides::resolve_visual;
use offer_core::selection::SelectionState;
use offer_core::variant::resolve_variant_set;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Bound on the external cart mutation call.
pub const CART_CALL_TIMEOUT: Duration = Duration::from_secs(10);

/// Which purchase pathway the calling section wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pathway {
    /// Navigate to the order page with the intent as transition state.
    DirectOrder,
    /// Mutate the cart through the backend endpoint.
    AddToCart,
    /// Navigate to the product detail page; used when only a bare
    /// product id is known and no section/variant context exists.
    Redirect,
}

impl Pathway {
    pub fn as_str(&self) -> &'static str {
        match self {
            Pathway::DirectOrder => "direct_order",
            Pathway::AddToCart => "add_to_cart",
            Pathway::Redirect => "redirect",
        }
    }
}

/// Terminal stage of one CTA invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum CtaOutcome {
    /// An admin-configured custom link took over; variant logic skipped.
    Redirected { url: String },
    /// Validation failed: axes still need a selection. No boundary call
    /// was made; the page should scroll to `scroll_to` when present.
    Blocked {
        missing: Vec<String>,
        scroll_to: Option<String>,
    },
    /// The chosen pathway ran; `intent` is what was handed off.
    Dispatched {
        pathway: Pathway,
        intent: PurchaseIntent,
    },
    /// A boundary call failed; state is intact for a manual retry.
    Failed { error: CtaError },
    /// Nothing purchasable for this pathway; no boundary call was made.
    Skipped,
}

/// The shared CTA entry point for every section on a page.
pub struct CtaOrchestrator {
    cart: Arc<dyn CartApi>,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
    analytics: AnalyticsHub,
    cart_refresh: Option<CartRefresh>,
}

impl CtaOrchestrator {
    pub fn new(
        cart: Arc<dyn CartApi>,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
        analytics: AnalyticsHub,
    ) -> Self {
        Self {
            cart,
            navigator,
            notifier,
            analytics,
            cart_refresh: None,
        }
    }

    /// Install the navbar cart-count refresh callback.
    pub fn with_cart_refresh(mut self, refresh: CartRefresh) -> Self {
        self.cart_refresh = Some(refresh);
        self
    }

    /// Handle one CTA click for a section.
    ///
    /// The selection is read-only here: dispatch outcome never mutates
    /// customer state, so a failed cart call can be retried manually.
    pub async fn trigger(
        &self,
        page: &PageConfig,
        section: &SectionConfig,
        selection: &SelectionState,
        pathway: Pathway,
    ) -> CtaOutcome {
        // An explicit custom link bypasses all variant logic.
        if let Some(url) = section.external_link() {
            debug!(section = %section.id, url, "custom link redirect");
            self.navigator.navigate(Route::External(url.to_string()), None);
            return CtaOutcome::Redirected {
                url: url.to_string(),
            };
        }

        let axes = resolve_variant_set(&section.variants, &page.available_variants);
        if let Err(err) = selection.require_complete(axes) {
            let missing = selection.missing_axes(axes);
            debug!(section = %section.id, ?missing, "purchase blocked on incomplete selection");
            self.notifier.notify(Notice::validation(err.prompt()));
            return CtaOutcome::Blocked {
                missing,
                scroll_to: page.scroll_anchor().map(str::to_string),
            };
        }

        let visual = resolve_visual(selection, &section.defaults(), &section.overrides);
        let intent = build_intent(page.product_id.as_ref(), section, &visual, selection.summary());

        if matches!(intent.identity, ProductIdentity::NoProduct) {
            debug!(section = %section.id, pathway = pathway.as_str(), "no purchasable product");
            return CtaOutcome::Skipped;
        }

        let payload = EventPayload::from_intent(&intent);
        debug!(
            section = %section.id,
            pathway = pathway.as_str(),
            content_id = payload.content_id.as_deref().unwrap_or("-"),
            "dispatching purchase intent"
        );

        match pathway {
            Pathway::DirectOrder => {
                self.analytics.emit(
                    PixelEvent::InitiateCheckout,
                    AnalyticsEvent::BeginCheckout,
                    &payload,
                );
                self.navigator.navigate(Route::Order, Some(intent.clone()));
                CtaOutcome::Dispatched { pathway, intent }
            }
            Pathway::AddToCart => {
                self.analytics
                    .emit(PixelEvent::AddToCart, AnalyticsEvent::AddToCart, &payload);
                self.add_to_cart(intent).await
            }
            Pathway::Redirect => match intent.identity.catalog_id() {
                Some(id) => {
                    self.analytics
                        .emit(PixelEvent::ViewContent, AnalyticsEvent::ViewItem, &payload);
                    self.navigator
                        .navigate(Route::ProductDetail(id.clone()), None);
                    CtaOutcome::Dispatched { pathway, intent }
                }
                None => {
                    debug!(section = %section.id, "redirect pathway without catalog id");
                    CtaOutcome::Skipped
                }
            },
        }
    }

    /// Run the bounded cart mutation and report the terminal stage.
    async fn add_to_cart(&self, intent: PurchaseIntent) -> CtaOutcome {
        let Some(line) = CartLine::from_intent(&intent) else {
            return CtaOutcome::Skipped;
        };

        let call = self.cart.add_to_cart(line, intent.quantity, None);
        match tokio::time::timeout(CART_CALL_TIMEOUT, call).await {
            Ok(Ok(())) => {
                if let Some(refresh) = &self.cart_refresh {
                    refresh();
                }
                CtaOutcome::Dispatched {
                    pathway: Pathway::AddToCart,
                    intent,
                }
            }
            Ok(Err(err)) => {
                warn!(error = %err, "add to cart failed");
                self.notifier
                    .notify(Notice::failure("Could not add to cart. Please try again."));
                CtaOutcome::Failed { error: err.into() }
            }
            Err(_) => {
                warn!(timeout = ?CART_CALL_TIMEOUT, "add to cart timed out");
                self.notifier
                    .notify(Notice::failure("Could not add to cart. Please try again."));
                CtaOutcome::Failed {
                    error: CtaError::Timeout,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::{AnalyticsSink, PixelSink};
    use crate::boundary::CartApiError;
    use async_trait::async_trait;
    use offer_core::config::{SectionConfig, LANDING_HERO_ANCHOR, PRODUCT_SHOWCASE_ANCHOR};
    use offer_core::ids::ProductId;
    use offer_core::money::Money;
    use offer_core::variant::VariantAxis;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingCart {
        calls: Mutex<Vec<(CartLine, i64, Option<String>)>>,
        fail: bool,
        hang: bool,
    }

    #[async_trait]
    impl CartApi for RecordingCart {
        async fn add_to_cart(
            &self,
            line: CartLine,
            quantity: i64,
            variant_id: Option<String>,
        ) -> Result<(), CartApiError> {
            if self.hang {
                futures::future::pending::<()>().await;
            }
            self.calls.lock().unwrap().push((line, quantity, variant_id));
            if self.fail {
                Err(CartApiError("500 from cart service".into()))
            } else {
                Ok(())
            }
        }
    }

    #[derive(Default)]
    struct RecordingNavigator {
        navigations: Mutex<Vec<(Route, Option<PurchaseIntent>)>>,
    }

    impl Navigator for RecordingNavigator {
        fn navigate(&self, route: Route, intent: Option<PurchaseIntent>) {
            self.navigations.lock().unwrap().push((route, intent));
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        notices: Mutex<Vec<Notice>>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, notice: Notice) {
            self.notices.lock().unwrap().push(notice);
        }
    }

    #[derive(Default)]
    struct RecordingPixel {
        events: Mutex<Vec<PixelEvent>>,
    }

    impl PixelSink for RecordingPixel {
        fn track(&self, event: PixelEvent, _payload: &EventPayload) {
            self.events.lock().unwrap().push(event);
        }
    }

    #[derive(Default)]
    struct RecordingAnalytics {
        events: Mutex<Vec<AnalyticsEvent>>,
    }

    impl AnalyticsSink for RecordingAnalytics {
        fn track(&self, event: AnalyticsEvent, _payload: &EventPayload) {
            self.events.lock().unwrap().push(event);
        }
    }

    struct Fixture {
        cart: Arc<RecordingCart>,
        navigator: Arc<RecordingNavigator>,
        notifier: Arc<RecordingNotifier>,
        orchestrator: CtaOrchestrator,
    }

    fn fixture_with_cart(cart: RecordingCart) -> Fixture {
        let cart = Arc::new(cart);
        let navigator = Arc::new(RecordingNavigator::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let orchestrator = CtaOrchestrator::new(
            cart.clone(),
            navigator.clone(),
            notifier.clone(),
            AnalyticsHub::new(),
        );
        Fixture {
            cart,
            navigator,
            notifier,
            orchestrator,
        }
    }

    fn fixture() -> Fixture {
        fixture_with_cart(RecordingCart::default())
    }

    fn size_axes() -> Vec<VariantAxis> {
        vec![VariantAxis::new(
            "Size",
            vec!["S".into(), "M".into(), "L".into()],
        )]
    }

    fn showcase_page() -> PageConfig {
        PageConfig {
            sections: vec![
                SectionConfig {
                    anchor: Some(LANDING_HERO_ANCHOR.into()),
                    ..Default::default()
                },
                SectionConfig {
                    anchor: Some(PRODUCT_SHOWCASE_ANCHOR.into()),
                    ..Default::default()
                },
            ],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_blocked_without_selection_makes_no_boundary_calls() {
        let f = fixture();
        let mut page = showcase_page();
        page.available_variants = size_axes();
        let section = SectionConfig {
            product_id: Some("77".into()),
            ..Default::default()
        };

        let outcome = f
            .orchestrator
            .trigger(&page, &section, &SelectionState::new(), Pathway::AddToCart)
            .await;

        assert_eq!(
            outcome,
            CtaOutcome::Blocked {
                missing: vec!["Size".into()],
                scroll_to: Some(PRODUCT_SHOWCASE_ANCHOR.into()),
            }
        );
        assert!(f.cart.calls.lock().unwrap().is_empty());
        assert!(f.navigator.navigations.lock().unwrap().is_empty());

        let notices = f.notifier.notices.lock().unwrap();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0], Notice::validation("Please select: Size"));
    }

    #[tokio::test]
    async fn test_add_to_cart_dispatches_once_with_summary() {
        let f = fixture();
        let page = PageConfig {
            available_variants: size_axes(),
            ..Default::default()
        };
        let section = SectionConfig {
            product_id: Some("77".into()),
            ..Default::default()
        };
        let mut selection = SelectionState::new();
        selection.select(&page.available_variants, "Size", "M").unwrap();

        let outcome = f
            .orchestrator
            .trigger(&page, &section, &selection, Pathway::AddToCart)
            .await;

        let calls = f.cart.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0],
            (CartLine::Catalog(ProductId::new("77")), 1, None)
        );

        match outcome {
            CtaOutcome::Dispatched { pathway, intent } => {
                assert_eq!(pathway, Pathway::AddToCart);
                assert_eq!(intent.selected_variant_summary.as_deref(), Some("Size: M"));
            }
            other => panic!("expected dispatch, got {:?}", other),
        }
        assert!(f.notifier.notices.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_cart_refresh_runs_after_success() {
        let refreshes = Arc::new(AtomicUsize::new(0));
        let counter = refreshes.clone();

        let cart = Arc::new(RecordingCart::default());
        let orchestrator = CtaOrchestrator::new(
            cart.clone(),
            Arc::new(RecordingNavigator::default()),
            Arc::new(RecordingNotifier::default()),
            AnalyticsHub::new(),
        )
        .with_cart_refresh(Arc::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        let page = PageConfig::default();
        let section = SectionConfig {
            product_id: Some("77".into()),
            ..Default::default()
        };

        orchestrator
            .trigger(&page, &section, &SelectionState::new(), Pathway::AddToCart)
            .await;
        assert_eq!(refreshes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_custom_link_bypasses_variant_validation() {
        let f = fixture();
        let page = PageConfig {
            available_variants: size_axes(),
            ..Default::default()
        };
        let section = SectionConfig {
            custom_link: Some("https://partner.example/deal".into()),
            ..Default::default()
        };

        let outcome = f
            .orchestrator
            .trigger(&page, &section, &SelectionState::new(), Pathway::DirectOrder)
            .await;

        assert_eq!(
            outcome,
            CtaOutcome::Redirected {
                url: "https://partner.example/deal".into()
            }
        );
        let navigations = f.navigator.navigations.lock().unwrap();
        assert_eq!(navigations.len(), 1);
        assert_eq!(
            navigations[0].0,
            Route::External("https://partner.example/deal".into())
        );
        assert!(f.notifier.notices.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_direct_order_carries_intent_as_state() {
        let f = fixture();
        let page = PageConfig::default();
        let section = SectionConfig {
            product_id: Some("77".into()),
            price: Some("$12.00".into()),
            ..Default::default()
        };

        let outcome = f
            .orchestrator
            .trigger(&page, &section, &SelectionState::new(), Pathway::DirectOrder)
            .await;

        let navigations = f.navigator.navigations.lock().unwrap();
        assert_eq!(navigations.len(), 1);
        assert_eq!(navigations[0].0, Route::Order);
        let carried = navigations[0].1.as_ref().unwrap();
        assert_eq!(carried.price_override, Some(Money::new(1200)));
        assert!(matches!(outcome, CtaOutcome::Dispatched { .. }));
        assert!(f.cart.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_redirect_pathway_navigates_to_product_detail() {
        let f = fixture();
        let page = PageConfig {
            product_id: Some(ProductId::new("42")),
            ..Default::default()
        };
        let section = SectionConfig::default();

        let outcome = f
            .orchestrator
            .trigger(&page, &section, &SelectionState::new(), Pathway::Redirect)
            .await;

        let navigations = f.navigator.navigations.lock().unwrap();
        assert_eq!(navigations.len(), 1);
        assert_eq!(navigations[0].0, Route::ProductDetail(ProductId::new("42")));
        assert!(matches!(outcome, CtaOutcome::Dispatched { .. }));
    }

    #[tokio::test]
    async fn test_cart_failure_notifies_and_stays_retryable() {
        let f = fixture_with_cart(RecordingCart {
            fail: true,
            ..Default::default()
        });
        let page = PageConfig::default();
        let section = SectionConfig {
            product_id: Some("77".into()),
            ..Default::default()
        };

        let outcome = f
            .orchestrator
            .trigger(&page, &section, &SelectionState::new(), Pathway::AddToCart)
            .await;

        match outcome {
            CtaOutcome::Failed { error } => {
                assert_eq!(error, CtaError::Cart("500 from cart service".into()))
            }
            other => panic!("expected failure, got {:?}", other),
        }
        let notices = f.notifier.notices.lock().unwrap();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].kind, crate::boundary::NoticeKind::Failure);

        // The call is not retried automatically.
        assert_eq!(f.cart.calls.lock().unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cart_timeout_is_bounded() {
        let f = fixture_with_cart(RecordingCart {
            hang: true,
            ..Default::default()
        });
        let page = PageConfig::default();
        let section = SectionConfig {
            product_id: Some("77".into()),
            ..Default::default()
        };

        let outcome = f
            .orchestrator
            .trigger(&page, &section, &SelectionState::new(), Pathway::AddToCart)
            .await;

        assert_eq!(
            outcome,
            CtaOutcome::Failed {
                error: CtaError::Timeout
            }
        );
        assert_eq!(f.notifier.notices.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_sentinel_section_skips_purchase_pathways() {
        let f = fixture();
        let page = PageConfig {
            product_id: Some(ProductId::new("42")),
            ..Default::default()
        };
        let section = SectionConfig {
            product_id: Some("NONE".into()),
            ..Default::default()
        };

        let outcome = f
            .orchestrator
            .trigger(&page, &section, &SelectionState::new(), Pathway::AddToCart)
            .await;

        assert_eq!(outcome, CtaOutcome::Skipped);
        assert!(f.cart.calls.lock().unwrap().is_empty());
        assert!(f.navigator.navigations.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_analytics_pairs_per_pathway() {
        let pixel = Arc::new(RecordingPixel::default());
        let analytics = Arc::new(RecordingAnalytics::default());
        let hub = AnalyticsHub::new()
            .with_pixel(pixel.clone())
            .with_analytics(analytics.clone());

        let orchestrator = CtaOrchestrator::new(
            Arc::new(RecordingCart::default()),
            Arc::new(RecordingNavigator::default()),
            Arc::new(RecordingNotifier::default()),
            hub,
        );

        let page = PageConfig::default();
        let section = SectionConfig {
            product_id: Some("77".into()),
            ..Default::default()
        };

        orchestrator
            .trigger(&page, &section, &SelectionState::new(), Pathway::DirectOrder)
            .await;
        orchestrator
            .trigger(&page, &section, &SelectionState::new(), Pathway::AddToCart)
            .await;

        assert_eq!(
            *pixel.events.lock().unwrap(),
            vec![PixelEvent::InitiateCheckout, PixelEvent::AddToCart]
        );
        assert_eq!(
            *analytics.events.lock().unwrap(),
            vec![AnalyticsEvent::BeginCheckout, AnalyticsEvent::AddToCart]
        );
    }

    #[tokio::test]
    async fn test_virtual_offer_adds_structured_line() {
        let f = fixture();
        let page = PageConfig::default();
        let section = SectionConfig {
            title: Some("Starter Bundle".into()),
            cta_text: Some("Only $19.99".into()),
            ..Default::default()
        };

        let outcome = f
            .orchestrator
            .trigger(&page, &section, &SelectionState::new(), Pathway::AddToCart)
            .await;

        let calls = f.cart.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        match &calls[0].0 {
            CartLine::Virtual { name, price, .. } => {
                assert_eq!(name, "Starter Bundle");
                assert_eq!(*price, Money::new(1999));
            }
            other => panic!("expected virtual line, got {:?}", other),
        }
        assert!(matches!(outcome, CtaOutcome::Dispatched { .. }));
    }
}
