//! Best-effort analytics emission.
//!
//! Two independent fire-and-forget sinks: an ad-pixel client and a
//! generic analytics client. Either may be absent (blocked script,
//! consent withheld, not configured); an absent client is logged at
//! debug and never fails a dispatch.

use offer_core::intent::PurchaseIntent;
use offer_core::money::Money;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Ad-pixel event names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelEvent {
    ViewContent,
    InitiateCheckout,
    AddToCart,
    Purchase,
}

impl PixelEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            PixelEvent::ViewContent => "ViewContent",
            PixelEvent::InitiateCheckout => "InitiateCheckout",
            PixelEvent::AddToCart => "AddToCart",
            PixelEvent::Purchase => "Purchase",
        }
    }
}

/// Generic analytics event names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalyticsEvent {
    ViewItem,
    BeginCheckout,
    AddToCart,
    Purchase,
}

impl AnalyticsEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalyticsEvent::ViewItem => "view_item",
            AnalyticsEvent::BeginCheckout => "begin_checkout",
            AnalyticsEvent::AddToCart => "add_to_cart",
            AnalyticsEvent::Purchase => "purchase",
        }
    }
}

/// Structured payload shared by both sinks.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EventPayload {
    /// Catalog product id, when the event concerns one.
    pub content_id: Option<String>,
    /// Display name of the content.
    pub content_name: Option<String>,
    /// Monetary value attached to the event.
    pub value: Option<Money>,
}

impl EventPayload {
    /// Payload for events about a purchase intent.
    pub fn from_intent(intent: &PurchaseIntent) -> Self {
        Self {
            content_id: intent.content_id().map(str::to_string),
            content_name: None,
            value: intent.value(),
        }
    }

    /// Payload for page-level product view events.
    pub fn for_content(content_id: Option<String>) -> Self {
        Self {
            content_id,
            ..Default::default()
        }
    }
}

/// Ad-pixel client boundary.
pub trait PixelSink: Send + Sync {
    fn track(&self, event: PixelEvent, payload: &EventPayload);
}

/// Generic analytics client boundary.
pub trait AnalyticsSink: Send + Sync {
    fn track(&self, event: AnalyticsEvent, payload: &EventPayload);
}

/// Both sinks behind one emit call.
#[derive(Clone, Default)]
pub struct AnalyticsHub {
    pixel: Option<Arc<dyn PixelSink>>,
    analytics: Option<Arc<dyn AnalyticsSink>>,
}

impl AnalyticsHub {
    /// A hub with no clients; every emit is a logged no-op.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pixel(mut self, sink: Arc<dyn PixelSink>) -> Self {
        self.pixel = Some(sink);
        self
    }

    pub fn with_analytics(mut self, sink: Arc<dyn AnalyticsSink>) -> Self {
        self.analytics = Some(sink);
        self
    }

    /// Emit the paired events to whichever clients are present.
    pub fn emit(&self, pixel: PixelEvent, analytics: AnalyticsEvent, payload: &EventPayload) {
        match &self.pixel {
            Some(sink) => sink.track(pixel, payload),
            None => debug!(event = pixel.as_str(), "ad pixel client absent, skipping"),
        }
        match &self.analytics {
            Some(sink) => sink.track(analytics, payload),
            None => debug!(event = analytics.as_str(), "analytics client absent, skipping"),
        }
    }
}
