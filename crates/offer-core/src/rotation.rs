//! Image auto-rotation for sections with multiple override images.
//!
//! Until the customer makes a first selection, a section configured with
//! several override images cycles its hero image on a fixed timer. The
//! moment any selection lands, rotation stops for the rest of the
//! section's lifetime; the selection-driven image takes over and the
//! timer never resumes.

use crate::overrides::OverrideMap;
use std::time::Duration;

/// Fixed period between rotation frames.
pub const ROTATION_INTERVAL: Duration = Duration::from_secs(3);

/// Rotation state for one section's hero image.
///
/// The frame list is the deduplicated sequence
/// `[default image, override images in configuration order]`. Sections
/// with fewer than two distinct frames never rotate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRotation {
    frames: Vec<String>,
    cursor: usize,
    rotating: bool,
}

impl ImageRotation {
    /// Build the rotation for a section's default image and override map.
    pub fn new(default_image: Option<&str>, overrides: &OverrideMap) -> Self {
        let mut frames: Vec<String> = Vec::new();
        if let Some(image) = default_image {
            frames.push(image.to_string());
        }
        for image in overrides.images() {
            if !frames.iter().any(|f| f == image) {
                frames.push(image.to_string());
            }
        }
        let rotating = frames.len() > 1;
        Self {
            frames,
            cursor: 0,
            rotating,
        }
    }

    /// The frame currently shown, if the section has any image at all.
    pub fn current(&self) -> Option<&str> {
        self.frames.get(self.cursor).map(String::as_str)
    }

    /// All frames in cycle order.
    pub fn frames(&self) -> &[String] {
        &self.frames
    }

    /// Whether the timer is still driving the image.
    pub fn is_rotating(&self) -> bool {
        self.rotating
    }

    /// Advance one frame, wrapping at the end.
    ///
    /// A stopped rotation ignores further ticks and keeps its frame.
    pub fn tick(&mut self) -> Option<&str> {
        if self.rotating && !self.frames.is_empty() {
            self.cursor = (self.cursor + 1) % self.frames.len();
        }
        self.current()
    }

    /// Stop rotation permanently; called when the selection becomes
    /// non-empty. There is no way to restart a stopped rotation.
    pub fn selection_made(&mut self) {
        self.rotating = false;
    }
}
