//! Bounded FIFO caches
//!
//! Repeated image decodes and text measurements are the two hot memory
//! churns on the device. Both go through a fixed-capacity cache with
//! first-in-first-out eviction. A hit never reorders entries, so the
//! eviction victim is always the oldest surviving insert; this ordering is
//! an invariant the tests rely on, not an accident of the container.

pub mod bounded;

pub use bounded::{BoundedCache, CacheStats};

use heapless::String;
use lumatrix_protocol::{clip_str, FontId, MAX_ASSET_LEN, MAX_TEXT_LEN};

use crate::traits::assets::ImagePayload;

/// Slots in the decoded-image cache; images are large and expensive
pub const IMAGE_CACHE_SLOTS: usize = 12;

/// Slots in the text-width cache; measurements are small but numerous
pub const TEXT_CACHE_SLOTS: usize = 50;

/// Key for one text measurement
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TextKey {
    pub text: String<MAX_TEXT_LEN>,
    pub font: FontId,
}

impl TextKey {
    pub fn new(text: &str, font: FontId) -> Self {
        Self {
            text: clip_str(text),
            font,
        }
    }
}

/// Decoded images keyed by asset path
pub type ImageCache = BoundedCache<String<MAX_ASSET_LEN>, ImagePayload, IMAGE_CACHE_SLOTS>;

/// Measured pixel widths keyed by text and font
pub type TextWidthCache = BoundedCache<TextKey, u16, TEXT_CACHE_SLOTS>;
