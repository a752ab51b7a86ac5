//! Asset loading traits fed into the bounded caches

use lumatrix_protocol::FontId;

/// Errors from loading a display asset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LoadError {
    /// No such file
    NotFound,
    /// File exists but did not decode
    DecodeFailed,
    /// Filesystem error
    Io,
}

/// Handle to a decoded image
///
/// The loader decodes into renderer-owned memory; the core only keeps the
/// handle for identity and the dimensions for layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ImagePayload {
    pub handle: u32,
    pub width: u8,
    pub height: u8,
}

/// Loads and decodes images by asset path
pub trait ImageLoader {
    fn load_image(&mut self, path: &str) -> Result<ImagePayload, LoadError>;
}

/// Measures rendered text width
pub trait TextMeasurer {
    /// Pixel width of `text` in `font`.
    ///
    /// Measurement cannot fail; unknown glyphs measure as the font's
    /// fallback glyph.
    fn measure_text(&mut self, text: &str, font: FontId) -> u16;
}

/// Combined asset access the scheduler works against
pub trait AssetSource: ImageLoader + TextMeasurer {}

impl<T: ImageLoader + TextMeasurer> AssetSource for T {}
