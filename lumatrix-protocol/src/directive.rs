//! Render directive types
//!
//! A directive is one page of the display rotation: the kind of content it
//! carries, how long the renderer should hold it, and the draw operations
//! in paint order. Positions are absolute panel pixels; payloads reference
//! assets by path so the renderer resolves them through the same loader
//! the core warmed its cache with.

use heapless::{String, Vec};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum draw operations per directive
pub const MAX_DRAW_OPS: usize = 16;

/// Maximum rendered text length
pub const MAX_TEXT_LEN: usize = 32;

/// Maximum asset path length
pub const MAX_ASSET_LEN: usize = 48;

/// Maximum color token length
pub const MAX_COLOR_LEN: usize = 16;

/// Color token used when a record does not name one
pub const DEFAULT_TEXT_COLOR: &str = "MINT";

/// Errors from building or transporting a directive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DirectiveError {
    /// More draw operations than a directive can hold
    TooManyOps,
    /// Serialization buffer too small
    Encode,
    /// Malformed directive bytes
    Decode,
}

/// Fonts available to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FontId {
    /// Large digits font for clock and temperature
    Big,
    /// Small text font for labels
    Small,
}

/// What a directive's page shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ContentKind {
    /// Clock-only page, also the degraded fallback
    Clock,
    /// Current weather page
    Weather,
    /// Hourly forecast columns
    Forecast,
    /// Recurring calendar event page
    DateEvent,
    /// Scheduled display window
    Schedule,
}

/// One draw operation's payload
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Payload {
    /// Text in the given font; the color token resolves against the
    /// renderer's palette, unknown tokens fall back to the default
    Text {
        text: String<MAX_TEXT_LEN>,
        font: FontId,
        color: String<MAX_COLOR_LEN>,
    },
    /// Image referenced by asset path
    Image { path: String<MAX_ASSET_LEN> },
    /// Horizontal bar, used for UV, humidity and schedule progress
    Bar { length_px: u8, height_px: u8 },
    /// Weekday indicator square, 0 = Monday
    DayMarker { weekday: u8, size_px: u8 },
}

/// A positioned draw operation
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DrawOp {
    pub x: i16,
    pub y: i16,
    pub payload: Payload,
}

impl DrawOp {
    /// Text in the default color
    pub fn text(x: i16, y: i16, text: &str, font: FontId) -> Self {
        Self::text_colored(x, y, text, font, DEFAULT_TEXT_COLOR)
    }

    /// Text with an explicit color token
    pub fn text_colored(x: i16, y: i16, text: &str, font: FontId, color: &str) -> Self {
        Self {
            x,
            y,
            payload: Payload::Text {
                text: clip_str(text),
                font,
                color: clip_str(color),
            },
        }
    }

    pub fn image(x: i16, y: i16, path: &str) -> Self {
        Self {
            x,
            y,
            payload: Payload::Image { path: clip_str(path) },
        }
    }

    pub fn bar(x: i16, y: i16, length_px: u8, height_px: u8) -> Self {
        Self {
            x,
            y,
            payload: Payload::Bar { length_px, height_px },
        }
    }

    pub fn day_marker(x: i16, y: i16, weekday: u8, size_px: u8) -> Self {
        Self {
            x,
            y,
            payload: Payload::DayMarker { weekday, size_px },
        }
    }
}

/// One page of the display rotation
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RenderDirective {
    pub kind: ContentKind,
    /// Seconds the renderer should hold this page
    pub hold_s: u16,
    ops: Vec<DrawOp, MAX_DRAW_OPS>,
}

impl RenderDirective {
    pub fn new(kind: ContentKind, hold_s: u16) -> Self {
        Self {
            kind,
            hold_s,
            ops: Vec::new(),
        }
    }

    /// Append a draw operation; paint order is push order
    pub fn push(&mut self, op: DrawOp) -> Result<(), DirectiveError> {
        self.ops.push(op).map_err(|_| DirectiveError::TooManyOps)
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

#[cfg(feature = "serde")]
impl RenderDirective {
    /// Encode into `buf`, returning the used portion
    pub fn encode<'a>(&self, buf: &'a mut [u8]) -> Result<&'a mut [u8], DirectiveError> {
        postcard::to_slice(self, buf).map_err(|_| DirectiveError::Encode)
    }

    /// Decode a directive previously produced by [`encode`](Self::encode)
    pub fn decode(bytes: &[u8]) -> Result<Self, DirectiveError> {
        postcard::from_bytes(bytes).map_err(|_| DirectiveError::Decode)
    }
}

/// Copy `s` into a fixed buffer, truncating at a character boundary
pub fn clip_str<const N: usize>(s: &str) -> String<N> {
    let mut out = String::new();
    for c in s.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_ops_in_order() {
        let mut page = RenderDirective::new(ContentKind::Clock, 300);
        page.push(DrawOp::text(5, 7, "Oct 31", FontId::Small)).unwrap();
        page.push(DrawOp::text(5, 20, "11:59P", FontId::Big)).unwrap();

        assert_eq!(page.len(), 2);
        assert!(matches!(page.ops()[0].payload, Payload::Text { .. }));
        assert_eq!(page.ops()[1].x, 5);
        assert_eq!(page.ops()[1].y, 20);
    }

    #[test]
    fn test_too_many_ops() {
        let mut page = RenderDirective::new(ContentKind::Weather, 60);
        for i in 0..MAX_DRAW_OPS {
            page.push(DrawOp::bar(0, i as i16, 10, 1)).unwrap();
        }
        assert_eq!(
            page.push(DrawOp::bar(0, 0, 10, 1)),
            Err(DirectiveError::TooManyOps)
        );
        assert_eq!(page.len(), MAX_DRAW_OPS);
    }

    #[test]
    fn test_clip_str_truncates_at_char_boundary() {
        let clipped: String<4> = clip_str("temperature");
        assert_eq!(clipped.as_str(), "temp");

        // Two-byte degree sign must not be split
        let clipped: String<3> = clip_str("1°C");
        assert_eq!(clipped.as_str(), "1°");
    }

    #[test]
    fn test_text_defaults_to_mint() {
        let op = DrawOp::text(0, 0, "hi", FontId::Small);
        match op.payload {
            Payload::Text { color, .. } => assert_eq!(color.as_str(), DEFAULT_TEXT_COLOR),
            _ => panic!("expected text payload"),
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_encode_decode_roundtrip() {
        let mut page = RenderDirective::new(ContentKind::DateEvent, 30);
        page.push(DrawOp::image(37, 2, "img/events/cake.bmp")).unwrap();
        page.push(DrawOp::text(2, 10, "Birthday", FontId::Small)).unwrap();

        let mut buf = [0u8; 256];
        let bytes = page.encode(&mut buf).unwrap();
        let decoded = RenderDirective::decode(bytes).unwrap();
        assert_eq!(decoded, page);
    }
}
