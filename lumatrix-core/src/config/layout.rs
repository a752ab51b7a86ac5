//! Panel layout
//!
//! Pixel positions for the 64x32 matrix. These are tuned numbers, not
//! derived ones; treat them as data.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Layout {
    pub width: u8,
    pub height: u8,
    pub right_edge: i16,

    // Clock page
    pub clock_date_x: i16,
    pub clock_date_y: i16,
    pub clock_time_x: i16,
    pub clock_time_y: i16,

    // Weather page; the time is right-aligned so it has no fixed x
    pub weather_temp_x: i16,
    pub weather_temp_y: i16,
    pub weather_time_y: i16,
    pub weather_icon_y: i16,
    pub uv_bar_y: i16,
    pub humidity_bar_y: i16,

    // Forecast page, three columns
    pub forecast_col_x: [i16; 3],
    pub forecast_time_y: i16,
    pub forecast_icon_y: i16,
    pub forecast_temp_y: i16,

    // Event page, image right-aligned with a text column on the left
    pub event_image_x: i16,
    pub event_image_y: i16,
    pub event_text_x: i16,
    pub event_primary_y: i16,
    pub event_secondary_y: i16,

    // Schedule page
    pub schedule_image_x: i16,
    pub schedule_image_y: i16,
    pub schedule_text_x: i16,
    pub schedule_temp_y: i16,
    pub progress_bar_x: i16,
    pub progress_bar_y: i16,
    pub progress_bar_width: u8,
    pub progress_bar_height: u8,

    // Weekday indicator square
    pub day_marker_x: i16,
    pub day_marker_y: i16,
    pub day_marker_size: u8,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            width: 64,
            height: 32,
            right_edge: 63,

            clock_date_x: 5,
            clock_date_y: 7,
            clock_time_x: 5,
            clock_time_y: 20,

            weather_temp_x: 2,
            weather_temp_y: 20,
            weather_time_y: 24,
            weather_icon_y: 2,
            uv_bar_y: 27,
            humidity_bar_y: 29,

            forecast_col_x: [3, 25, 48],
            forecast_time_y: 1,
            forecast_icon_y: 9,
            forecast_temp_y: 25,

            event_image_x: 37,
            event_image_y: 2,
            event_text_x: 2,
            event_primary_y: 10,
            event_secondary_y: 22,

            schedule_image_x: 23,
            schedule_image_y: 0,
            schedule_text_x: 2,
            schedule_temp_y: 24,
            progress_bar_x: 23,
            progress_bar_y: 29,
            progress_bar_width: 40,
            progress_bar_height: 2,

            day_marker_x: 60,
            day_marker_y: 0,
            day_marker_size: 4,
        }
    }
}

/// X position centering text of `text_width` px inside an area
pub fn centered_x(area_x: i16, area_width: i16, text_width: u16) -> i16 {
    area_x + (area_width - text_width as i16) / 2
}

/// X position right-aligning text of `text_width` px against an edge
pub fn right_aligned_x(right_edge: i16, text_width: u16) -> i16 {
    right_edge - text_width as i16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centering() {
        // 20px of text in the 0..64 panel sits at x=22
        assert_eq!(centered_x(0, 64, 20), 22);
        // Text wider than the area pushes left of it
        assert_eq!(centered_x(10, 8, 20), 4);
    }

    #[test]
    fn test_right_alignment() {
        assert_eq!(right_aligned_x(63, 12), 51);
    }
}
