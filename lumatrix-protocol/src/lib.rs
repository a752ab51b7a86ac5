//! Lumatrix core-to-renderer contract
//!
//! The decision core never touches the matrix. Each display cycle it emits
//! one or more [`RenderDirective`]s: an ordered list of draw operations with
//! explicit pixel positions and a hold duration. A renderer executes the
//! operations in order; nothing in a directive requires the renderer to
//! make decisions of its own.
//!
//! With the `serde` feature enabled the directive types are postcard
//! serializable, so a detached display MCU can consume directives over a
//! serial link instead of an in-process call.

#![no_std]
#![deny(unsafe_code)]

pub mod directive;
pub mod weather;

pub use directive::{
    clip_str, ContentKind, DirectiveError, DrawOp, FontId, Payload, RenderDirective,
    DEFAULT_TEXT_COLOR, MAX_ASSET_LEN, MAX_COLOR_LEN, MAX_DRAW_OPS, MAX_TEXT_LEN,
};
pub use weather::{
    Forecast, ForecastHour, WeatherSnapshot, FEELS_LIKE_THRESHOLD_C, MAX_CONDITION_LEN,
    MAX_FORECAST_HOURS,
};
