//! Collaborator traits
//!
//! These traits define the interface between the decision core and the
//! hardware, network and filesystem implementations. The core treats every
//! call as blocking and only consumes classified success/failure outcomes;
//! retries and timeout handling live behind the traits.

pub mod assets;
pub mod clock;
pub mod logger;
pub mod network;
pub mod renderer;

pub use assets::{AssetSource, ImageLoader, ImagePayload, LoadError, TextMeasurer};
pub use clock::{Clock, ClockError};
pub use logger::{LogLevel, Logger, NullLogger};
pub use network::{FetchError, NetworkFetch};
pub use renderer::{RenderError, Renderer};
