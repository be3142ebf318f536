//! query-window: query time-range selection core.
//!
//! [`TimeRangeSelector`] derives a `[start, end]` query window from an origin
//! time and before/after offsets counted in a [`core::TimeUnit`]. Rendering of
//! the picker is left to the host; it drives the selector through the update
//! operations and observes state through [`extensions::SelectorObserver`].
//!
//! The [`requirements`] module backs the `reqs_sync` tool, which keeps a
//! requirements file in line with a packaging descriptor.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod requirements;
pub mod telemetry;

pub use api::{SelectorOptions, TimeRangeSelector};
pub use error::{RequirementsError, RequirementsResult, SelectorError, SelectorResult};
