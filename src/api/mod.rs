mod selector;
mod selector_controller;
mod selector_observers;
mod selector_options;
mod selector_snapshot;
mod selector_validation;

pub use crate::extensions::{SelectorContext, SelectorEvent, SelectorObserver};
pub use selector::TimeRangeSelector;
pub use selector_options::{DEFAULT_LABEL, SelectorOptions};
pub use selector_snapshot::SelectorSnapshot;
