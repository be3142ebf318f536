pub mod observers;

pub use observers::{SelectorContext, SelectorEvent, SelectorObserver};
