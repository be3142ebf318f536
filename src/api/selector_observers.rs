use crate::error::{SelectorError, SelectorResult};
use crate::extensions::{SelectorContext, SelectorObserver};

use super::{SelectorEvent, TimeRangeSelector};

impl TimeRangeSelector {
    /// Adds an observer. Ids must be non-empty and unique per selector.
    pub fn register_observer(&mut self, observer: Box<dyn SelectorObserver>) -> SelectorResult<()> {
        let rejection = match observer.id() {
            "" => Some("observer id must not be empty".to_owned()),
            id if self.has_observer(id) => {
                Some(format!("observer with id `{id}` is already registered"))
            }
            _ => None,
        };
        if let Some(reason) = rejection {
            return Err(SelectorError::Configuration(reason));
        }
        self.observers.push(observer);
        Ok(())
    }

    /// Removes an observer by id. Returns `true` when it was registered.
    pub fn unregister_observer(&mut self, observer_id: &str) -> bool {
        let registered = self.observers.len();
        self.observers.retain(|observer| observer.id() != observer_id);
        self.observers.len() < registered
    }

    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    #[must_use]
    pub fn has_observer(&self, observer_id: &str) -> bool {
        self.observers.iter().any(|observer| observer.id() == observer_id)
    }

    pub(super) fn emit_observer_event(&mut self, event: SelectorEvent) {
        if self.observers.is_empty() {
            return;
        }
        let context = SelectorContext {
            origin: self.origin,
            unit: self.unit,
            before: self.before,
            after: self.after,
            max_before: self.max_before,
            max_after: self.max_after,
            interval: self.interval,
        };
        for observer in &mut self.observers {
            observer.on_event(event, context);
        }
    }

    pub(super) fn emit_offsets_changed(&mut self) {
        self.emit_observer_event(SelectorEvent::OffsetsChanged {
            before: self.before,
            after: self.after,
        });
    }

    pub(super) fn emit_interval_changed(&mut self) {
        self.emit_observer_event(SelectorEvent::IntervalChanged {
            start: self.interval.start(),
            end: self.interval.end(),
        });
    }
}
