use crate::error::{CalendarError, CalendarResult};
use crate::extensions::SelectionObserver;

use super::SelectionController;

impl SelectionController {
    /// Registers an observer that receives every selection event.
    pub fn register_observer(&mut self, observer: Box<dyn SelectionObserver>) -> CalendarResult<()> {
        let observer_id = observer.id().to_owned();
        if observer_id.is_empty() {
            return Err(CalendarError::InvalidData(
                "observer id must not be empty".to_owned(),
            ));
        }
        if self.has_observer(&observer_id) {
            return Err(CalendarError::InvalidData(format!(
                "observer with id `{observer_id}` is already registered"
            )));
        }
        self.observers.push(observer);
        Ok(())
    }

    /// Removes an observer by id.
    pub fn unregister_observer(&mut self, observer_id: &str) -> bool {
        if let Some(position) = self
            .observers
            .iter()
            .position(|entry| entry.id() == observer_id)
        {
            self.observers.remove(position);
            return true;
        }
        false
    }

    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    #[must_use]
    pub fn has_observer(&self, observer_id: &str) -> bool {
        self.observers
            .iter()
            .any(|observer| observer.id() == observer_id)
    }
}
