use std::cell::RefCell;
use std::rc::Rc;

use chrono::NaiveDate;
use tracing::trace;

use crate::core::DatasetSource;
use crate::error::{CalendarError, CalendarResult};
use crate::extensions::SelectionObserver;

use super::{ControllerOutcome, SelectionController, SelectionSnapshot};

/// Actions accepted by [`SharedCalendarStore::dispatch`].
#[derive(Debug, Clone)]
pub enum CalendarAction {
    SelectDate(NaiveDate),
    CloseDetail,
    SetData(DatasetSource),
}

#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
    Selected(ControllerOutcome),
    Closed { was_open: bool },
    DataSet,
}

/// Cloneable handle that lets several views share one controller.
///
/// Views read through [`snapshot`](Self::snapshot) and write through
/// [`dispatch`](Self::dispatch). Dispatching from inside an observer callback
/// is refused rather than re-entering the controller.
#[derive(Clone)]
pub struct SharedCalendarStore {
    inner: Rc<RefCell<SelectionController>>,
}

impl SharedCalendarStore {
    #[must_use]
    pub fn new(controller: SelectionController) -> Self {
        Self {
            inner: Rc::new(RefCell::new(controller)),
        }
    }

    pub fn dispatch(&self, action: CalendarAction) -> CalendarResult<DispatchOutcome> {
        let mut controller = self.inner.try_borrow_mut().map_err(|_| {
            CalendarError::InvalidData("calendar store is busy with another action".to_owned())
        })?;
        trace!(?action, "dispatch calendar action");
        match action {
            CalendarAction::SelectDate(date) => {
                Ok(DispatchOutcome::Selected(controller.select_date(date)))
            }
            CalendarAction::CloseDetail => Ok(DispatchOutcome::Closed {
                was_open: controller.dismiss(),
            }),
            CalendarAction::SetData(source) => {
                controller.load_data(source)?;
                Ok(DispatchOutcome::DataSet)
            }
        }
    }

    pub fn snapshot(&self) -> CalendarResult<SelectionSnapshot> {
        self.read(SelectionController::snapshot)
    }

    /// Runs `f` against the shared controller.
    pub fn read<T>(&self, f: impl FnOnce(&SelectionController) -> T) -> CalendarResult<T> {
        let controller = self.inner.try_borrow().map_err(|_| {
            CalendarError::InvalidData("calendar store is busy with another action".to_owned())
        })?;
        Ok(f(&controller))
    }

    pub fn subscribe(&self, observer: Box<dyn SelectionObserver>) -> CalendarResult<()> {
        let mut controller = self.inner.try_borrow_mut().map_err(|_| {
            CalendarError::InvalidData("calendar store is busy with another action".to_owned())
        })?;
        controller.register_observer(observer)
    }

    /// Returns `false` when no such observer is registered or the store is busy.
    pub fn unsubscribe(&self, observer_id: &str) -> bool {
        self.inner
            .try_borrow_mut()
            .is_ok_and(|mut controller| controller.unregister_observer(observer_id))
    }

    /// Number of live handles to this store.
    #[must_use]
    pub fn handle_count(&self) -> usize {
        Rc::strong_count(&self.inner)
    }
}
