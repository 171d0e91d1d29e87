//! Lifecycle instrumentation for container tests.

use std::{cell::RefCell, rc::Rc};

/// Shared, ordered log of lifecycle events.
#[derive(Clone, Default)]
pub struct DropLog(Rc<RefCell<Vec<String>>>);

impl DropLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, event: impl Into<String>) {
        self.0.borrow_mut().push(event.into());
    }

    /// Returns the events recorded so far, clearing the log.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut self.0.borrow_mut())
    }
}

/// A value whose construction, cloning and destruction append to a
/// [`DropLog`].
pub struct Tracked {
    label: &'static str,
    log: DropLog,
}

impl Tracked {
    pub fn new(label: &'static str, log: &DropLog) -> Self {
        log.record(format!("create {label}"));
        Self {
            label,
            log: log.clone(),
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        self.log.record(format!("clone {}", self.label));
        Self {
            label: self.label,
            log: self.log.clone(),
        }
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.log.record(format!("drop {}", self.label));
    }
}
