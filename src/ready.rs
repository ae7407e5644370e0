//! Run-once gate for work that needs a parsed document.
//!
//! A page script may start while the document is still loading or after it
//! is already interactive. The gate runs its task immediately in the second
//! case and hands a deferred trigger to the caller in the first, so the task
//! runs exactly once either way.

use std::cell::RefCell;
use std::rc::Rc;

type Task = Box<dyn FnOnce()>;

#[derive(Clone)]
pub struct ReadyGate {
    task: Rc<RefCell<Option<Task>>>,
}

impl ReadyGate {
    pub fn new(task: impl FnOnce() + 'static) -> Self {
        Self {
            task: Rc::new(RefCell::new(Some(Box::new(task)))),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.task.borrow().is_some()
    }

    /// Run the task if it has not run yet. Returns whether it ran.
    pub fn fire(&self) -> bool {
        // Release the borrow before running so the task may inspect the gate
        let task = self.task.borrow_mut().take();
        match task {
            Some(task) => {
                task();
                true
            }
            None => false,
        }
    }

    /// Run now, or pass a trigger to `defer` (e.g. a `DOMContentLoaded`
    /// listener) while the document is still loading.
    pub fn run_when_ready(&self, document_loading: bool, defer: impl FnOnce(Task)) {
        if document_loading {
            let gate = self.clone();
            defer(Box::new(move || {
                gate.fire();
            }));
        } else {
            self.fire();
        }
    }
}
