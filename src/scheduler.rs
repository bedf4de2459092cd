//! Deferred tasks
//!
//! The only suspension point in the event layer is composition-end on
//! Firefox, which has to run after the `input` event that follows it. That
//! is expressed as "run after the current turn of the event queue" through
//! `TaskScheduler`. Browsers implement it with a zero-delay timeout
//! (`web::TimeoutScheduler`); `DeferredQueue` is an explicit queue for
//! native hosts and tests.

use std::cell::RefCell;
use std::collections::VecDeque;

pub type DeferredTask = Box<dyn FnOnce()>;

pub trait TaskScheduler {
    /// Run `task` after the current event turn, in FIFO order with other
    /// deferred tasks.
    fn defer(&self, task: DeferredTask);
}

#[derive(Default)]
pub struct DeferredQueue {
    tasks: RefCell<VecDeque<DeferredTask>>,
}

impl DeferredQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> usize {
        self.tasks.borrow().len()
    }

    /// Run one turn: every task queued before this call, in order. Tasks
    /// deferred while the turn runs wait for the next turn. Returns how many
    /// tasks ran.
    pub fn run_pending(&self) -> usize {
        let turn: VecDeque<DeferredTask> = std::mem::take(&mut *self.tasks.borrow_mut());
        let count = turn.len();
        for task in turn {
            task();
        }
        count
    }
}

impl TaskScheduler for DeferredQueue {
    fn defer(&self, task: DeferredTask) {
        self.tasks.borrow_mut().push_back(task);
    }
}
