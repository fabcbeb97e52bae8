//! # Typed state containers with change notification
//!
//! Every piece of UI-visible state lives in its own [`State<T>`]. A container has
//! exactly one writer (the controller that owns it) and any number of read-only
//! [`Reader<T>`] handles. Writes replace the value wholesale, so readers never
//! observe a partially updated value.
//!
//! All containers created from the same [`Notifier`] share its watchers. After
//! each write every watcher is called once, after the container's borrow has been
//! released, so a watcher may read any container.

use std::cell::RefCell;
use std::rc::Rc;

type Watcher = Rc<dyn Fn()>;

/// Broadcasts "something changed" to registered watchers.
#[derive(Clone, Default)]
pub struct Notifier {
    watchers: Rc<RefCell<Vec<Watcher>>>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn watch(&self, watcher: impl Fn() + 'static) {
        self.watchers.borrow_mut().push(Rc::new(watcher));
    }

    pub fn notify(&self) {
        let watchers = self.watchers.borrow().clone();
        for watcher in watchers {
            watcher();
        }
    }
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("watchers", &self.watchers.borrow().len())
            .finish()
    }
}

/// Single-writer container. Cloning shares the value.
#[derive(Clone, Debug)]
pub struct State<T> {
    value: Rc<RefCell<T>>,
    notifier: Notifier,
}

impl<T: Clone> State<T> {
    pub fn new(value: T, notifier: &Notifier) -> Self {
        Self {
            value: Rc::new(RefCell::new(value)),
            notifier: notifier.clone(),
        }
    }

    /// Snapshot of the current value.
    pub fn get(&self) -> T {
        self.value.borrow().clone()
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.value.borrow())
    }

    /// Replace the value and notify watchers.
    pub fn replace(&self, value: T) {
        *self.value.borrow_mut() = value;
        self.notifier.notify();
    }

    /// Derive the next value from the current one, then notify watchers.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        f(&mut self.value.borrow_mut());
        self.notifier.notify();
    }

    pub fn reader(&self) -> Reader<T> {
        Reader {
            value: self.value.clone(),
        }
    }
}

/// Read-only handle to a [`State`].
#[derive(Clone, Debug)]
pub struct Reader<T> {
    value: Rc<RefCell<T>>,
}

impl<T: Clone> Reader<T> {
    pub fn get(&self) -> T {
        self.value.borrow().clone()
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.value.borrow())
    }
}
