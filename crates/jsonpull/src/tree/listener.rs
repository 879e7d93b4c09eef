use alloc::{rc::Rc, vec::Vec};
use core::cell::RefCell;

use crate::{path_component::PathComponent, value::Value};

/// Observer of explicit change notifications on a [`JsonTree`](crate::JsonTree).
pub trait TreeChangeListener {
    /// `tree` is the root of the changed document, `path` leads from it to the
    /// node that was marked changed.
    fn on_tree_change(&self, tree: &Value, path: &[PathComponent<'_>]);
}

/// Set of change listeners shared by the trees it is attached to.
///
/// Listeners are compared by identity: registering the same `Rc` twice keeps
/// a single entry. Notification runs over a snapshot, so a listener may
/// register or unregister others while being notified.
///
/// ```
/// use std::{cell::Cell, rc::Rc};
///
/// use jsonpull::{JsonTree, ListenerRegistry, PathComponent, TreeChangeListener, Value, path};
///
/// #[derive(Default)]
/// struct Counter(Cell<usize>);
///
/// impl TreeChangeListener for Counter {
///     fn on_tree_change(&self, _tree: &Value, _path: &[PathComponent<'_>]) {
///         self.0.set(self.0.get() + 1);
///     }
/// }
///
/// let registry = Rc::new(ListenerRegistry::new());
/// let counter = Rc::new(Counter::default());
/// registry.register(counter.clone());
///
/// let tree = JsonTree::from_slice(b"[1]").unwrap().with_registry(registry);
/// tree.notify_change(&path![0]);
/// assert_eq!(counter.0.get(), 1);
/// ```
#[derive(Default)]
pub struct ListenerRegistry {
    listeners: RefCell<Vec<Rc<dyn TreeChangeListener>>>,
}

impl core::fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("listeners", &self.len())
            .finish()
    }
}

impl ListenerRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `listener`; returns `false` if it was already registered.
    pub fn register(&self, listener: Rc<dyn TreeChangeListener>) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        if listeners.iter().any(|l| Rc::ptr_eq(l, &listener)) {
            return false;
        }
        listeners.push(listener);
        true
    }

    /// Removes `listener`; returns `false` if it was not registered.
    pub fn unregister(&self, listener: &Rc<dyn TreeChangeListener>) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|l| !Rc::ptr_eq(l, listener));
        listeners.len() != before
    }

    /// Calls every registered listener in registration order.
    pub fn notify_all(&self, tree: &Value, path: &[PathComponent<'_>]) {
        let snapshot = self.listeners.borrow().clone();
        for listener in snapshot {
            listener.on_tree_change(tree, path);
        }
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Returns `true` if no listener is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
