//! Synchronous publish/subscribe dispatcher.
//!
//! All components communicate exclusively through this bus: views forward
//! user intent onto it, models announce their changes on it, and the
//! checkout orchestrator subscribes to both sides. Dispatch is synchronous
//! and single-threaded: there is one logical turn per emitted event.
//!
//! # Re-entrant emissions
//!
//! An `emit` performed while a dispatch is already in progress (a model
//! announcing a change from inside a handler, for instance) does not
//! interleave: the event is queued and drained breadth-first, in FIFO order,
//! after the in-flight emission's remaining handlers have run. This keeps
//! handler-driven model mutation safe: the mutating handler has released its
//! borrow by the time the follow-up change event is dispatched.
//!
//! # Handler failures
//!
//! A panicking handler must not stop the remaining handlers for the same
//! emission, so each handler runs isolated: panics are caught and reported
//! at error level with the topic name.

mod event;
mod filter;

pub use event::{AppEvent, Topic};
pub use filter::{FormScope, TopicFilter};

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

/// A subscribed callback. Handler identity is `Rc` pointer identity: two
/// clones of one `Rc` are the same handler, two separately-built closures
/// are not.
pub type Handler = Rc<dyn Fn(&AppEvent)>;

struct Registration {
    filter: TopicFilter,
    handlers: Vec<Handler>,
}

/// Process-wide event dispatcher. Created once at startup, never torn down.
#[derive(Default)]
pub struct EventBus {
    registry: RefCell<Vec<Registration>>,
    queue: RefCell<VecDeque<AppEvent>>,
    draining: Cell<bool>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` under `filter`.
    ///
    /// Registering the same handler (same `Rc`) twice under one filter is a
    /// no-op; views may re-subscribe on every re-render without doubling
    /// their deliveries.
    pub fn subscribe(&self, filter: TopicFilter, handler: Handler) {
        let mut registry = self.registry.borrow_mut();
        if let Some(reg) = registry.iter_mut().find(|r| r.filter == filter) {
            if !reg.handlers.iter().any(|h| Rc::ptr_eq(h, &handler)) {
                reg.handlers.push(handler);
            }
        } else {
            registry.push(Registration {
                filter,
                handlers: vec![handler],
            });
        }
    }

    /// Remove `handler` from `filter`. When the last handler for a filter is
    /// removed the filter key itself is dropped, so the registry does not
    /// accumulate dead keys.
    pub fn unsubscribe(&self, filter: TopicFilter, handler: &Handler) {
        let mut registry = self.registry.borrow_mut();
        if let Some(pos) = registry.iter().position(|r| r.filter == filter) {
            registry[pos].handlers.retain(|h| !Rc::ptr_eq(h, handler));
            if registry[pos].handlers.is_empty() {
                registry.remove(pos);
            }
        }
    }

    /// Number of filters with at least one live handler.
    pub fn registered_filters(&self) -> usize {
        self.registry.borrow().len()
    }

    /// Broadcast `event` to every matching subscriber, wildcard subscribers
    /// first, then the rest, each group in registration order. An emission
    /// with no matching subscribers is a silent no-op.
    pub fn emit(&self, event: AppEvent) {
        self.queue.borrow_mut().push_back(event);
        if self.draining.get() {
            return;
        }

        self.draining.set(true);
        loop {
            let next = self.queue.borrow_mut().pop_front();
            let Some(event) = next else { break };
            self.dispatch(&event);
        }
        self.draining.set(false);
    }

    fn dispatch(&self, event: &AppEvent) {
        let topic = event.topic();
        tracing::trace!(topic = topic.as_str(), "dispatch");

        // Snapshot the matching handlers up front: subscriptions added or
        // removed by a handler take effect from the next emission.
        let matching: Vec<Handler> = {
            let registry = self.registry.borrow();
            let wildcard = registry
                .iter()
                .filter(|r| r.filter == TopicFilter::Any)
                .flat_map(|r| r.handlers.iter().cloned());
            let rest = registry
                .iter()
                .filter(|r| r.filter != TopicFilter::Any && r.filter.matches(topic))
                .flat_map(|r| r.handlers.iter().cloned());
            wildcard.chain(rest).collect()
        };

        for handler in matching {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| handler(event)));
            if outcome.is_err() {
                tracing::error!(
                    topic = topic.as_str(),
                    "event handler panicked, continuing with remaining handlers"
                );
            }
        }
    }
}
