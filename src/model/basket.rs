//! Shopping basket model.

use std::rc::Rc;

use crate::bus::{AppEvent, EventBus};
use crate::model::Product;

/// The state carried by every `basket:changed` emission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasketSnapshot {
    pub items: Vec<Product>,
    pub total: u64,
    pub count: usize,
}

/// Holds the products the buyer intends to purchase.
///
/// One line per product id; there is no quantity concept. Lives for the
/// whole session and is cleared on successful order submission.
///
/// Change events fire only on actual mutation: adding a present id or
/// removing an absent one announces nothing.
pub struct Basket {
    events: Rc<EventBus>,
    items: Vec<Product>,
}

impl Basket {
    pub fn new(events: Rc<EventBus>) -> Self {
        Self {
            events,
            items: Vec::new(),
        }
    }

    /// Defensive copy of the basket lines, in insertion order.
    pub fn items(&self) -> Vec<Product> {
        self.items.clone()
    }

    /// Append `product` unless its id is already present.
    pub fn add(&mut self, product: Product) {
        if self.has(&product.id) {
            return;
        }
        self.items.push(product);
        self.announce();
    }

    /// Remove the line with `id`, if any.
    pub fn remove(&mut self, id: &str) {
        let before = self.items.len();
        self.items.retain(|p| p.id != id);
        if self.items.len() != before {
            self.announce();
        }
    }

    /// Empty the basket.
    pub fn clear(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.items.clear();
        self.announce();
    }

    /// Sum of the priced lines; not-for-sale lines contribute zero.
    pub fn total(&self) -> u64 {
        self.items.iter().filter_map(|p| p.price).sum()
    }

    /// Number of lines.
    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn has(&self, id: &str) -> bool {
        self.items.iter().any(|p| p.id == id)
    }

    pub fn snapshot(&self) -> BasketSnapshot {
        BasketSnapshot {
            items: self.items(),
            total: self.total(),
            count: self.count(),
        }
    }

    fn announce(&self) {
        self.events.emit(AppEvent::BasketChanged {
            snapshot: self.snapshot(),
        });
    }
}
