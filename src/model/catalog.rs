//! Product catalog model.

use std::rc::Rc;

use crate::bus::{AppEvent, EventBus};
use crate::model::Product;

/// Holds the product list and the currently previewed product.
///
/// The list is populated once from the network result and replaced wholesale
/// on reload; no other component may mutate it. The preview marker is
/// convenience state for the orchestrator, not authoritative.
pub struct Catalog {
    events: Rc<EventBus>,
    items: Vec<Product>,
    preview: Option<Product>,
}

impl Catalog {
    pub fn new(events: Rc<EventBus>) -> Self {
        Self {
            events,
            items: Vec::new(),
            preview: None,
        }
    }

    /// Replace the whole product list and announce `catalog:changed`.
    pub fn replace_all(&mut self, items: Vec<Product>) {
        self.items = items;
        self.events.emit(AppEvent::CatalogChanged);
    }

    /// Defensive copy of the product list.
    pub fn items(&self) -> Vec<Product> {
        self.items.clone()
    }

    /// Find a product by id. Absent ids are not an error.
    pub fn lookup(&self, id: &str) -> Option<Product> {
        self.items.iter().find(|p| p.id == id).cloned()
    }

    /// Mark `product` as the current preview and announce
    /// `product:selected` with the item.
    pub fn select_for_preview(&mut self, product: Product) {
        self.preview = Some(product.clone());
        self.events.emit(AppEvent::ProductSelected { item: product });
    }

    pub fn current_preview(&self) -> Option<Product> {
        self.preview.clone()
    }

    /// Drop the preview marker. No announcement: closing a preview is a
    /// screen concern, not a catalog change.
    pub fn clear_preview(&mut self) {
        self.preview = None;
    }
}
