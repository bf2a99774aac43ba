//! View layer port.
//!
//! The orchestrator treats each view as a function from display data to a
//! rendered surface. The structs here carry snapshots only (titles, prices,
//! precomputed flags and error messages), never references into the models,
//! so a view cannot mutate anything it was handed.

mod console;

pub use console::ConsoleView;

use crate::model::Payment;

/// One product card in the gallery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCard {
    pub id: String,
    pub title: String,
    pub category: String,
    /// CDN-relative image path; the view prefixes its CDN base.
    pub image: String,
    /// `None` renders as "not for sale".
    pub price: Option<u64>,
}

/// The product preview modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewCard {
    pub card: ProductCard,
    pub description: String,
    pub in_basket: bool,
    pub can_buy: bool,
}

/// One line of the basket screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasketLineView {
    /// 1-based position.
    pub index: usize,
    pub id: String,
    pub title: String,
    pub price: Option<u64>,
}

/// The basket modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasketPage {
    pub lines: Vec<BasketLineView>,
    pub total: u64,
    pub can_checkout: bool,
}

/// The payment/address form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderFormPage {
    pub payment: Option<Payment>,
    pub address: String,
    pub errors: Vec<String>,
    pub valid: bool,
}

/// The email/phone form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactFormPage {
    pub email: String,
    pub phone: String,
    pub errors: Vec<String>,
    pub valid: bool,
}

/// Everything the orchestrator can ask a view to draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderData {
    /// The product gallery (the resting screen).
    Gallery { cards: Vec<ProductCard> },
    /// The basket line counter shown outside any modal.
    BasketCounter { count: usize },
    Preview(PreviewCard),
    Basket(BasketPage),
    OrderForm(OrderFormPage),
    ContactForm(ContactFormPage),
    /// Order confirmation, with the server-returned total.
    Success { total: u64 },
}

/// The rendering collaborator.
pub trait ViewPort {
    fn render(&mut self, data: RenderData);

    /// Dismiss whatever modal surface is currently shown.
    fn close_modal(&mut self);
}
