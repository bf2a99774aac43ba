//! The application event union and its topic discriminants.
//!
//! Every interaction in the system is one of these events: UI intent
//! (clicks and field edits forwarded by views), model change notifications,
//! and the re-entry points for asynchronous network results. Payloads are
//! typed per variant so dispatch is exhaustively checked.

use crate::api::OrderReceipt;
use crate::model::{BasketSnapshot, Payment, Product};

/// A single event flowing through the [`EventBus`](crate::bus::EventBus).
///
/// Variant names map 1:1 to the literal event names listed on [`Topic`];
/// the literal names appear in logs and wildcard delivery only, routing is
/// by typed topic.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Catalog fetch completed; carries the fetched product list.
    CatalogLoaded { items: Vec<Product> },
    /// The catalog model replaced its product list.
    CatalogChanged,
    /// UI intent: a product card was selected for preview.
    ProductSelect { id: String },
    /// The catalog selected a product for preview.
    ProductSelected { item: Product },
    /// UI intent: add a product to the basket.
    ProductAdd { id: String },
    /// UI intent: remove a product from the basket.
    ProductRemove { id: String },
    /// The basket mutated; carries a full snapshot.
    BasketChanged { snapshot: BasketSnapshot },
    /// UI intent: open the basket screen.
    BasketOpen,
    /// UI intent: start checkout from the basket.
    OrderStart,
    /// Order form field edit: payment method chosen.
    OrderPaymentChange { payment: Payment },
    /// Order form field edit: shipping address.
    OrderAddressChange { address: String },
    /// Order form submitted with its current field values.
    OrderSubmit {
        payment: Option<Payment>,
        address: String,
    },
    /// Contact form field edit: email.
    ContactsEmailChange { email: String },
    /// Contact form field edit: phone.
    ContactsPhoneChange { phone: String },
    /// Contact form submitted with its current field values.
    ContactsSubmit { email: String, phone: String },
    /// A buyer field changed value.
    BuyerChanged,
    /// Order submission succeeded; carries the server receipt.
    OrderConfirmed { receipt: OrderReceipt },
    /// Order submission failed.
    OrderFailed { message: String },
    /// UI intent: close the confirmation screen.
    OrderSuccess,
    /// UI intent: dismiss whatever modal is open.
    ModalClose,
    /// A recoverable failure to surface to the user.
    Error { message: String },
}

impl AppEvent {
    /// The topic this event is emitted under.
    pub fn topic(&self) -> Topic {
        match self {
            AppEvent::CatalogLoaded { .. } => Topic::CatalogLoaded,
            AppEvent::CatalogChanged => Topic::CatalogChanged,
            AppEvent::ProductSelect { .. } => Topic::ProductSelect,
            AppEvent::ProductSelected { .. } => Topic::ProductSelected,
            AppEvent::ProductAdd { .. } => Topic::ProductAdd,
            AppEvent::ProductRemove { .. } => Topic::ProductRemove,
            AppEvent::BasketChanged { .. } => Topic::BasketChanged,
            AppEvent::BasketOpen => Topic::BasketOpen,
            AppEvent::OrderStart => Topic::OrderStart,
            AppEvent::OrderPaymentChange { .. } => Topic::OrderPaymentChange,
            AppEvent::OrderAddressChange { .. } => Topic::OrderAddressChange,
            AppEvent::OrderSubmit { .. } => Topic::OrderSubmit,
            AppEvent::ContactsEmailChange { .. } => Topic::ContactsEmailChange,
            AppEvent::ContactsPhoneChange { .. } => Topic::ContactsPhoneChange,
            AppEvent::ContactsSubmit { .. } => Topic::ContactsSubmit,
            AppEvent::BuyerChanged => Topic::BuyerChanged,
            AppEvent::OrderConfirmed { .. } => Topic::OrderConfirmed,
            AppEvent::OrderFailed { .. } => Topic::OrderFailed,
            AppEvent::OrderSuccess => Topic::OrderSuccess,
            AppEvent::ModalClose => Topic::ModalClose,
            AppEvent::Error { .. } => Topic::Error,
        }
    }
}

/// Fieldless discriminant of [`AppEvent`], used as the routing key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    CatalogLoaded,
    CatalogChanged,
    ProductSelect,
    ProductSelected,
    ProductAdd,
    ProductRemove,
    BasketChanged,
    BasketOpen,
    OrderStart,
    OrderPaymentChange,
    OrderAddressChange,
    OrderSubmit,
    ContactsEmailChange,
    ContactsPhoneChange,
    ContactsSubmit,
    BuyerChanged,
    OrderConfirmed,
    OrderFailed,
    OrderSuccess,
    ModalClose,
    Error,
}

impl Topic {
    /// Literal event name, used in logs and carried alongside wildcard
    /// deliveries.
    pub fn as_str(self) -> &'static str {
        match self {
            Topic::CatalogLoaded => "catalog:loaded",
            Topic::CatalogChanged => "catalog:changed",
            Topic::ProductSelect => "product:select",
            Topic::ProductSelected => "product:selected",
            Topic::ProductAdd => "product:add",
            Topic::ProductRemove => "product:remove",
            Topic::BasketChanged => "basket:changed",
            Topic::BasketOpen => "basket:open",
            Topic::OrderStart => "order:start",
            Topic::OrderPaymentChange => "order.payment:change",
            Topic::OrderAddressChange => "order.address:change",
            Topic::OrderSubmit => "order:submit",
            Topic::ContactsEmailChange => "contacts.email:change",
            Topic::ContactsPhoneChange => "contacts.phone:change",
            Topic::ContactsSubmit => "contacts:submit",
            Topic::BuyerChanged => "buyer:changed",
            Topic::OrderConfirmed => "order:confirmed",
            Topic::OrderFailed => "order:failed",
            Topic::OrderSuccess => "order:success",
            Topic::ModalClose => "modal:close",
            Topic::Error => "error",
        }
    }
}
