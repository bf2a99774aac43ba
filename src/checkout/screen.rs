//! Screen state machine: states, triggers, guards, transition table.
//!
//! The source system encoded this machine implicitly, as whichever event
//! handlers happened to be wired up. Here it is explicit: [`Screen`] is the
//! state, [`Trigger`] the alphabet, [`transition`] the table, and the guards
//! are standalone pure predicates.

use crate::model::{Product, ValidityReport};

/// Which surface currently has focus. `Gallery` is the resting state with
/// no modal open; every other state is a modal over the gallery.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Gallery,
    Preview {
        product_id: String,
    },
    Basket,
    OrderForm,
    ContactForm,
    Success,
}

/// An occurrence the state machine reacts to. Guard inputs are resolved by
/// the orchestrator when it builds the trigger, so the table itself stays a
/// pure function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    /// A product was selected for preview. `known` is false when the id was
    /// not found in the catalog.
    Preview { product_id: String, known: bool },
    /// The basket icon was clicked.
    OpenBasket,
    /// Checkout was started from the basket with `lines` lines in it.
    StartCheckout { lines: usize },
    /// The order form was submitted; `valid` is the order-step validity.
    SubmitOrder { valid: bool },
    /// The server confirmed the submitted order.
    Confirmed,
    /// Close/escape/overlay click.
    Close,
}

/// Non-empty-basket guard on starting checkout.
pub fn can_checkout(lines: usize) -> bool {
    lines > 0
}

/// Not-for-sale products can never be added to a basket.
pub fn can_buy(product: &Product) -> bool {
    product.price.is_some()
}

/// The order form advances only when payment and address are clean.
pub fn order_step_clear(report: &ValidityReport) -> bool {
    report.order_step().is_empty()
}

/// The contact form submits only when email and phone are clean.
pub fn contacts_step_clear(report: &ValidityReport) -> bool {
    report.contacts_step().is_empty()
}

/// The transition table.
///
/// Returns the screen to move to, or `None` when nothing happens: a guard
/// failed, the trigger does not apply to the current screen, or the target
/// equals the current screen (re-opening the already-open surface must not
/// re-render).
pub fn transition(current: &Screen, trigger: &Trigger) -> Option<Screen> {
    let next = match trigger {
        Trigger::Preview { known: false, .. } => return None,
        Trigger::Preview { product_id, .. } => Screen::Preview {
            product_id: product_id.clone(),
        },
        Trigger::OpenBasket => Screen::Basket,
        Trigger::StartCheckout { lines } => {
            if *current != Screen::Basket || !can_checkout(*lines) {
                return None;
            }
            Screen::OrderForm
        }
        Trigger::SubmitOrder { valid } => {
            if *current != Screen::OrderForm || !valid {
                return None;
            }
            Screen::ContactForm
        }
        Trigger::Confirmed => {
            if *current != Screen::ContactForm {
                return None;
            }
            Screen::Success
        }
        Trigger::Close => Screen::Gallery,
    };

    if next == *current { None } else { Some(next) }
}
