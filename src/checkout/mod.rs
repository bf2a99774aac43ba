//! Checkout flow: screen state machine plus the orchestrator that drives it.

mod orchestrator;
mod screen;

pub use orchestrator::Checkout;
pub use screen::{
    can_buy, can_checkout, contacts_step_clear, order_step_clear, transition, Screen, Trigger,
};

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::api::OrderPayload;

/// A network operation the orchestrator wants performed.
///
/// The orchestrator never awaits; it pushes commands here and the session
/// runtime executes them between turns, re-emitting the outcomes as events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCommand {
    FetchCatalog,
    SubmitOrder(OrderPayload),
}

/// The orchestrator-to-runtime command channel.
pub type CommandQueue = Rc<RefCell<VecDeque<ApiCommand>>>;
