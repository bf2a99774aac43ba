//! Event-driven storefront core.
//!
//! A catalog, a basket, a buyer form and an order submission flow,
//! coordinated entirely through a synchronous publish/subscribe bus. The
//! checkout sequence (browse → preview → basket → order form → contact
//! form → confirmation) is an explicit state machine with validation gates
//! between steps; the view layer and the network are external collaborators
//! behind the [`view::ViewPort`] and [`api::ShopApi`] ports.

pub mod api;
pub mod bus;
pub mod checkout;
pub mod config;
pub mod logging;
pub mod model;
pub mod runtime;
pub mod view;
