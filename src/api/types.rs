//! Wire types for the shop API.

use serde::{Deserialize, Serialize};

use crate::model::{BasketSnapshot, BuyerInfo, Payment, Product};

/// Response of `GET /product`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogPage {
    pub total: usize,
    pub items: Vec<Product>,
}

/// Body of `POST /order`.
///
/// Built at submission time from the basket and the buyer; never persisted
/// independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderPayload {
    pub payment: Payment,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub total: u64,
    /// Product ids in basket order.
    pub items: Vec<String>,
}

impl OrderPayload {
    /// Compose the payload from the current buyer and basket state.
    ///
    /// Returns `None` when no payment method is set; the orchestrator's
    /// validity gates make that unreachable in the normal flow, but a
    /// missing method is a guarded no-op rather than a panic.
    pub fn compose(buyer: &BuyerInfo, basket: &BasketSnapshot) -> Option<Self> {
        let payment = buyer.payment?;
        Some(Self {
            payment,
            email: buyer.email.clone(),
            phone: buyer.phone.clone(),
            address: buyer.address.clone(),
            total: basket.total,
            items: basket.items.iter().map(|p| p.id.clone()).collect(),
        })
    }
}

/// Success response of `POST /order`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderReceipt {
    pub id: String,
    pub total: u64,
}

/// Error body the server sends with non-2xx statuses.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: String,
}
