//! Catalog product.

use serde::{Deserialize, Serialize};

/// One product as served by the shop API.
///
/// Immutable once loaded. `price: None` means the product is not for sale:
/// it can be browsed and previewed but never added to a basket, and views
/// must render a non-purchasable affordance for it.
///
/// `image` is a path relative to the CDN base; prefixing the base is the
/// view layer's job, not the core's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image: String,
    pub category: String,
    pub price: Option<u64>,
}
