//! Shared test utilities and mock collaborators.

#![allow(dead_code, unused_imports)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use storefront::api::{ApiError, CatalogPage, OrderPayload, OrderReceipt, ShopApi};
use storefront::model::Product;
use storefront::view::{RenderData, ViewPort};

/// Build a product with the given id and price.
pub fn product(id: &str, price: Option<u64>) -> Product {
    Product {
        id: id.to_string(),
        title: format!("Product {id}"),
        description: format!("Description of {id}"),
        image: format!("/{id}.svg"),
        category: "other".to_string(),
        price,
    }
}

// -- View spy -----------------------------------------------------------------

/// View port that records every render call.
#[derive(Default)]
pub struct RecordingView {
    pub renders: Vec<RenderData>,
    pub closes: usize,
}

impl RecordingView {
    pub fn shared() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::default()))
    }
}

impl ViewPort for RecordingView {
    fn render(&mut self, data: RenderData) {
        self.renders.push(data);
    }

    fn close_modal(&mut self) {
        self.closes += 1;
    }
}

/// The last render call, if any.
pub fn last_render(view: &Rc<RefCell<RecordingView>>) -> Option<RenderData> {
    view.borrow().renders.last().cloned()
}

/// How many recorded renders satisfy `pred`.
pub fn renders_matching(
    view: &Rc<RefCell<RecordingView>>,
    pred: impl Fn(&RenderData) -> bool,
) -> usize {
    view.borrow().renders.iter().filter(|r| pred(r)).count()
}

// -- Shop API mock ------------------------------------------------------------

/// Scriptable [`ShopApi`]: serves a fixed catalog and queued order results,
/// recording every submitted payload.
pub struct ScriptedApi {
    pub catalog: Vec<Product>,
    pub fail_catalog: bool,
    pub submitted: RefCell<Vec<OrderPayload>>,
    pub order_results: RefCell<VecDeque<Result<OrderReceipt, ApiError>>>,
}

impl ScriptedApi {
    pub fn with_catalog(catalog: Vec<Product>) -> Self {
        Self {
            catalog,
            fail_catalog: false,
            submitted: RefCell::new(Vec::new()),
            order_results: RefCell::new(VecDeque::new()),
        }
    }

    pub fn failing_catalog() -> Self {
        Self {
            fail_catalog: true,
            ..Self::with_catalog(Vec::new())
        }
    }

    pub fn queue_order_result(&self, result: Result<OrderReceipt, ApiError>) {
        self.order_results.borrow_mut().push_back(result);
    }
}

impl ShopApi for ScriptedApi {
    async fn fetch_catalog(&self) -> Result<CatalogPage, ApiError> {
        if self.fail_catalog {
            return Err(ApiError::Rejected {
                status: 500,
                message: "Shop is down".to_string(),
            });
        }
        Ok(CatalogPage {
            total: self.catalog.len(),
            items: self.catalog.clone(),
        })
    }

    async fn submit_order(&self, order: &OrderPayload) -> Result<OrderReceipt, ApiError> {
        self.submitted.borrow_mut().push(order.clone());
        // Default to a receipt echoing the submitted total.
        self.order_results
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| {
                Ok(OrderReceipt {
                    id: "order-1".to_string(),
                    total: order.total,
                })
            })
    }
}
