//! The checkout orchestrator.
//!
//! Subscribes to UI-originated and model-originated events, keeps the
//! active-screen marker, runs the transition table, and renders through the
//! view port. Network operations are requested by pushing commands onto the
//! shared queue; the session runtime performs them and feeds the results
//! back in as events.

use std::cell::RefCell;
use std::rc::Rc;

use crate::api::{OrderPayload, OrderReceipt};
use crate::bus::{AppEvent, EventBus, FormScope, Topic, TopicFilter};
use crate::checkout::screen::{
    can_buy, can_checkout, contacts_step_clear, order_step_clear, transition, Screen, Trigger,
};
use crate::checkout::{ApiCommand, CommandQueue};
use crate::model::{Basket, Buyer, Catalog, Payment, Product};
use crate::view::{
    BasketLineView, BasketPage, ContactFormPage, OrderFormPage, PreviewCard, ProductCard,
    RenderData, ViewPort,
};

/// Owns the event wiring for the whole browse → preview → basket →
/// order form → contact form → confirmation flow.
pub struct Checkout {
    inner: Rc<Inner>,
}

struct Inner {
    events: Rc<EventBus>,
    catalog: Rc<RefCell<Catalog>>,
    basket: Rc<RefCell<Basket>>,
    buyer: Rc<RefCell<Buyer>>,
    view: Rc<RefCell<dyn ViewPort>>,
    commands: CommandQueue,
    screen: RefCell<Screen>,
}

impl Checkout {
    /// Build the orchestrator and register all of its subscriptions.
    pub fn new(
        events: Rc<EventBus>,
        catalog: Rc<RefCell<Catalog>>,
        basket: Rc<RefCell<Basket>>,
        buyer: Rc<RefCell<Buyer>>,
        view: Rc<RefCell<dyn ViewPort>>,
        commands: CommandQueue,
    ) -> Self {
        let inner = Rc::new(Inner {
            events,
            catalog,
            basket,
            buyer,
            view,
            commands,
            screen: RefCell::new(Screen::Gallery),
        });
        wire(&inner);
        Self { inner }
    }

    /// The screen currently shown.
    pub fn screen(&self) -> Screen {
        self.inner.screen.borrow().clone()
    }
}

fn exact(topic: Topic) -> TopicFilter {
    TopicFilter::Exact(topic)
}

/// Subscribe a method of `Inner` under `filter`.
fn on(inner: &Rc<Inner>, filter: TopicFilter, f: impl Fn(&Inner, &AppEvent) + 'static) {
    let inner = Rc::clone(inner);
    let events = Rc::clone(&inner.events);
    events.subscribe(filter, Rc::new(move |event| f(&inner, event)));
}

fn wire(inner: &Rc<Inner>) {
    on(inner, exact(Topic::CatalogLoaded), |i, e| {
        if let AppEvent::CatalogLoaded { items } = e {
            i.on_catalog_loaded(items);
        }
    });
    on(inner, exact(Topic::CatalogChanged), |i, _| {
        i.on_catalog_changed();
    });
    on(inner, exact(Topic::ProductSelect), |i, e| {
        if let AppEvent::ProductSelect { id } = e {
            i.on_product_select(id);
        }
    });
    on(inner, exact(Topic::ProductSelected), |i, e| {
        if let AppEvent::ProductSelected { item } = e {
            i.on_product_selected(item);
        }
    });
    on(inner, exact(Topic::ProductAdd), |i, e| {
        if let AppEvent::ProductAdd { id } = e {
            i.on_product_add(id);
        }
    });
    on(inner, exact(Topic::ProductRemove), |i, e| {
        if let AppEvent::ProductRemove { id } = e {
            i.on_product_remove(id);
        }
    });
    on(inner, exact(Topic::BasketChanged), |i, e| {
        if let AppEvent::BasketChanged { snapshot } = e {
            i.on_basket_changed(snapshot.count);
        }
    });
    on(inner, exact(Topic::BasketOpen), |i, _| {
        i.on_basket_open();
    });
    on(inner, exact(Topic::OrderStart), |i, _| {
        i.on_order_start();
    });
    on(inner, TopicFilter::FieldChange(FormScope::Order), |i, e| {
        i.on_order_field_change(e);
    });
    on(inner, exact(Topic::OrderSubmit), |i, e| {
        if let AppEvent::OrderSubmit { payment, address } = e {
            i.on_order_submit(*payment, address);
        }
    });
    on(inner, TopicFilter::FieldChange(FormScope::Contacts), |i, e| {
        i.on_contacts_field_change(e);
    });
    on(inner, exact(Topic::ContactsSubmit), |i, e| {
        if let AppEvent::ContactsSubmit { email, phone } = e {
            i.on_contacts_submit(email, phone);
        }
    });
    on(inner, exact(Topic::BuyerChanged), |i, _| {
        i.on_buyer_changed();
    });
    on(inner, exact(Topic::OrderConfirmed), |i, e| {
        if let AppEvent::OrderConfirmed { receipt } = e {
            i.on_order_confirmed(receipt);
        }
    });
    on(inner, exact(Topic::OrderFailed), |i, e| {
        if let AppEvent::OrderFailed { message } = e {
            i.on_order_failed(message);
        }
    });
    on(inner, exact(Topic::OrderSuccess), |i, _| {
        i.on_close();
    });
    on(inner, exact(Topic::ModalClose), |i, _| {
        i.on_close();
    });
    on(inner, exact(Topic::Error), |i, e| {
        if let AppEvent::Error { message } = e {
            i.on_error(message);
        }
    });
}

impl Inner {
    // -- catalog ---------------------------------------------------------

    fn on_catalog_loaded(&self, items: &[Product]) {
        self.catalog.borrow_mut().replace_all(items.to_vec());
    }

    fn on_catalog_changed(&self) {
        let cards: Vec<ProductCard> = self
            .catalog
            .borrow()
            .items()
            .into_iter()
            .map(card_of)
            .collect();
        self.view.borrow_mut().render(RenderData::Gallery { cards });
    }

    fn on_product_select(&self, id: &str) {
        if self.is_previewing(id) {
            // Re-clicking the open preview must not re-render it.
            return;
        }
        let product = self.catalog.borrow().lookup(id);
        let Some(product) = product else {
            tracing::debug!(id, "select for a product not in the catalog, ignoring");
            return;
        };
        self.catalog.borrow_mut().select_for_preview(product);
    }

    fn on_product_selected(&self, item: &Product) {
        let trigger = Trigger::Preview {
            product_id: item.id.clone(),
            known: true,
        };
        if let Some(next) = self.apply(&trigger) {
            self.set_screen(next);
            self.render_preview(item);
        }
    }

    // -- basket ----------------------------------------------------------

    fn on_product_add(&self, id: &str) {
        let product = self.catalog.borrow().lookup(id);
        let Some(product) = product else {
            tracing::debug!(id, "add for a product not in the catalog, ignoring");
            return;
        };
        if !can_buy(&product) {
            tracing::debug!(id, "product is not for sale, ignoring add");
            return;
        }
        self.basket.borrow_mut().add(product);
        self.close_if_previewing(id);
    }

    fn on_product_remove(&self, id: &str) {
        self.basket.borrow_mut().remove(id);
        self.close_if_previewing(id);
    }

    fn on_basket_changed(&self, count: usize) {
        self.view
            .borrow_mut()
            .render(RenderData::BasketCounter { count });
        if *self.screen.borrow() == Screen::Basket {
            self.render_basket();
        }
    }

    fn on_basket_open(&self) {
        if let Some(next) = self.apply(&Trigger::OpenBasket) {
            self.set_screen(next);
            self.render_basket();
        }
    }

    // -- order form ------------------------------------------------------

    fn on_order_start(&self) {
        let lines = self.basket.borrow().count();
        match self.apply(&Trigger::StartCheckout { lines }) {
            Some(next) => {
                self.set_screen(next);
                self.render_order_form();
            }
            None => tracing::debug!(lines, "checkout not started"),
        }
    }

    fn on_order_field_change(&self, event: &AppEvent) {
        match event {
            AppEvent::OrderPaymentChange { payment } => {
                self.buyer.borrow_mut().set_payment(*payment);
            }
            AppEvent::OrderAddressChange { address } => {
                self.buyer.borrow_mut().set_address(address.clone());
            }
            _ => {}
        }
    }

    fn on_order_submit(&self, payment: Option<Payment>, address: &str) {
        {
            let mut buyer = self.buyer.borrow_mut();
            if let Some(payment) = payment {
                buyer.set_payment(payment);
            }
            buyer.set_address(address.to_string());
        }

        let report = self.buyer.borrow().check_validity();
        let trigger = Trigger::SubmitOrder {
            valid: order_step_clear(&report),
        };
        match self.apply(&trigger) {
            Some(next) => {
                self.set_screen(next);
                self.render_contact_form();
            }
            None => {
                if *self.screen.borrow() == Screen::OrderForm {
                    self.render_order_form();
                }
            }
        }
    }

    // -- contact form ----------------------------------------------------

    fn on_contacts_field_change(&self, event: &AppEvent) {
        match event {
            AppEvent::ContactsEmailChange { email } => {
                self.buyer.borrow_mut().set_email(email.clone());
            }
            AppEvent::ContactsPhoneChange { phone } => {
                self.buyer.borrow_mut().set_phone(phone.clone());
            }
            _ => {}
        }
    }

    fn on_contacts_submit(&self, email: &str, phone: &str) {
        {
            let mut buyer = self.buyer.borrow_mut();
            buyer.set_email(email.to_string());
            buyer.set_phone(phone.to_string());
        }

        if *self.screen.borrow() != Screen::ContactForm {
            tracing::debug!("contacts submit outside the contact form, ignoring");
            return;
        }

        let report = self.buyer.borrow().check_validity();
        if !contacts_step_clear(&report) {
            self.render_contact_form();
            return;
        }

        let payload =
            OrderPayload::compose(&self.buyer.borrow().snapshot(), &self.basket.borrow().snapshot());
        match payload {
            Some(payload) => {
                self.commands
                    .borrow_mut()
                    .push_back(ApiCommand::SubmitOrder(payload));
            }
            None => tracing::debug!("no payment method set, order not submitted"),
        }
    }

    fn on_buyer_changed(&self) {
        let screen = self.screen.borrow().clone();
        match screen {
            Screen::OrderForm => self.render_order_form(),
            Screen::ContactForm => self.render_contact_form(),
            _ => {}
        }
    }

    // -- submission results ----------------------------------------------

    fn on_order_confirmed(&self, receipt: &OrderReceipt) {
        match self.apply(&Trigger::Confirmed) {
            Some(next) => {
                tracing::info!(order = %receipt.id, total = receipt.total, "order placed");
                self.basket.borrow_mut().clear();
                self.buyer.borrow_mut().clear();
                self.set_screen(next);
                self.view
                    .borrow_mut()
                    .render(RenderData::Success {
                        total: receipt.total,
                    });
            }
            None => tracing::debug!(order = %receipt.id, "late confirmation, ignoring"),
        }
    }

    fn on_order_failed(&self, message: &str) {
        tracing::warn!(message, "order submission failed");
        // The contact form stays up so the buyer can retry.
        self.events.emit(AppEvent::Error {
            message: message.to_string(),
        });
    }

    fn on_close(&self) {
        if self.apply(&Trigger::Close).is_some() {
            self.set_screen(Screen::Gallery);
            self.catalog.borrow_mut().clear_preview();
            self.view.borrow_mut().close_modal();
        }
    }

    fn on_error(&self, message: &str) {
        tracing::error!(message, "application error");
    }

    // -- helpers ---------------------------------------------------------

    fn apply(&self, trigger: &Trigger) -> Option<Screen> {
        transition(&self.screen.borrow(), trigger)
    }

    fn set_screen(&self, next: Screen) {
        *self.screen.borrow_mut() = next;
    }

    fn is_previewing(&self, id: &str) -> bool {
        matches!(&*self.screen.borrow(), Screen::Preview { product_id } if product_id == id)
    }

    /// Acting on a product from its open preview dismisses the preview.
    fn close_if_previewing(&self, id: &str) {
        if self.is_previewing(id) {
            self.set_screen(Screen::Gallery);
            self.catalog.borrow_mut().clear_preview();
            self.view.borrow_mut().close_modal();
        }
    }

    // -- renders ---------------------------------------------------------

    fn render_preview(&self, product: &Product) {
        let in_basket = self.basket.borrow().has(&product.id);
        self.view.borrow_mut().render(RenderData::Preview(PreviewCard {
            card: card_of(product.clone()),
            description: product.description.clone(),
            in_basket,
            can_buy: can_buy(product),
        }));
    }

    fn render_basket(&self) {
        let snapshot = self.basket.borrow().snapshot();
        let lines = snapshot
            .items
            .iter()
            .enumerate()
            .map(|(i, p)| BasketLineView {
                index: i + 1,
                id: p.id.clone(),
                title: p.title.clone(),
                price: p.price,
            })
            .collect();
        self.view.borrow_mut().render(RenderData::Basket(BasketPage {
            lines,
            total: snapshot.total,
            can_checkout: can_checkout(snapshot.count),
        }));
    }

    fn render_order_form(&self) {
        let (info, report) = {
            let buyer = self.buyer.borrow();
            (buyer.snapshot(), buyer.check_validity())
        };
        let errors = report.order_step();
        self.view.borrow_mut().render(RenderData::OrderForm(OrderFormPage {
            payment: info.payment,
            address: info.address,
            valid: errors.is_empty(),
            errors: errors.into_iter().map(str::to_string).collect(),
        }));
    }

    fn render_contact_form(&self) {
        let (info, report) = {
            let buyer = self.buyer.borrow();
            (buyer.snapshot(), buyer.check_validity())
        };
        let errors = report.contacts_step();
        self.view
            .borrow_mut()
            .render(RenderData::ContactForm(ContactFormPage {
                email: info.email,
                phone: info.phone,
                valid: errors.is_empty(),
                errors: errors.into_iter().map(str::to_string).collect(),
            }));
    }
}

fn card_of(product: Product) -> ProductCard {
    ProductCard {
        id: product.id,
        title: product.title,
        category: product.category,
        image: product.image,
        price: product.price,
    }
}
