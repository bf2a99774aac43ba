mod common;

use std::cell::RefCell;
use std::rc::Rc;

use storefront::bus::{AppEvent, EventBus, FormScope, Handler, Topic, TopicFilter};
use storefront::model::Payment;

/// Handler that appends a tag to a shared log on every delivery.
fn tagging(log: &Rc<RefCell<Vec<&'static str>>>, tag: &'static str) -> Handler {
    let log = Rc::clone(log);
    Rc::new(move |_event: &AppEvent| log.borrow_mut().push(tag))
}

#[test]
fn emit_without_subscribers_is_a_silent_noop() {
    let bus = EventBus::new();
    bus.emit(AppEvent::BasketOpen);
    assert_eq!(bus.registered_filters(), 0);
}

#[test]
fn subscribers_fire_in_registration_order() {
    let bus = EventBus::new();
    let log = Rc::new(RefCell::new(Vec::new()));
    bus.subscribe(TopicFilter::Exact(Topic::BasketOpen), tagging(&log, "first"));
    bus.subscribe(TopicFilter::Exact(Topic::BasketOpen), tagging(&log, "second"));

    bus.emit(AppEvent::BasketOpen);
    assert_eq!(*log.borrow(), vec!["first", "second"]);
}

#[test]
fn subscribing_the_same_handler_twice_fires_once() {
    let bus = EventBus::new();
    let log = Rc::new(RefCell::new(Vec::new()));
    let handler = tagging(&log, "once");
    bus.subscribe(TopicFilter::Exact(Topic::BasketOpen), Rc::clone(&handler));
    bus.subscribe(TopicFilter::Exact(Topic::BasketOpen), handler);

    bus.emit(AppEvent::BasketOpen);
    assert_eq!(log.borrow().len(), 1);
}

#[test]
fn unsubscribed_handler_stops_firing() {
    let bus = EventBus::new();
    let log = Rc::new(RefCell::new(Vec::new()));
    let handler = tagging(&log, "gone");
    bus.subscribe(TopicFilter::Exact(Topic::BasketOpen), Rc::clone(&handler));

    bus.emit(AppEvent::BasketOpen);
    bus.unsubscribe(TopicFilter::Exact(Topic::BasketOpen), &handler);
    bus.emit(AppEvent::BasketOpen);

    assert_eq!(log.borrow().len(), 1);
}

#[test]
fn removing_the_last_handler_drops_the_filter_key() {
    let bus = EventBus::new();
    let log = Rc::new(RefCell::new(Vec::new()));
    let handler = tagging(&log, "x");
    bus.subscribe(TopicFilter::Exact(Topic::BasketOpen), Rc::clone(&handler));
    assert_eq!(bus.registered_filters(), 1);

    bus.unsubscribe(TopicFilter::Exact(Topic::BasketOpen), &handler);
    assert_eq!(bus.registered_filters(), 0);
}

#[test]
fn field_change_group_receives_both_order_fields_only() {
    let bus = EventBus::new();
    let log = Rc::new(RefCell::new(Vec::new()));
    bus.subscribe(
        TopicFilter::FieldChange(FormScope::Order),
        tagging(&log, "order-field"),
    );

    bus.emit(AppEvent::OrderPaymentChange {
        payment: Payment::Card,
    });
    bus.emit(AppEvent::OrderAddressChange {
        address: "Street 1".to_string(),
    });
    bus.emit(AppEvent::ContactsEmailChange {
        email: "a@b.com".to_string(),
    });

    assert_eq!(log.borrow().len(), 2);
}

#[test]
fn wildcard_sees_every_emission_with_its_topic() {
    let bus = EventBus::new();
    let topics = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&topics);
    bus.subscribe(
        TopicFilter::Any,
        Rc::new(move |event: &AppEvent| sink.borrow_mut().push(event.topic().as_str())),
    );

    bus.emit(AppEvent::BasketOpen);
    bus.emit(AppEvent::OrderStart);

    assert_eq!(*topics.borrow(), vec!["basket:open", "order:start"]);
}

#[test]
fn wildcard_fires_before_exact_subscribers() {
    let bus = EventBus::new();
    let log = Rc::new(RefCell::new(Vec::new()));
    bus.subscribe(TopicFilter::Exact(Topic::BasketOpen), tagging(&log, "exact"));
    bus.subscribe(TopicFilter::Any, tagging(&log, "wildcard"));

    bus.emit(AppEvent::BasketOpen);
    assert_eq!(*log.borrow(), vec!["wildcard", "exact"]);
}

#[test]
fn reentrant_emissions_drain_in_fifo_order() {
    let bus = Rc::new(EventBus::new());
    let log = Rc::new(RefCell::new(Vec::new()));

    // First handler for basket:open emits order:start mid-dispatch; the
    // second basket:open handler must still run before any order:start one.
    let emitter = {
        let bus = Rc::clone(&bus);
        let log = Rc::clone(&log);
        Rc::new(move |_event: &AppEvent| {
            log.borrow_mut().push("open-a");
            bus.emit(AppEvent::OrderStart);
        }) as Handler
    };
    bus.subscribe(TopicFilter::Exact(Topic::BasketOpen), emitter);
    bus.subscribe(TopicFilter::Exact(Topic::BasketOpen), tagging(&log, "open-b"));
    bus.subscribe(TopicFilter::Exact(Topic::OrderStart), tagging(&log, "start"));

    bus.emit(AppEvent::BasketOpen);
    assert_eq!(*log.borrow(), vec!["open-a", "open-b", "start"]);
}

#[test]
fn panicking_handler_does_not_stop_the_rest() {
    let bus = EventBus::new();
    let log = Rc::new(RefCell::new(Vec::new()));
    bus.subscribe(
        TopicFilter::Exact(Topic::BasketOpen),
        Rc::new(|_event: &AppEvent| panic!("broken screen")),
    );
    bus.subscribe(TopicFilter::Exact(Topic::BasketOpen), tagging(&log, "alive"));

    bus.emit(AppEvent::BasketOpen);
    assert_eq!(*log.borrow(), vec!["alive"]);
}

#[test]
fn subscriptions_added_during_dispatch_start_with_the_next_emission() {
    let bus = Rc::new(EventBus::new());
    let log = Rc::new(RefCell::new(Vec::new()));

    let registrar = {
        let bus = Rc::clone(&bus);
        let log = Rc::clone(&log);
        Rc::new(move |_event: &AppEvent| {
            log.borrow_mut().push("registrar");
            let late = tagging(&log, "late");
            bus.subscribe(TopicFilter::Exact(Topic::BasketOpen), late);
        }) as Handler
    };
    bus.subscribe(TopicFilter::Exact(Topic::BasketOpen), registrar);

    bus.emit(AppEvent::BasketOpen);
    assert_eq!(*log.borrow(), vec!["registrar"]);

    // Second emission: the handler registered during the first one now
    // fires (the registrar adds another copy that will fire next time).
    bus.emit(AppEvent::BasketOpen);
    assert_eq!(*log.borrow(), vec!["registrar", "registrar", "late"]);
}
