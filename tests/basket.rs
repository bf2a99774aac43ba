mod common;

use std::cell::RefCell;
use std::rc::Rc;

use common::product;
use storefront::bus::{AppEvent, EventBus, Topic, TopicFilter};
use storefront::model::{Basket, BasketSnapshot};

/// Basket plus a recorder of every `basket:changed` snapshot.
fn basket_with_recorder() -> (Basket, Rc<RefCell<Vec<BasketSnapshot>>>) {
    let events = Rc::new(EventBus::new());
    let snapshots = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&snapshots);
    events.subscribe(
        TopicFilter::Exact(Topic::BasketChanged),
        Rc::new(move |event: &AppEvent| {
            if let AppEvent::BasketChanged { snapshot } = event {
                sink.borrow_mut().push(snapshot.clone());
            }
        }),
    );
    (Basket::new(events), snapshots)
}

#[test]
fn add_is_idempotent_by_id() {
    let (mut basket, _) = basket_with_recorder();
    basket.add(product("p1", Some(100)));
    basket.add(product("p1", Some(100)));
    assert_eq!(basket.count(), 1);
}

#[test]
fn total_ignores_not_for_sale_lines() {
    let (mut basket, _) = basket_with_recorder();
    basket.add(product("p1", Some(100)));
    basket.add(product("p2", None));
    assert_eq!(basket.total(), 100);
    assert_eq!(basket.count(), 2);
}

#[test]
fn add_announces_a_snapshot() {
    let (mut basket, snapshots) = basket_with_recorder();
    basket.add(product("p1", Some(100)));

    let snapshots = snapshots.borrow();
    assert_eq!(snapshots.len(), 1);
    assert_eq!(snapshots[0].count, 1);
    assert_eq!(snapshots[0].total, 100);
    assert_eq!(snapshots[0].items[0].id, "p1");
}

#[test]
fn adding_a_present_id_announces_nothing() {
    let (mut basket, snapshots) = basket_with_recorder();
    basket.add(product("p1", Some(100)));
    basket.add(product("p1", Some(100)));
    assert_eq!(snapshots.borrow().len(), 1);
}

#[test]
fn remove_announces_only_on_actual_mutation() {
    let (mut basket, snapshots) = basket_with_recorder();
    basket.add(product("p1", Some(100)));

    basket.remove("ghost");
    assert_eq!(snapshots.borrow().len(), 1, "no change, no announcement");

    basket.remove("p1");
    assert_eq!(snapshots.borrow().len(), 2);
    assert_eq!(snapshots.borrow()[1].count, 0);
}

#[test]
fn clear_empties_and_announces_once() {
    let (mut basket, snapshots) = basket_with_recorder();
    basket.add(product("p1", Some(100)));
    basket.add(product("p2", Some(50)));

    basket.clear();
    assert_eq!(basket.count(), 0);
    assert_eq!(snapshots.borrow().len(), 3);

    // Clearing an empty basket changes nothing.
    basket.clear();
    assert_eq!(snapshots.borrow().len(), 3);
}

#[test]
fn has_tracks_membership() {
    let (mut basket, _) = basket_with_recorder();
    assert!(!basket.has("p1"));
    basket.add(product("p1", Some(100)));
    assert!(basket.has("p1"));
}

#[test]
fn items_returns_a_defensive_copy() {
    let (mut basket, _) = basket_with_recorder();
    basket.add(product("p1", Some(100)));

    let mut items = basket.items();
    items.clear();
    assert_eq!(basket.count(), 1);
}

#[test]
fn items_preserve_insertion_order() {
    let (mut basket, _) = basket_with_recorder();
    basket.add(product("p2", Some(50)));
    basket.add(product("p1", Some(100)));
    let ids: Vec<String> = basket.items().into_iter().map(|p| p.id).collect();
    assert_eq!(ids, vec!["p2".to_string(), "p1".to_string()]);
}
