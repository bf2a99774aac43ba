//! Typed subscription keys.
//!
//! The source system subscribed to events by exact name, by regex pattern
//! (`/^order\..*:change/`), or with a `*` wildcard. Here those three shapes
//! are a closed enum matched by a pure function, so there is no runtime
//! pattern evaluation and no way to subscribe to a key that matches nothing.

use crate::bus::event::Topic;

/// Which form a field-change event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormScope {
    /// Payment method and shipping address.
    Order,
    /// Email and phone.
    Contacts,
}

/// A subscription key on the event bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopicFilter {
    /// Fires on exactly one topic.
    Exact(Topic),
    /// Fires on any field-change topic of the given form.
    FieldChange(FormScope),
    /// Fires on every emission.
    Any,
}

impl TopicFilter {
    /// Whether an emission under `topic` is delivered to this subscription.
    pub fn matches(self, topic: Topic) -> bool {
        match self {
            TopicFilter::Exact(t) => t == topic,
            TopicFilter::FieldChange(scope) => topic.form_scope() == Some(scope),
            TopicFilter::Any => true,
        }
    }
}

impl Topic {
    /// The form this topic is a field-change event of, if any.
    pub fn form_scope(self) -> Option<FormScope> {
        match self {
            Topic::OrderPaymentChange | Topic::OrderAddressChange => Some(FormScope::Order),
            Topic::ContactsEmailChange | Topic::ContactsPhoneChange => Some(FormScope::Contacts),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_matches_only_its_topic() {
        let filter = TopicFilter::Exact(Topic::BasketChanged);
        assert!(filter.matches(Topic::BasketChanged));
        assert!(!filter.matches(Topic::BasketOpen));
    }

    #[test]
    fn field_change_covers_both_order_fields() {
        let filter = TopicFilter::FieldChange(FormScope::Order);
        assert!(filter.matches(Topic::OrderPaymentChange));
        assert!(filter.matches(Topic::OrderAddressChange));
        assert!(!filter.matches(Topic::ContactsEmailChange));
        assert!(!filter.matches(Topic::OrderSubmit));
    }

    #[test]
    fn contacts_scope_is_disjoint_from_order_scope() {
        let filter = TopicFilter::FieldChange(FormScope::Contacts);
        assert!(filter.matches(Topic::ContactsEmailChange));
        assert!(filter.matches(Topic::ContactsPhoneChange));
        assert!(!filter.matches(Topic::OrderAddressChange));
    }

    #[test]
    fn any_matches_everything() {
        assert!(TopicFilter::Any.matches(Topic::Error));
        assert!(TopicFilter::Any.matches(Topic::CatalogChanged));
    }
}
