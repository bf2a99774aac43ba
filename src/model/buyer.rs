//! Buyer (checkout form) model and field validation.

use std::collections::BTreeMap;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::bus::{AppEvent, EventBus};

/// Payment method. Serialized as `"card"` / `"cash"` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Payment {
    Card,
    Cash,
}

/// Snapshot of the buyer's form fields. All fields default to empty/unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuyerInfo {
    pub payment: Option<Payment>,
    pub address: String,
    pub phone: String,
    pub email: String,
}

/// A buyer form field, used as the key of a [`ValidityReport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Field {
    Payment,
    Address,
    Phone,
    Email,
}

/// Per-field validation errors. Empty means the buyer data is fully valid.
///
/// Validity is computed on demand by [`Buyer::check_validity`] and never
/// stored: the buyer is never partially invalid in storage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidityReport {
    errors: BTreeMap<Field, &'static str>,
}

impl ValidityReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error(&self, field: Field) -> Option<&'static str> {
        self.errors.get(&field).copied()
    }

    /// Fields that failed validation.
    pub fn fields(&self) -> Vec<Field> {
        self.errors.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Errors gating the order form step: payment, then address.
    pub fn order_step(&self) -> Vec<&'static str> {
        [Field::Payment, Field::Address]
            .into_iter()
            .filter_map(|f| self.error(f))
            .collect()
    }

    /// Errors gating the contact form step: email, then phone.
    pub fn contacts_step(&self) -> Vec<&'static str> {
        [Field::Email, Field::Phone]
            .into_iter()
            .filter_map(|f| self.error(f))
            .collect()
    }
}

/// Holds the checkout form fields.
///
/// Setters mutate exactly one field each and perform no validation; they
/// announce `buyer:changed` only when the value actually changed. Lives for
/// the whole session and is cleared on successful order submission.
pub struct Buyer {
    events: Rc<EventBus>,
    info: BuyerInfo,
}

impl Buyer {
    pub fn new(events: Rc<EventBus>) -> Self {
        Self {
            events,
            info: BuyerInfo::default(),
        }
    }

    pub fn set_payment(&mut self, payment: Payment) {
        if self.info.payment == Some(payment) {
            return;
        }
        self.info.payment = Some(payment);
        self.announce();
    }

    pub fn set_address(&mut self, address: String) {
        if self.info.address == address {
            return;
        }
        self.info.address = address;
        self.announce();
    }

    pub fn set_phone(&mut self, phone: String) {
        if self.info.phone == phone {
            return;
        }
        self.info.phone = phone;
        self.announce();
    }

    pub fn set_email(&mut self, email: String) {
        if self.info.email == email {
            return;
        }
        self.info.email = email;
        self.announce();
    }

    pub fn snapshot(&self) -> BuyerInfo {
        self.info.clone()
    }

    /// Reset every field to empty/unset.
    pub fn clear(&mut self) {
        if self.info == BuyerInfo::default() {
            return;
        }
        self.info = BuyerInfo::default();
        self.announce();
    }

    /// Validate all fields, returning a message per invalid field.
    pub fn check_validity(&self) -> ValidityReport {
        let mut errors = BTreeMap::new();

        if self.info.payment.is_none() {
            errors.insert(Field::Payment, "Select a payment method");
        }

        if self.info.address.trim().is_empty() {
            errors.insert(Field::Address, "Shipping address is required");
        }

        let phone = self.info.phone.trim();
        if phone.is_empty() {
            errors.insert(Field::Phone, "Phone number is required");
        } else if !well_formed_phone(phone) {
            errors.insert(Field::Phone, "Enter a valid phone number");
        }

        let email = self.info.email.trim();
        if email.is_empty() {
            errors.insert(Field::Email, "Email is required");
        } else if !well_formed_email(email) {
            errors.insert(Field::Email, "Enter a valid email address");
        }

        ValidityReport { errors }
    }

    fn announce(&self) {
        self.events.emit(AppEvent::BuyerChanged);
    }
}

/// Phone format check: digits plus common separators, optional single
/// leading `+`. After discounting a leading `+7`/`8` country prefix the
/// remaining digit count must land in 10–11.
fn well_formed_phone(phone: &str) -> bool {
    let mut digits = 0usize;
    for (i, c) in phone.char_indices() {
        match c {
            '0'..='9' => digits += 1,
            '+' if i == 0 => {}
            ' ' | '-' | '(' | ')' | '.' => {}
            _ => return false,
        }
    }

    let has_country_prefix = phone.starts_with("+7") || phone.starts_with('8');
    let significant = if has_country_prefix {
        digits.saturating_sub(1)
    } else {
        digits
    };
    (10..=11).contains(&significant)
}

/// Basic `local@domain.tld` shape check.
fn well_formed_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || local.contains(char::is_whitespace) {
        return false;
    }
    domain.contains('.')
        && !domain.contains('@')
        && domain
            .split('.')
            .all(|label| !label.is_empty() && !label.contains(char::is_whitespace))
}
