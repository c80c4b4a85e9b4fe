//! # Checkout
//!
//! Delivery options, order form rules and order placement.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   Cart ──► OrderSummary::new(cart, delivery)                           │
//! │             subtotal + delivery fee = total                            │
//! │                                                                         │
//! │   OrderForm ──► validate() ──► FormErrors (every failing field)        │
//! │                                                                         │
//! │   place_order(cart, form, now)                                         │
//! │     ├── empty cart    ──► EmptyCart                                    │
//! │     ├── form errors   ──► InvalidOrderForm(errors)                     │
//! │     └── ok            ──► OrderConfirmation { "PP-<base36 ms>", ... }  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::Cart;
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::validation::validate_email;

// =============================================================================
// Delivery
// =============================================================================

/// How the order reaches the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryOption {
    #[default]
    Standard,
    Express,
    Pickup,
}

impl DeliveryOption {
    pub const ALL: [DeliveryOption; 3] = [
        DeliveryOption::Standard,
        DeliveryOption::Express,
        DeliveryOption::Pickup,
    ];

    pub const fn fee(&self) -> Money {
        match self {
            DeliveryOption::Express => Money::from_cents(1500),
            DeliveryOption::Standard | DeliveryOption::Pickup => Money::zero(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DeliveryOption::Standard => "Standard Delivery",
            DeliveryOption::Express => "Express Delivery",
            DeliveryOption::Pickup => "Store Pickup",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            DeliveryOption::Standard => "3-5 business days",
            DeliveryOption::Express => "Next business day",
            DeliveryOption::Pickup => "Ready in 2 hours",
        }
    }

    /// Whether a street address is needed.
    pub fn needs_address(&self) -> bool {
        !matches!(self, DeliveryOption::Pickup)
    }

    /// First date a delivery can be booked for, `None` for pickup.
    pub fn earliest_date(&self, today: NaiveDate) -> Option<NaiveDate> {
        match self {
            DeliveryOption::Standard => Some(today + Duration::days(3)),
            DeliveryOption::Express => Some(today + Duration::days(1)),
            DeliveryOption::Pickup => None,
        }
    }
}

/// Delivery window on the chosen date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum TimeSlot {
    Morning,
    #[default]
    Afternoon,
    Evening,
}

impl TimeSlot {
    pub const ALL: [TimeSlot; 3] = [TimeSlot::Morning, TimeSlot::Afternoon, TimeSlot::Evening];

    pub fn label(&self) -> &'static str {
        match self {
            TimeSlot::Morning => "Morning",
            TimeSlot::Afternoon => "Afternoon",
            TimeSlot::Evening => "Evening",
        }
    }

    pub fn range(&self) -> &'static str {
        match self {
            TimeSlot::Morning => "9:00 AM - 12:00 PM",
            TimeSlot::Afternoon => "12:00 PM - 4:00 PM",
            TimeSlot::Evening => "4:00 PM - 8:00 PM",
        }
    }
}

// =============================================================================
// Order Form
// =============================================================================

/// Field of the order form an error is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    FirstName,
    LastName,
    Email,
    Phone,
    Address,
    City,
    State,
    ZipCode,
    DeliveryDate,
}

/// Every failing field of a submitted form, with its message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FormErrors(BTreeMap<FormField, String>);

impl FormErrors {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: FormField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: FormField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }

    fn insert(&mut self, field: FormField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.0.values().map(String::as_str).collect();
        f.write_str(&messages.join("; "))
    }
}

/// Customer and delivery details entered at checkout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub delivery_option: DeliveryOption,
    #[ts(as = "Option<String>")]
    pub delivery_date: Option<NaiveDate>,
    pub delivery_time: TimeSlot,
    pub is_gift: bool,
    pub gift_message: String,
}

impl OrderForm {
    /// Checks every field and collects all failures.
    ///
    /// ## Rules
    /// - Name, email and phone are always required
    /// - Email must look like `name@example.com`
    /// - Address, city, state and ZIP are required unless picking up
    /// - A chosen delivery date may not precede the option's earliest date
    pub fn validate(&self, today: NaiveDate) -> FormErrors {
        let mut errors = FormErrors::default();

        let required = [
            (FormField::FirstName, &self.first_name, "First name is required"),
            (FormField::LastName, &self.last_name, "Last name is required"),
        ];
        for (field, value, message) in required {
            if value.trim().is_empty() {
                errors.insert(field, message);
            }
        }

        match validate_email(self.email.trim()) {
            Ok(()) => {}
            Err(ValidationError::Required { .. }) => {
                errors.insert(FormField::Email, "Email is required")
            }
            Err(_) => errors.insert(FormField::Email, "Invalid email format"),
        }

        if self.phone.trim().is_empty() {
            errors.insert(FormField::Phone, "Phone is required");
        }

        if self.delivery_option.needs_address() {
            let address = [
                (FormField::Address, &self.address, "Address is required"),
                (FormField::City, &self.city, "City is required"),
                (FormField::State, &self.state, "State is required"),
                (FormField::ZipCode, &self.zip_code, "ZIP code is required"),
            ];
            for (field, value, message) in address {
                if value.trim().is_empty() {
                    errors.insert(field, message);
                }
            }

            if let (Some(date), Some(earliest)) =
                (self.delivery_date, self.delivery_option.earliest_date(today))
            {
                if date < earliest {
                    errors.insert(
                        FormField::DeliveryDate,
                        format!("Earliest delivery date is {}", earliest),
                    );
                }
            }
        }

        errors
    }
}

// =============================================================================
// Summary and Placement
// =============================================================================

/// Amounts shown beside the checkout form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub subtotal: Money,
    pub delivery_fee: Money,
    pub total: Money,
}

impl OrderSummary {
    pub fn new(cart: &Cart, delivery: DeliveryOption) -> Self {
        let subtotal = cart.subtotal();
        let delivery_fee = delivery.fee();
        OrderSummary {
            subtotal,
            delivery_fee,
            total: subtotal + delivery_fee,
        }
    }
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfirmation {
    pub order_id: String,
    pub summary: OrderSummary,
    pub email: String,
    pub delivery_option: DeliveryOption,
    #[ts(as = "String")]
    pub placed_at: DateTime<Utc>,
}

/// Validates the form against the cart and confirms the order.
///
/// ## Errors
/// - `EmptyCart` if there is nothing to order
/// - `InvalidOrderForm` carrying every failing field
pub fn place_order(cart: &Cart, form: &OrderForm, now: DateTime<Utc>) -> CoreResult<OrderConfirmation> {
    if cart.is_empty() {
        return Err(CoreError::EmptyCart);
    }

    let errors = form.validate(now.date_naive());
    if !errors.is_empty() {
        return Err(CoreError::InvalidOrderForm(errors));
    }

    Ok(OrderConfirmation {
        order_id: order_id(now),
        summary: OrderSummary::new(cart, form.delivery_option),
        email: form.email.trim().to_string(),
        delivery_option: form.delivery_option,
        placed_at: now,
    })
}

/// `PP-` followed by the millisecond timestamp in upper-case base 36.
pub fn order_id(now: DateTime<Utc>) -> String {
    format!("PP-{}", to_base36(now.timestamp_millis().max(0) as u64))
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

    if n == 0 {
        return "0".to_string();
    }

    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}

// =============================================================================
// Unit Tests
// =============================================================================
