//! Order Aggregate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::domain::aggregates::CartItem;
use crate::domain::events::OrderEvent;
use crate::domain::status::OrderStatus;
use crate::domain::value_objects::{Money, OrderNumber};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod { MobileMoney, CashOnDelivery }

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MobileMoneyNetwork { Mtn, Vodafone, Airteltigo }

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile_money_network: Option<MobileMoneyNetwork>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile_money_phone: Option<String>,
}

/// How the customer chose to pay at checkout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Payment {
    CashOnDelivery,
    MobileMoney { network: MobileMoneyNetwork, phone: String },
}

impl Payment {
    /// Builds a payment from checkout form fields. Mobile money needs both a
    /// network and a non-blank phone number.
    pub fn from_parts(
        method: PaymentMethod,
        network: Option<MobileMoneyNetwork>,
        phone: Option<&str>,
    ) -> crate::Result<Self> {
        match (method, network, phone.map(str::trim)) {
            (PaymentMethod::CashOnDelivery, _, _) => Ok(Self::CashOnDelivery),
            (PaymentMethod::MobileMoney, Some(network), Some(phone)) if !phone.is_empty() => {
                Ok(Self::MobileMoney { network, phone: phone.to_string() })
            }
            (PaymentMethod::MobileMoney, _, _) => Err(crate::StorefrontError::MissingPaymentDetails),
        }
    }

    pub fn method(&self) -> PaymentMethod {
        match self {
            Self::CashOnDelivery => PaymentMethod::CashOnDelivery,
            Self::MobileMoney { .. } => PaymentMethod::MobileMoney,
        }
    }

    fn details(&self) -> Option<PaymentDetails> {
        match self {
            Self::CashOnDelivery => None,
            Self::MobileMoney { network, phone } => Some(PaymentDetails {
                mobile_money_network: Some(*network),
                mobile_money_phone: Some(phone.clone()),
            }),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInfo {
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,
    #[validate(email(message = "Email is invalid"))]
    pub email: String,
    #[validate(length(min = 1, message = "Phone number is required"))]
    pub phone: String,
    #[validate(length(min = 1, message = "Delivery address is required"))]
    pub delivery_address: String,
    #[validate(length(min = 1, message = "City is required"))]
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tailor_notes: Option<String>,
}

impl CustomerInfo {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim()).trim().to_string()
    }

    /// Copy with surrounding whitespace removed from the required fields.
    pub fn trimmed(&self) -> Self {
        Self {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            delivery_address: self.delivery_address.trim().to_string(),
            city: self.city.trim().to_string(),
            ..self.clone()
        }
    }
}

/// A placed order. Only `status` changes after placement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    order_number: OrderNumber,
    items: Vec<CartItem>,
    customer_info: CustomerInfo,
    total: Money,
    status: OrderStatus,
    is_paid: bool,
    created_at: DateTime<Utc>,
    payment_method: PaymentMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    payment_details: Option<PaymentDetails>,
    #[serde(skip)]
    events: Vec<OrderEvent>,
}

impl Order {
    /// Freezes cart contents into a new order in `Received` status. Mobile
    /// money orders count as paid on placement.
    pub fn place(
        order_number: OrderNumber,
        items: Vec<CartItem>,
        total: Money,
        customer_info: CustomerInfo,
        payment: Payment,
        created_at: DateTime<Utc>,
    ) -> Self {
        let mut order = Self {
            order_number, items, customer_info, total,
            status: OrderStatus::Received,
            is_paid: payment.method() == PaymentMethod::MobileMoney,
            created_at,
            payment_method: payment.method(),
            payment_details: payment.details(),
            events: vec![],
        };
        order.raise_event(OrderEvent::Placed {
            order_number: order.order_number.clone(),
            total: order.total,
            customer_email: order.customer_info.email.clone(),
        });
        order
    }

    pub fn order_number(&self) -> &OrderNumber { &self.order_number }
    pub fn items(&self) -> &[CartItem] { &self.items }
    pub fn customer_info(&self) -> &CustomerInfo { &self.customer_info }
    pub fn customer_email(&self) -> &str { &self.customer_info.email }
    pub fn total(&self) -> Money { self.total }
    pub fn status(&self) -> OrderStatus { self.status }
    pub fn is_paid(&self) -> bool { self.is_paid }
    pub fn created_at(&self) -> DateTime<Utc> { self.created_at }
    pub fn payment_method(&self) -> PaymentMethod { self.payment_method }
    pub fn payment_details(&self) -> Option<&PaymentDetails> { self.payment_details.as_ref() }

    /// Replaces the status. Any status may follow any other.
    pub fn set_status(&mut self, status: OrderStatus) {
        if self.status == status { return; }
        let from = std::mem::replace(&mut self.status, status);
        self.raise_event(OrderEvent::StatusChanged { order_number: self.order_number.clone(), from, to: status });
    }

    pub fn take_events(&mut self) -> Vec<OrderEvent> { std::mem::take(&mut self.events) }
    fn raise_event(&mut self, e: OrderEvent) { self.events.push(e); }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn customer(email: &str) -> CustomerInfo {
        CustomerInfo {
            first_name: "Ama".into(), last_name: "Mensah".into(), email: email.into(),
            phone: "0241234567".into(), delivery_address: "12 Oxford St".into(), city: "Accra".into(),
            ..Default::default()
        }
    }

    pub(crate) fn order(number: &str, email: &str, total: i64, status: OrderStatus, created_at: DateTime<Utc>) -> Order {
        let mut order = Order::place(
            OrderNumber::new(number).unwrap(), vec![], Money::from_major(total),
            customer(email), Payment::CashOnDelivery, created_at,
        );
        order.set_status(status);
        order.take_events();
        order
    }

    #[test]
    fn test_order_workflow() {
        let mut order = Order::place(
            OrderNumber::new("KK-2026-000001").unwrap(), vec![], Money::from_major(120),
            customer("ama@example.com"), Payment::CashOnDelivery, Utc::now(),
        );
        assert_eq!(order.status(), OrderStatus::Received);
        assert!(!order.is_paid());
        assert!(order.payment_details().is_none());

        order.set_status(OrderStatus::Completed);
        order.set_status(OrderStatus::Received);
        assert_eq!(order.status(), OrderStatus::Received);

        let events = order.take_events();
        assert_eq!(events.len(), 3);
        assert!(matches!(events[0], OrderEvent::Placed { .. }));
        assert!(matches!(
            events[2],
            OrderEvent::StatusChanged { from: OrderStatus::Completed, to: OrderStatus::Received, .. }
        ));
    }

    #[test]
    fn test_mobile_money_is_paid() {
        let order = Order::place(
            OrderNumber::new("KK-2026-000002").unwrap(), vec![], Money::from_major(50),
            customer("kofi@example.com"),
            Payment::MobileMoney { network: MobileMoneyNetwork::Mtn, phone: "0551234567".into() },
            Utc::now(),
        );
        assert!(order.is_paid());
        assert_eq!(order.payment_method(), PaymentMethod::MobileMoney);
        assert_eq!(order.payment_details().and_then(|d| d.mobile_money_network), Some(MobileMoneyNetwork::Mtn));
    }

    #[test]
    fn test_payment_from_parts() {
        assert_eq!(
            Payment::from_parts(PaymentMethod::CashOnDelivery, None, None).unwrap(),
            Payment::CashOnDelivery
        );
        let momo = Payment::from_parts(PaymentMethod::MobileMoney, Some(MobileMoneyNetwork::Airteltigo), Some(" 0271234567 ")).unwrap();
        assert_eq!(momo, Payment::MobileMoney { network: MobileMoneyNetwork::Airteltigo, phone: "0271234567".into() });
        assert!(Payment::from_parts(PaymentMethod::MobileMoney, None, Some("0271234567")).is_err());
        assert!(Payment::from_parts(PaymentMethod::MobileMoney, Some(MobileMoneyNetwork::Mtn), Some("  ")).is_err());
    }

    #[test]
    fn test_wire_format() {
        let order = order("KK-2026-000003", "a@x.com", 10, OrderStatus::InProgress, Utc::now());
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["orderNumber"], "KK-2026-000003");
        assert_eq!(json["status"], "IN_PROGRESS");
        assert_eq!(json["paymentMethod"], "CASH_ON_DELIVERY");
        assert_eq!(json["customerInfo"]["firstName"], "Ama");
        assert!(json.get("events").is_none());
        let back: Order = serde_json::from_value(json).unwrap();
        assert_eq!(back, order);
    }

    #[test]
    fn test_customer_info_validation() {
        assert!(customer("ama@example.com").validate().is_ok());
        let mut bad = customer("not-an-email");
        bad.city = String::new();
        assert!(bad.validate().is_err());
    }
}
