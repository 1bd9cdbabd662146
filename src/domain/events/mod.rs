//! Domain events
use crate::domain::status::OrderStatus;
use crate::domain::value_objects::{Money, OrderNumber};

#[derive(Clone, Debug, PartialEq)]
pub enum OrderEvent {
    Placed { order_number: OrderNumber, total: Money, customer_email: String },
    StatusChanged { order_number: OrderNumber, from: OrderStatus, to: OrderStatus },
}

impl OrderEvent {
    /// Emits the event on the `tracing` pipeline.
    pub fn log(&self) {
        match self {
            Self::Placed { order_number, total, customer_email } => {
                tracing::info!(%order_number, %total, customer_email = %customer_email, "order placed")
            }
            Self::StatusChanged { order_number, from, to } => {
                tracing::info!(%order_number, from = ?from, to = ?to, "order status changed")
            }
        }
    }
}
