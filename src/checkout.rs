//! Order placement: the cart is frozen into an order and then cleared.

use chrono::Utc;
use validator::Validate;
use crate::domain::aggregates::{CustomerInfo, Order, Payment};
use crate::stores::{CartStore, OrderStore};
use crate::{Result, StorefrontError};

pub fn place_order(
    carts: &CartStore,
    orders: &OrderStore,
    customer_info: CustomerInfo,
    payment: Payment,
) -> Result<Order> {
    let customer_info = customer_info.trimmed();
    customer_info.validate()?;
    if let Payment::MobileMoney { phone, .. } = &payment {
        if phone.trim().is_empty() {
            return Err(StorefrontError::MissingPaymentDetails);
        }
    }

    let mut cart = carts.get_cart()?;
    if cart.is_empty() {
        return Err(StorefrontError::EmptyCart);
    }
    let (items, total) = cart.take();

    let mut order = Order::place(orders.generate_order_number(), items, total, customer_info, payment, Utc::now());
    orders.save_order(&mut order)?;
    carts.clear_cart()?;
    Ok(order)
}
