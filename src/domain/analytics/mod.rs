//! Read-time views derived from the order list.
//!
//! Nothing here is cached; every call rescans the orders it is given.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use crate::domain::aggregates::Order;
use crate::domain::status::OrderStatus;
use crate::domain::value_objects::Money;

/// Compact order entry nested in a [`Customer`].
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerOrderSummary {
    pub order_number: String,
    pub total: Money,
    pub status: OrderStatus,
    pub date: DateTime<Utc>,
}

/// A customer as seen through their orders, keyed by email.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Every order, cancelled ones included.
    pub total_orders: usize,
    /// Sum of order totals, cancelled orders excluded.
    pub total_spent: Money,
    pub last_order_date: DateTime<Utc>,
    pub orders: Vec<CustomerOrderSummary>,
}

impl Customer {
    fn seed(order: &Order) -> Self {
        let info = order.customer_info();
        Self {
            name: info.full_name(),
            email: info.email.clone(),
            phone: info.phone.clone(),
            total_orders: 0,
            total_spent: Money::ZERO,
            last_order_date: order.created_at(),
            orders: Vec::new(),
        }
    }

    fn record(&mut self, order: &Order) {
        self.total_orders += 1;
        if order.status() != OrderStatus::Cancelled {
            self.total_spent = self.total_spent + order.total();
        }
        self.orders.push(CustomerOrderSummary {
            order_number: order.order_number().to_string(),
            total: order.total(),
            status: order.status(),
            date: order.created_at(),
        });
        self.last_order_date = self.last_order_date.max(order.created_at());
    }

    /// Case-insensitive match on name or email; raw substring match on phone.
    pub fn matches(&self, term: &str) -> bool {
        let needle = term.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self.email.to_lowercase().contains(&needle)
            || self.phone.contains(term)
    }
}

/// Groups orders by customer email, highest lifetime spend first.
///
/// Name and phone come from the first order seen for each email. Customers
/// with equal spend keep first-seen order.
pub fn aggregate_customers(orders: &[Order]) -> Vec<Customer> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut customers: Vec<Customer> = Vec::new();

    for order in orders {
        let slot = *index.entry(order.customer_email()).or_insert_with(|| {
            customers.push(Customer::seed(order));
            customers.len() - 1
        });
        customers[slot].record(order);
    }

    customers.sort_by(|a, b| b.total_spent.cmp(&a.total_spent));
    customers
}

pub fn search_customers(customers: Vec<Customer>, term: &str) -> Vec<Customer> {
    customers.into_iter().filter(|c| c.matches(term)).collect()
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentOrder {
    pub order_number: String,
    pub customer_name: String,
    pub total: Money,
    pub status: OrderStatus,
    pub date: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_orders: usize,
    pub received_orders: usize,
    pub completed_orders: usize,
    /// Revenue from every order that was not cancelled.
    pub total_revenue: Money,
    pub recent_orders: Vec<RecentOrder>,
    pub orders_by_status: BTreeMap<OrderStatus, usize>,
}

pub const RECENT_ORDER_LIMIT: usize = 5;

pub fn dashboard_stats(orders: &[Order]) -> DashboardStats {
    let mut orders_by_status: BTreeMap<OrderStatus, usize> =
        OrderStatus::ALL.into_iter().map(|s| (s, 0)).collect();
    for order in orders {
        *orders_by_status.entry(order.status()).or_default() += 1;
    }

    let total_revenue = orders
        .iter()
        .filter(|o| o.status() != OrderStatus::Cancelled)
        .map(Order::total)
        .sum();

    let mut newest: Vec<&Order> = orders.iter().collect();
    newest.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
    let recent_orders = newest
        .into_iter()
        .take(RECENT_ORDER_LIMIT)
        .map(|o| RecentOrder {
            order_number: o.order_number().to_string(),
            customer_name: o.customer_info().full_name(),
            total: o.total(),
            status: o.status(),
            date: o.created_at(),
        })
        .collect();

    DashboardStats {
        total_orders: orders.len(),
        received_orders: orders_by_status[&OrderStatus::Received],
        completed_orders: orders_by_status[&OrderStatus::Completed],
        total_revenue,
        recent_orders,
        orders_by_status,
    }
}
