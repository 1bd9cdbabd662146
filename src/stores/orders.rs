//! Order Store

use chrono::Utc;
use std::sync::Arc;
use crate::domain::aggregates::Order;
use crate::domain::status::{OrderStatus, StatusFilter};
use crate::domain::value_objects::OrderNumber;
use crate::storage::{keys, KeyValueStore, Records};
use crate::Result;

/// Ordering of a full order listing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OrderSort {
    /// As placed; what the admin screens show.
    #[default]
    Insertion,
    /// Most recent `created_at` first; what customers see.
    NewestFirst,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OrderQuery {
    pub sort: OrderSort,
    pub status: StatusFilter,
    /// Case-insensitive substring of the order number.
    pub search: Option<String>,
}

impl OrderQuery {
    fn matches(&self, order: &Order) -> bool {
        let number_matches = match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(term) => order.order_number().as_str().to_lowercase().contains(&term.to_lowercase()),
        };
        number_matches && self.status.matches(order.status())
    }
}

#[derive(Clone)]
pub struct OrderStore {
    kv: Arc<dyn KeyValueStore>,
}

impl OrderStore {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self { Self { kv } }

    fn records(&self) -> Result<Records> {
        Ok(Records::load(self.kv.as_ref(), keys::ORDERS)?)
    }

    fn load(&self) -> Result<Vec<Order>> {
        Ok(self.records()?.decoded())
    }

    /// Appends without checking for a duplicate order number. Pending
    /// events on `order` are drained and logged.
    pub fn save_order(&self, order: &mut Order) -> Result<()> {
        let mut records = self.records()?;
        order.take_events().iter().for_each(|e| e.log());
        records.push(&*order)?;
        records.save(self.kv.as_ref())
    }

    pub fn all_orders(&self, sort: OrderSort) -> Result<Vec<Order>> {
        let mut orders = self.load()?;
        if sort == OrderSort::NewestFirst {
            orders.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        }
        Ok(orders)
    }

    pub fn list(&self, query: &OrderQuery) -> Result<Vec<Order>> {
        let mut orders = self.all_orders(query.sort)?;
        orders.retain(|o| query.matches(o));
        Ok(orders)
    }

    pub fn get_order_by_number(&self, order_number: &str) -> Result<Option<Order>> {
        Ok(self.load()?.into_iter().find(|o| o.order_number().as_str() == order_number))
    }

    /// Sets the status of the matching order; silently does nothing when the
    /// number is unknown.
    pub fn update_order_status(&self, order_number: &str, status: OrderStatus) -> Result<()> {
        let mut records = self.records()?;
        let updated = records.update_first(
            |o: &Order| o.order_number().as_str() == order_number,
            |o| {
                o.set_status(status);
                o.take_events().iter().for_each(|e| e.log());
            },
        )?;
        if updated.is_none() {
            tracing::debug!(order_number, "status update for unknown order ignored");
            return Ok(());
        }
        records.save(self.kv.as_ref())
    }

    /// Best-effort unique number derived from the current time.
    pub fn generate_order_number(&self) -> OrderNumber {
        OrderNumber::generate(Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::aggregates::order::tests::order;
    use crate::stores::test_support::memory;
    use chrono::{DateTime, TimeZone};

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 1, hour, 0, 0).unwrap()
    }

    fn seeded() -> OrderStore {
        let store = OrderStore::new(memory());
        store.save_order(&mut order("KK-2026-000010", "a@x.com", 10, OrderStatus::Received, at(8))).unwrap();
        store.save_order(&mut order("KK-2026-000030", "b@x.com", 30, OrderStatus::Completed, at(12))).unwrap();
        store.save_order(&mut order("KK-2026-000020", "c@x.com", 20, OrderStatus::Cancelled, at(10))).unwrap();
        store
    }

    fn numbers(orders: &[Order]) -> Vec<&str> {
        orders.iter().map(|o| o.order_number().as_str()).collect()
    }

    #[test]
    fn test_both_orderings() {
        let store = seeded();
        let inserted = store.all_orders(OrderSort::Insertion).unwrap();
        assert_eq!(numbers(&inserted), vec!["KK-2026-000010", "KK-2026-000030", "KK-2026-000020"]);
        let newest = store.all_orders(OrderSort::NewestFirst).unwrap();
        assert_eq!(numbers(&newest), vec!["KK-2026-000030", "KK-2026-000020", "KK-2026-000010"]);
    }

    #[test]
    fn test_lookup() {
        let store = seeded();
        assert_eq!(store.get_order_by_number("KK-2026-000030").unwrap().unwrap().total(), crate::Money::from_major(30));
        assert!(store.get_order_by_number("KK-2026-999999").unwrap().is_none());
    }

    #[test]
    fn test_update_status_preserves_other_fields() {
        let store = seeded();
        let before = store.get_order_by_number("KK-2026-000010").unwrap().unwrap();
        store.update_order_status("KK-2026-000010", OrderStatus::ReadyForDelivery).unwrap();
        let after = store.get_order_by_number("KK-2026-000010").unwrap().unwrap();
        assert_eq!(after.status(), OrderStatus::ReadyForDelivery);
        assert_eq!(after.total(), before.total());
        assert_eq!(after.created_at(), before.created_at());
        assert_eq!(after.customer_info(), before.customer_info());
    }

    #[test]
    fn test_update_unknown_order_leaves_list_unchanged() {
        let store = seeded();
        let before = store.all_orders(OrderSort::Insertion).unwrap();
        store.update_order_status("KK-1999-000000", OrderStatus::Cancelled).unwrap();
        assert_eq!(store.all_orders(OrderSort::Insertion).unwrap(), before);
    }

    #[test]
    fn test_transitions_are_not_guarded() {
        let store = seeded();
        store.update_order_status("KK-2026-000030", OrderStatus::Received).unwrap();
        let order = store.get_order_by_number("KK-2026-000030").unwrap().unwrap();
        assert_eq!(order.status(), OrderStatus::Received);
    }

    #[test]
    fn test_query_filters() {
        let store = seeded();
        let cancelled = store
            .list(&OrderQuery { status: StatusFilter::Only(OrderStatus::Cancelled), ..Default::default() })
            .unwrap();
        assert_eq!(numbers(&cancelled), vec!["KK-2026-000020"]);

        let active = store.list(&OrderQuery { status: StatusFilter::Active, ..Default::default() }).unwrap();
        assert_eq!(numbers(&active), vec!["KK-2026-000010"]);

        let searched = store.list(&OrderQuery { search: Some("kk-2026-0000".into()), ..Default::default() }).unwrap();
        assert_eq!(searched.len(), 3);
        let searched = store.list(&OrderQuery { search: Some("030".into()), ..Default::default() }).unwrap();
        assert_eq!(numbers(&searched), vec!["KK-2026-000030"]);
    }

    #[test]
    fn test_generated_number_shape() {
        let number = OrderStore::new(memory()).generate_order_number();
        let s = number.as_str();
        assert_eq!(s.len(), "KK-2026-123456".len());
        assert!(s.starts_with("KK-"));
        assert!(s[3..7].chars().all(|c| c.is_ascii_digit()));
        assert_eq!(&s[7..8], "-");
        assert!(s[8..].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_malformed_orders_read_as_empty() {
        let kv = memory();
        kv.set(keys::ORDERS, "[{\"broken\":".into()).unwrap();
        let store = OrderStore::new(kv);
        assert!(store.all_orders(OrderSort::Insertion).unwrap().is_empty());
    }

    #[test]
    fn test_unreadable_orders_survive_rewrites() {
        let kv = memory();
        let store = OrderStore::new(kv.clone());
        store.save_order(&mut order("KK-2026-000001", "a@x.com", 10, OrderStatus::Received, at(8))).unwrap();

        let mut raw: Vec<serde_json::Value> = serde_json::from_str(&kv.get(keys::ORDERS).unwrap().unwrap()).unwrap();
        let mut confirmed = raw[0].clone();
        confirmed["orderNumber"] = "KK-2026-000002".into();
        confirmed["status"] = "CONFIRMED".into();
        raw.push(confirmed);
        kv.set(keys::ORDERS, serde_json::to_string(&raw).unwrap()).unwrap();

        assert_eq!(numbers(&store.all_orders(OrderSort::Insertion).unwrap()), vec!["KK-2026-000001"]);
        store.save_order(&mut order("KK-2026-000003", "b@x.com", 30, OrderStatus::Received, at(9))).unwrap();
        store.update_order_status("KK-2026-000001", OrderStatus::Completed).unwrap();

        let stored: Vec<serde_json::Value> = serde_json::from_str(&kv.get(keys::ORDERS).unwrap().unwrap()).unwrap();
        assert_eq!(stored.len(), 3);
        assert_eq!(stored[0]["status"], "COMPLETED");
        assert_eq!(stored[1]["status"], "CONFIRMED");
        assert_eq!(numbers(&store.all_orders(OrderSort::Insertion).unwrap()), vec!["KK-2026-000001", "KK-2026-000003"]);
    }
}
