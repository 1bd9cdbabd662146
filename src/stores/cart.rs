//! Cart store. Every mutation recomputes the total before it is written.

use std::sync::Arc;
use crate::domain::aggregates::{Cart, NewCartItem};
use crate::storage::{self, keys, KeyValueStore};
use crate::Result;

#[derive(Clone)]
pub struct CartStore {
    kv: Arc<dyn KeyValueStore>,
}

impl CartStore {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self { Self { kv } }

    pub fn get_cart(&self) -> Result<Cart> {
        Ok(storage::load_or_default(self.kv.as_ref(), keys::CART)?)
    }

    fn persist(&self, cart: &Cart) -> Result<()> {
        storage::save(self.kv.as_ref(), keys::CART, cart)
    }

    pub fn add_to_cart(&self, item: NewCartItem) -> Result<Cart> {
        let mut cart = self.get_cart()?;
        let added = cart.add_item(item);
        tracing::debug!(item_id = %added.id, service = %added.service.name, "added to cart");
        self.persist(&cart)?;
        Ok(cart)
    }

    /// Quantities below one are raised to one; an unknown id changes nothing.
    pub fn update_quantity(&self, item_id: &str, quantity: i64) -> Result<Cart> {
        let mut cart = self.get_cart()?;
        cart.update_quantity(item_id, quantity);
        self.persist(&cart)?;
        Ok(cart)
    }

    pub fn remove_item(&self, item_id: &str) -> Result<Cart> {
        let mut cart = self.get_cart()?;
        cart.remove_item(item_id);
        self.persist(&cart)?;
        Ok(cart)
    }

    /// Drops the stored cart entirely.
    pub fn clear_cart(&self) -> Result<()> {
        self.kv.remove(keys::CART)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::aggregates::service::default_catalog;
    use crate::domain::aggregates::{calculate_total, Service};
    use crate::stores::test_support::memory;
    use crate::Money;

    fn priced(price: i64) -> Service {
        let mut service = default_catalog().remove(1);
        service.base_price = Money::from_major(price);
        service
    }

    #[test]
    fn test_scenario_two_items_then_remove() {
        let store = CartStore::new(memory());
        let cart = store.add_to_cart(NewCartItem::new(priced(100)).with_quantity(2)).unwrap();
        let first = cart.items()[0].id.clone();
        let cart = store.add_to_cart(NewCartItem::new(priced(50))).unwrap();
        assert_eq!(cart.total(), Money::from_major(250));

        let cart = store.remove_item(&first).unwrap();
        assert_eq!(cart.total(), Money::from_major(50));
        assert_eq!(store.get_cart().unwrap(), cart);
    }

    #[test]
    fn test_stored_total_always_matches_items() {
        let store = CartStore::new(memory());
        let a = store.add_to_cart(NewCartItem::new(priced(12))).unwrap().items()[0].id.clone();
        let b = store.add_to_cart(NewCartItem::new(priced(7)).with_quantity(3)).unwrap().items()[1].id.clone();
        store.update_quantity(&a, 4).unwrap();
        store.update_quantity(&b, 0).unwrap();
        store.remove_item("cart-item-missing").unwrap();
        store.add_to_cart(NewCartItem::new(priced(1))).unwrap();

        let cart = store.get_cart().unwrap();
        assert_eq!(cart.total(), calculate_total(cart.items()));
        assert_eq!(cart.total(), Money::from_major(12 * 4 + 7 + 1));
    }

    #[test]
    fn test_remove_unknown_leaves_cart_equal() {
        let store = CartStore::new(memory());
        store.add_to_cart(NewCartItem::new(priced(80))).unwrap();
        let before = store.get_cart().unwrap();
        let after = store.remove_item("cart-item-unknown").unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn test_clear_cart() {
        let kv = memory();
        let store = CartStore::new(kv.clone());
        store.add_to_cart(NewCartItem::new(priced(80))).unwrap();
        store.clear_cart().unwrap();
        assert!(kv.get(keys::CART).unwrap().is_none());
        assert!(store.get_cart().unwrap().is_empty());
    }
}
