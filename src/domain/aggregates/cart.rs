//! Cart Aggregate

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::domain::aggregates::{MeasurementProfile, Service};
use crate::domain::value_objects::{Money, Quantity};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomizationData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fabric: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub design_file_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_instructions: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: String,
    pub service: Service,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measurement_profile_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measurement_profile: Option<MeasurementProfile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customization_data: Option<CustomizationData>,
    pub quantity: Quantity,
    /// Unit price captured when the item was added.
    pub price: Money,
}

impl CartItem {
    pub fn line_total(&self) -> Money { self.price.multiply(self.quantity) }
}

/// What the caller hands over when adding to the cart. The service and
/// profile are owned copies, not references into the catalog.
#[derive(Clone, Debug, PartialEq)]
pub struct NewCartItem {
    pub service: Service,
    pub measurement_profile: Option<MeasurementProfile>,
    pub customization_data: Option<CustomizationData>,
    pub quantity: i64,
}

impl NewCartItem {
    pub fn new(service: Service) -> Self {
        Self { service, measurement_profile: None, customization_data: None, quantity: 1 }
    }

    pub fn with_quantity(mut self, quantity: i64) -> Self { self.quantity = quantity; self }

    pub fn with_profile(mut self, profile: MeasurementProfile) -> Self { self.measurement_profile = Some(profile); self }

    pub fn with_customization(mut self, data: CustomizationData) -> Self { self.customization_data = Some(data); self }
}

/// Sum of `price × quantity` over `items`.
pub fn calculate_total(items: &[CartItem]) -> Money {
    items.iter().map(CartItem::line_total).sum()
}

/// A shopping cart. The total is always derived from the items, also when a
/// stored cart is read back.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredCart")]
pub struct Cart {
    items: Vec<CartItem>,
    total: Money,
}

impl Cart {
    pub fn new() -> Self { Self::default() }

    pub fn items(&self) -> &[CartItem] { &self.items }
    pub fn total(&self) -> Money { self.total }
    pub fn is_empty(&self) -> bool { self.items.is_empty() }

    pub fn add_item(&mut self, item: NewCartItem) -> &CartItem {
        let price = item.service.base_price;
        let measurement_profile_id = item.measurement_profile.as_ref().map(|p| p.id.clone());
        self.items.push(CartItem {
            id: format!("cart-item-{}", Uuid::new_v4()),
            service: item.service,
            measurement_profile_id,
            measurement_profile: item.measurement_profile,
            customization_data: item.customization_data,
            quantity: Quantity::at_least_one(item.quantity),
            price,
        });
        self.recalculate();
        &self.items[self.items.len() - 1]
    }

    /// Sets the quantity, clamped to at least one. Returns false if no item
    /// has `item_id`.
    pub fn update_quantity(&mut self, item_id: &str, quantity: i64) -> bool {
        let found = match self.items.iter_mut().find(|i| i.id == item_id) {
            Some(item) => { item.quantity = Quantity::at_least_one(quantity); true }
            None => false,
        };
        self.recalculate();
        found
    }

    pub fn remove_item(&mut self, item_id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.id != item_id);
        self.recalculate();
        self.items.len() != before
    }

    pub fn clear(&mut self) { self.items.clear(); self.recalculate(); }

    /// Hands the items and total over, leaving the cart empty.
    pub fn take(&mut self) -> (Vec<CartItem>, Money) {
        let items = std::mem::take(&mut self.items);
        let total = calculate_total(&items);
        self.recalculate();
        (items, total)
    }

    fn recalculate(&mut self) {
        self.total = calculate_total(&self.items);
    }
}

#[derive(Deserialize)]
struct StoredCart {
    #[serde(default)]
    items: Vec<CartItem>,
}

impl From<StoredCart> for Cart {
    fn from(stored: StoredCart) -> Self {
        let mut cart = Cart { items: stored.items, total: Money::ZERO };
        cart.recalculate();
        cart
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::aggregates::service::default_catalog;

    fn priced(price: i64) -> Service {
        let mut service = default_catalog().remove(0);
        service.base_price = Money::from_major(price);
        service
    }

    #[test]
    fn test_cart_operations() {
        let mut cart = Cart::new();
        let first = cart.add_item(NewCartItem::new(priced(100)).with_quantity(2)).id.clone();
        cart.add_item(NewCartItem::new(priced(50)));
        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.total(), Money::from_major(250));

        assert!(cart.remove_item(&first));
        assert_eq!(cart.total(), Money::from_major(50));
    }

    #[test]
    fn test_quantity_never_below_one() {
        let mut cart = Cart::new();
        let id = cart.add_item(NewCartItem::new(priced(30)).with_quantity(3)).id.clone();
        assert!(cart.update_quantity(&id, 0));
        assert_eq!(cart.items()[0].quantity.value(), 1);
        assert!(cart.update_quantity(&id, -7));
        assert_eq!(cart.items()[0].quantity.value(), 1);
        assert_eq!(cart.total(), Money::from_major(30));
    }

    #[test]
    fn test_missing_item_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(NewCartItem::new(priced(10)));
        let before = cart.clone();
        assert!(!cart.remove_item("cart-item-nope"));
        assert!(!cart.update_quantity("cart-item-nope", 5));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_price_is_snapshot() {
        let mut service = priced(100);
        let mut cart = Cart::new();
        cart.add_item(NewCartItem::new(service.clone()));
        service.base_price = Money::from_major(999);
        assert_eq!(cart.items()[0].price, Money::from_major(100));
        assert_eq!(cart.items()[0].service.base_price, Money::from_major(100));
    }

    #[test]
    fn test_ids_unique_per_addition() {
        let mut cart = Cart::new();
        let a = cart.add_item(NewCartItem::new(priced(10))).id.clone();
        let b = cart.add_item(NewCartItem::new(priced(10))).id.clone();
        assert_ne!(a, b);
        assert!(a.starts_with("cart-item-"));
    }

    #[test]
    fn test_take_empties_cart() {
        let mut cart = Cart::new();
        cart.add_item(NewCartItem::new(priced(20)).with_quantity(2));
        let (items, total) = cart.take();
        assert_eq!(items.len(), 1);
        assert_eq!(total, Money::from_major(40));
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Money::ZERO);
    }

    #[test]
    fn test_stored_cart_is_normalised() {
        let mut cart = Cart::new();
        cart.add_item(NewCartItem::new(priced(40)).with_quantity(2));
        let mut raw = serde_json::to_value(&cart).unwrap();
        raw["items"][0]["quantity"] = 0.into();
        raw["total"] = "999".into();

        let loaded: Cart = serde_json::from_value(raw).unwrap();
        assert_eq!(loaded.items()[0].quantity.value(), 1);
        assert_eq!(loaded.total(), Money::from_major(40));
    }

    #[test]
    fn test_huge_price_does_not_overflow() {
        let mut service = priced(0);
        service.base_price = Money::new(rust_decimal::Decimal::MAX);
        let mut cart = Cart::new();
        cart.add_item(NewCartItem::new(service.clone()).with_quantity(2));
        cart.add_item(NewCartItem::new(service));
        assert_eq!(cart.total(), Money::new(rust_decimal::Decimal::MAX));
    }
}
