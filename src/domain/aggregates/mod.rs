//! Aggregates module
pub mod service;
pub mod measurement;
pub mod cart;
pub mod order;

pub use service::{Service, ServiceCategory, ServiceDraft, ServiceUpdate, PricingType};
pub use measurement::{GarmentType, MeasurementData, MeasurementField, MeasurementProfile, ProfileDraft, ProfileUpdate};
pub use cart::{Cart, CartItem, CustomizationData, NewCartItem, calculate_total};
pub use order::{CustomerInfo, MobileMoneyNetwork, Order, Payment, PaymentDetails, PaymentMethod};
