//! King Kart Tailoring
//!
//! Storefront and admin core for a custom-tailoring business.
//!
//! ## Features
//! - Service catalog management
//! - Cart with an always-consistent total
//! - Order placement, lookup and status tracking
//! - Measurement profiles scoped to an owner
//! - Customer analytics and dashboard statistics derived from orders
//!
//! All state lives behind the [`storage::KeyValueStore`] capability, so the
//! same stores run against files on disk or an in-memory map in tests.

pub mod checkout;
pub mod config;
pub mod domain;
pub mod http;
pub mod storage;
pub mod stores;

use thiserror::Error;

pub use domain::aggregates::{
    Cart, CartItem, CustomerInfo, CustomizationData, GarmentType, MeasurementProfile,
    MobileMoneyNetwork, NewCartItem, Order, Payment, PaymentMethod, PricingType, Service,
    ServiceCategory,
};
pub use domain::status::{OrderStatus, StepState, Timeline};
pub use domain::value_objects::{Money, OrderNumber, Quantity};

// =============================================================================
// Error Types
// =============================================================================

#[derive(Error, Debug)]
pub enum StorefrontError {
    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Cart is empty")]
    EmptyCart,

    #[error("Mobile money payments need a network and a phone number")]
    MissingPaymentDetails,

    #[error("Price must not be negative")]
    InvalidPrice,

    #[error("Invalid order number: {0}")]
    InvalidOrderNumber(#[from] domain::value_objects::OrderNumberError),

    #[error("Unknown order status: {0}")]
    InvalidStatus(String),

    #[error("Service not found")]
    ServiceNotFound,

    #[error("Measurement profile not found")]
    ProfileNotFound,

    #[error("Invalid credentials")]
    InvalidCredentials,
}

impl From<validator::ValidationErrors> for StorefrontError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}

pub type Result<T> = std::result::Result<T, StorefrontError>;
