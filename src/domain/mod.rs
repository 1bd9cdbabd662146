//! Domain model: aggregates, value objects, status rules and read-time views.
pub mod aggregates;
pub mod analytics;
pub mod events;
pub mod status;
pub mod value_objects;
