//! Persistent stores. Each one owns a single top-level key and rewrites the
//! whole document on every mutation; the last write wins.

mod cart;
mod catalog;
mod measurements;
mod orders;
mod session;

pub use cart::CartStore;
pub use catalog::ServiceCatalog;
pub use measurements::MeasurementStore;
pub use orders::{OrderQuery, OrderSort, OrderStore};
pub use session::{AdminSession, CustomerSession, Session, SessionStore};

#[cfg(test)]
pub(crate) mod test_support {
    use crate::storage::{KeyValueStore, MemoryStore};
    use std::sync::Arc;

    pub(crate) fn memory() -> Arc<dyn KeyValueStore> {
        Arc::new(MemoryStore::new())
    }
}
