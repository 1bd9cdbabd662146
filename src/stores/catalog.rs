//! Admin-editable service catalog, seeded with the default services on
//! first read.

use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;
use crate::domain::aggregates::service::default_catalog;
use crate::domain::aggregates::{Service, ServiceCategory, ServiceDraft, ServiceUpdate};
use crate::storage::{keys, KeyValueStore, Records};
use crate::{Money, Result, StorefrontError};

/// Largest base price, in cedis, an admin may set.
pub const MAX_BASE_PRICE: i64 = 1_000_000_000;

#[derive(Clone)]
pub struct ServiceCatalog {
    kv: Arc<dyn KeyValueStore>,
}

impl ServiceCatalog {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self { Self { kv } }

    pub fn all_services(&self) -> Result<Vec<Service>> {
        if self.kv.get(keys::SERVICES)?.is_none() {
            let services = default_catalog();
            Records::from_records(keys::SERVICES, &services)?.save(self.kv.as_ref())?;
            tracing::info!(count = services.len(), "seeded service catalog");
            return Ok(services);
        }
        Ok(self.records()?.decoded())
    }

    /// Stored services, or the defaults when the document is unreadable.
    fn records(&self) -> Result<Records> {
        match self.kv.get(keys::SERVICES)?.and_then(|raw| Records::parse(keys::SERVICES, &raw)) {
            Some(records) => Ok(records),
            None => Records::from_records(keys::SERVICES, &default_catalog()),
        }
    }

    pub fn service(&self, id: &str) -> Result<Option<Service>> {
        Ok(self.all_services()?.into_iter().find(|s| s.id == id))
    }

    pub fn services_in_category(&self, category: ServiceCategory) -> Result<Vec<Service>> {
        let mut services = self.all_services()?;
        services.retain(|s| s.category == category);
        Ok(services)
    }

    pub fn create_service(&self, draft: ServiceDraft) -> Result<Service> {
        draft.validate()?;
        check_price(draft.base_price)?;
        let mut records = self.records()?;
        let service = Service::from_draft(Uuid::new_v4().to_string(), draft);
        records.push(&service)?;
        records.save(self.kv.as_ref())?;
        tracing::info!(service_id = %service.id, name = %service.name, "service created");
        Ok(service)
    }

    pub fn update_service(&self, id: &str, update: ServiceUpdate) -> Result<Option<Service>> {
        if let Some(price) = update.base_price {
            check_price(price)?;
        }
        let mut records = self.records()?;
        let updated = records.update_first(|s: &Service| s.id == id, |s| s.apply(update))?;
        if updated.is_some() {
            records.save(self.kv.as_ref())?;
        }
        Ok(updated)
    }

    pub fn delete_service(&self, id: &str) -> Result<bool> {
        let mut records = self.records()?;
        if records.remove_where(|s: &Service| s.id == id) == 0 {
            return Ok(false);
        }
        records.save(self.kv.as_ref())?;
        tracing::info!(service_id = id, "service deleted");
        Ok(true)
    }
}

fn check_price(price: Money) -> Result<()> {
    if price.is_negative() || price > Money::from_major(MAX_BASE_PRICE) {
        return Err(StorefrontError::InvalidPrice);
    }
    Ok(())
}
