//! Measurement Profile Store
//!
//! Profiles of every owner share one document; each read and write is
//! filtered by the store's ownership key.

use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;
use crate::domain::aggregates::{MeasurementProfile, ProfileDraft, ProfileUpdate};
use crate::storage::{keys, KeyValueStore, Records};
use crate::Result;

#[derive(Clone)]
pub struct MeasurementStore {
    kv: Arc<dyn KeyValueStore>,
    owner: String,
}

impl MeasurementStore {
    pub fn new(kv: Arc<dyn KeyValueStore>, owner: impl Into<String>) -> Self {
        Self { kv, owner: owner.into() }
    }

    pub fn owner(&self) -> &str { &self.owner }

    fn records(&self) -> Result<Records> {
        Ok(Records::load(self.kv.as_ref(), keys::MEASUREMENT_PROFILES)?)
    }

    fn owns(&self, profile: &MeasurementProfile) -> bool { profile.user_id == self.owner }

    pub fn get_measurement_profiles(&self) -> Result<Vec<MeasurementProfile>> {
        let mut profiles: Vec<MeasurementProfile> = self.records()?.decoded();
        profiles.retain(|p| self.owns(p));
        Ok(profiles)
    }

    pub fn get_measurement_profile(&self, id: &str) -> Result<Option<MeasurementProfile>> {
        Ok(self.get_measurement_profiles()?.into_iter().find(|p| p.id == id))
    }

    pub fn save_measurement_profile(&self, draft: ProfileDraft) -> Result<MeasurementProfile> {
        let mut records = self.records()?;
        let profile = MeasurementProfile::create(
            format!("profile-{}", Uuid::new_v4()), self.owner.clone(), draft, Utc::now(),
        );
        records.push(&profile)?;
        records.save(self.kv.as_ref())?;
        tracing::info!(profile_id = %profile.id, garment = ?profile.garment_type, "measurement profile saved");
        Ok(profile)
    }

    /// Merges `update` into the owner's profile. `None` when the id is unknown
    /// or belongs to someone else.
    pub fn update_measurement_profile(&self, id: &str, update: ProfileUpdate) -> Result<Option<MeasurementProfile>> {
        let mut records = self.records()?;
        let updated = records.update_first(
            |p: &MeasurementProfile| p.id == id && self.owns(p),
            |p| p.apply(update, Utc::now()),
        )?;
        if updated.is_some() {
            records.save(self.kv.as_ref())?;
        }
        Ok(updated)
    }

    /// Removes the owner's profile permanently. Returns whether anything was removed.
    pub fn delete_measurement_profile(&self, id: &str) -> Result<bool> {
        let mut records = self.records()?;
        if records.remove_where(|p: &MeasurementProfile| p.id == id && self.owns(p)) == 0 {
            return Ok(false);
        }
        records.save(self.kv.as_ref())?;
        tracing::info!(profile_id = id, "measurement profile deleted");
        Ok(true)
    }
}
