//! Measurement Profile Aggregate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GarmentType { Suit, AfricanPrint, NursesScrubs }

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct MeasurementField {
    pub key: &'static str,
    pub label: &'static str,
    pub guide: &'static str,
}

const fn field(key: &'static str, label: &'static str, guide: &'static str) -> MeasurementField {
    MeasurementField { key, label, guide }
}

const SUIT_FIELDS: &[MeasurementField] = &[
    field("chest", "Chest", "Measure around the fullest part of your chest"),
    field("waist", "Waist", "Measure around your natural waistline"),
    field("hips", "Hips", "Measure around the fullest part of your hips"),
    field("inseam", "Inseam", "Measure from crotch to ankle along inner leg"),
    field("sleeveLength", "Sleeve Length", "Measure from shoulder to wrist with arm slightly bent"),
    field("shoulderWidth", "Shoulder Width", "Measure from shoulder point to shoulder point across back"),
    field("neck", "Neck", "Measure around the base of your neck"),
    field("shirtLength", "Shirt Length", "Measure from shoulder to desired hem length"),
];

const AFRICAN_PRINT_FIELDS: &[MeasurementField] = &[
    field("bust", "Bust", "Measure around the fullest part of your bust"),
    field("waist", "Waist", "Measure around your natural waistline"),
    field("hips", "Hips", "Measure around the fullest part of your hips"),
    field("dressLength", "Dress Length", "Measure from shoulder to desired hem length"),
    field("sleeveLength", "Sleeve Length", "Measure from shoulder to wrist (if applicable)"),
    field("shoulderWidth", "Shoulder Width", "Measure from shoulder point to shoulder point"),
];

const NURSES_SCRUBS_FIELDS: &[MeasurementField] = &[
    field("chest", "Chest", "Measure around the fullest part of your chest"),
    field("waist", "Waist", "Measure around your natural waistline"),
    field("inseam", "Inseam", "Measure from crotch to ankle for pants"),
    field("topLength", "Top Length", "Measure from shoulder to desired top hem"),
    field("preferredFit", "Preferred Fit", "Select: Relaxed or Fitted"),
];

impl GarmentType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Suit => "Suit",
            Self::AfricanPrint => "African Print / Dress",
            Self::NursesScrubs => "Nurses' Scrubs",
        }
    }

    /// Measurements that matter for this garment, in display order.
    pub fn fields(&self) -> &'static [MeasurementField] {
        match self {
            Self::Suit => SUIT_FIELDS,
            Self::AfricanPrint => AFRICAN_PRINT_FIELDS,
            Self::NursesScrubs => NURSES_SCRUBS_FIELDS,
        }
    }
}

/// Field key to "value + unit", e.g. `"chest" -> "38 inches"`.
pub type MeasurementData = BTreeMap<String, String>;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementProfile {
    pub id: String,
    pub user_id: String,
    pub profile_name: String,
    pub garment_type: GarmentType,
    #[serde(default)]
    pub measurement_data: MeasurementData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measurement_file_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A profile as entered by the user; identity and timestamps are assigned
/// by the store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDraft {
    pub profile_name: String,
    pub garment_type: GarmentType,
    #[serde(default)]
    pub measurement_data: MeasurementData,
    #[serde(default)]
    pub measurement_file_url: Option<String>,
}

/// Partial edit. Identity, ownership and `created_at` are not editable.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub profile_name: Option<String>,
    pub garment_type: Option<GarmentType>,
    pub measurement_data: Option<MeasurementData>,
    /// `Some(None)` (an explicit JSON `null`) clears an uploaded file.
    #[serde(default, deserialize_with = "explicit_null", skip_serializing_if = "Option::is_none")]
    pub measurement_file_url: Option<Option<String>>,
}

fn explicit_null<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Option<String>>, D::Error> {
    Option::<String>::deserialize(deserializer).map(Some)
}

impl MeasurementProfile {
    pub fn create(id: impl Into<String>, owner: impl Into<String>, draft: ProfileDraft, now: DateTime<Utc>) -> Self {
        Self {
            id: id.into(), user_id: owner.into(), profile_name: draft.profile_name,
            garment_type: draft.garment_type, measurement_data: draft.measurement_data,
            measurement_file_url: draft.measurement_file_url, created_at: now, updated_at: now,
        }
    }

    pub fn apply(&mut self, update: ProfileUpdate, now: DateTime<Utc>) {
        if let Some(v) = update.profile_name { self.profile_name = v; }
        if let Some(v) = update.garment_type { self.garment_type = v; }
        if let Some(v) = update.measurement_data { self.measurement_data = v; }
        if let Some(v) = update.measurement_file_url { self.measurement_file_url = v; }
        self.updated_at = now;
    }

    /// Backed by an uploaded document rather than manual entry.
    pub fn is_uploaded(&self) -> bool { self.measurement_file_url.is_some() }

    /// Entries for this garment's fields, in field order. Keys that don't
    /// belong to the garment are skipped, as are fields with no value.
    pub fn relevant_measurements(&self) -> Vec<(&'static MeasurementField, &str)> {
        self.garment_type
            .fields()
            .iter()
            .filter_map(|f| self.measurement_data.get(f.key).map(|v| (f, v.as_str())))
            .collect()
    }
}
