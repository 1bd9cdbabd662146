//! Service Aggregate

use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::domain::value_objects::Money;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceCategory { Suit, AfricanPrint, NursesScrubs, Embroidery, TshirtCustomization }

impl ServiceCategory {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Suit => "Custom Suits",
            Self::AfricanPrint => "African Prints",
            Self::NursesScrubs => "Nurses' Scrubs",
            Self::Embroidery => "Embroidery",
            Self::TshirtCustomization => "T-Shirt Customization",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PricingType { Fixed, #[default] StartingFrom }

/// A purchasable offering. Cart items embed a full copy taken when the item
/// is added, so later catalog edits never reach existing carts or orders.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: String,
    pub name: String,
    pub category: ServiceCategory,
    pub description: String,
    #[serde(default)]
    pub full_description: String,
    pub base_price: Money,
    #[serde(default)]
    pub pricing_type: PricingType,
    pub requires_measurements: bool,
    #[serde(default)]
    pub image_urls: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub turnaround_time: String,
}

/// A service as submitted by an admin, before it has an id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDraft {
    #[validate(length(min = 1, message = "Service name is required"))]
    pub name: String,
    pub category: ServiceCategory,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub full_description: String,
    pub base_price: Money,
    #[serde(default)]
    pub pricing_type: PricingType,
    #[serde(default)]
    pub requires_measurements: bool,
    #[serde(default)]
    pub image_urls: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub turnaround_time: String,
}

/// Partial edit; `None` keeps the current value.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceUpdate {
    pub name: Option<String>,
    pub category: Option<ServiceCategory>,
    pub description: Option<String>,
    pub full_description: Option<String>,
    pub base_price: Option<Money>,
    pub pricing_type: Option<PricingType>,
    pub requires_measurements: Option<bool>,
    pub image_urls: Option<Vec<String>>,
    pub features: Option<Vec<String>>,
    pub turnaround_time: Option<String>,
}

impl Service {
    pub fn from_draft(id: impl Into<String>, draft: ServiceDraft) -> Self {
        Self {
            id: id.into(), name: draft.name, category: draft.category, description: draft.description,
            full_description: draft.full_description, base_price: draft.base_price,
            pricing_type: draft.pricing_type, requires_measurements: draft.requires_measurements,
            image_urls: draft.image_urls, features: draft.features, turnaround_time: draft.turnaround_time,
        }
    }

    pub fn apply(&mut self, update: ServiceUpdate) {
        if let Some(v) = update.name { self.name = v; }
        if let Some(v) = update.category { self.category = v; }
        if let Some(v) = update.description { self.description = v; }
        if let Some(v) = update.full_description { self.full_description = v; }
        if let Some(v) = update.base_price { self.base_price = v; }
        if let Some(v) = update.pricing_type { self.pricing_type = v; }
        if let Some(v) = update.requires_measurements { self.requires_measurements = v; }
        if let Some(v) = update.image_urls { self.image_urls = v; }
        if let Some(v) = update.features { self.features = v; }
        if let Some(v) = update.turnaround_time { self.turnaround_time = v; }
    }
}

fn strings(items: &[&str]) -> Vec<String> { items.iter().map(|s| s.to_string()).collect() }

/// Catalog the shop opens with before any admin edits.
pub fn default_catalog() -> Vec<Service> {
    vec![
        Service {
            id: "1".into(),
            name: "Custom Tailored Suits".into(),
            category: ServiceCategory::Suit,
            description: "Professional tailored suits crafted to perfection with premium fabrics and expert craftsmanship.".into(),
            full_description: "A perfectly fitted suit, tailored to your exact measurements and style preferences, for business, weddings or special occasions.".into(),
            base_price: Money::from_major(800),
            pricing_type: PricingType::StartingFrom,
            requires_measurements: true,
            image_urls: strings(&["https://images.unsplash.com/photo-1507679799987-c73779587ccf?w=800"]),
            features: strings(&[
                "Premium Italian wool fabrics",
                "Custom measurements and fitting",
                "Choice of lapel, button, and pocket styles",
                "Monogram embroidery included",
                "Two fittings included",
                "Complimentary alterations within 30 days",
            ]),
            turnaround_time: "3-4 weeks".into(),
        },
        Service {
            id: "2".into(),
            name: "African Print Garments".into(),
            category: ServiceCategory::AfricanPrint,
            description: "Beautiful African print dresses and garments that celebrate culture with modern style.".into(),
            full_description: "Custom African print dresses, shirts and traditional attire blending vibrant patterns with contemporary fashion.".into(),
            base_price: Money::from_major(250),
            pricing_type: PricingType::StartingFrom,
            requires_measurements: true,
            image_urls: strings(&["/African Print Garments.jpg"]),
            features: strings(&[
                "Authentic African print fabrics",
                "Custom design or choose from our patterns",
                "Traditional and modern styles available",
                "Perfect fit guarantee",
            ]),
            turnaround_time: "2-3 weeks".into(),
        },
        Service {
            id: "3".into(),
            name: "Nurses' Scrubs".into(),
            category: ServiceCategory::NursesScrubs,
            description: "Comfortable and professional medical scrubs designed for healthcare professionals.".into(),
            full_description: "Durable, breathable scrubs cut to your measurements for long shifts.".into(),
            base_price: Money::from_major(120),
            pricing_type: PricingType::StartingFrom,
            requires_measurements: true,
            image_urls: Vec::new(),
            features: strings(&["Breathable fabrics", "Relaxed or fitted cut", "Name embroidery available"]),
            turnaround_time: "1-2 weeks".into(),
        },
        Service {
            id: "4".into(),
            name: "Custom Embroidery Services".into(),
            category: ServiceCategory::Embroidery,
            description: "Custom embroidery for personalized branding, logos, and decorative designs.".into(),
            full_description: "Precision embroidery for garments, accessories and promotional items, from company logos to monograms.".into(),
            base_price: Money::from_major(35),
            pricing_type: PricingType::StartingFrom,
            requires_measurements: false,
            image_urls: strings(&["/Custom embroidery services.jpg"]),
            features: strings(&[
                "Logo and text embroidery",
                "Multiple thread colors available",
                "Various font styles and sizes",
                "Placement customization",
                "Suitable for clothing, bags, caps, and more",
                "Bulk discounts available",
            ]),
            turnaround_time: "3-5 business days".into(),
        },
        Service {
            id: "5".into(),
            name: "T-Shirt Customization".into(),
            category: ServiceCategory::TshirtCustomization,
            description: "Personalized t-shirts with custom designs, prints, and branding.".into(),
            full_description: "Screen printing, heat transfer and direct-to-garment printing on quality blanks or your own shirts.".into(),
            base_price: Money::from_major(45),
            pricing_type: PricingType::StartingFrom,
            requires_measurements: false,
            image_urls: strings(&["/T-Shirt Customisation.jpg"]),
            features: strings(&[
                "Full-color printing available",
                "Front, back, and sleeve printing",
                "Various t-shirt styles and colors",
                "Design assistance available",
                "High-quality, long-lasting prints",
                "Bulk order discounts",
            ]),
            turnaround_time: "5-7 business days".into(),
        },
    ]
}
