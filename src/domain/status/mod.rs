//! Order status, display ordering and timeline rendering rules.
//!
//! Any status may be set to any other status; nothing here guards
//! transitions. The canonical order only drives how progress is shown.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    // Older checkouts persisted new orders as PENDING.
    #[default]
    #[serde(alias = "PENDING")]
    Received,
    InProgress,
    ReadyForDelivery,
    Completed,
    Cancelled,
}

/// Progress sequence shown on the timeline. `Cancelled` is not part of it.
pub const CANONICAL_ORDER: [OrderStatus; 4] = [
    OrderStatus::Received,
    OrderStatus::InProgress,
    OrderStatus::ReadyForDelivery,
    OrderStatus::Completed,
];

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Received,
        OrderStatus::InProgress,
        OrderStatus::ReadyForDelivery,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Received => "Received",
            Self::InProgress => "In Progress",
            Self::ReadyForDelivery => "Ready for Delivery",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Wire name, e.g. `READY_FOR_DELIVERY`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Received => "RECEIVED",
            Self::InProgress => "IN_PROGRESS",
            Self::ReadyForDelivery => "READY_FOR_DELIVERY",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }

    pub fn canonical_index(&self) -> Option<usize> {
        CANONICAL_ORDER.iter().position(|s| s == self)
    }

    /// Still being worked on: received, in progress or ready for delivery.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Received | Self::InProgress | Self::ReadyForDelivery)
    }

    pub fn tone(&self) -> BadgeTone {
        match self {
            Self::Received => BadgeTone::Warning,
            Self::InProgress => BadgeTone::Info,
            Self::ReadyForDelivery => BadgeTone::Success,
            Self::Completed => BadgeTone::Neutral,
            Self::Cancelled => BadgeTone::Danger,
        }
    }

    pub fn badge(&self) -> StatusBadge {
        StatusBadge { status: *self, label: self.label(), tone: self.tone() }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.label()) }
}

impl FromStr for OrderStatus {
    type Err = crate::StorefrontError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase();
        if wanted == "PENDING" {
            return Ok(Self::Received);
        }
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == wanted)
            .ok_or_else(|| crate::StorefrontError::InvalidStatus(s.to_string()))
    }
}

/// Semantic colour family of a status badge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeTone { Warning, Info, Success, Neutral, Danger }

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct StatusBadge {
    pub status: OrderStatus,
    pub label: &'static str,
    pub tone: BadgeTone,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepState { Done, Current, Pending }

/// Where `step` sits relative to `current` in the canonical order.
///
/// A `current` outside the canonical order (only `Cancelled`) has no
/// position, so every step reads as pending.
pub fn step_state(step: OrderStatus, current: OrderStatus) -> StepState {
    match (step.canonical_index(), current.canonical_index()) {
        (Some(s), Some(c)) if s < c => StepState::Done,
        (Some(s), Some(c)) if s == c => StepState::Current,
        _ => StepState::Pending,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TimelineStep {
    pub status: OrderStatus,
    pub label: &'static str,
    pub state: StepState,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Timeline {
    Progress { steps: Vec<TimelineStep> },
    /// Shown instead of the steps; no partial progress is rendered.
    Cancelled,
}

pub fn timeline(current: OrderStatus) -> Timeline {
    if current == OrderStatus::Cancelled {
        return Timeline::Cancelled;
    }
    let steps = CANONICAL_ORDER
        .into_iter()
        .map(|status| TimelineStep { status, label: status.label(), state: step_state(status, current) })
        .collect();
    Timeline::Progress { steps }
}

/// Status tab applied to an order list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    /// Customer-facing "Active" tab.
    Active,
    Only(OrderStatus),
}

impl StatusFilter {
    pub fn matches(&self, status: OrderStatus) -> bool {
        match self {
            Self::All => true,
            Self::Active => status.is_active(),
            Self::Only(wanted) => *wanted == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = crate::StorefrontError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "" | "ALL" => Ok(Self::All),
            "ACTIVE" => Ok(Self::Active),
            other => other.parse().map(Self::Only),
        }
    }
}
