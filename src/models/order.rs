use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Normal,
    Urgent,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryType {
    SameDay,
    NextDay,
    #[default]
    Standard,
}

/// Read-only description of a packed order awaiting a vehicle. Built by the
/// order-management flow per assignment attempt; never stored here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderForAssignment {
    pub order_id: String,
    pub customer_location: String,
    pub priority: Priority,
    #[serde(default = "default_weight")]
    pub weight: u32,
    #[serde(default)]
    pub delivery_type: DeliveryType,
}

fn default_weight() -> u32 {
    1
}
