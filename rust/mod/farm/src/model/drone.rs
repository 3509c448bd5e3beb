use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DroneStatus {
    Available,
    Flying,
    Charging,
    Maintenance,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Drone {
    pub id: String,
    pub name: String,
    pub model: String,
    pub status: DroneStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub battery_level: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_flight_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DroneInput {
    pub name: String,
    pub model: String,
}

/// An aerial image attached to a drone flight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DroneImage {
    pub id: String,
    pub drone_id: String,
    pub url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parcel_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captured_at: Option<String>,
}
