use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IrrigationMode {
    Manual,
    Scheduled,
    Sensor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneStatus {
    Idle,
    Running,
    Fault,
}

/// A valve-controlled irrigation zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IrrigationZone {
    pub id: String,
    pub name: String,
    pub parcel_id: String,
    pub mode: IrrigationMode,
    pub status: ZoneStatus,

    /// Nominal flow in litres per minute.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flow_rate_lpm: Option<f64>,

    /// Moisture level below which sensor mode opens the valve.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moisture_threshold_pct: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IrrigationZoneInput {
    pub name: String,
    pub parcel_id: String,
    pub mode: IrrigationMode,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flow_rate_lpm: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moisture_threshold_pct: Option<f64>,
}

/// A single watering run, started manually or by schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IrrigationRun {
    pub id: String,
    pub zone_id: String,
    pub started_at: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_litres: Option<f64>,
}
