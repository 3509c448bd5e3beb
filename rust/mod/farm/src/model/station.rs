use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StationKind {
    Weather,
    Soil,
    Water,
    Irrigation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StationStatus {
    Online,
    Offline,
    Maintenance,
}

/// A field monitoring station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    pub id: String,
    pub name: String,
    pub kind: StationKind,
    pub status: StationStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parcel_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,

    /// Battery charge in percent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub battery_level: Option<f64>,

    /// RFC 3339 timestamp of the last reading received.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_reading_at: Option<String>,
}

/// One sample reported by a station. Absent sensors are omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationReading {
    pub station_id: String,
    pub timestamp: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature_c: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub humidity_pct: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub soil_moisture_pct: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rainfall_mm: Option<f64>,
}
