use farmerp_client::QueryParams;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParcelStatus {
    Active,
    Fallow,
    Archived,
}

impl ParcelStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParcelStatus::Active => "active",
            ParcelStatus::Fallow => "fallow",
            ParcelStatus::Archived => "archived",
        }
    }
}

/// A cultivated land parcel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parcel {
    pub id: String,
    pub name: String,
    pub area_ha: f64,
    pub status: ParcelStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub soil_type: Option<String>,

    /// Id of the crop currently planted, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_crop_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParcelInput {
    pub name: String,
    pub area_ha: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ParcelStatus>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub soil_type: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ParcelFilter {
    pub status: Option<ParcelStatus>,
    pub search: Option<String>,
}

impl ParcelFilter {
    pub fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .insert_opt("status", self.status.map(|s| s.as_str()))
            .insert_opt("search", self.search.as_deref())
    }
}
