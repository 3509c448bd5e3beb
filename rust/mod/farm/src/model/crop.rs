use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrowthStage {
    Planned,
    Sown,
    Growing,
    Flowering,
    Harvested,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Crop {
    pub id: String,
    pub parcel_id: String,
    pub variety: String,
    pub stage: GrowthStage,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sowing_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_harvest_date: Option<String>,

    /// Expected yield in tonnes per hectare.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_yield: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CropInput {
    pub parcel_id: String,
    pub variety: String,
    pub stage: GrowthStage,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sowing_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_harvest_date: Option<String>,
}
