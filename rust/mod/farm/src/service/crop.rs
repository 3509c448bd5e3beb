use std::sync::Arc;

use farmerp_client::{ApiClient, ApiError, QueryParams};
use serde::de::IgnoredAny;
use serde_json::json;
use tracing::error;

use crate::model::{Crop, CropInput, GrowthStage};

use super::item_path;

const BASE: &str = "/api/crops";

#[derive(Clone)]
pub struct CropService {
    api: Arc<ApiClient>,
}

impl CropService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn get_all(
        &self,
        parcel_id: Option<&str>,
        stage: Option<GrowthStage>,
    ) -> Result<Vec<Crop>, ApiError> {
        let stage = stage
            .map(|s| serde_json::to_value(s).map_err(|e| ApiError::Encode(e.to_string())))
            .transpose()?;
        let params = QueryParams::from_json(&json!({ "parcelId": parcel_id, "stage": stage }));
        self.api
            .get(BASE, params)
            .await
            .inspect_err(|e| error!(error = %e, "listing crops failed"))
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Crop, ApiError> {
        self.api
            .get(&item_path(BASE, id, ""), QueryParams::new())
            .await
            .inspect_err(|e| error!(id, error = %e, "fetching crop failed"))
    }

    pub async fn create(&self, input: &CropInput) -> Result<Crop, ApiError> {
        self.api
            .post(BASE, input)
            .await
            .inspect_err(|e| error!(parcel = %input.parcel_id, error = %e, "creating crop failed"))
    }

    pub async fn update(&self, id: &str, input: &CropInput) -> Result<Crop, ApiError> {
        self.api
            .put(&item_path(BASE, id, ""), input)
            .await
            .inspect_err(|e| error!(id, error = %e, "updating crop failed"))
    }

    /// Move a crop to another growth stage.
    pub async fn advance(&self, id: &str, stage: GrowthStage) -> Result<Crop, ApiError> {
        self.api
            .patch(&item_path(BASE, id, ""), &json!({ "stage": stage }))
            .await
            .inspect_err(|e| error!(id, error = %e, "changing crop stage failed"))
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.api
            .delete::<IgnoredAny>(&item_path(BASE, id, ""))
            .await
            .map(|_| ())
            .inspect_err(|e| error!(id, error = %e, "deleting crop failed"))
    }
}
