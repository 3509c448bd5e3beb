use std::sync::Arc;

use farmerp_client::{ApiClient, ApiError, FileUpload, QueryParams};
use serde_json::Value;
use tracing::error;

use crate::model::{Drone, DroneImage, DroneInput};

use super::item_path;

const BASE: &str = "/api/drones";

#[derive(Clone)]
pub struct DroneService {
    api: Arc<ApiClient>,
}

impl DroneService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn get_all(&self) -> Result<Vec<Drone>, ApiError> {
        self.api
            .get(BASE, QueryParams::new())
            .await
            .inspect_err(|e| error!(error = %e, "listing drones failed"))
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Drone, ApiError> {
        self.api
            .get(&item_path(BASE, id, ""), QueryParams::new())
            .await
            .inspect_err(|e| error!(id, error = %e, "fetching drone failed"))
    }

    pub async fn create(&self, input: &DroneInput) -> Result<Drone, ApiError> {
        self.api
            .post(BASE, input)
            .await
            .inspect_err(|e| error!(name = %input.name, error = %e, "registering drone failed"))
    }

    pub async fn images(&self, id: &str) -> Result<Vec<DroneImage>, ApiError> {
        self.api
            .get(&item_path(BASE, id, "/images"), QueryParams::new())
            .await
            .inspect_err(|e| error!(id, error = %e, "listing drone images failed"))
    }

    /// Upload one aerial image, tagged with the parcel it covers.
    pub async fn upload_image(
        &self,
        id: &str,
        image: FileUpload,
        parcel_id: Option<&str>,
    ) -> Result<DroneImage, ApiError> {
        let parcel = parcel_id.map_or(Value::Null, |p| Value::String(p.to_string()));
        self.api
            .upload_file(&item_path(BASE, id, "/images"), image, &[("parcelId", parcel)])
            .await
            .inspect_err(|e| error!(id, error = %e, "uploading drone image failed"))
    }
}
