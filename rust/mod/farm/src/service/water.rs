use std::sync::Arc;

use bytes::Bytes;
use farmerp_client::{ApiClient, ApiError, QueryParams};
use tracing::error;

use crate::model::{ReportFormat, WaterResource, WaterResourceInput};

use super::item_path;

const BASE: &str = "/api/water-resources";

#[derive(Clone)]
pub struct WaterResourceService {
    api: Arc<ApiClient>,
}

impl WaterResourceService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn get_all(&self) -> Result<Vec<WaterResource>, ApiError> {
        self.api
            .get(BASE, QueryParams::new())
            .await
            .inspect_err(|e| error!(error = %e, "listing water resources failed"))
    }

    pub async fn get_by_id(&self, id: &str) -> Result<WaterResource, ApiError> {
        self.api
            .get(&item_path(BASE, id, ""), QueryParams::new())
            .await
            .inspect_err(|e| error!(id, error = %e, "fetching water resource failed"))
    }

    pub async fn create(&self, input: &WaterResourceInput) -> Result<WaterResource, ApiError> {
        self.api
            .post(BASE, input)
            .await
            .inspect_err(|e| error!(name = %input.name, error = %e, "creating water resource failed"))
    }

    pub async fn update(&self, id: &str, input: &WaterResourceInput) -> Result<WaterResource, ApiError> {
        self.api
            .put(&item_path(BASE, id, ""), input)
            .await
            .inspect_err(|e| error!(id, error = %e, "updating water resource failed"))
    }

    /// Consumption report for `[from, to]` as raw file bytes.
    pub async fn export_report(
        &self,
        format: ReportFormat,
        from: Option<&str>,
        to: Option<&str>,
    ) -> Result<Bytes, ApiError> {
        let params = QueryParams::new()
            .insert("format", format.as_str())
            .insert_opt("from", from)
            .insert_opt("to", to);
        self.api
            .download_file(&format!("{BASE}/report"), params)
            .await
            .inspect_err(|e| error!(format = format.as_str(), error = %e, "exporting water report failed"))
    }
}
