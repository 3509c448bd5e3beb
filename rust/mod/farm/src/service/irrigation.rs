use std::sync::Arc;

use farmerp_client::{ApiClient, ApiError, QueryParams};
use serde_json::json;
use tracing::error;

use crate::model::{IrrigationRun, IrrigationZone, IrrigationZoneInput};

use super::item_path;

const ZONES: &str = "/api/irrigation/zones";
const RUNS: &str = "/api/irrigation/runs";

#[derive(Clone)]
pub struct IrrigationService {
    api: Arc<ApiClient>,
}

impl IrrigationService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn zones(&self, parcel_id: Option<&str>) -> Result<Vec<IrrigationZone>, ApiError> {
        let params = QueryParams::new().insert_opt("parcelId", parcel_id);
        self.api
            .get(ZONES, params)
            .await
            .inspect_err(|e| error!(error = %e, "listing irrigation zones failed"))
    }

    pub async fn zone(&self, id: &str) -> Result<IrrigationZone, ApiError> {
        self.api
            .get(&item_path(ZONES, id, ""), QueryParams::new())
            .await
            .inspect_err(|e| error!(id, error = %e, "fetching irrigation zone failed"))
    }

    pub async fn create_zone(&self, input: &IrrigationZoneInput) -> Result<IrrigationZone, ApiError> {
        self.api
            .post(ZONES, input)
            .await
            .inspect_err(|e| error!(name = %input.name, error = %e, "creating irrigation zone failed"))
    }

    pub async fn update_zone(
        &self,
        id: &str,
        input: &IrrigationZoneInput,
    ) -> Result<IrrigationZone, ApiError> {
        self.api
            .put(&item_path(ZONES, id, ""), input)
            .await
            .inspect_err(|e| error!(id, error = %e, "updating irrigation zone failed"))
    }

    /// Open the zone's valve, for `duration_min` minutes when given.
    pub async fn start(&self, id: &str, duration_min: Option<u32>) -> Result<IrrigationRun, ApiError> {
        self.api
            .post(&item_path(ZONES, id, "/start"), &json!({ "durationMinutes": duration_min }))
            .await
            .inspect_err(|e| error!(id, error = %e, "starting irrigation failed"))
    }

    pub async fn stop(&self, id: &str) -> Result<IrrigationRun, ApiError> {
        self.api
            .post(&item_path(ZONES, id, "/stop"), &json!({}))
            .await
            .inspect_err(|e| error!(id, error = %e, "stopping irrigation failed"))
    }

    pub async fn history(
        &self,
        zone_id: &str,
        limit: Option<u32>,
    ) -> Result<Vec<IrrigationRun>, ApiError> {
        let params = QueryParams::new()
            .insert("zoneId", zone_id)
            .insert_opt("limit", limit);
        self.api
            .get(RUNS, params)
            .await
            .inspect_err(|e| error!(zone_id, error = %e, "fetching irrigation history failed"))
    }
}
