use std::sync::Arc;

use farmerp_client::{ApiClient, ApiError, QueryParams};
use serde::de::IgnoredAny;
use tracing::{error, warn};

use crate::mock;
use crate::model::{Station, StationReading};

use super::item_path;

const BASE: &str = "/api/stations";

#[derive(Clone)]
pub struct StationService {
    api: Arc<ApiClient>,
}

impl StationService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// All stations, or the demo set when the backend call fails.
    pub async fn get_all(&self) -> Vec<Station> {
        match self.api.get(BASE, QueryParams::new()).await {
            Ok(stations) => stations,
            Err(e) => {
                warn!(error = %e, "listing stations failed, using demo data");
                mock::stations()
            }
        }
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Station, ApiError> {
        self.api
            .get(&item_path(BASE, id, ""), QueryParams::new())
            .await
            .inspect_err(|e| error!(id, error = %e, "fetching station failed"))
    }

    /// Readings for one station, optionally bounded to `[from, to]`.
    pub async fn readings(
        &self,
        id: &str,
        from: Option<&str>,
        to: Option<&str>,
    ) -> Result<Vec<StationReading>, ApiError> {
        let params = QueryParams::new()
            .insert_opt("from", from)
            .insert_opt("to", to);
        self.api
            .get(&item_path(BASE, id, "/readings"), params)
            .await
            .inspect_err(|e| error!(id, error = %e, "fetching station readings failed"))
    }

    pub async fn update(&self, id: &str, station: &Station) -> Result<Station, ApiError> {
        self.api
            .put(&item_path(BASE, id, ""), station)
            .await
            .inspect_err(|e| error!(id, error = %e, "updating station failed"))
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.api
            .delete::<IgnoredAny>(&item_path(BASE, id, ""))
            .await
            .map(|_| ())
            .inspect_err(|e| error!(id, error = %e, "deleting station failed"))
    }
}
