use std::sync::Arc;

use farmerp_client::{ApiClient, ApiError, QueryParams};
use serde::de::IgnoredAny;
use tracing::error;

use crate::model::{Crop, Parcel, ParcelFilter, ParcelInput};

use super::item_path;

const BASE: &str = "/api/parcels";

#[derive(Clone)]
pub struct ParcelService {
    api: Arc<ApiClient>,
}

impl ParcelService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn get_all(&self, filter: &ParcelFilter) -> Result<Vec<Parcel>, ApiError> {
        self.api
            .get(BASE, filter.to_query())
            .await
            .inspect_err(|e| error!(error = %e, "listing parcels failed"))
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Parcel, ApiError> {
        self.api
            .get(&item_path(BASE, id, ""), QueryParams::new())
            .await
            .inspect_err(|e| error!(id, error = %e, "fetching parcel failed"))
    }

    /// Crops planted on a parcel, current and past.
    pub async fn crops(&self, id: &str) -> Result<Vec<Crop>, ApiError> {
        self.api
            .get(&item_path(BASE, id, "/crops"), QueryParams::new())
            .await
            .inspect_err(|e| error!(id, error = %e, "fetching parcel crops failed"))
    }

    pub async fn create(&self, input: &ParcelInput) -> Result<Parcel, ApiError> {
        self.api
            .post(BASE, input)
            .await
            .inspect_err(|e| error!(name = %input.name, error = %e, "creating parcel failed"))
    }

    pub async fn update(&self, id: &str, input: &ParcelInput) -> Result<Parcel, ApiError> {
        self.api
            .put(&item_path(BASE, id, ""), input)
            .await
            .inspect_err(|e| error!(id, error = %e, "updating parcel failed"))
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.api
            .delete::<IgnoredAny>(&item_path(BASE, id, ""))
            .await
            .map(|_| ())
            .inspect_err(|e| error!(id, error = %e, "deleting parcel failed"))
    }
}
