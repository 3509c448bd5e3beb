use std::sync::Arc;

use farmerp_client::{ApiClient, ApiError, QueryParams};
use serde::de::IgnoredAny;
use serde_json::json;
use tracing::{error, warn};

use crate::mock;
use crate::model::{MaintenanceFilter, MaintenanceInput, MaintenanceTask, TaskStatus};

use super::item_path;

const BASE: &str = "/api/maintenance";

#[derive(Clone)]
pub struct MaintenanceService {
    api: Arc<ApiClient>,
}

impl MaintenanceService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Tasks matching `filter`, or the unfiltered demo set on failure.
    pub async fn get_all(&self, filter: &MaintenanceFilter) -> Vec<MaintenanceTask> {
        match self.api.get(BASE, filter.to_query()).await {
            Ok(tasks) => tasks,
            Err(e) => {
                warn!(error = %e, "listing maintenance tasks failed, using demo data");
                mock::maintenance_tasks()
            }
        }
    }

    pub async fn get_by_id(&self, id: &str) -> Result<MaintenanceTask, ApiError> {
        self.api
            .get(&item_path(BASE, id, ""), QueryParams::new())
            .await
            .inspect_err(|e| error!(id, error = %e, "fetching maintenance task failed"))
    }

    pub async fn create(&self, input: &MaintenanceInput) -> Result<MaintenanceTask, ApiError> {
        self.api
            .post(BASE, input)
            .await
            .inspect_err(|e| error!(title = %input.title, error = %e, "creating maintenance task failed"))
    }

    pub async fn update(
        &self,
        id: &str,
        input: &MaintenanceInput,
    ) -> Result<MaintenanceTask, ApiError> {
        self.api
            .put(&item_path(BASE, id, ""), input)
            .await
            .inspect_err(|e| error!(id, error = %e, "updating maintenance task failed"))
    }

    pub async fn set_status(&self, id: &str, status: TaskStatus) -> Result<MaintenanceTask, ApiError> {
        self.api
            .patch(&item_path(BASE, id, "/status"), &json!({ "status": status }))
            .await
            .inspect_err(|e| error!(id, status = status.as_str(), error = %e, "changing task status failed"))
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.api
            .delete::<IgnoredAny>(&item_path(BASE, id, ""))
            .await
            .map(|_| ())
            .inspect_err(|e| error!(id, error = %e, "deleting maintenance task failed"))
    }
}
