use std::sync::Arc;

use farmerp_client::{ApiClient, ApiError, QueryParams};
use serde_json::json;
use tracing::{error, warn};

use crate::mock;
use crate::model::{Alert, AlertFilter, AlertSeverity};

use super::item_path;

const BASE: &str = "/api/alerts";

#[derive(Clone)]
pub struct AlertService {
    api: Arc<ApiClient>,
}

impl AlertService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Alerts matching `filter`, or the whole demo set on failure.
    pub async fn get_all(&self, filter: &AlertFilter) -> Vec<Alert> {
        match self.api.get(BASE, filter.to_query()).await {
            Ok(alerts) => alerts,
            Err(e) => {
                warn!(error = %e, "listing alerts failed, using demo data");
                mock::alerts()
            }
        }
    }

    /// Active alerts at or above `min`.
    pub async fn get_active(&self, min: AlertSeverity) -> Result<Vec<Alert>, ApiError> {
        let params = QueryParams::new().insert("minSeverity", min.as_str());
        self.api
            .get(&format!("{BASE}/active"), params)
            .await
            .inspect_err(|e| error!(error = %e, "fetching active alerts failed"))
    }

    pub async fn acknowledge(&self, id: &str) -> Result<Alert, ApiError> {
        self.api
            .patch(&item_path(BASE, id, "/acknowledge"), &json!({}))
            .await
            .inspect_err(|e| error!(id, error = %e, "acknowledging alert failed"))
    }

    pub async fn resolve(&self, id: &str, note: Option<&str>) -> Result<Alert, ApiError> {
        self.api
            .patch(&item_path(BASE, id, "/resolve"), &json!({ "note": note }))
            .await
            .inspect_err(|e| error!(id, error = %e, "resolving alert failed"))
    }
}
