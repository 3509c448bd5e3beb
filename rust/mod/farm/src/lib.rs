//! Farm module: domain services for the dashboard.
//!
//! # Services
//!
//! - **Auth**: login/logout, cached profile
//! - **Stations**, **Alerts**, **Maintenance**: list reads fall back to demo
//!   data when the backend is unreachable
//! - **Parcels**, **Crops**, **Irrigation**, **Drones**, **Water resources**:
//!   errors are logged and returned unchanged
//!
//! Every service wraps the same shared [`ApiClient`]; none of them owns
//! connection state.
//!
//! # Usage
//!
//! ```ignore
//! use farmerp_farm::model::AlertFilter;
//! use farmerp_farm::FarmServices;
//!
//! let services = FarmServices::new(api, kv);
//! let user = services.auth.login("amina", "secret").await?;
//! let alerts = services.alerts.get_all(&AlertFilter::default()).await; // never fails
//! ```

pub mod mock;
pub mod model;
pub mod service;

use std::sync::Arc;

use farmerp_client::ApiClient;
use farmerp_kv::KVStore;

pub use service::{
    AlertService, AuthService, CropService, DroneService, IrrigationService, MaintenanceService,
    ParcelService, StationService, WaterResourceService,
};

/// One instance of every domain service, all sharing one client.
pub struct FarmServices {
    pub auth: AuthService,
    pub stations: StationService,
    pub alerts: AlertService,
    pub maintenance: MaintenanceService,
    pub parcels: ParcelService,
    pub crops: CropService,
    pub irrigation: IrrigationService,
    pub drones: DroneService,
    pub water: WaterResourceService,
}

impl FarmServices {
    /// `kv` must be the store backing the client's token source, so that
    /// login and logout are seen by the next request.
    pub fn new(api: Arc<ApiClient>, kv: Arc<dyn KVStore>) -> Self {
        Self {
            auth: AuthService::new(api.clone(), kv),
            stations: StationService::new(api.clone()),
            alerts: AlertService::new(api.clone()),
            maintenance: MaintenanceService::new(api.clone()),
            parcels: ParcelService::new(api.clone()),
            crops: CropService::new(api.clone()),
            irrigation: IrrigationService::new(api.clone()),
            drones: DroneService::new(api.clone()),
            water: WaterResourceService::new(api),
        }
    }
}
