//! Domain services.
//!
//! Each service holds an `Arc<ApiClient>` and one path prefix. Methods build
//! the path, turn optional filters into query parameters and call one client
//! verb. Failures are logged with the operation and id, then returned
//! unchanged. The exceptions are the list reads of stations, alerts and
//! maintenance tasks, which fall back to [`crate::mock`] data.

mod alert;
mod auth;
mod crop;
mod drone;
mod irrigation;
mod maintenance;
mod parcel;
mod station;
mod water;

pub use alert::AlertService;
pub use auth::{AuthService, USER_KEY};
pub use crop::CropService;
pub use drone::DroneService;
pub use irrigation::IrrigationService;
pub use maintenance::MaintenanceService;
pub use parcel::ParcelService;
pub use station::StationService;
pub use water::WaterResourceService;

/// `{base}/{id}{tail}` with `id` percent-encoded as one path segment, so an
/// id can never add segments or a query string.
fn item_path(base: &str, id: &str, tail: &str) -> String {
    format!("{}/{}{}", base, urlencoding::encode(id), tail)
}
