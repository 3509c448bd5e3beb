pub mod alert;
pub mod crop;
pub mod drone;
pub mod irrigation;
pub mod maintenance;
pub mod parcel;
pub mod session;
pub mod station;
pub mod water;

pub use alert::{Alert, AlertFilter, AlertSeverity, AlertStatus};
pub use crop::{Crop, CropInput, GrowthStage};
pub use drone::{Drone, DroneImage, DroneInput, DroneStatus};
pub use irrigation::{IrrigationMode, IrrigationRun, IrrigationZone, IrrigationZoneInput, ZoneStatus};
pub use maintenance::{MaintenanceFilter, MaintenanceInput, MaintenanceTask, TaskPriority, TaskStatus};
pub use parcel::{Parcel, ParcelFilter, ParcelInput, ParcelStatus};
pub use session::{Credentials, LoginResponse, ProfileUpdate};
pub use station::{Station, StationKind, StationReading, StationStatus};
pub use water::{ReportFormat, WaterResource, WaterResourceInput, WaterResourceKind};
