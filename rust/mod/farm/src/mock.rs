//! Demo datasets served when the backend cannot be reached.
//!
//! Only the station, alert and maintenance list reads use these. The data
//! is typed exactly like the live responses.

use crate::model::{
    Alert, AlertSeverity, AlertStatus, MaintenanceTask, Station, StationKind, StationStatus,
    TaskPriority, TaskStatus,
};

pub fn stations() -> Vec<Station> {
    vec![
        Station {
            id: "st-001".into(),
            name: "North Field Weather".into(),
            kind: StationKind::Weather,
            status: StationStatus::Online,
            parcel_id: Some("p-001".into()),
            latitude: Some(33.5731),
            longitude: Some(-7.5898),
            battery_level: Some(87.0),
            last_reading_at: Some("2024-03-15T08:30:00Z".into()),
        },
        Station {
            id: "st-002".into(),
            name: "Olive Grove Soil Probe".into(),
            kind: StationKind::Soil,
            status: StationStatus::Online,
            parcel_id: Some("p-002".into()),
            latitude: Some(33.5802),
            longitude: Some(-7.6011),
            battery_level: Some(64.0),
            last_reading_at: Some("2024-03-15T08:25:00Z".into()),
        },
        Station {
            id: "st-003".into(),
            name: "Reservoir Level Gauge".into(),
            kind: StationKind::Water,
            status: StationStatus::Maintenance,
            parcel_id: None,
            latitude: Some(33.5655),
            longitude: Some(-7.5790),
            battery_level: Some(12.0),
            last_reading_at: Some("2024-03-14T17:02:00Z".into()),
        },
        Station {
            id: "st-004".into(),
            name: "South Orchard Valve Controller".into(),
            kind: StationKind::Irrigation,
            status: StationStatus::Offline,
            parcel_id: Some("p-003".into()),
            latitude: None,
            longitude: None,
            battery_level: None,
            last_reading_at: None,
        },
    ]
}

pub fn alerts() -> Vec<Alert> {
    vec![
        Alert {
            id: "al-001".into(),
            title: "Low soil moisture".into(),
            message: "Soil moisture in Olive Grove dropped below 18%".into(),
            severity: AlertSeverity::High,
            status: AlertStatus::Active,
            source: Some("st-002".into()),
            parcel_id: Some("p-002".into()),
            created_at: "2024-03-15T07:45:00Z".into(),
            acknowledged_at: None,
        },
        Alert {
            id: "al-002".into(),
            title: "Frost warning".into(),
            message: "Temperatures below 2°C expected overnight".into(),
            severity: AlertSeverity::Critical,
            status: AlertStatus::Active,
            source: Some("weather".into()),
            parcel_id: None,
            created_at: "2024-03-15T06:00:00Z".into(),
            acknowledged_at: None,
        },
        Alert {
            id: "al-003".into(),
            title: "Station battery low".into(),
            message: "Reservoir Level Gauge battery at 12%".into(),
            severity: AlertSeverity::Medium,
            status: AlertStatus::Acknowledged,
            source: Some("st-003".into()),
            parcel_id: None,
            created_at: "2024-03-14T17:05:00Z".into(),
            acknowledged_at: Some("2024-03-14T18:10:00Z".into()),
        },
    ]
}

pub fn maintenance_tasks() -> Vec<MaintenanceTask> {
    vec![
        MaintenanceTask {
            id: "mt-001".into(),
            title: "Replace reservoir gauge battery".into(),
            description: Some("Battery below 15%, swap before weekend".into()),
            equipment_id: Some("st-003".into()),
            assigned_to: Some("u-tech-1".into()),
            priority: TaskPriority::High,
            status: TaskStatus::Pending,
            due_date: Some("2024-03-16".into()),
            completed_at: None,
        },
        MaintenanceTask {
            id: "mt-002".into(),
            title: "Tractor oil change".into(),
            description: None,
            equipment_id: Some("eq-tractor-2".into()),
            assigned_to: Some("u-tech-2".into()),
            priority: TaskPriority::Medium,
            status: TaskStatus::InProgress,
            due_date: Some("2024-03-18".into()),
            completed_at: None,
        },
        MaintenanceTask {
            id: "mt-003".into(),
            title: "Flush drip lines, South Orchard".into(),
            description: Some("Clogging reported on rows 12-18".into()),
            equipment_id: Some("st-004".into()),
            assigned_to: None,
            priority: TaskPriority::Low,
            status: TaskStatus::Completed,
            due_date: Some("2024-03-10".into()),
            completed_at: Some("2024-03-09T15:20:00Z".into()),
        },
    ]
}
