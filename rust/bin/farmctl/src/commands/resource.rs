//! Read-only resource commands.
//!
//! `farmctl get stations`, `farmctl get parcel p-12`, etc. Names map onto
//! the domain services, so list reads of stations, alerts and maintenance
//! tasks show demo data when the backend is down.

use anyhow::Result;
use farmerp_client::QueryParams;
use farmerp_farm::model::{AlertFilter, MaintenanceFilter, ParcelFilter};
use serde::Serialize;
use serde_json::Value;

use super::{print_value, Session};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Resource {
    Stations,
    Alerts,
    Maintenance,
    Parcels,
    Crops,
    Zones,
    Drones,
    Water,
}

/// Map a singular/plural resource name to a service.
fn resource_kind(resource: &str) -> Result<Resource> {
    match resource.to_lowercase().as_str() {
        "station" | "stations" => Ok(Resource::Stations),
        "alert" | "alerts" => Ok(Resource::Alerts),
        "task" | "tasks" | "maintenance" => Ok(Resource::Maintenance),
        "parcel" | "parcels" => Ok(Resource::Parcels),
        "crop" | "crops" => Ok(Resource::Crops),
        "zone" | "zones" | "irrigation" => Ok(Resource::Zones),
        "drone" | "drones" => Ok(Resource::Drones),
        "water" | "water-resource" | "water-resources" => Ok(Resource::Water),
        _ => Err(anyhow::anyhow!("Unknown resource type: {}", resource)),
    }
}

fn to_json<T: Serialize>(value: T) -> Result<Value> {
    Ok(serde_json::to_value(value)?)
}

/// GET a resource (list or get by ID).
pub async fn get(session: &Session, resource: &str, id: Option<&str>, json_output: bool) -> Result<()> {
    let svc = &session.services;
    let kind = resource_kind(resource)?;

    let value = match (kind, id) {
        (Resource::Stations, None) => to_json(svc.stations.get_all().await)?,
        (Resource::Stations, Some(id)) => to_json(svc.stations.get_by_id(id).await?)?,
        (Resource::Alerts, None) => to_json(svc.alerts.get_all(&AlertFilter::default()).await)?,
        (Resource::Alerts, Some(_)) => anyhow::bail!("Alerts are listed only; omit the id."),
        (Resource::Maintenance, None) => {
            to_json(svc.maintenance.get_all(&MaintenanceFilter::default()).await)?
        }
        (Resource::Maintenance, Some(id)) => to_json(svc.maintenance.get_by_id(id).await?)?,
        (Resource::Parcels, None) => to_json(svc.parcels.get_all(&ParcelFilter::default()).await?)?,
        (Resource::Parcels, Some(id)) => to_json(svc.parcels.get_by_id(id).await?)?,
        (Resource::Crops, None) => to_json(svc.crops.get_all(None, None).await?)?,
        (Resource::Crops, Some(id)) => to_json(svc.crops.get_by_id(id).await?)?,
        (Resource::Zones, None) => to_json(svc.irrigation.zones(None).await?)?,
        (Resource::Zones, Some(id)) => to_json(svc.irrigation.zone(id).await?)?,
        (Resource::Drones, None) => to_json(svc.drones.get_all().await?)?,
        (Resource::Drones, Some(id)) => to_json(svc.drones.get_by_id(id).await?)?,
        (Resource::Water, None) => to_json(svc.water.get_all().await?)?,
        (Resource::Water, Some(id)) => to_json(svc.water.get_by_id(id).await?)?,
    };
    print_value(&value, json_output)
}

/// Show the context, the local session and whether the server answers.
pub async fn status(session: &Session) -> Result<()> {
    let auth = &session.services.auth;
    println!("Context:  {}", session.context.name);
    println!("Server:   {}", session.api.config().base_url);
    println!("Session:  {}", session.context.session_path().display());

    match (auth.is_authenticated()?, auth.current_user()?) {
        (false, _) => println!("User:     not logged in"),
        (true, Some(user)) => println!("User:     {} ({})", user.id, user.role),
        (true, None) => println!("User:     token present, no cached profile"),
    }

    match session.api.get::<Value>("/api/health", QueryParams::new()).await {
        Ok(_) => println!("Backend:  reachable"),
        Err(e) => println!("Backend:  {}", e),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_names() {
        assert_eq!(resource_kind("Stations").unwrap(), Resource::Stations);
        assert_eq!(resource_kind("task").unwrap(), Resource::Maintenance);
        assert_eq!(resource_kind("water-resources").unwrap(), Resource::Water);
        assert_eq!(resource_kind("irrigation").unwrap(), Resource::Zones);
        assert!(resource_kind("tractors").is_err());
    }
}
