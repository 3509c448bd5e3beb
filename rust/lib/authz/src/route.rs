use std::collections::{HashMap, HashSet};
use std::str::FromStr;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::error::AuthzError;
use crate::permission::Permission;

/// Routes any authenticated user may open, whatever their permissions.
pub const PUBLIC_ROUTES: &[&str] = &["/dashboard", "/profile"];

const ROUTE_PERMISSIONS: &[(&str, Permission)] = &[
    ("/parcels", Permission::ViewParcels),
    ("/crops", Permission::ViewCrops),
    ("/irrigation", Permission::ViewIrrigation),
    ("/drones", Permission::ViewDrones),
    ("/water-resources", Permission::ViewWaterResources),
    ("/alerts", Permission::ViewAlerts),
    ("/maintenance", Permission::ViewMaintenance),
    ("/analytics", Permission::ViewAnalytics),
    ("/stations", Permission::ViewStations),
    ("/sensors", Permission::ViewSensors),
    ("/weather", Permission::ViewWeather),
    ("/equipment", Permission::ViewEquipment),
    ("/inventory", Permission::ViewInventory),
    ("/livestock", Permission::ViewLivestock),
    ("/harvest", Permission::ViewHarvest),
    ("/reports", Permission::ViewReports),
    ("/finance", Permission::ViewFinance),
    ("/workers", Permission::ViewWorkers),
    ("/users", Permission::ManageUsers),
    ("/settings", Permission::ManageSettings),
];

/// What to do with a route that has no entry in the [`RouteTable`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnmappedRoutePolicy {
    /// Any authenticated user may open it (fail-open).
    #[default]
    Allow,
    /// Nobody may open it until the route gets an entry (fail-closed).
    Deny,
}

impl FromStr for UnmappedRoutePolicy {
    type Err = AuthzError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "allow" => Ok(UnmappedRoutePolicy::Allow),
            "deny" => Ok(UnmappedRoutePolicy::Deny),
            _ => Err(AuthzError::UnknownRoutePolicy(s.to_string())),
        }
    }
}

/// Route → required permission, plus the always-open routes.
///
/// Routes match exactly; `/parcels/12` is a different route from `/parcels`.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    required: HashMap<String, Permission>,
    public: HashSet<String>,
}

static BUILTIN: LazyLock<RouteTable> = LazyLock::new(|| {
    let mut table = RouteTable::default();
    for (route, permission) in ROUTE_PERMISSIONS {
        table = table.with_route(route, *permission);
    }
    for route in PUBLIC_ROUTES {
        table = table.with_public(route);
    }
    table
});

impl RouteTable {
    pub fn builtin() -> &'static RouteTable {
        &BUILTIN
    }

    pub fn with_route(mut self, route: &str, permission: Permission) -> Self {
        self.required.insert(route.to_string(), permission);
        self
    }

    pub fn with_public(mut self, route: &str) -> Self {
        self.public.insert(route.to_string());
        self
    }

    pub fn is_public(&self, route: &str) -> bool {
        self.public.contains(route)
    }

    pub fn required(&self, route: &str) -> Option<Permission> {
        self.required.get(route).copied()
    }

    /// Mapped routes, sorted.
    pub fn routes(&self) -> Vec<(&str, Permission)> {
        let mut routes: Vec<(&str, Permission)> = self
            .required
            .iter()
            .map(|(r, p)| (r.as_str(), *p))
            .collect();
        routes.sort_by(|a, b| a.0.cmp(b.0));
        routes
    }
}
