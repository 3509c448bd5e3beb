use std::collections::{BTreeSet, HashMap};
use std::str::FromStr;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::error::AuthzError;
use crate::permission::Permission;
use crate::permission::Permission::*;

/// User class. Each role maps to a fixed permission set in the [`RoleTable`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    FarmManager,
    Agronomist,
    Technician,
    Viewer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }

    /// Parse a wire token, case-insensitively.
    pub fn parse(token: &str) -> Result<Self, AuthzError> {
        Role::from_str(&token.trim().to_ascii_uppercase())
            .map_err(|_| AuthzError::UnknownRole(token.to_string()))
    }
}

const FARM_MANAGER: &[Permission] = &[
    ViewDashboard,
    ManageDashboard,
    ViewParcels,
    ManageParcels,
    ViewCrops,
    ManageCrops,
    ViewIrrigation,
    ManageIrrigation,
    ViewDrones,
    ManageDrones,
    ViewWaterResources,
    ManageWaterResources,
    ViewAlerts,
    ManageAlerts,
    ViewMaintenance,
    ManageMaintenance,
    ViewAnalytics,
    ViewStations,
    ManageStations,
    ViewSensors,
    ManageSensors,
    ViewWeather,
    ViewEquipment,
    ManageEquipment,
    ViewInventory,
    ManageInventory,
    ViewLivestock,
    ManageLivestock,
    ViewHarvest,
    ManageHarvest,
    ViewFertilization,
    ManageFertilization,
    ViewTreatments,
    ManageTreatments,
    ViewSoil,
    ViewReports,
    ManageReports,
    ViewUsers,
    ViewFinance,
    ViewWorkers,
    ManageWorkers,
    ViewNotifications,
    ManageNotifications,
];

const AGRONOMIST: &[Permission] = &[
    ViewDashboard,
    ViewParcels,
    ManageParcels,
    ViewCrops,
    ManageCrops,
    ViewIrrigation,
    ManageIrrigation,
    ViewWaterResources,
    ViewAlerts,
    ManageAlerts,
    ViewAnalytics,
    ViewStations,
    ViewSensors,
    ViewWeather,
    ViewHarvest,
    ManageHarvest,
    ViewFertilization,
    ManageFertilization,
    ViewTreatments,
    ManageTreatments,
    ViewSoil,
    ManageSoil,
    ViewReports,
    ViewNotifications,
];

const TECHNICIAN: &[Permission] = &[
    ViewDashboard,
    ViewParcels,
    ViewIrrigation,
    ManageIrrigation,
    ViewDrones,
    ManageDrones,
    ViewWaterResources,
    ViewAlerts,
    ViewMaintenance,
    ManageMaintenance,
    ViewStations,
    ManageStations,
    ViewSensors,
    ManageSensors,
    ViewEquipment,
    ManageEquipment,
    ViewInventory,
    ViewNotifications,
];

const VIEWER: &[Permission] = &[
    ViewDashboard,
    ViewParcels,
    ViewCrops,
    ViewIrrigation,
    ViewWaterResources,
    ViewAlerts,
    ViewAnalytics,
    ViewStations,
    ViewWeather,
    ViewReports,
];

/// Role → permission mapping.
///
/// The admin row is never listed: it is filled with every [`Permission`]
/// when the table is built, so it stays complete as permissions are added.
#[derive(Debug, Clone)]
pub struct RoleTable {
    roles: HashMap<Role, BTreeSet<Permission>>,
}

static BUILTIN: LazyLock<RoleTable> = LazyLock::new(|| {
    RoleTable::new([
        (Role::FarmManager, FARM_MANAGER),
        (Role::Agronomist, AGRONOMIST),
        (Role::Technician, TECHNICIAN),
        (Role::Viewer, VIEWER),
    ])
});

impl RoleTable {
    /// Build a table from non-admin rows. Any `Role::Admin` row passed in is
    /// replaced by the full permission set.
    pub fn new<'a, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = (Role, &'a [Permission])>,
    {
        let mut roles: HashMap<Role, BTreeSet<Permission>> = rows
            .into_iter()
            .map(|(role, perms)| (role, perms.iter().copied().collect()))
            .collect();
        roles.insert(Role::Admin, Permission::all().collect());
        Self { roles }
    }

    /// The process-wide table used by the dashboard.
    pub fn builtin() -> &'static RoleTable {
        &BUILTIN
    }

    /// Permissions of a role, or None if the role has no row.
    pub fn permissions(&self, role: Role) -> Option<&BTreeSet<Permission>> {
        self.roles.get(&role)
    }

    pub fn grants(&self, role: Role, permission: Permission) -> bool {
        self.permissions(role)
            .map(|perms| perms.contains(&permission))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn admin_row_is_every_permission() {
        let admin = RoleTable::builtin().permissions(Role::Admin).unwrap();
        let all: BTreeSet<Permission> = Permission::all().collect();
        assert_eq!(admin, &all);
    }

    #[test]
    fn admin_row_cannot_be_narrowed() {
        let table = RoleTable::new([(Role::Admin, &[ViewDashboard][..])]);
        assert_eq!(
            table.permissions(Role::Admin).unwrap().len(),
            Permission::all().count()
        );
    }

    #[test]
    fn every_role_has_a_row() {
        for role in Role::iter() {
            assert!(
                RoleTable::builtin().permissions(role).is_some(),
                "{} has no row",
                role
            );
        }
    }

    #[test]
    fn non_admin_rows() {
        let table = RoleTable::builtin();
        assert!(table.grants(Role::FarmManager, ManageParcels));
        assert!(!table.grants(Role::FarmManager, ManageUsers));
        assert!(table.grants(Role::Agronomist, ManageCrops));
        assert!(!table.grants(Role::Agronomist, ManageDrones));
        assert!(table.grants(Role::Technician, ManageMaintenance));
        assert!(!table.grants(Role::Technician, ViewFinance));
        assert!(table.permissions(Role::Viewer).unwrap().iter().all(|p| p.is_view()));
    }

    #[test]
    fn missing_row_grants_nothing() {
        let table = RoleTable::new([(Role::Viewer, VIEWER)]);
        assert!(table.permissions(Role::Technician).is_none());
        assert!(!table.grants(Role::Technician, ViewDashboard));
    }

    #[test]
    fn role_wire_names() {
        assert_eq!(Role::FarmManager.as_str(), "FARM_MANAGER");
        assert_eq!(Role::parse("farm_manager").unwrap(), Role::FarmManager);
        assert!(Role::parse("owner").is_err());
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"ADMIN\"");
    }
}
