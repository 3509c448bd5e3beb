use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumCount, EnumIter, EnumString, IntoStaticStr};

use crate::error::AuthzError;

/// A single grantable capability. One `View*` and one `Manage*` token per
/// area of the dashboard.
///
/// Wire form is `SCREAMING_SNAKE_CASE` (`VIEW_PARCELS`, `MANAGE_IRRIGATION`).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    IntoStaticStr,
    Display,
    EnumString,
    EnumIter,
    EnumCount,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Permission {
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
    ManageAnalytics,
    ViewStations,
    ManageStations,
    ViewSensors,
    ManageSensors,
    ViewWeather,
    ManageWeather,
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
    ManageSoil,
    ViewReports,
    ManageReports,
    ViewUsers,
    ManageUsers,
    ViewSettings,
    ManageSettings,
    ViewFinance,
    ManageFinance,
    ViewWorkers,
    ManageWorkers,
    ViewNotifications,
    ManageNotifications,
}

impl Permission {
    /// Every permission, in declaration order.
    pub fn all() -> impl Iterator<Item = Permission> {
        Permission::iter()
    }

    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }

    /// Whether this is a read-only `View*` token.
    pub fn is_view(&self) -> bool {
        self.as_str().starts_with("VIEW_")
    }

    /// Parse a wire token, case-insensitively.
    pub fn parse(token: &str) -> Result<Self, AuthzError> {
        Permission::from_str(&token.trim().to_ascii_uppercase())
            .map_err(|_| AuthzError::UnknownPermission(token.to_string()))
    }
}
