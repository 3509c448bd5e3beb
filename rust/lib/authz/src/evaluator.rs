use std::collections::BTreeSet;

use tracing::debug;

use crate::permission::Permission;
use crate::role::RoleTable;
use crate::route::{RouteTable, UnmappedRoutePolicy};
use crate::user::User;

/// Access decisions over a role table and a route table.
///
/// Stateless: every call looks only at its arguments and the two tables.
/// A missing user (`None`) is never granted anything.
#[derive(Debug, Clone, Copy)]
pub struct Authorizer<'a> {
    roles: &'a RoleTable,
    routes: &'a RouteTable,
    unmapped: UnmappedRoutePolicy,
}

impl Default for Authorizer<'static> {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Authorizer<'static> {
    /// Built-in tables, unmapped routes allowed.
    pub fn builtin() -> Self {
        Self::new(RoleTable::builtin(), RouteTable::builtin())
    }
}

impl<'a> Authorizer<'a> {
    pub fn new(roles: &'a RoleTable, routes: &'a RouteTable) -> Self {
        Self {
            roles,
            routes,
            unmapped: UnmappedRoutePolicy::default(),
        }
    }

    pub fn with_unmapped_routes(mut self, policy: UnmappedRoutePolicy) -> Self {
        self.unmapped = policy;
        self
    }

    pub fn unmapped_routes(&self) -> UnmappedRoutePolicy {
        self.unmapped
    }

    /// Explicit grant first, then the role's table row.
    pub fn has_permission(&self, user: Option<&User>, permission: Permission) -> bool {
        let Some(user) = user else {
            return false;
        };
        user.overrides().contains(&permission) || self.roles.grants(user.role, permission)
    }

    /// Role permissions ∪ explicit grants.
    pub fn user_permissions(&self, user: Option<&User>) -> BTreeSet<Permission> {
        let Some(user) = user else {
            return BTreeSet::new();
        };
        let mut perms = self
            .roles
            .permissions(user.role)
            .cloned()
            .unwrap_or_default();
        perms.extend(user.overrides().iter().copied());
        perms
    }

    pub fn can_access_route(&self, user: Option<&User>, route: &str) -> bool {
        let Some(user) = user else {
            return false;
        };
        if self.routes.is_public(route) {
            return true;
        }
        match self.routes.required(route) {
            Some(permission) => {
                let allowed = self.has_permission(Some(user), permission);
                if !allowed {
                    debug!(user = %user.id, route, %permission, "route denied");
                }
                allowed
            }
            None => match self.unmapped {
                UnmappedRoutePolicy::Allow => true,
                UnmappedRoutePolicy::Deny => {
                    debug!(user = %user.id, route, "unmapped route denied");
                    false
                }
            },
        }
    }
}

/// [`Authorizer::has_permission`] over the built-in tables.
pub fn has_permission(user: Option<&User>, permission: Permission) -> bool {
    Authorizer::builtin().has_permission(user, permission)
}

/// [`Authorizer::user_permissions`] over the built-in tables.
pub fn get_user_permissions(user: Option<&User>) -> BTreeSet<Permission> {
    Authorizer::builtin().user_permissions(user)
}

/// [`Authorizer::can_access_route`] over the built-in tables; unmapped
/// routes are allowed.
pub fn can_access_route(user: Option<&User>, route: &str) -> bool {
    Authorizer::builtin().can_access_route(user, route)
}
