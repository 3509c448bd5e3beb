//! Role/permission authorization for the farm dashboard.
//!
//! Pure and synchronous: every decision is computed from a [`User`] and two
//! static tables, the role table ([`RoleTable`]) and the route table
//! ([`RouteTable`]).
//!
//! # Usage
//!
//! ```ignore
//! use farmerp_authz::{can_access_route, has_permission, Permission};
//!
//! if has_permission(Some(&user), Permission::ManageIrrigation) { /* ... */ }
//! if can_access_route(Some(&user), "/alerts") { /* ... */ }
//! ```

pub mod error;
pub mod evaluator;
pub mod permission;
pub mod role;
pub mod route;
pub mod user;

pub use error::AuthzError;
pub use evaluator::{can_access_route, get_user_permissions, has_permission, Authorizer};
pub use permission::Permission;
pub use role::{Role, RoleTable};
pub use route::{RouteTable, UnmappedRoutePolicy, PUBLIC_ROUTES};
pub use user::User;
