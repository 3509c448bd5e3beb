//! Authorization checks against the cached user.

use anyhow::Result;
use farmerp_authz::{Authorizer, Permission, RouteTable, UnmappedRoutePolicy, User};

use super::Session;

fn cached_user(session: &Session) -> Result<Option<User>> {
    Ok(session.services.auth.current_user()?)
}

/// `farmctl can <permission>`
pub fn can(session: &Session, permission: &str) -> Result<()> {
    let permission = Permission::parse(permission)?;
    let user = cached_user(session)?;
    let allowed = Authorizer::builtin().has_permission(user.as_ref(), permission);
    println!("{}: {}", permission, verdict(allowed));
    Ok(())
}

/// `farmctl route <path>`; the policy comes from the context unless
/// `--deny-unmapped` forces fail-closed.
pub fn route(session: &Session, path: &str, deny_unmapped: bool) -> Result<()> {
    let policy = if deny_unmapped {
        UnmappedRoutePolicy::Deny
    } else {
        session.context.unmapped_routes
    };
    let user = cached_user(session)?;
    let allowed = Authorizer::builtin()
        .with_unmapped_routes(policy)
        .can_access_route(user.as_ref(), path);

    let table = RouteTable::builtin();
    let rule = if table.is_public(path) {
        "public".to_string()
    } else if let Some(required) = table.required(path) {
        format!("requires {}", required)
    } else {
        format!("unmapped, policy {:?}", policy).to_lowercase()
    };
    println!("{} ({}): {}", path, rule, verdict(allowed));
    Ok(())
}

fn verdict(allowed: bool) -> &'static str {
    if allowed {
        "allowed"
    } else {
        "denied"
    }
}
