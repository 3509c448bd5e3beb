//! Login / logout / whoami.

use anyhow::Result;
use farmerp_authz::get_user_permissions;
use serde_json::json;

use super::{print_value, Session};

pub async fn login(session: &Session, username: &str, password: &str) -> Result<()> {
    let user = session.services.auth.login(username, password).await?;
    let display = if user.name.is_empty() { &user.id } else { &user.name };
    println!("Logged in as {} ({}).", display, user.role);
    println!("Session saved for context \"{}\".", session.context.name);
    Ok(())
}

/// Always clears the local session, even if the server call fails.
pub async fn logout(session: &Session) -> Result<()> {
    session.services.auth.logout().await?;
    println!("Logged out from context \"{}\".", session.context.name);
    Ok(())
}

/// Show the cached user. With `refresh`, reload it from the server first.
pub async fn whoami(session: &Session, refresh: bool, json_output: bool) -> Result<()> {
    let auth = &session.services.auth;
    if !auth.is_authenticated()? {
        anyhow::bail!("Not logged in. Run `farmctl login`.");
    }
    let user = if refresh {
        Some(auth.fetch_profile().await?)
    } else {
        auth.current_user()?
    };
    let Some(user) = user else {
        anyhow::bail!("No cached profile. Run `farmctl whoami --refresh`.");
    };

    let permissions: Vec<&str> = get_user_permissions(Some(&user))
        .iter()
        .map(|p| p.as_str())
        .collect();

    if json_output {
        return print_value(&json!({ "user": user, "permissions": permissions }), true);
    }
    println!("ID:    {}", user.id);
    println!("Name:  {}", user.name);
    if let Some(email) = &user.email {
        println!("Email: {}", email);
    }
    println!("Role:  {}", user.role);
    println!("Permissions ({}):", permissions.len());
    for p in permissions {
        println!("  {}", p);
    }
    Ok(())
}
