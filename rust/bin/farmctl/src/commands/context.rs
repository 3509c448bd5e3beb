//! Context management commands.

use std::path::Path;

use anyhow::Result;
use farmerp_authz::UnmappedRoutePolicy;

use crate::config::{ClientConfig, Context};

/// Register a new context. The first one created becomes current.
pub fn create(
    name: &str,
    server: Option<&str>,
    data_dir: Option<&str>,
    client_config_path: &Path,
) -> Result<()> {
    let mut config = ClientConfig::load(client_config_path)?;
    if config.contexts.iter().any(|c| c.name == name) {
        anyhow::bail!("Context \"{}\" already exists.", name);
    }

    let ctx = Context {
        name: name.to_string(),
        server: server.unwrap_or_default().to_string(),
        data_dir: data_dir.unwrap_or_default().to_string(),
        ..Default::default()
    };
    let session = ctx.session_path();
    config.upsert_context(ctx);
    config.save(client_config_path)?;

    println!("Context \"{}\" created.", name);
    println!("  Session: {}", session.display());
    Ok(())
}

pub fn list(client_config_path: &Path) -> Result<()> {
    let config = ClientConfig::load(client_config_path)?;
    if config.contexts.is_empty() {
        println!("No contexts configured.");
        return Ok(());
    }

    println!("{:<2} {:<20} SERVER", "", "NAME");
    for ctx in &config.contexts {
        let marker = if ctx.name == config.current_context { "*" } else { "" };
        let server = if ctx.server.is_empty() { "-" } else { &ctx.server };
        println!("{:<2} {:<20} {}", marker, ctx.name, server);
    }
    Ok(())
}

pub fn set(
    name: &str,
    server: Option<&str>,
    timeout_secs: Option<u64>,
    unmapped_routes: Option<UnmappedRoutePolicy>,
    client_config_path: &Path,
) -> Result<()> {
    let mut config = ClientConfig::load(client_config_path)?;
    let ctx = config
        .get_mut(name)
        .ok_or_else(|| anyhow::anyhow!("Context \"{}\" not found.", name))?;

    if let Some(s) = server {
        ctx.server = s.to_string();
    }
    if let Some(t) = timeout_secs {
        ctx.timeout_secs = Some(t);
    }
    if let Some(p) = unmapped_routes {
        ctx.unmapped_routes = p;
    }
    config.save(client_config_path)?;
    println!("Context \"{}\" updated.", name);
    Ok(())
}

pub fn delete(name: &str, client_config_path: &Path) -> Result<()> {
    let mut config = ClientConfig::load(client_config_path)?;
    if !config.remove_context(name) {
        anyhow::bail!("Context \"{}\" not found.", name);
    }
    config.save(client_config_path)?;
    println!("Context \"{}\" deleted.", name);
    Ok(())
}

pub fn use_context(name: &str, client_config_path: &Path) -> Result<()> {
    let mut config = ClientConfig::load(client_config_path)?;
    if config.get_mut(name).is_none() {
        anyhow::bail!("Context \"{}\" not found.", name);
    }
    config.current_context = name.to_string();
    config.save(client_config_path)?;
    println!("Switched to context \"{}\".", name);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_set_use_delete() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        create("north", Some("http://north"), None, &path).unwrap();
        create("south", None, Some("/tmp/south"), &path).unwrap();
        assert!(create("north", None, None, &path).is_err());

        set("south", Some("http://south"), Some(10), Some(UnmappedRoutePolicy::Deny), &path).unwrap();
        use_context("south", &path).unwrap();

        let config = ClientConfig::load(&path).unwrap();
        let current = config.current().unwrap();
        assert_eq!(current.name, "south");
        assert_eq!(current.server, "http://south");
        assert_eq!(current.timeout_secs, Some(10));
        assert_eq!(current.unmapped_routes, UnmappedRoutePolicy::Deny);

        delete("south", &path).unwrap();
        assert!(ClientConfig::load(&path).unwrap().current().is_none());
        assert!(use_context("south", &path).is_err());
    }
}
