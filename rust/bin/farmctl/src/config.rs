//! Client-side context management.
//!
//! Reads/writes `~/.farmerp/config.toml`. The session itself (token and
//! cached user) lives in a redb file under the context's data directory,
//! not in this file.

use std::path::{Path, PathBuf};

use farmerp_authz::UnmappedRoutePolicy;
use serde::{Deserialize, Serialize};

/// File name of the session store inside a context's data directory.
pub const SESSION_FILE: &str = "session.redb";

/// A single context: one farm backend and its local session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Context {
    /// Context name (e.g. "north-farm").
    pub name: String,

    /// API base URL (e.g. "http://localhost:8080").
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub server: String,

    /// Directory holding the session store. Defaults to `~/.farmerp/<name>`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub data_dir: String,

    /// Request timeout in seconds. Unset waits indefinitely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// How `farmctl route` treats routes without a table entry.
    #[serde(default)]
    pub unmapped_routes: UnmappedRoutePolicy,
}

impl Context {
    pub fn session_path(&self) -> PathBuf {
        let dir = if self.data_dir.is_empty() {
            dirs_path().join(&self.name)
        } else {
            PathBuf::from(&self.data_dir)
        };
        dir.join(SESSION_FILE)
    }
}

/// Client configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Name of the currently active context.
    #[serde(rename = "current-context", default)]
    pub current_context: String,

    #[serde(default)]
    pub contexts: Vec<Context>,
}

impl ClientConfig {
    /// Default config file path: ~/.farmerp/config.toml.
    pub fn default_path() -> PathBuf {
        dirs_path().join("config.toml")
    }

    /// Load config from disk, or return default if the file doesn't exist.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: ClientConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("invalid config {}: {}", path.display(), e))?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn current(&self) -> Option<&Context> {
        self.contexts.iter().find(|c| c.name == self.current_context)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Context> {
        self.contexts.iter_mut().find(|c| c.name == name)
    }

    /// Add or replace a context. The first context added becomes current.
    pub fn upsert_context(&mut self, ctx: Context) {
        if self.current_context.is_empty() {
            self.current_context = ctx.name.clone();
        }
        if let Some(existing) = self.get_mut(&ctx.name) {
            *existing = ctx;
        } else {
            self.contexts.push(ctx);
        }
    }

    /// Remove a context by name. Returns true if it was found.
    pub fn remove_context(&mut self, name: &str) -> bool {
        let len = self.contexts.len();
        self.contexts.retain(|c| c.name != name);
        if self.current_context == name {
            self.current_context = String::new();
        }
        self.contexts.len() < len
    }
}

/// The farmctl config directory (~/.farmerp).
fn dirs_path() -> PathBuf {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".farmerp")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(name: &str) -> Context {
        Context {
            name: name.to_string(),
            server: format!("http://{}.farm.test", name),
            ..Default::default()
        }
    }

    #[test]
    fn missing_file_loads_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = ClientConfig::load(&dir.path().join("nope.toml")).unwrap();
        assert!(config.current_context.is_empty());
        assert!(config.contexts.is_empty());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = ClientConfig::default();
        config.upsert_context(Context {
            timeout_secs: Some(15),
            unmapped_routes: UnmappedRoutePolicy::Deny,
            ..ctx("north")
        });
        config.save(&path).unwrap();

        let back = ClientConfig::load(&path).unwrap();
        assert_eq!(back.current_context, "north");
        assert_eq!(back.contexts[0].timeout_secs, Some(15));
        assert_eq!(back.contexts[0].unmapped_routes, UnmappedRoutePolicy::Deny);
    }

    #[test]
    fn hand_written_file_uses_defaults() {
        let config: ClientConfig = toml::from_str(
            r#"
current-context = "south"

[[contexts]]
name = "south"
server = "http://10.0.0.5:8080"
"#,
        )
        .unwrap();
        let current = config.current().unwrap();
        assert_eq!(current.server, "http://10.0.0.5:8080");
        assert_eq!(current.unmapped_routes, UnmappedRoutePolicy::Allow);
        assert!(current.session_path().ends_with("south/session.redb"));
    }

    #[test]
    fn upsert_replaces_and_remove_clears_current() {
        let mut config = ClientConfig::default();
        config.upsert_context(ctx("a"));
        config.upsert_context(ctx("b"));
        config.upsert_context(Context {
            server: "http://other".into(),
            ..ctx("a")
        });
        assert_eq!(config.contexts.len(), 2);
        assert_eq!(config.current().unwrap().server, "http://other");

        assert!(config.remove_context("a"));
        assert!(config.current_context.is_empty());
        assert!(!config.remove_context("a"));
    }

    #[test]
    fn explicit_data_dir_wins() {
        let c = Context {
            data_dir: "/var/lib/farmctl/x".into(),
            ..ctx("x")
        };
        assert_eq!(c.session_path(), PathBuf::from("/var/lib/farmctl/x/session.redb"));
    }
}
