//! Command implementations and the shared composition root.

pub mod access;
pub mod context;
pub mod login;
pub mod resource;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use farmerp_client::{ApiClient, ApiConfig, KvTokenStore};
use farmerp_farm::FarmServices;
use farmerp_kv::{KVStore, RedbStore};
use serde_json::Value;
use tracing::debug;

use crate::config::{ClientConfig, Context};

/// Everything a command needs for the current context: one client, one
/// session store and the services built around them.
pub struct Session {
    pub context: Context,
    pub api: Arc<ApiClient>,
    pub services: FarmServices,
}

impl Session {
    /// `server` overrides the context's server (from `--server` or
    /// `FARMERP_API_URL`).
    pub fn open(config_path: &Path, server: Option<&str>) -> Result<Self> {
        let config = ClientConfig::load(config_path)?;
        let context = config.current().cloned().ok_or_else(|| {
            anyhow::anyhow!("No current context. Run `farmctl context create <name> --server <url>`.")
        })?;

        let api_config = api_config(&context, server, ApiConfig::from_env().timeout)?;
        let session_path = context.session_path();
        let kv: Arc<dyn KVStore> = Arc::new(RedbStore::open(&session_path)?);
        let tokens = Arc::new(KvTokenStore::new(kv.clone()));
        let api = Arc::new(ApiClient::new(api_config, tokens)?);
        debug!(
            context = %context.name,
            server = %api.config().base_url,
            session = %session_path.display(),
            "session opened"
        );

        Ok(Self {
            services: FarmServices::new(api.clone(), kv),
            api,
            context,
        })
    }
}

/// Resolve connection settings. An explicit server beats the context's;
/// the context's timeout beats the environment's.
fn api_config(ctx: &Context, server: Option<&str>, env_timeout: Option<Duration>) -> Result<ApiConfig> {
    let base = server
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(ctx.server.as_str());
    if base.trim().is_empty() {
        anyhow::bail!(
            "No server URL set for context \"{}\". Run `farmctl context set {} --server <url>`.",
            ctx.name,
            ctx.name
        );
    }

    let mut config = ApiConfig::new(base);
    config.timeout = match ctx.timeout_secs {
        Some(0) => None,
        Some(secs) => Some(Duration::from_secs(secs)),
        None => env_timeout,
    };
    Ok(config)
}

/// Print a JSON value: pretty JSON, or a compact table for lists of records.
pub fn print_value(value: &Value, json_output: bool) -> Result<()> {
    if json_output {
        println!("{}", serde_json::to_string_pretty(value)?);
        return Ok(());
    }
    match value {
        Value::Array(rows) => {
            for line in table(rows) {
                println!("{}", line);
            }
        }
        other => println!("{}", serde_json::to_string_pretty(other)?),
    }
    Ok(())
}

fn table(rows: &[Value]) -> Vec<String> {
    let cell = |row: &Value, keys: &[&str]| -> String {
        keys.iter()
            .find_map(|k| row.get(*k).and_then(Value::as_str))
            .unwrap_or("-")
            .to_string()
    };
    let cells: Vec<[String; 3]> = rows
        .iter()
        .map(|r| {
            [
                cell(r, &["id"]),
                cell(r, &["name", "title", "variety"]),
                cell(r, &["status", "stage", "kind"]),
            ]
        })
        .collect();

    // Widths in chars, which is what `{:<w$}` pads by.
    let width = |i: usize| cells.iter().map(|c| c[i].chars().count()).max().unwrap_or(0);
    let id_w = width(0).max(2);
    let name_w = width(1).max(4);
    let mut lines = vec![format!("{:<id_w$}  {:<name_w$}  STATUS", "ID", "NAME")];
    for [id, name, status] in cells {
        lines.push(format!("{:<id_w$}  {:<name_w$}  {}", id, name, status));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ctx(server: &str) -> Context {
        Context {
            name: "north".into(),
            server: server.into(),
            ..Default::default()
        }
    }

    #[test]
    fn explicit_server_wins() {
        let config = api_config(&ctx("http://ctx"), Some("http://flag/"), None).unwrap();
        assert_eq!(config.base_url, "http://flag");
        let config = api_config(&ctx("http://ctx"), Some("  "), None).unwrap();
        assert_eq!(config.base_url, "http://ctx");
    }

    #[test]
    fn missing_server_is_an_error() {
        let err = api_config(&ctx(""), None, None).unwrap_err();
        assert!(err.to_string().contains("No server URL"));
    }

    #[test]
    fn context_timeout_beats_environment() {
        let env = Some(Duration::from_secs(5));
        let mut c = ctx("http://ctx");
        assert_eq!(api_config(&c, None, env).unwrap().timeout, env);

        c.timeout_secs = Some(30);
        assert_eq!(
            api_config(&c, None, env).unwrap().timeout,
            Some(Duration::from_secs(30))
        );

        c.timeout_secs = Some(0);
        assert_eq!(api_config(&c, None, env).unwrap().timeout, None);
    }

    #[test]
    fn table_picks_label_columns() {
        let rows = vec![
            json!({"id": "st-1", "name": "North", "status": "online"}),
            json!({"id": "mt-22", "title": "Oil change"}),
            json!({"id": "c-3", "variety": "Durum wheat", "stage": "sown"}),
        ];
        let lines = table(&rows);
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("ID     NAME"));
        assert!(lines[1].contains("North") && lines[1].ends_with("online"));
        assert!(lines[2].contains("Oil change") && lines[2].ends_with('-'));
        assert!(lines[3].ends_with("sown"));
    }

    #[test]
    fn table_aligns_non_ascii_labels() {
        let rows = vec![
            json!({"id": "p-1", "name": "Château", "status": "active"}),
            json!({"id": "p-2", "name": "North", "status": "fallow"}),
        ];
        let lines = table(&rows);
        let status_col = |line: &str, status: &str| line.chars().count() - status.chars().count();
        assert_eq!(lines[0], "ID   NAME     STATUS");
        assert_eq!(status_col(&lines[1], "active"), 14);
        assert_eq!(status_col(&lines[2], "fallow"), 14);
    }
}
