//! `farmctl`: command-line client for the farm dashboard backend.
//!
//! Manages contexts, the login session and read-only resource views, and
//! answers authorization questions for the logged-in user.

mod commands;
mod config;

use std::io::Write;

use clap::{Parser, Subcommand};
use farmerp_authz::UnmappedRoutePolicy;

use commands::Session;

/// FarmERP CLI tool.
#[derive(Parser, Debug)]
#[command(name = "farmctl", about = "FarmERP CLI client")]
struct Cli {
    /// Path to client config file (default: ~/.farmerp/config.toml).
    #[arg(long = "config", global = true)]
    config: Option<String>,

    /// API base URL, overriding the current context's server.
    #[arg(long = "server", global = true, env = "FARMERP_API_URL")]
    server: Option<String>,

    /// Output format: table or json.
    #[arg(long = "output", short = 'o', global = true, default_value = "table")]
    output: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Manage contexts.
    Context {
        #[command(subcommand)]
        action: ContextAction,
    },

    /// Switch the current context.
    #[command(name = "use")]
    Use {
        #[command(subcommand)]
        what: UseWhat,
    },

    /// Login to the current context's server.
    Login {
        /// Username.
        #[arg(long)]
        user: Option<String>,
        /// Password (prompted for when omitted).
        #[arg(long)]
        password: Option<String>,
    },

    /// Logout: notify the server and clear the local session.
    Logout,

    /// Show the logged-in user and effective permissions.
    Whoami {
        /// Reload the profile from the server.
        #[arg(long)]
        refresh: bool,
    },

    /// Get resource(s).
    Get {
        /// Resource type (e.g. stations, alerts, parcels).
        resource: String,
        /// Optional resource ID for single get.
        id: Option<String>,
    },

    /// Check whether the logged-in user holds a permission.
    Can {
        /// Permission token (e.g. MANAGE_IRRIGATION).
        permission: String,
    },

    /// Check whether the logged-in user may open a dashboard route.
    Route {
        /// Route path (e.g. /alerts).
        path: String,
        /// Treat routes without a table entry as denied.
        #[arg(long)]
        deny_unmapped: bool,
    },

    /// Show context, session and server reachability.
    Status,

    /// Show version.
    Version,
}

#[derive(Subcommand, Debug)]
enum ContextAction {
    /// Create a new context.
    Create {
        name: String,
        #[arg(long)]
        server: Option<String>,
        /// Session directory (default: ~/.farmerp/<name>).
        #[arg(long)]
        data_dir: Option<String>,
    },
    /// List all contexts.
    List,
    /// Set properties on a context.
    Set {
        name: String,
        #[arg(long)]
        server: Option<String>,
        /// Request timeout in seconds; 0 disables it.
        #[arg(long)]
        timeout: Option<u64>,
        /// Policy for routes without a table entry: allow or deny.
        #[arg(long)]
        unmapped_routes: Option<UnmappedRoutePolicy>,
    },
    /// Delete a context.
    Delete { name: String },
}

#[derive(Subcommand, Debug)]
enum UseWhat {
    /// Switch to a context.
    Context { name: String },
}

fn prompt(label: &str) -> anyhow::Result<String> {
    eprint!("{}", label);
    std::io::stderr().flush()?;
    let mut s = String::new();
    std::io::stdin().read_line(&mut s)?;
    Ok(s.trim().to_string())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config_path = cli
        .config
        .map(std::path::PathBuf::from)
        .unwrap_or_else(config::ClientConfig::default_path);
    let json_output = cli.output == "json";
    let open = || Session::open(&config_path, cli.server.as_deref());

    match cli.command {
        Commands::Context { action } => match action {
            ContextAction::Create {
                name,
                server,
                data_dir,
            } => {
                commands::context::create(&name, server.as_deref(), data_dir.as_deref(), &config_path)?;
            }
            ContextAction::List => {
                commands::context::list(&config_path)?;
            }
            ContextAction::Set {
                name,
                server,
                timeout,
                unmapped_routes,
            } => {
                commands::context::set(&name, server.as_deref(), timeout, unmapped_routes, &config_path)?;
            }
            ContextAction::Delete { name } => {
                commands::context::delete(&name, &config_path)?;
            }
        },

        Commands::Use { what } => match what {
            UseWhat::Context { name } => {
                commands::context::use_context(&name, &config_path)?;
            }
        },

        Commands::Login { user, password } => {
            let username = match user {
                Some(u) => u,
                None => prompt("Username: ")?,
            };
            let password = match password {
                Some(p) => p,
                None => rpassword::prompt_password("Password: ")?,
            };
            if username.is_empty() || password.is_empty() {
                anyhow::bail!("Username and password are required.");
            }
            commands::login::login(&open()?, &username, &password).await?;
        }

        Commands::Logout => {
            commands::login::logout(&open()?).await?;
        }

        Commands::Whoami { refresh } => {
            commands::login::whoami(&open()?, refresh, json_output).await?;
        }

        Commands::Get { resource, id } => {
            commands::resource::get(&open()?, &resource, id.as_deref(), json_output).await?;
        }

        Commands::Can { permission } => {
            commands::access::can(&open()?, &permission)?;
        }

        Commands::Route {
            path,
            deny_unmapped,
        } => {
            commands::access::route(&open()?, &path, deny_unmapped)?;
        }

        Commands::Status => {
            commands::resource::status(&open()?).await?;
        }

        Commands::Version => {
            println!("farmctl v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
