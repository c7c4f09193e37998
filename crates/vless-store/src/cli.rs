//! CLI module for vless-store.
//!
//! This module provides the command-line interface for managing
//! provisioned users. It can be used either as a standalone binary
//! (`vless-admin`) or as a subcommand of the main vless-rs CLI.
//!
//! # Usage
//!
//! ```bash
//! # Provision a user
//! vless-admin add alice --telegram-id 555
//!
//! # Print a user's access link
//! vless-admin link alice
//!
//! # Show the roster
//! vless-admin list
//!
//! # Remove a user
//! vless-admin remove alice
//! ```

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tabled::{Table, Tabled};
use tracing_subscriber::{
    EnvFilter,
    fmt,
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use vless_config::{CliOverrides, Config, LoggingConfig, apply_overrides, load_config, validate_config};
use vless_xray::{SystemdDaemon, XrayBridge};

use crate::error::StoreError;
use crate::record::UserRecord;
use crate::store::JsonStore;

/// vless-admin CLI arguments.
#[derive(Parser, Debug, Clone)]
#[command(name = "vless-admin", version, about = "Manage provisioned VLESS users")]
pub struct AdminArgs {
    /// Config file path (json/yaml/toml); defaults apply when absent
    #[arg(short, long, default_value = "vless.toml")]
    pub config: PathBuf,

    #[command(flatten)]
    pub overrides: CliOverrides,

    #[command(subcommand)]
    pub command: AdminCommands,
}

/// Admin CLI subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum AdminCommands {
    /// Provision a new user.
    Add {
        /// Username (unique, case-sensitive).
        username: String,

        /// Telegram id to bind (secondary lookup key).
        #[arg(short, long)]
        telegram_id: Option<i64>,
    },

    /// Remove a user and its daemon allow-list entry.
    Remove {
        /// Username to remove.
        username: String,
    },

    /// Show one user record.
    Show {
        /// Username to show.
        username: String,
    },

    /// Print a user's access link.
    Link {
        /// Username whose link to print.
        username: String,
    },

    /// List all users.
    List {
        /// Output format (table, json, csv).
        #[arg(short, long, default_value = "table")]
        format: String,
    },
}

/// User row for display.
#[derive(Tabled)]
struct UserDisplay {
    #[tabled(rename = "Username")]
    username: String,
    #[tabled(rename = "UUID")]
    uuid: String,
    #[tabled(rename = "Telegram")]
    telegram_id: String,
    #[tabled(rename = "Created")]
    created_at: String,
    #[tabled(rename = "Active")]
    active: String,
    #[tabled(rename = "Traffic")]
    traffic_used: String,
}

impl From<&UserRecord> for UserDisplay {
    fn from(user: &UserRecord) -> Self {
        Self {
            username: user.username.clone(),
            uuid: user.uuid.to_string(),
            telegram_id: user
                .telegram_id
                .map_or_else(|| "-".to_string(), |id| id.to_string()),
            created_at: format_date(user.created_at),
            active: if user.active { "Yes" } else { "No" }.to_string(),
            traffic_used: format_bytes(user.traffic_used),
        }
    }
}

/// Run the admin CLI with the given arguments.
///
/// This is the main entry point for the admin CLI, used by both the
/// standalone binary and the unified vless-rs CLI.
pub async fn run(args: AdminArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = if args.config.exists() {
        load_config(&args.config)?
    } else {
        Config::default()
    };
    apply_overrides(&mut config, &args.overrides);
    validate_config(&config)?;

    init_tracing(&config.logging);

    let daemon = SystemdDaemon::new(
        &config.xray.service,
        Duration::from_secs(config.xray.reload_timeout_secs),
    );
    let bridge = XrayBridge::new(&config.xray.config, &config.xray.server_info, daemon);
    let store = JsonStore::open(&config.store.users_db, bridge)?;

    match args.command {
        AdminCommands::Add {
            username,
            telegram_id,
        } => {
            let user = store.create_user(&username, telegram_id).await?;
            println!("User provisioned.");
            println!("  Username: {}", user.username);
            println!("  UUID:     {}", user.uuid);
            println!("  Email:    {}", user.email);
            println!("  Link:     {}", user.vless_link);
            Ok(())
        }
        AdminCommands::Remove { username } => {
            if store.remove_user(&username).await? {
                println!("User removed.");
            } else {
                println!("No user found with username: {}", username);
            }
            Ok(())
        }
        AdminCommands::Show { username } => {
            let user = store
                .get_user(&username)
                .ok_or(StoreError::NotFound(username))?;
            println!("{}", serde_json::to_string_pretty(&user)?);
            Ok(())
        }
        AdminCommands::Link { username } => {
            let link = store
                .user_link(&username)
                .ok_or(StoreError::NotFound(username))?;
            println!("{}", link);
            Ok(())
        }
        AdminCommands::List { format } => {
            list_users(&store.list_users(), &format);
            Ok(())
        }
    }
}

/// Render the roster in the requested format.
fn list_users(users: &[UserRecord], format: &str) {
    if users.is_empty() {
        println!("No users found.");
        return;
    }

    match format {
        "json" => {
            // full records, not the display projection
            match serde_json::to_string_pretty(users) {
                Ok(json) => println!("{}", json),
                Err(e) => eprintln!("failed to encode users: {}", e),
            }
        }
        "csv" => {
            println!("username,uuid,telegram_id,created_at,active,traffic_used");
            for user in users.iter().map(UserDisplay::from) {
                println!(
                    "{},{},{},{},{},{}",
                    csv_escape(&user.username),
                    user.uuid,
                    user.telegram_id,
                    user.created_at,
                    user.active,
                    user.traffic_used
                );
            }
        }
        _ => {
            // Table format (default)
            let rows: Vec<UserDisplay> = users.iter().map(UserDisplay::from).collect();
            println!("{}", Table::new(rows));
        }
    }
}

/// Quote a CSV field when it contains a delimiter, quote, or newline.
fn csv_escape(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Format bytes to human readable string.
fn format_bytes(bytes: i64) -> String {
    const KB: i64 = 1024;
    const MB: i64 = KB * 1024;
    const GB: i64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Format unix timestamp as an approximate YYYY-MM-DD.
fn format_date(ts: i64) -> String {
    if ts <= 0 {
        return "-".to_string();
    }

    let secs_per_day = 24 * 60 * 60;
    let days_since_epoch = ts / secs_per_day;
    let years = 1970 + days_since_epoch / 365;
    let remaining_days = days_since_epoch % 365;
    let month = remaining_days / 30 + 1;
    let day = remaining_days % 30 + 1;

    format!("{:04}-{:02}-{:02}", years, month.min(12), day.min(31))
}

/// Initialize tracing subscriber with the given logging configuration.
///
/// Supports:
/// - `level`: Base log level (trace, debug, info, warn, error)
/// - `format`: Output format (json, pretty, compact). Default: pretty
/// - `output`: Output target (stdout, stderr). Default: stderr
/// - `filters`: Per-module log level overrides
fn init_tracing(config: &LoggingConfig) {
    let base_level = config.level.as_deref().unwrap_or("info");
    let mut filter_str = base_level.to_string();

    for (module, level) in &config.filters {
        filter_str.push(',');
        filter_str.push_str(module);
        filter_str.push('=');
        filter_str.push_str(level);
    }

    let filter = EnvFilter::try_new(&filter_str).unwrap_or_else(|_| EnvFilter::new("info"));

    let format = config.format.as_deref().unwrap_or("pretty");
    let output = config.output.as_deref().unwrap_or("stderr");

    match (format, output) {
        ("json", "stdout") => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().json().with_writer(io::stdout))
                .init();
        }
        ("json", _) => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().json().with_writer(io::stderr))
                .init();
        }
        ("compact", "stdout") => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().compact().with_writer(io::stdout))
                .init();
        }
        ("compact", _) => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().compact().with_writer(io::stderr))
                .init();
        }
        (_, "stdout") => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_writer(io::stdout))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_writer(io::stderr))
                .init();
        }
    }
}
