//! Unified vless-rs CLI.
//!
//! This binary provides a unified interface to the vless components:
//! - `vless-rs admin` - Manage provisioned users and the daemon allow-list
//!
//! The admin subcommand can also be run as the standalone `vless-admin`
//! binary.

use std::process::ExitCode;

use clap::{Parser, Subcommand};

/// vless-rs unified CLI.
#[derive(Parser)]
#[command(
    name = "vless-rs",
    version,
    about = "VLESS credential provisioning for Xray Reality servers",
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage provisioned users.
    #[command(name = "admin", alias = "users")]
    Admin(vless_store::cli::AdminArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Admin(args) => vless_store::cli::run(args).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
