//! Standalone vless-admin binary.

use clap::Parser;
use vless_store::cli::AdminArgs;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = AdminArgs::parse();
    vless_store::cli::run(args).await
}
