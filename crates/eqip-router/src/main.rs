//! Eqip Router binary
//!
//! Serves the attribution and ownership pipeline over HTTP.

use eqip_router::{config::RouterConfig, start_server, RouterError};
use std::env;
use std::process;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), RouterError> {
    let args: Vec<String> = env::args().collect();

    let config = if args.len() > 2 && args[1] == "--config" {
        RouterConfig::from_file(&args[2])?
    } else if args.len() > 1 && args[1] == "--help" {
        print_help();
        process::exit(0);
    } else {
        eprintln!("Warning: No config file specified, using defaults (127.0.0.1:8080)");
        eprintln!("Usage: eqip-router --config <path-to-config.toml>");
        eprintln!();
        RouterConfig::default()
    };

    start_server(config).await?;

    Ok(())
}

fn print_help() {
    println!("Eqip Router - Attribution and ownership allocation service");
    println!();
    println!("USAGE:");
    println!("    eqip-router --config <path-to-config.toml>");
    println!();
    println!("OPTIONS:");
    println!("    --config <file>    Load configuration from TOML file");
    println!("    --help             Print this help message");
    println!();
    println!("ROUTES:");
    println!("    GET  /v1/health");
    println!("    POST /v1/agents/attribution/run");
    println!("    POST /v1/agents/attribution/qualitative");
    println!("    POST /v1/agents/allocation/finalize");
    println!("    POST /v1/pipeline/run");
    println!();
    println!("CONFIGURATION:");
    println!("    - bind_address: IP address to bind (e.g., '127.0.0.1')");
    println!("    - bind_port: Port number (e.g., 8080)");
    println!("    - [pipeline]: optional scoring, allocation and validation defaults");
    println!();
}
