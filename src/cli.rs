//! Command-line configuration for the projection binary.
//!
//! Every option can also be supplied through a `BIZCASE_*` environment variable.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use tracing::info;

use crate::api::{CalculateRequest, calculate_request};

#[derive(Parser, Debug)]
#[command(
    name = "bizcase",
    about = "48-month cost, savings and ROI projection for automation business cases",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Default log filter when RUST_LOG is unset
    #[arg(long, global = true, env = "BIZCASE_LOG", default_value = "info")]
    pub log_level: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the stateless projection HTTP API
    Serve(ServeArgs),
    /// Project every scenario of a business case JSON file and print the results
    Simulate(SimulateArgs),
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    #[arg(long, env = "BIZCASE_HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,
    #[arg(short, long, env = "BIZCASE_PORT", default_value_t = 8080)]
    pub port: u16,
}

impl ServeArgs {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Business case file: {"assumptions": {...}, "scenarios": [...]}
    #[arg(short, long)]
    pub input: PathBuf,
    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}

/// Read, validate and project a business case file, returning the JSON output.
pub fn run_simulate(args: &SimulateArgs) -> Result<String> {
    let raw = std::fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let request: CalculateRequest = serde_json::from_str(&raw)
        .with_context(|| format!("invalid business case JSON in {}", args.input.display()))?;

    let response = calculate_request(&request)?;
    info!(
        input = %args.input.display(),
        scenarios = response.scenarios.len(),
        "projected business case"
    );

    let json = if args.pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serde_json::to_string(&response)?
    };
    Ok(json)
}
