use anyhow::Result;
use bizcase::cli::{Cli, Commands, run_simulate};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    bizcase::telemetry::init_logging(&cli.log_level)?;

    match cli.command {
        Commands::Serve(args) => bizcase::api::run_http_server(args.addr()).await?,
        Commands::Simulate(args) => println!("{}", run_simulate(&args)?),
    }

    Ok(())
}
