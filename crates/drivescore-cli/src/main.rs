mod cli;
mod output;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use drivescore_geotab::{GeotabClient, GeotabConfig, authenticate, fetch_drivers};

use cli::{Cli, Commands, OutputFormat};
use output::{print_error, print_success};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        print_error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let client = make_client(cli.server.clone());

    match &cli.command {
        Commands::Test(args) => {
            println!("{}", "=== Fleet API Connection Test ===".cyan());
            println!("Server:   {}", client.default_server());
            println!("Database: {}", args.database);
            println!("Username: {}", args.username);
            println!("Password: *****");

            println!("\n{}", "1. Authenticating...".yellow());
            let session =
                authenticate(&client, &args.username, &args.password, &args.database).await?;
            print_success("Authentication successful");
            println!("Server: {}", session.server);
            let preview: String = session.credentials.session_id.chars().take(10).collect();
            println!("Session ID: {preview}...");

            println!("\n{}", "2. Fetching driver data...".yellow());
            let drivers = fetch_drivers(&client, &session.credentials, &session.server).await?;
            print_success(&format!("Retrieved {} drivers", drivers.len()));

            if !drivers.is_empty() {
                println!("\nSample drivers:");
                for (index, driver) in drivers.iter().take(5).enumerate() {
                    println!("{}. {} ({})", index + 1, driver.name, driver.id);
                }
            }

            println!("\n{}", "=== Test completed successfully! ===".green());
        }
        Commands::Drivers(args) => {
            let session = authenticate(
                &client,
                &args.auth.username,
                &args.auth.password,
                &args.auth.database,
            )
            .await?;
            let drivers = fetch_drivers(&client, &session.credentials, &session.server).await?;
            match args.format {
                OutputFormat::Table => output::print_drivers_table(&drivers),
                OutputFormat::Json => output::print_drivers_json(&drivers),
            }
        }
    }

    Ok(())
}

fn make_client(server: Option<String>) -> GeotabClient {
    // GEOTAB_SERVER applies unless --server overrides it.
    let mut config = GeotabConfig::from_env();
    if let Some(server) = server {
        config.default_server = server;
    }
    GeotabClient::new(config)
}
