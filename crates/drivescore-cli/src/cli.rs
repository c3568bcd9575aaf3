use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "drivescore",
    version,
    about = "Connection test and data tools for the Drivescore fleet API integration"
)]
pub struct Cli {
    /// Server domain for the initial Authenticate call (overrides GEOTAB_SERVER)
    #[arg(long, global = true)]
    pub server: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Authenticate and fetch a sample of drivers to verify connectivity
    Test(AuthArgs),
    /// List drivers with their risk scores
    Drivers(DriversArgs),
}

#[derive(Args)]
pub struct AuthArgs {
    #[arg(long, env = "GEOTAB_USERNAME")]
    pub username: String,
    #[arg(long, env = "GEOTAB_PASSWORD", hide_env_values = true)]
    pub password: String,
    #[arg(long, env = "GEOTAB_DATABASE")]
    pub database: String,
}

#[derive(Args)]
pub struct DriversArgs {
    #[command(flatten)]
    pub auth: AuthArgs,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}
