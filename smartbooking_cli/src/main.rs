mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use smartbooking_lib::Settings;

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "smartbooking")]
#[command(about = "Administer users and departments of a SmartBooking server")]
struct Cli {
    /// Output format: table, markdown or json
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// Base URL of the API (overrides SMARTBOOKING_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and remember the token
    Login(commands::auth::LoginArgs),
    /// Forget the stored token
    Logout,
    /// Show who the stored token belongs to
    Whoami,
    /// List and edit users
    Users(commands::users::UsersArgs),
    /// List and edit departments
    Departments(commands::departments::DepartmentsArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("smartbooking=info".parse()?),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let format = match cli.output.as_str() {
        "json" => OutputFormat::Json,
        "markdown" | "md" => OutputFormat::Markdown,
        _ => OutputFormat::Table,
    };

    let mut settings = Settings::from_env();
    if let Some(url) = &cli.api_url {
        settings.api_url = url.trim_end_matches('/').to_string();
    }

    match &cli.command {
        Commands::Login(args) => commands::auth::login(args, &settings).await?,
        Commands::Logout => commands::auth::logout(&settings)?,
        Commands::Whoami => commands::auth::whoami(&settings, &format)?,
        Commands::Users(args) => commands::users::run(args, &settings, &format).await?,
        Commands::Departments(args) => {
            commands::departments::run(args, &settings, &format).await?
        }
    }

    Ok(())
}
