//! skiff CLI
//!
//! Command-line client for a remote application-management API. Connection
//! settings are resolved once at startup; any error surfaced here exits the
//! process with code 1 after its diagnostics have been printed.

use clap::{Args, Parser, Subcommand};
use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use skiff_client::HttpClient;

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "skiff")]
#[command(version, about = "Client for the application-management API", long_about = None)]
struct Cli {
    /// Base URL of the API, e.g. https://api.example.net
    #[arg(long, env = "SKIFF_HOST", global = true)]
    host: Option<String>,

    /// API user
    #[arg(long, env = "SKIFF_USER", global = true)]
    user: Option<String>,

    /// API password
    #[arg(long, env = "SKIFF_PASSWORD", global = true, hide_env_values = true)]
    password: Option<String>,

    /// Print full request/response diagnostics; status mismatches no
    /// longer abort the command
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Re-indent JSON output with two spaces
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Application operations
    #[command(subcommand)]
    Apps(AppsCommand),
    /// Issue a raw API request
    Request(RequestArgs),
}

#[derive(Subcommand)]
enum AppsCommand {
    /// List applications
    List,
    /// Deploy an application and follow the deployment stream
    Deploy {
        /// Application name
        app: String,
    },
    /// Follow an application's raw log stream
    Logs {
        /// Application name
        app: String,
    },
}

#[derive(Args)]
struct RequestArgs {
    /// Request path, e.g. /applications
    path: String,

    /// HTTP method
    #[arg(short = 'X', long, default_value = "GET")]
    method: String,

    /// Expected response status code
    #[arg(long, default_value_t = 200)]
    want: u16,

    /// JSON request body
    #[arg(short, long)]
    data: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let connection = config::resolve(
        cli.host.clone(),
        cli.user.clone(),
        cli.password.clone(),
        cli.verbose,
        cli.pretty,
    )
    .wrap_err("error reading configuration")?;
    let client = HttpClient::new(connection)?;

    match cli.command {
        Commands::Apps(AppsCommand::List) => commands::apps_list(&client).await,
        Commands::Apps(AppsCommand::Deploy { app }) => commands::apps_deploy(&client, &app).await,
        Commands::Apps(AppsCommand::Logs { app }) => commands::apps_logs(&client, &app).await,
        Commands::Request(args) => {
            commands::raw_request(
                &client,
                &args.method,
                args.want,
                &args.path,
                args.data.as_deref(),
            )
            .await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }
}
