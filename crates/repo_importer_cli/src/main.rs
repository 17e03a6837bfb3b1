use clap::{Parser, Subcommand};
use repo_importer_cli::commands::{
    bulk_import_cmd::{self, BulkImportArgs},
    import_cmd::{self, ImportArgs},
    schema_cmd::{self, SchemaArgs},
    validate_cmd::{self, ValidateArgs},
};
use repo_importer_cli::config::LOG_ENV_VAR;
use repo_importer_cli::errors::Error;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;

/// GitHub repository importer: capture live repository settings as documents
#[derive(Parser)]
#[command(name = "github-repo-importer")]
#[command(
    about = "Import GitHub repository settings into declarative configuration documents",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import a single repository
    Import(ImportArgs),

    /// Import every in-scope repository of an organization
    BulkImport(BulkImportArgs),

    /// Generate the JSON Schema of repository documents
    Schema(SchemaArgs),

    /// Validate repository documents against the schema
    Validate(ValidateArgs),

    /// Show the CLI version
    Version,
}

async fn run(command: &Commands) -> Result<(), Error> {
    match command {
        Commands::Import(args) => import_cmd::execute(args).await,
        Commands::BulkImport(args) => bulk_import_cmd::execute(args).await,
        Commands::Schema(args) => schema_cmd::execute(args).await,
        Commands::Validate(args) => validate_cmd::execute(args).await,
        Commands::Version => {
            println!(
                "github-repo-importer version {}",
                option_env!("GITHUB_REPO_IMPORTER_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
            );
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    // Logs go to stderr so documents and summaries on stdout stay clean
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli.command).await {
        error!("Error: {e}");
        std::process::exit(e.exit_code());
    }
}
