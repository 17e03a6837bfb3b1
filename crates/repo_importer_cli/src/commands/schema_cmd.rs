//! The `schema` command: writes the JSON Schema of repository documents.
//!
//! ```bash
//! github-repo-importer schema -o .schemas/repository-config.schema.json
//! ```

use std::path::PathBuf;

use clap::Args;
use colored::Colorize;
use config_manager::settings::Repository;
use config_manager::{Describe, SchemaBuilder, SchemaDocument};
use tracing::instrument;

use crate::config::DEFAULT_SCHEMA_PATH;
use crate::errors::Error;
use crate::output::write_schema;

#[cfg(test)]
#[path = "schema_cmd_tests.rs"]
mod tests;

/// Arguments of the `schema` command
#[derive(Args, Debug, Clone)]
pub struct SchemaArgs {
    /// Path the schema is written to
    #[arg(short, long, default_value = DEFAULT_SCHEMA_PATH)]
    pub output: PathBuf,

    /// Overrides the `$id` of the generated schema
    #[arg(long)]
    pub id: Option<String>,
}

/// Builds the repository schema, honoring an `$id` override.
pub fn build_schema(args: &SchemaArgs) -> Result<SchemaDocument, Error> {
    let mut builder = SchemaBuilder::with_default_rules();
    if let Some(id) = &args.id {
        builder = builder.id(id.clone());
    }
    Ok(builder.build(&Repository::describe())?)
}

/// Execute the schema command
#[instrument]
pub async fn execute(args: &SchemaArgs) -> Result<(), Error> {
    let schema = build_schema(args)?;
    write_schema(&args.output, &schema)?;

    println!(
        "{} Schema written to {}",
        "✓".green(),
        args.output.display().to_string().bold()
    );
    Ok(())
}
