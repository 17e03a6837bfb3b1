//! File output for repository documents and the schema.

use std::fs;
use std::path::{Path, PathBuf};

use config_manager::SchemaDocument;
use repo_importer_core::{document_file_name, to_yaml, Repository};
use tracing::info;

use crate::errors::Error;

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;

/// Writes a repository document to `<output_dir>/<name>.yaml`, creating the
/// directory if needed. Returns the path written.
pub fn write_document(output_dir: &Path, repository: &Repository) -> Result<PathBuf, Error> {
    let yaml = to_yaml(repository)?;
    let path = output_dir.join(document_file_name(repository));
    write_file(&path, &yaml)?;

    info!(message = "Wrote repository document", repository = %repository.full_name(), path = ?path);
    Ok(path)
}

/// Writes the schema as indented JSON to `path`, creating parent directories.
pub fn write_schema(path: &Path, schema: &SchemaDocument) -> Result<(), Error> {
    let json = schema.to_pretty_json()?;
    write_file(path, &json)?;

    info!(message = "Wrote schema", path = ?path);
    Ok(())
}

fn write_file(path: &Path, contents: &str) -> Result<(), Error> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| Error::Output {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, contents).map_err(|source| Error::Output {
        path: path.to_path_buf(),
        source,
    })
}
