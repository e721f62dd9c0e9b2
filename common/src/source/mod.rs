pub mod declaration;
pub mod literal;

use crate::error::{Result, SeedError};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

pub use declaration::{extract_collection, Collection};
pub use literal::parse_array_literal;

/// one element of a collection literal, fields in source order
pub type Record = Map<String, Value>;

/// a parsed source declaration file
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub file_name: String,
    /// file name with the extension stripped; becomes the table name
    pub table: String,
    pub collection: Collection,
}

/// List the files directly inside `dir` whose names end with `extension`,
/// sorted by file name.
pub fn locate_inputs(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(SeedError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(|e| SeedError::io_at(dir, e))? {
        let entry = entry.map_err(|e| SeedError::io_at(dir, e))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let matches = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|n| n.ends_with(extension))
            .unwrap_or(false);
        if matches {
            files.push(path);
        }
    }

    files.sort();
    tracing::debug!(dir = %dir.display(), count = files.len(), "located source files");
    Ok(files)
}

/// `tasks.ts` -> `tasks`
pub fn table_name(file_name: &str, extension: &str) -> String {
    file_name
        .strip_suffix(extension)
        .unwrap_or(file_name)
        .to_string()
}

/// Read and parse one source declaration file.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn load_source(path: &Path, extension: &str) -> Result<SourceFile> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();

    let text = std::fs::read_to_string(path).map_err(|e| SeedError::io_at(path, e))?;
    let collection = extract_collection(&file_name, &text)?;

    Ok(SourceFile {
        table: table_name(&file_name, extension),
        file_name,
        collection,
    })
}
