use crate::config::{ExtractConfig, FailurePolicy};
use crate::error::{Result, SeedError};
use crate::schema::{infer_table, validate_schema, TableSchema};
use crate::source::{load_source, locate_inputs, Record};
use crate::sql::{render_inserts, render_schema};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// first lines of both generated scripts
pub const OUTPUT_HEADER: &str = "-- Generated by seedsql from source data files. Do not edit.\n\n";

/// generated sql for one source file
#[derive(Debug, Clone)]
pub struct TableScripts {
    pub file_name: String,
    pub schema: TableSchema,
    pub schema_sql: String,
    pub inserts_sql: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FileFailure {
    pub file: String,
    pub error: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TableSummary {
    pub table: String,
    pub file: String,
    pub columns: usize,
    pub rows: usize,
}

/// outcome of a generation run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub tables: Vec<TableSummary>,
    pub failures: Vec<FileFailure>,
    pub schema_path: PathBuf,
    pub inserts_path: PathBuf,
}

/// inferred tables without any output written
#[derive(Debug, Clone, Serialize)]
pub struct Inspection {
    pub tables: Vec<TableSchema>,
    pub failures: Vec<FileFailure>,
}

/// Parse, infer, validate and render a single source file.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn convert_file(path: &Path, extension: &str) -> Result<TableScripts> {
    let (file_name, schema, source) = analyze_file(path, extension)?;

    let schema_sql = render_schema(&schema);
    let inserts_sql = render_inserts(&schema.table, &source)?;

    tracing::debug!(
        table = %schema.table,
        columns = schema.columns.len(),
        rows = schema.row_count,
        "rendered table scripts"
    );

    Ok(TableScripts {
        file_name,
        schema,
        schema_sql,
        inserts_sql,
    })
}

fn analyze_file(path: &Path, extension: &str) -> Result<(String, TableSchema, Vec<Record>)> {
    let source = load_source(path, extension)?;
    let schema = infer_table(&source.table, &source.collection.records);
    validate_schema(&source.file_name, &schema)?;
    Ok((source.file_name, schema, source.collection.records))
}

/// Apply `convert` to every file under the given failure policy.
fn process_all<T>(
    files: &[PathBuf],
    policy: FailurePolicy,
    mut convert: impl FnMut(&Path) -> Result<T>,
) -> Result<(Vec<T>, Vec<FileFailure>)> {
    let mut converted = Vec::with_capacity(files.len());
    let mut failures = Vec::new();

    for path in files {
        let file = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        tracing::info!("processing {}", file);

        match convert(path) {
            Ok(item) => converted.push(item),
            Err(e) if policy == FailurePolicy::SkipInvalid => {
                tracing::warn!(file = %file, error = %e, "skipping source file");
                failures.push(FileFailure {
                    file,
                    error: e.to_string(),
                });
            }
            Err(e) => return Err(e),
        }
    }

    Ok((converted, failures))
}

/// Convert every source file and write the combined schema and insert scripts.
///
/// Under [`FailurePolicy::FailFast`] nothing is written when any file fails.
/// Both scripts are staged next to their targets first, so a target that
/// cannot be written leaves the previous outputs in place.
pub fn run(config: &ExtractConfig) -> Result<RunReport> {
    tracing::info!("reading source files from {}", config.input_dir.display());

    let files = locate_inputs(&config.input_dir, &config.extension)?;
    tracing::info!("found {} source files", files.len());

    let (scripts, failures) = process_all(&files, config.failure_policy, |path| {
        convert_file(path, &config.extension)
    })?;

    let mut all_schema = String::from(OUTPUT_HEADER);
    let mut all_inserts = String::from(OUTPUT_HEADER);
    for script in &scripts {
        all_schema.push_str(&script.schema_sql);
        all_inserts.push_str(&script.inserts_sql);
        all_inserts.push('\n');
    }

    std::fs::create_dir_all(&config.output_dir)
        .map_err(|e| SeedError::io_at(&config.output_dir, e))?;

    let schema_path = config.schema_path();
    let inserts_path = config.inserts_path();
    let staged = [
        stage_output(&config.output_dir, &schema_path, &all_schema)?,
        stage_output(&config.output_dir, &inserts_path, &all_inserts)?,
    ];
    for (file, path, bytes) in staged {
        file.persist(&path).map_err(|e| SeedError::io_at(&path, e.error))?;
        tracing::info!(output = %path.display(), bytes, "wrote output");
    }

    let tables = scripts
        .into_iter()
        .map(|s| TableSummary {
            table: s.schema.table,
            file: s.file_name,
            columns: s.schema.columns.len(),
            rows: s.schema.row_count,
        })
        .collect();

    Ok(RunReport {
        tables,
        failures,
        schema_path,
        inserts_path,
    })
}

/// Infer every table without writing anything.
pub fn inspect(config: &ExtractConfig) -> Result<Inspection> {
    let files = locate_inputs(&config.input_dir, &config.extension)?;
    let (tables, failures) = process_all(&files, config.failure_policy, |path| {
        analyze_file(path, &config.extension).map(|(_, schema, _)| schema)
    })?;
    Ok(Inspection { tables, failures })
}

/// Write `contents` to a temporary file in `dir`, ready to be renamed onto `target`.
fn stage_output(
    dir: &Path,
    target: &Path,
    contents: &str,
) -> Result<(NamedTempFile, PathBuf, usize)> {
    if target.is_dir() {
        return Err(SeedError::io_at(
            target,
            std::io::Error::new(std::io::ErrorKind::Other, "output path is a directory"),
        ));
    }
    let mut file = NamedTempFile::new_in(dir).map_err(|e| SeedError::io_at(dir, e))?;
    if let Err(e) = file.write_all(contents.as_bytes()).and_then(|_| file.flush()) {
        return Err(SeedError::io_at(file.path(), e));
    }
    Ok((file, target.to_path_buf(), contents.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_convert_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("surveys.ts");
        fs::write(
            &path,
            "export const surveys = [\n  { id: 1, name: 'Plot Survey', active: true, meta: { region: 'north' } },\n];\n",
        )
        .unwrap();

        let scripts = convert_file(&path, ".ts").unwrap();
        assert_eq!(scripts.file_name, "surveys.ts");
        assert_eq!(
            scripts.schema_sql,
            "DROP TABLE IF EXISTS `surveys`;\nCREATE TABLE `surveys` (\n  `id` VARCHAR(100) PRIMARY KEY,\n  `name` TEXT,\n  `active` TINYINT(1),\n  `meta` JSON\n);\n\n"
        );
        assert_eq!(
            scripts.inserts_sql,
            "INSERT INTO `surveys` (`id`,`name`,`active`,`meta`) VALUES (1,'Plot Survey',1,'{\"region\":\"north\"}');\n"
        );
    }

    #[test]
    fn test_convert_rejects_invalid_table_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("order.ts");
        fs::write(&path, "export const order = [{ id: 'o1' }];").unwrap();

        let err = convert_file(&path, ".ts").unwrap_err();
        assert!(matches!(err, SeedError::InvalidIdentifier { ref identifier, .. } if identifier == "order"));
    }

    #[test]
    fn test_stage_output_refuses_directory_target() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("schema.sql");
        fs::create_dir(&target).unwrap();

        let err = stage_output(dir.path(), &target, "x").unwrap_err();
        assert!(matches!(err, SeedError::IoAt { ref path, .. } if *path == target));
        // nothing but the blocking directory is left behind
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_process_all_fail_fast_stops() {
        let files = vec![PathBuf::from("a.ts"), PathBuf::from("b.ts"), PathBuf::from("c.ts")];
        let mut seen = Vec::new();
        let result = process_all(&files, FailurePolicy::FailFast, |path| {
            seen.push(path.to_path_buf());
            if path.ends_with("b.ts") {
                Err(SeedError::malformed("b.ts", "boom"))
            } else {
                Ok(())
            }
        });
        assert!(result.is_err());
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn test_process_all_skip_invalid_collects() {
        let files = vec![PathBuf::from("a.ts"), PathBuf::from("b.ts"), PathBuf::from("c.ts")];
        let (ok, failures) = process_all(&files, FailurePolicy::SkipInvalid, |path| {
            if path.ends_with("b.ts") {
                Err(SeedError::malformed("b.ts", "boom"))
            } else {
                Ok(path.to_path_buf())
            }
        })
        .unwrap();
        assert_eq!(ok, vec![PathBuf::from("a.ts"), PathBuf::from("c.ts")]);
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].file, "b.ts");
        assert!(failures[0].error.contains("boom"));
    }
}
